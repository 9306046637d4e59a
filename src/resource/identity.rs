/// Identifier the provider uses to address one source string.
///
/// The provider hashes `<key>:<context>` with MD5; resource strings never
/// carry a context, so the input is the key followed by a colon.
pub fn string_hash(key: &str) -> String {
    format!("{:x}", md5::compute(format!("{}:", key).as_bytes()))
}
