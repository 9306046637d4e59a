/*!
 * Resource file handling.
 *
 * - `document`: ordered key-value model of a `.resjson` file
 * - `relaxed`: tolerant syntax accepted by the parser
 * - `sanitize`: pruning applied before upload
 * - `identity`: provider string hashes
 * - `merge`: structural merge of translated values into source text
 */

pub mod document;
pub mod identity;
pub mod merge;
pub mod relaxed;
pub mod sanitize;

pub use document::{
    annotation_key_for, data_key_for_annotation, is_annotation_key, is_empty_value,
    ResourceDocument,
};
pub use identity::string_hash;
pub use merge::{reorder_and_replace, reorder_and_replace_text, MergeReport};
pub use sanitize::{prune_empty_values, prune_orphan_annotations, sanitize};

/// File extension of resource files
pub const RESOURCE_EXTENSION: &str = "resjson";
