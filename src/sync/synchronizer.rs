use log::{debug, info, warn};
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::app_config::{resource_filename, Config};
use crate::errors::AppError;
use crate::file_utils::{normalize_line_endings, FileManager};
use crate::language_utils::{from_provider_code, normalize_to_provider_code, to_provider_code};
use crate::providers::{NewResource, ResourceInfo, TranslationProvider};
use crate::resource::{
    is_empty_value, reorder_and_replace_text, sanitize, string_hash, ResourceDocument,
    RESOURCE_EXTENSION,
};

use super::fanout::settle_all;
use super::unit::{SyncDetail, SyncReport, SyncResult, UnitOfWork};

/// Name accepted by `provision_language` to create every local language
pub const ALL_LANGUAGES: &str = "all";

/// Keeps a local resource tree and a provider project in step
///
/// The configuration is fixed for the lifetime of the synchronizer. Batch
/// operations fan out one request per resource/language pair and report
/// every outcome; only problems that stop a batch from being planned at all
/// are returned as errors.
#[derive(Debug)]
pub struct ResourceSynchronizer<P: TranslationProvider> {
    config: Config,
    provider: P,
}

// One upload of a translation file
struct TranslationUpload {
    path: PathBuf,
    slug: String,
    language: String,
}

// One string translation found on disk
struct KeyTranslation {
    language: String,
    value: Value,
}

impl<P: TranslationProvider> ResourceSynchronizer<P> {
    pub fn new(config: Config, provider: P) -> Self {
        Self { config, provider }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Slugs of the source-language resources, ignore-list applied
    pub fn source_resources(&self) -> Result<Vec<String>, AppError> {
        let files = FileManager::find_files(self.config.source_dir(), RESOURCE_EXTENSION)?;
        let mut slugs: Vec<String> = files
            .iter()
            .filter(|path| !self.is_ignored_path(path))
            .filter_map(FileManager::file_stem)
            .collect();
        slugs.sort();
        slugs.dedup();
        Ok(slugs)
    }

    /// Local tags of the locale directories, source language excluded
    ///
    /// Directories whose names are not locale tags are skipped silently.
    pub fn translation_locales(&self) -> Result<Vec<String>, AppError> {
        let source = self.source_language();
        let locales = FileManager::list_subdirectories(self.config.strings_dir())?
            .iter()
            .filter_map(FileManager::file_name)
            .filter(|name| to_provider_code(name).is_some_and(|code| code != source))
            .collect();
        Ok(locales)
    }

    fn source_language(&self) -> String {
        normalize_to_provider_code(&self.config.transifex.source_language)
    }

    fn is_ignored_path(&self, path: &Path) -> bool {
        FileManager::file_name(path).is_some_and(|name| self.config.is_ignored(&name))
    }

    fn read_document(path: &Path) -> Result<ResourceDocument, AppError> {
        let text = FileManager::read_to_string(path)?;
        Ok(ResourceDocument::parse_with_origin(&text, &path.to_string_lossy())?)
    }

    /// Read, sanitize and serialize a resource file for upload
    fn upload_content(path: &Path) -> Result<String, AppError> {
        let mut document = Self::read_document(path)?;
        sanitize(&mut document)?;
        Ok(document.to_pretty_json())
    }

    /// List the resources known to the provider
    pub async fn list_resources(&self) -> Result<Vec<ResourceInfo>, AppError> {
        Ok(self.provider.list_resources().await?)
    }

    /// Upload the source-language content of one resource
    pub async fn push_resource(&self, slug: &str) -> SyncResult {
        let mut unit = UnitOfWork::new(slug);
        unit.begin();
        let content = match Self::upload_content(&self.config.source_resource_path(slug)) {
            Ok(content) => content,
            Err(e) => return unit.settle(Err(e)),
        };

        let outcome = self
            .provider
            .update_resource_content(slug, &content)
            .await
            .map(SyncDetail::Counts)
            .map_err(AppError::from);
        unit.settle(outcome)
    }

    /// Upload every source-language resource
    pub async fn push_all_resources(&self) -> Result<SyncReport, AppError> {
        let slugs = self.source_resources()?;
        info!("Pushing {} resources", slugs.len());

        let results = settle_all(slugs, self.config.concurrent_requests, |slug| async move {
            self.push_resource(&slug).await
        })
        .await;
        Ok(SyncReport::new(results))
    }

    /// Create a new resource at the provider from a source-language file
    ///
    /// Ignored resources are refused unless `force` is set.
    pub async fn add_resource(
        &self,
        slug: &str,
        name: Option<&str>,
        force: bool,
    ) -> Result<SyncResult, AppError> {
        let path = self.config.source_resource_path(slug);
        let filename = resource_filename(slug);

        if !FileManager::file_exists(&path) {
            return Err(AppError::Usage(format!(
                "{} doesn't exist in {}",
                filename, self.config.local_project.source_lang_strings_path
            )));
        }
        if self.config.is_ignored(&filename) && !force {
            return Err(AppError::Usage(format!(
                "{:?} is listed in ignoredResources, use --force to add it anyway",
                path
            )));
        }

        let resource = NewResource {
            name: name.unwrap_or(slug).to_string(),
            slug: slug.to_string(),
            content: Self::upload_content(&path)?,
        };

        let mut unit = UnitOfWork::new(slug);
        unit.begin();
        let outcome = self
            .provider
            .create_resource(&resource)
            .await
            .map(|_| SyncDetail::Done)
            .map_err(AppError::from);
        Ok(unit.settle(outcome))
    }

    /// Upload translation files for one locale directory or all of them
    pub async fn push_translations(&self, locale: Option<&str>) -> Result<SyncReport, AppError> {
        let locales = match locale {
            Some(tag) => vec![tag.to_string()],
            None => self.translation_locales()?,
        };
        let source = self.source_language();

        let mut uploads = Vec::new();
        for tag in locales {
            let Some(language) = to_provider_code(&tag).filter(|code| *code != source) else {
                debug!("Skipping directory {}, not a translation locale", tag);
                continue;
            };
            let dir = self.config.strings_dir().join(&tag);
            if !FileManager::dir_exists(&dir) {
                warn!("No translation directory {:?}", dir);
                continue;
            }
            for path in FileManager::find_files(&dir, RESOURCE_EXTENSION)? {
                if self.is_ignored_path(&path) {
                    continue;
                }
                if let Some(slug) = FileManager::file_stem(&path) {
                    uploads.push(TranslationUpload {
                        path,
                        slug,
                        language: language.clone(),
                    });
                }
            }
        }

        let results = settle_all(uploads, self.config.concurrent_requests, |upload| async move {
            let mut unit = UnitOfWork::new(&upload.slug).with_locale(&upload.language);
            unit.begin();
            let content = match Self::upload_content(&upload.path) {
                Ok(content) => content,
                Err(e) => return unit.settle(Err(e)),
            };
            let outcome = self
                .provider
                .update_translation_content(&upload.slug, &upload.language, &content)
                .await
                .map(SyncDetail::Counts)
                .map_err(AppError::from);
            unit.settle(outcome)
        })
        .await;
        Ok(SyncReport::new(results))
    }

    /// Download translations and write one file per language and resource
    ///
    /// `languages` restricts the download to the given codes, in either
    /// notation; an empty slice means every language team of the project.
    pub async fn pull_translations(&self, languages: &[String]) -> Result<SyncReport, AppError> {
        let filter: Vec<String> = languages
            .iter()
            .map(|code| normalize_to_provider_code(code))
            .collect();

        let details = self.provider.project_details().await?;
        let mut pairs = Vec::new();
        for team in details
            .teams
            .iter()
            .filter(|team| filter.is_empty() || filter.contains(*team))
        {
            for resource in &details.resources {
                if self.config.is_ignored(&resource_filename(&resource.slug)) {
                    continue;
                }
                pairs.push((team.clone(), resource.slug.clone()));
            }
        }
        info!("Fetching {} translation files", pairs.len());

        let mode = self.config.transifex.translation_mode.as_str();
        let results = settle_all(pairs, self.config.concurrent_requests, |(language, slug)| async move {
            let mut unit = UnitOfWork::new(&slug).with_locale(&language);
            unit.begin();
            let outcome = match self.provider.fetch_translation(&slug, &language, mode).await {
                Ok(body) => {
                    info!("Received {} translation for resource {}", language, slug);
                    let path = self
                        .config
                        .translation_resource_path(&from_provider_code(&language), &slug);
                    FileManager::write_to_file(&path, &normalize_line_endings(&body))
                        .map(|_| SyncDetail::Written(path))
                }
                Err(e) => Err(AppError::from(e)),
            };
            unit.settle(outcome)
        })
        .await;
        Ok(SyncReport::new(results))
    }

    /// Upload the translations of a single key from the locale directories
    ///
    /// Fails with a usage error, before any request is made, when no locale
    /// file holds a non-empty value for the key.
    pub async fn push_single_translation_key(
        &self,
        resource: &str,
        key: &str,
        locales: Option<&[String]>,
    ) -> Result<SyncReport, AppError> {
        if !FileManager::file_exists(self.config.source_resource_path(resource)) {
            return Err(AppError::Usage(format!(
                "No resource file {} found",
                resource_filename(resource)
            )));
        }

        let locales = match locales {
            Some(tags) => tags.to_vec(),
            None => self.translation_locales()?,
        };

        let source = self.source_language();
        let mut local_failures = Vec::new();
        let mut translations = Vec::new();
        for tag in &locales {
            let Some(language) = to_provider_code(tag).filter(|code| *code != source) else {
                debug!("Skipping {}, not a translation locale", tag);
                continue;
            };
            let path = self.config.translation_resource_path(tag, resource);
            if !FileManager::file_exists(&path) || self.is_ignored_path(&path) {
                continue;
            }
            match Self::read_document(&path) {
                Ok(document) => {
                    if let Some(value) = document.get(key).filter(|v| !is_empty_value(v)) {
                        translations.push(KeyTranslation {
                            language,
                            value: value.clone(),
                        });
                    }
                }
                Err(e) => {
                    let mut unit = UnitOfWork::new(resource).with_locale(language).with_key(key);
                    unit.begin();
                    local_failures.push(unit.settle(Err(e)));
                }
            }
        }

        if translations.is_empty() {
            return Err(AppError::Usage(format!("No keys for {} found", key)));
        }

        let hash = string_hash(key);
        let hash = hash.as_str();
        let pushed = settle_all(translations, self.config.concurrent_requests, |translation| async move {
            let mut unit = UnitOfWork::new(resource)
                .with_locale(&translation.language)
                .with_key(key);
            unit.begin();
            let outcome = self
                .provider
                .update_string_translation(resource, &translation.language, hash, &translation.value)
                .await
                .map(|_| SyncDetail::Done)
                .map_err(AppError::from);
            unit.settle(outcome)
        })
        .await;

        local_failures.extend(pushed);
        Ok(SyncReport::new(local_failures))
    }

    /// Create a language team for one code, or for every local locale with `all`
    pub async fn provision_language(&self, code: &str) -> Result<SyncReport, AppError> {
        if code.trim().is_empty() {
            return Err(AppError::Usage(
                "a language code or 'all' is required".to_string(),
            ));
        }

        let languages: Vec<String> = if code == ALL_LANGUAGES {
            self.translation_locales()?
                .iter()
                .filter_map(|tag| to_provider_code(tag))
                .collect()
        } else {
            vec![normalize_to_provider_code(code)]
        };

        let project = self.config.transifex.project_slug.as_str();
        let coordinators = self.config.lang_coordinators();
        let results = settle_all(languages, self.config.concurrent_requests, |language| async move {
            let mut unit = UnitOfWork::new(project).with_locale(&language);
            unit.begin();
            let outcome = self
                .provider
                .create_language(&language, coordinators)
                .await
                .map(|_| SyncDetail::Done)
                .map_err(AppError::from);
            unit.settle(outcome)
        })
        .await;
        Ok(SyncReport::new(results))
    }

    /// Replace the translator instructions of one source string
    pub async fn update_key_instruction(
        &self,
        resource: &str,
        key: &str,
        comment: &str,
    ) -> Result<SyncResult, AppError> {
        if resource.is_empty() {
            return Err(AppError::Usage("No resource defined.".to_string()));
        }
        if key.is_empty() {
            return Err(AppError::Usage("No key defined.".to_string()));
        }
        if comment.is_empty() {
            return Err(AppError::Usage("No comment defined.".to_string()));
        }
        if !FileManager::file_exists(self.config.source_resource_path(resource)) {
            return Err(AppError::Usage(format!(
                "Resource file {} not found in {}",
                resource_filename(resource),
                self.config.local_project.source_lang_strings_path
            )));
        }

        let mut unit = UnitOfWork::new(resource).with_key(key);
        unit.begin();
        let outcome = self
            .provider
            .update_source_instruction(resource, &string_hash(key), comment)
            .await
            .map(|_| SyncDetail::Done)
            .map_err(AppError::from);
        Ok(unit.settle(outcome))
    }

    /// Rewrite translation files so they follow the layout of the source files
    ///
    /// `resources` (slugs) and `locales` (local tags) restrict the pairs that
    /// are processed. Missing translation files are skipped with a warning.
    /// An unreadable source file fails the units of that resource only.
    pub fn order_translations(
        &self,
        resources: Option<&[String]>,
        locales: Option<&[String]>,
    ) -> Result<SyncReport, AppError> {
        let slugs: Vec<String> = self
            .source_resources()?
            .into_iter()
            .filter(|slug| {
                resources.is_none_or(|wanted| {
                    wanted
                        .iter()
                        .any(|w| w == slug || *w == resource_filename(slug))
                })
            })
            .collect();
        let locales = match locales {
            Some(tags) => tags.to_vec(),
            None => self.translation_locales()?,
        };

        let mut results = Vec::new();
        for slug in &slugs {
            let source_path = self.config.source_resource_path(slug);
            let source_text = match FileManager::read_to_string(&source_path) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Cannot order translations of {}: {}", slug, e);
                    let message = match e {
                        AppError::File(message) => message,
                        other => other.to_string(),
                    };
                    for tag in &locales {
                        let mut unit = UnitOfWork::new(slug).with_locale(tag);
                        unit.begin();
                        results.push(unit.settle(Err(AppError::File(message.clone()))));
                    }
                    continue;
                }
            };

            for tag in &locales {
                let mut unit = UnitOfWork::new(slug).with_locale(tag);
                unit.begin();
                let path = self.config.translation_resource_path(tag, slug);
                if !FileManager::file_exists(&path) {
                    warn!("No translation file {:?}", path);
                    results.push(unit.settle(Ok(SyncDetail::Skipped(format!(
                        "no translation file {:?}",
                        path
                    )))));
                    continue;
                }

                debug!("Sorting {:?}", path);
                let outcome = Self::merge_into_source_layout(&source_text, &path);
                results.push(unit.settle(outcome));
            }
        }

        Ok(SyncReport::new(results))
    }

    // The merged text is built completely before the file is touched
    fn merge_into_source_layout(source_text: &str, path: &Path) -> Result<SyncDetail, AppError> {
        let translated_text = FileManager::read_to_string(path)?;
        let report = reorder_and_replace_text(source_text, &translated_text, &path.to_string_lossy())?;

        if !report.is_complete() {
            warn!(
                "{:?}: {} translated keys are missing from the source file: {}",
                path,
                report.unmatched.len(),
                report.unmatched.join(", ")
            );
        }

        info!("Rewriting {:?}", path);
        FileManager::write_to_file(path, &report.text)?;
        Ok(SyncDetail::Merged {
            path: path.to_path_buf(),
            unmatched: report.unmatched,
        })
    }
}
