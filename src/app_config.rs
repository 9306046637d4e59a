use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::file_utils::FileManager;
use crate::resource::{relaxed, RESOURCE_EXTENSION};

/// Application configuration module
/// This module handles loading, overriding and validating the settings that
/// describe the provider project and the local resource tree.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Provider project settings
    #[serde(default)]
    pub transifex: TransifexConfig,

    /// Local resource tree settings
    #[serde(default)]
    pub local_project: LocalProjectConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Maximum number of provider requests in flight at once
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Provider project settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransifexConfig {
    /// Base URL of the provider API
    #[serde(default)]
    pub api: String,

    /// Basic auth credentials
    #[serde(default)]
    pub auth: AuthConfig,

    /// Project identifier at the provider
    #[serde(default)]
    pub project_slug: String,

    /// Coordinators assigned to newly created language teams
    #[serde(default)]
    pub lang_coordinators: Option<Vec<String>>,

    /// Source language in provider notation, e.g. `en_US`
    #[serde(default)]
    pub source_language: String,

    /// Mode used when downloading translations
    #[serde(default = "default_translation_mode")]
    pub translation_mode: String,
}

/// Basic auth credentials
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AuthConfig {
    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub pass: String,
}

/// Local resource tree settings
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalProjectConfig {
    /// Directory holding one subdirectory per locale
    #[serde(default)]
    pub strings_path: String,

    /// Directory holding the source-language resources
    #[serde(default)]
    pub source_lang_strings_path: String,

    /// Resource file names excluded from every operation
    #[serde(default)]
    pub ignored_resources: Vec<String>,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Values given on the command line, applied over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api: Option<String>,
    pub project_slug: Option<String>,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub strings_path: Option<String>,
    pub source_lang_strings_path: Option<String>,
    pub log_level: Option<LogLevel>,
}

fn default_concurrent_requests() -> usize {
    8
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_translation_mode() -> String {
    "default".to_string()
}

impl Config {
    /// Read a config file written in relaxed JSON
    ///
    /// A missing file yields the defaults so that every setting can come from
    /// the command line; `validate` reports what is still missing.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !FileManager::file_exists(path) {
            warn!("Config file not found at {:?}, relying on command line options", path);
            return Ok(Self::default());
        }

        let text = FileManager::read_to_string(path)?;
        Self::from_relaxed_str(&text)
            .map_err(|e| AppError::Configuration(format!("could not parse {:?}: {}", path, e)))
    }

    /// Parse config text written in relaxed JSON
    pub fn from_relaxed_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(&relaxed::to_strict_json(text))
    }

    /// Apply command line overrides; overrides win over file values
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(api) = &overrides.api {
            self.transifex.api = api.clone();
        }
        if let Some(slug) = &overrides.project_slug {
            self.transifex.project_slug = slug.clone();
        }
        if let Some(user) = &overrides.user {
            self.transifex.auth.user = user.clone();
        }
        if let Some(pass) = &overrides.pass {
            self.transifex.auth.pass = pass.clone();
        }
        if let Some(path) = &overrides.strings_path {
            self.local_project.strings_path = path.clone();
        }
        if let Some(path) = &overrides.source_lang_strings_path {
            self.local_project.source_lang_strings_path = path.clone();
        }
        if let Some(level) = &overrides.log_level {
            self.log_level = level.clone();
        }
        self
    }

    /// Validate that every required setting is present
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("transifex.api", self.transifex.api.is_empty()),
            ("transifex.auth.user", self.transifex.auth.user.is_empty()),
            ("transifex.auth.pass", self.transifex.auth.pass.is_empty()),
            ("transifex.projectSlug", self.transifex.project_slug.is_empty()),
            ("transifex.langCoordinators", self.transifex.lang_coordinators.is_none()),
            ("transifex.sourceLanguage", self.transifex.source_language.is_empty()),
            ("localProject.stringsPath", self.local_project.strings_path.is_empty()),
            (
                "localProject.sourceLangStringsPath",
                self.local_project.source_lang_strings_path.is_empty(),
            ),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, is_missing)| *is_missing)
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(AppError::Configuration(format!(
                "missing option(s): {}",
                missing.join(", ")
            )));
        }

        if self.concurrent_requests == 0 {
            return Err(AppError::Configuration(
                "concurrentRequests must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Coordinators for new language teams
    pub fn lang_coordinators(&self) -> &[String] {
        self.transifex.lang_coordinators.as_deref().unwrap_or(&[])
    }

    /// Whether a resource file name is on the ignore-list
    pub fn is_ignored(&self, filename: &str) -> bool {
        self.local_project.ignored_resources.iter().any(|f| f == filename)
    }

    pub fn strings_dir(&self) -> PathBuf {
        PathBuf::from(&self.local_project.strings_path)
    }

    pub fn source_dir(&self) -> PathBuf {
        PathBuf::from(&self.local_project.source_lang_strings_path)
    }

    /// Path of a source-language resource
    pub fn source_resource_path(&self, slug: &str) -> PathBuf {
        self.source_dir().join(resource_filename(slug))
    }

    /// Path of a resource inside a locale directory
    pub fn translation_resource_path(&self, locale_tag: &str, slug: &str) -> PathBuf {
        self.strings_dir().join(locale_tag).join(resource_filename(slug))
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            transifex: TransifexConfig::default(),
            local_project: LocalProjectConfig::default(),
            log_level: LogLevel::default(),
            concurrent_requests: default_concurrent_requests(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for TransifexConfig {
    fn default() -> Self {
        Self {
            api: String::new(),
            auth: AuthConfig::default(),
            project_slug: String::new(),
            lang_coordinators: None,
            source_language: String::new(),
            translation_mode: default_translation_mode(),
        }
    }
}

/// File name of the resource identified by `slug`
pub fn resource_filename(slug: &str) -> String {
    format!("{}.{}", slug, RESOURCE_EXTENSION)
}
