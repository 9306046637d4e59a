use anyhow::{anyhow, Context, Result};
use log::{error, info, warn};

use crate::app_config::Config;
use crate::language_utils::{from_provider_code, normalize_to_provider_code};
use crate::providers::{Transifex, TranslationProvider};
use crate::sync::{ResourceSynchronizer, SyncDetail, SyncReport, SyncResult};

// @module: Application controller for resource synchronization

/// Main application controller: runs one command and reports its outcome
pub struct Controller<P: TranslationProvider = Transifex> {
    // @field: Synchronizer bound to the configured provider
    synchronizer: ResourceSynchronizer<P>,
}

impl Controller<Transifex> {
    // @method: Create a controller talking to the configured provider
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        let provider = Transifex::from_config(&config).context("Failed to create provider client")?;
        Ok(Self {
            synchronizer: ResourceSynchronizer::new(config, provider),
        })
    }
}

impl<P: TranslationProvider> Controller<P> {
    /// Create a controller around an already constructed provider
    pub fn with_provider(config: Config, provider: P) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self {
            synchronizer: ResourceSynchronizer::new(config, provider),
        })
    }

    pub fn synchronizer(&self) -> &ResourceSynchronizer<P> {
        &self.synchronizer
    }

    /// Print the resources of the provider project
    pub async fn list_resources(&self) -> Result<()> {
        let resources = self.synchronizer.list_resources().await?;
        if resources.is_empty() {
            info!("No resources found. You can add resources with the add-resource command.");
        } else {
            info!("Project resources:");
            for resource in resources {
                info!("{}", if resource.name.is_empty() { &resource.slug } else { &resource.name });
            }
        }
        Ok(())
    }

    /// Download translations, then reorder them after the source files
    pub async fn pull_translations(&self, languages: &[String]) -> Result<()> {
        let report = self.synchronizer.pull_translations(languages).await?;
        for result in &report.results {
            match &result.outcome {
                Ok(SyncDetail::Written(path)) => {
                    info!("Wrote {} to {:?}", result.unit, path)
                }
                Ok(_) => {}
                Err(e) => error!("Failed to fetch {}: {}", result.unit, e),
            }
        }

        let locales: Vec<String> = languages
            .iter()
            .map(|code| from_provider_code(&normalize_to_provider_code(code)))
            .collect();
        let ordered = self.order_translations(None, (!locales.is_empty()).then_some(&locales[..]));

        Self::conclude("pull translations", &report)?;
        ordered
    }

    /// Upload every source-language resource
    pub async fn push_resources(&self) -> Result<()> {
        let report = self.synchronizer.push_all_resources().await?;
        for result in &report.results {
            match &result.outcome {
                Ok(SyncDetail::Counts(counts)) => {
                    info!("Resource {} updated: ", result.unit.resource);
                    info!(
                        "Strings added: {}, strings updated: {}, strings deleted: {}",
                        counts.strings_added, counts.strings_updated, counts.strings_delete
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    error!("Failed to push resource {}: {}", result.unit.resource, e);
                    error!("Check that the resource is already added to the provider.");
                }
            }
        }
        Self::conclude("push resources", &report)
    }

    /// Upload translation files
    pub async fn push_translations(&self, locale: Option<&str>) -> Result<()> {
        let report = self.synchronizer.push_translations(locale).await?;
        for result in &report.results {
            let language = result.unit.locale.as_deref().unwrap_or_default();
            match &result.outcome {
                Ok(SyncDetail::Counts(counts)) => {
                    info!(
                        "Translation for {} of resource {} uploaded",
                        language, result.unit.resource
                    );
                    info!(
                        "Strings added: {}, updated: {}, deleted: {}",
                        counts.strings_added, counts.strings_updated, counts.strings_delete
                    );
                }
                Ok(_) => {}
                Err(e) => error!(
                    "Failed to push {} translation for {}: {}",
                    language, result.unit.resource, e
                ),
            }
        }
        Self::conclude("push translations", &report)
    }

    /// Create a new resource at the provider
    pub async fn add_resource(&self, slug: &str, name: Option<&str>, force: bool) -> Result<()> {
        let result = self.synchronizer.add_resource(slug, name, force).await?;
        Self::conclude_single(result)?;
        info!("Uploaded resource {}", slug);
        Ok(())
    }

    /// Upload one key's translations from the locale directories
    pub async fn push_translation_key(
        &self,
        resource: &str,
        key: &str,
        locales: Option<&[String]>,
    ) -> Result<()> {
        let report = self
            .synchronizer
            .push_single_translation_key(resource, key, locales)
            .await?;
        for result in &report.results {
            let language = result.unit.locale.as_deref().unwrap_or_default();
            match &result.outcome {
                Ok(_) => info!(
                    "Translation for '{}' in resource '{}' updated for language {}",
                    key, resource, language
                ),
                Err(e) => error!(
                    "Failed to update translation of '{}' in resource '{}' for language {}: {}",
                    key, resource, language, e
                ),
            }
        }
        Self::conclude("push translation key", &report)
    }

    /// Create one or all language teams
    pub async fn create_language(&self, code: &str) -> Result<()> {
        let report = self.synchronizer.provision_language(code).await?;
        for result in &report.results {
            let language = result.unit.locale.as_deref().unwrap_or_default();
            match &result.outcome {
                Ok(_) => info!("Created language {}", language),
                Err(e) => error!("Error while creating language {}: {}", language, e),
            }
        }
        Self::conclude("create language", &report)
    }

    /// Update translator instructions for one key
    pub async fn add_instruction(&self, resource: &str, key: &str, comment: &str) -> Result<()> {
        info!(
            "Updating key {} in resource {} with comment {}",
            key, resource, comment
        );
        let result = self
            .synchronizer
            .update_key_instruction(resource, key, comment)
            .await?;
        if let Err(e) = &result.outcome {
            warn!("Check that the key {} exists in {}.resjson", key, resource);
            return Err(anyhow!("Failed to update instruction: {}", e));
        }
        info!("Comment updated to {}", comment);
        Ok(())
    }

    /// Rewrite translation files after the source files' layout
    pub fn order_translations(
        &self,
        resources: Option<&[String]>,
        locales: Option<&[String]>,
    ) -> Result<()> {
        let report = self.synchronizer.order_translations(resources, locales)?;
        for result in report.failed() {
            if let Err(e) = &result.outcome {
                warn!("Failed to sort {}: {}", result.unit, e);
            }
        }
        Self::conclude("order translations", &report)
    }

    fn conclude(command: &str, report: &SyncReport) -> Result<()> {
        if report.is_success() {
            info!("{}: {} of {} succeeded", command, report.success_count(), report.len());
            Ok(())
        } else {
            Err(anyhow!(
                "{}: {} of {} failed",
                command,
                report.failure_count(),
                report.len()
            ))
        }
    }

    fn conclude_single(result: SyncResult) -> Result<()> {
        result.into_result().map(|_| ()).map_err(|e| anyhow!(e))
    }
}
