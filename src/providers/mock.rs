/*!
 * Mock provider implementation for testing.
 *
 * This module provides an in-memory provider that records every call and
 * can be told to fail:
 * - `MockProvider::working()` - Every request succeeds
 * - `MockProvider::failing()` - Every request fails with a transport error
 * - `with_failing_resource(slug)` - Requests touching `slug` fail
 */

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::ProviderError;
use crate::providers::{
    NewResource, ProjectDetails, ResourceInfo, TranslationProvider, UpdateCounts,
};

/// A request received by the mock
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    ListResources,
    ProjectDetails,
    CreateResource { slug: String, name: String, content: String },
    UpdateResourceContent { resource: String, content: String },
    UpdateTranslationContent { resource: String, language: String, content: String },
    FetchTranslation { resource: String, language: String, mode: String },
    UpdateStringTranslation { resource: String, language: String, string_hash: String, translation: Value },
    UpdateSourceInstruction { resource: String, string_hash: String, comment: String },
    CreateLanguage { language: String, coordinators: Vec<String> },
}

impl MockCall {
    /// True for calls that change provider-side state
    pub fn is_write(&self) -> bool {
        !matches!(
            self,
            Self::ListResources | Self::ProjectDetails | Self::FetchTranslation { .. }
        )
    }
}

/// Behavior mode for the mock provider
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Always fails with a transport error
    Failing,
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<MockCall>,
    details: ProjectDetails,
    translations: HashMap<(String, String), String>,
    failing_resources: HashSet<String>,
    failing_languages: HashSet<String>,
    counts: UpdateCounts,
}

/// Mock provider for testing synchronization behavior
#[derive(Debug, Clone)]
pub struct MockProvider {
    behavior: MockBehavior,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new mock provider with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Create a working mock provider that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock provider that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Make every request about `resource` fail with a transport error
    pub fn with_failing_resource(self, resource: &str) -> Self {
        self.state().failing_resources.insert(resource.to_string());
        self
    }

    /// Make every request about `language` fail with a rejection
    pub fn with_failing_language(self, language: &str) -> Self {
        self.state().failing_languages.insert(language.to_string());
        self
    }

    /// Set the project details returned by `project_details` and `list_resources`
    pub fn with_project_details(self, teams: &[&str], resources: &[&str]) -> Self {
        self.state().details = ProjectDetails {
            teams: teams.iter().map(|t| t.to_string()).collect(),
            resources: resources
                .iter()
                .map(|slug| ResourceInfo {
                    slug: slug.to_string(),
                    name: slug.to_string(),
                })
                .collect(),
        };
        self
    }

    /// Set the body returned when fetching `resource` in `language`
    pub fn with_translation(self, resource: &str, language: &str, body: &str) -> Self {
        self.state()
            .translations
            .insert((resource.to_string(), language.to_string()), body.to_string());
        self
    }

    /// Set the counts returned by content uploads
    pub fn with_counts(self, counts: UpdateCounts) -> Self {
        self.state().counts = counts;
        self
    }

    /// Every call received so far, in arrival order
    pub fn calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    /// Number of calls that would have changed provider-side state
    pub fn write_count(&self) -> usize {
        self.state().calls.iter().filter(|c| c.is_write()).count()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the recorded calls
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, call: MockCall, resource: Option<&str>, language: Option<&str>) -> Result<(), ProviderError> {
        let mut state = self.state();
        state.calls.push(call);

        if self.behavior == MockBehavior::Failing {
            return Err(ProviderError::Transport("Simulated provider failure".to_string()));
        }
        if let Some(resource) = resource {
            if state.failing_resources.contains(resource) {
                return Err(ProviderError::Transport(format!(
                    "Simulated transport failure for {}",
                    resource
                )));
            }
        }
        if let Some(language) = language {
            if state.failing_languages.contains(language) {
                return Err(ProviderError::Rejected {
                    status: 404,
                    body: format!("Language {} not found", language),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TranslationProvider for MockProvider {
    async fn list_resources(&self) -> Result<Vec<ResourceInfo>, ProviderError> {
        self.record(MockCall::ListResources, None, None)?;
        Ok(self.state().details.resources.clone())
    }

    async fn project_details(&self) -> Result<ProjectDetails, ProviderError> {
        self.record(MockCall::ProjectDetails, None, None)?;
        Ok(self.state().details.clone())
    }

    async fn create_resource(&self, resource: &NewResource) -> Result<(), ProviderError> {
        self.record(
            MockCall::CreateResource {
                slug: resource.slug.clone(),
                name: resource.name.clone(),
                content: resource.content.clone(),
            },
            Some(&resource.slug),
            None,
        )
    }

    async fn update_resource_content(
        &self,
        resource: &str,
        content: &str,
    ) -> Result<UpdateCounts, ProviderError> {
        self.record(
            MockCall::UpdateResourceContent {
                resource: resource.to_string(),
                content: content.to_string(),
            },
            Some(resource),
            None,
        )?;
        Ok(self.state().counts)
    }

    async fn update_translation_content(
        &self,
        resource: &str,
        language: &str,
        content: &str,
    ) -> Result<UpdateCounts, ProviderError> {
        self.record(
            MockCall::UpdateTranslationContent {
                resource: resource.to_string(),
                language: language.to_string(),
                content: content.to_string(),
            },
            Some(resource),
            Some(language),
        )?;
        Ok(self.state().counts)
    }

    async fn fetch_translation(
        &self,
        resource: &str,
        language: &str,
        mode: &str,
    ) -> Result<String, ProviderError> {
        self.record(
            MockCall::FetchTranslation {
                resource: resource.to_string(),
                language: language.to_string(),
                mode: mode.to_string(),
            },
            Some(resource),
            Some(language),
        )?;
        self.state()
            .translations
            .get(&(resource.to_string(), language.to_string()))
            .cloned()
            .ok_or_else(|| ProviderError::Rejected {
                status: 404,
                body: format!("No {} translation for {}", language, resource),
            })
    }

    async fn update_string_translation(
        &self,
        resource: &str,
        language: &str,
        string_hash: &str,
        translation: &Value,
    ) -> Result<(), ProviderError> {
        self.record(
            MockCall::UpdateStringTranslation {
                resource: resource.to_string(),
                language: language.to_string(),
                string_hash: string_hash.to_string(),
                translation: translation.clone(),
            },
            Some(resource),
            Some(language),
        )
    }

    async fn update_source_instruction(
        &self,
        resource: &str,
        string_hash: &str,
        comment: &str,
    ) -> Result<(), ProviderError> {
        self.record(
            MockCall::UpdateSourceInstruction {
                resource: resource.to_string(),
                string_hash: string_hash.to_string(),
                comment: comment.to_string(),
            },
            Some(resource),
            None,
        )
    }

    async fn create_language(
        &self,
        language: &str,
        coordinators: &[String],
    ) -> Result<(), ProviderError> {
        self.record(
            MockCall::CreateLanguage {
                language: language.to_string(),
                coordinators: coordinators.to_vec(),
            },
            None,
            Some(language),
        )
    }
}
