/*!
 * Provider implementations for translation-management services.
 *
 * This module contains the interface the synchronizer talks to and its
 * implementations:
 * - Transifex: HTTP client for the project API
 * - Mock: in-memory provider that records calls
 */

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// A resource as listed by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceInfo {
    pub slug: String,

    #[serde(default)]
    pub name: String,
}

/// Project details: language teams and resources
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectDetails {
    /// Provider codes of the project's language teams
    #[serde(default)]
    pub teams: Vec<String>,

    #[serde(default)]
    pub resources: Vec<ResourceInfo>,
}

/// String counts returned after a content upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UpdateCounts {
    #[serde(default)]
    pub strings_added: u64,

    #[serde(default)]
    pub strings_updated: u64,

    #[serde(default)]
    pub strings_delete: u64,
}

/// Resource creation payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewResource {
    pub name: String,
    pub slug: String,
    pub content: String,
}

/// Common trait for translation-management providers
///
/// Every method is a single request/response exchange. Implementations
/// report a missing response as `ProviderError::Transport` and an unexpected
/// status as `ProviderError::Rejected`.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// List the resources of the project
    async fn list_resources(&self) -> Result<Vec<ResourceInfo>, ProviderError>;

    /// Fetch language teams and resources of the project
    async fn project_details(&self) -> Result<ProjectDetails, ProviderError>;

    /// Create a new resource
    async fn create_resource(&self, resource: &NewResource) -> Result<(), ProviderError>;

    /// Replace the source content of a resource
    async fn update_resource_content(
        &self,
        resource: &str,
        content: &str,
    ) -> Result<UpdateCounts, ProviderError>;

    /// Replace the translation of a resource for one language
    async fn update_translation_content(
        &self,
        resource: &str,
        language: &str,
        content: &str,
    ) -> Result<UpdateCounts, ProviderError>;

    /// Download the translated file of a resource for one language
    async fn fetch_translation(
        &self,
        resource: &str,
        language: &str,
        mode: &str,
    ) -> Result<String, ProviderError>;

    /// Set the translation of one string, addressed by its hash
    async fn update_string_translation(
        &self,
        resource: &str,
        language: &str,
        string_hash: &str,
        translation: &Value,
    ) -> Result<(), ProviderError>;

    /// Set the translator instructions of one source string
    async fn update_source_instruction(
        &self,
        resource: &str,
        string_hash: &str,
        comment: &str,
    ) -> Result<(), ProviderError>;

    /// Create a language team
    async fn create_language(
        &self,
        language: &str,
        coordinators: &[String],
    ) -> Result<(), ProviderError>;
}

pub mod mock;
pub mod transifex;

pub use mock::{MockCall, MockProvider};
pub use transifex::Transifex;
