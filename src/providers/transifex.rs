use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use url::Url;

use crate::app_config::Config;
use crate::errors::ProviderError;

use super::{NewResource, ProjectDetails, ResourceInfo, TranslationProvider, UpdateCounts};

/// Content type tag for `.resjson` uploads
const I18N_TYPE: &str = "RESJSON";

/// Transifex client for the project API
#[derive(Debug, Clone)]
pub struct Transifex {
    /// HTTP client for API requests
    client: Client,
    /// API base URL
    base_url: Url,
    /// Project slug
    project: String,
    user: String,
    pass: String,
}

/// Upload payload for source or translation content
#[derive(Debug, Serialize)]
struct ContentRequest<'a> {
    content: &'a str,
    i18n_type: &'a str,
}

/// Resource creation payload as sent over the wire
#[derive(Debug, Serialize)]
struct CreateResourceRequest<'a> {
    name: &'a str,
    slug: &'a str,
    content: &'a str,
    i18n_type: &'a str,
}

impl Transifex {
    /// Create a client for `project` at `api`
    pub fn new(
        api: &str,
        project: impl Into<String>,
        user: impl Into<String>,
        pass: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ProviderError> {
        // Segments are appended to the base, so it must be a directory-like URL
        let base_url = Url::parse(api.trim_end_matches('/'))
            .map_err(|e| ProviderError::Transport(format!("invalid API URL {}: {}", api, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ProviderError::Transport(format!("invalid API URL {}", api)));
        }

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            base_url,
            project: project.into(),
            user: user.into(),
            pass: pass.into(),
        })
    }

    /// Create a client from the application configuration
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Self::new(
            &config.transifex.api,
            config.transifex.project_slug.clone(),
            config.transifex.auth.user.clone(),
            config.transifex.auth.pass.clone(),
            config.timeout_secs,
        )
    }

    /// Build `<api>/project/<slug>/<segments...>`; each segment is percent-encoded
    fn project_url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("project").push(&self.project);
            path.extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder, url: &Url, expected: StatusCode) -> Result<String, ProviderError> {
        let response = request
            .basic_auth(&self.user, Some(&self.pass))
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", url, e);
                ProviderError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        if status != expected {
            debug!("Error while accessing URL {}: [{}] {}", url, status.as_u16(), body);
            return Err(ProviderError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Received {} response from {}", status.as_u16(), url);
        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ProviderError> {
        let body = self.send(self.client.get(url.clone()), &url, StatusCode::OK).await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    async fn put_json<T: Serialize + ?Sized>(&self, url: Url, payload: &T) -> Result<String, ProviderError> {
        self.send(self.client.put(url.clone()).json(payload), &url, StatusCode::OK)
            .await
    }

    async fn put_content(&self, url: Url, content: &str) -> Result<UpdateCounts, ProviderError> {
        let body = self
            .put_json(url, &ContentRequest { content, i18n_type: I18N_TYPE })
            .await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl TranslationProvider for Transifex {
    async fn list_resources(&self) -> Result<Vec<ResourceInfo>, ProviderError> {
        self.get_json(self.project_url(&["resources", ""])).await
    }

    async fn project_details(&self) -> Result<ProjectDetails, ProviderError> {
        let mut url = self.project_url(&[""]);
        url.set_query(Some("details"));
        self.get_json(url).await
    }

    async fn create_resource(&self, resource: &NewResource) -> Result<(), ProviderError> {
        let url = self.project_url(&["resources", ""]);
        let payload = CreateResourceRequest {
            name: &resource.name,
            slug: &resource.slug,
            content: &resource.content,
            i18n_type: I18N_TYPE,
        };
        self.send(self.client.post(url.clone()).json(&payload), &url, StatusCode::CREATED)
            .await?;
        Ok(())
    }

    async fn update_resource_content(
        &self,
        resource: &str,
        content: &str,
    ) -> Result<UpdateCounts, ProviderError> {
        self.put_content(self.project_url(&["resource", resource, "content"]), content)
            .await
    }

    async fn update_translation_content(
        &self,
        resource: &str,
        language: &str,
        content: &str,
    ) -> Result<UpdateCounts, ProviderError> {
        let url = self.project_url(&["resource", resource, "translation", language, ""]);
        self.put_content(url, content).await
    }

    async fn fetch_translation(
        &self,
        resource: &str,
        language: &str,
        mode: &str,
    ) -> Result<String, ProviderError> {
        let mut url = self.project_url(&["resource", resource, "translation", language, ""]);
        url.query_pairs_mut().append_key_only("file").append_pair("mode", mode);
        self.send(self.client.get(url.clone()), &url, StatusCode::OK).await
    }

    async fn update_string_translation(
        &self,
        resource: &str,
        language: &str,
        string_hash: &str,
        translation: &Value,
    ) -> Result<(), ProviderError> {
        let url = self.project_url(&[
            "resource",
            resource,
            "translation",
            language,
            "string",
            string_hash,
            "",
        ]);
        self.put_json(url, &json!({ "translation": translation })).await?;
        Ok(())
    }

    async fn update_source_instruction(
        &self,
        resource: &str,
        string_hash: &str,
        comment: &str,
    ) -> Result<(), ProviderError> {
        let url = self.project_url(&["resource", resource, "source", string_hash, ""]);
        self.put_json(url, &json!({ "comment": comment })).await?;
        Ok(())
    }

    async fn create_language(
        &self,
        language: &str,
        coordinators: &[String],
    ) -> Result<(), ProviderError> {
        let url = self.project_url(&["languages", ""]);
        let payload = json!({ "language_code": language, "coordinators": coordinators });
        self.send(self.client.post(url.clone()).json(&payload), &url, StatusCode::CREATED)
            .await?;
        Ok(())
    }
}
