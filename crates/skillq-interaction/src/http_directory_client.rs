//! HttpDirectoryClient - REST implementation of the directory client.
//!
//! Endpoints, relative to the configured base URL:
//! - `GET    users/`
//! - `GET    users/skill/{skill}`
//! - `POST   users/` or `users/create`
//! - `DELETE users/delete/{id}`

use crate::dto::decode_programmer_list;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use skillq_core::config::{ClientConfig, CreateEndpoint, DEFAULT_REQUEST_TIMEOUT_SECS};
use skillq_core::programmer::{CreateProgrammerRequest, DirectoryClient, Programmer, ProgrammerId};
use skillq_core::{Result, SkillqError};
use std::time::Duration;

/// Directory client that talks to the remote service over HTTP.
#[derive(Clone, Debug)]
pub struct HttpDirectoryClient {
    client: Client,
    base_url: Url,
    create_endpoint: CreateEndpoint,
    timeout: Duration,
}

impl HttpDirectoryClient {
    /// Creates a client for an absolute base URL such as `http://localhost:5001/api/v1`.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            SkillqError::config(format!("Invalid service base URL '{}': {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SkillqError::config(format!(
                "Service base URL '{}' cannot carry paths",
                base_url
            )));
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            create_endpoint: CreateEndpoint::default(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }

    /// Builds a client from the `[service]` section of the configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(&config.resolved_base_url()?)?
            .with_create_endpoint(config.service.create_endpoint)
            .with_timeout(Duration::from_secs(config.service.request_timeout_secs)))
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_create_endpoint(mut self, endpoint: CreateEndpoint) -> Self {
        self.create_endpoint = endpoint;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Rejects values a URL path would silently drop or resolve away.
    fn path_value(value: &str) -> std::result::Result<&str, String> {
        if value == "." || value == ".." {
            return Err(format!("'{}' cannot be sent as a path segment", value));
        }
        Ok(value)
    }

    fn create_url(&self) -> Url {
        match self.create_endpoint {
            CreateEndpoint::Users => self.endpoint(&["users", ""]),
            CreateEndpoint::UsersCreate => self.endpoint(&["users", "create"]),
        }
    }

    async fn fetch_list(&self, operation: &'static str, url: Url) -> Result<Vec<Programmer>> {
        tracing::debug!(operation, url = %url, "Fetching programmers");

        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                SkillqError::read_failed(operation, format!("request to {} failed: {}", url, e))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            SkillqError::read_failed(operation, format!("failed to read response body: {}", e))
        })?;

        if !status.is_success() {
            return Err(SkillqError::read_failed(
                operation,
                format!("service returned {}: {}", status, body),
            ));
        }

        let programmers = decode_programmer_list(&body).map_err(|e| {
            SkillqError::read_failed(operation, format!("invalid response body: {}", e))
        })?;

        tracing::info!(operation, count = programmers.len(), "Fetched programmers");
        Ok(programmers)
    }

    async fn send_write(&self, operation: &'static str, request: RequestBuilder) -> Result<()> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| SkillqError::write_failed(operation, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SkillqError::write_failed(
                operation,
                format!("service returned {}: {}", status, body),
            ));
        }

        tracing::info!(operation, status = %status, "Write acknowledged");
        Ok(())
    }
}

#[async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn list_all(&self) -> Result<Vec<Programmer>> {
        self.fetch_list("list_all", self.endpoint(&["users", ""]))
            .await
    }

    async fn filter_by_skill(&self, skill: &str) -> Result<Vec<Programmer>> {
        let skill = Self::path_value(skill)
            .map_err(|e| SkillqError::read_failed("filter_by_skill", e))?;
        let url = self.endpoint(&["users", "skill", skill]);
        self.fetch_list("filter_by_skill", url).await
    }

    async fn create(&self, request: &CreateProgrammerRequest) -> Result<()> {
        let url = self.create_url();
        tracing::debug!(
            url = %url,
            name = %request.name,
            skills = request.skills.len(),
            "Creating programmer"
        );
        self.send_write("create", self.client.post(url).json(request))
            .await
    }

    async fn delete(&self, id: &ProgrammerId) -> Result<()> {
        let id = Self::path_value(id.as_str())
            .map_err(|e| SkillqError::write_failed("delete", e))?;
        let url = self.endpoint(&["users", "delete", id]);
        tracing::debug!(url = %url, "Deleting programmer");
        self.send_write("delete", self.client.delete(url)).await
    }
}
