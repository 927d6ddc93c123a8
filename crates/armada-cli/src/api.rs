//! Armada API Client

use anyhow::{bail, Context, Result};
use armada::{Service, ServiceSpec, Version};
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// API Client for Armada
pub struct ArmadaClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

// ============================================
// API Request / Response Types
// ============================================

#[derive(Debug, Serialize)]
struct CreateServiceRequest<'a> {
    spec: &'a ServiceSpec,
}

#[derive(Debug, Serialize)]
struct UpdateServiceRequest<'a> {
    version: Version,
    spec: &'a ServiceSpec,
}

#[derive(Debug, Deserialize)]
struct ServiceResponse {
    service: Service,
}

#[derive(Debug, Deserialize)]
struct ListServicesResponse {
    services: Vec<Service>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    code: String,
    message: String,
}

impl ArmadaClient {
    /// Create a new API client
    pub fn new(base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let resp = self
            .authorized(request)
            .send()
            .await
            .context("Failed to connect to Armada API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => bail!("{} ({}): {}", err.code, status, err.message),
                Err(_) => bail!("API error ({}): {}", status, body),
            }
        }

        Ok(resp)
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        self.send(request)
            .await?
            .json()
            .await
            .context("Failed to parse response")
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    /// List services, optionally filtered by name / ID prefix
    pub async fn list_services(&self, query: Option<&str>) -> Result<Vec<Service>> {
        let mut request = self.client.get(self.url("/v1/services"));
        if let Some(q) = query {
            request = request.query(&[("query", q)]);
        }
        let resp: ListServicesResponse = self.send_json(request).await?;
        Ok(resp.services)
    }

    /// Get a specific service
    pub async fn get_service(&self, id: &str) -> Result<Service> {
        let request = self.client.get(self.url(&format!("/v1/services/{}", id)));
        let resp: ServiceResponse = self.send_json(request).await?;
        Ok(resp.service)
    }

    /// Create a service
    pub async fn create_service(&self, spec: &ServiceSpec) -> Result<Service> {
        let request = self
            .client
            .post(self.url("/v1/services"))
            .json(&CreateServiceRequest { spec });
        let resp: ServiceResponse = self.send_json(request).await?;
        Ok(resp.service)
    }

    /// Replace the spec of a service read at `version`
    pub async fn update_service(
        &self,
        id: &str,
        version: Version,
        spec: &ServiceSpec,
    ) -> Result<Service> {
        let request = self
            .client
            .put(self.url(&format!("/v1/services/{}", id)))
            .json(&UpdateServiceRequest { version, spec });
        let resp: ServiceResponse = self.send_json(request).await?;
        Ok(resp.service)
    }

    /// Remove a service
    pub async fn remove_service(&self, id: &str) -> Result<()> {
        let request = self.client.delete(self.url(&format!("/v1/services/{}", id)));
        self.send(request).await?;
        Ok(())
    }
}
