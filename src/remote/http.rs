//! Reqwest-backed implementation of the remote store.

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::checklist::ChecklistState;
use crate::config::Config;
use crate::error::{FichaError, Result};
use crate::types::{
    AggregateView, Branch, BranchFields, BranchId, BranchNetwork, CompanyId, FichaPayload,
    NetworkConfig, TechnicalSheet,
};

use super::RemoteStore;

/// HTTP client for the console backend's resource endpoints.
pub struct HttpStore {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpStore {
    /// Create a store from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base = config.api_url().ok_or_else(|| {
            FichaError::Config(
                "API base URL not configured. Set FICHAS_API_URL or run the setup.".to_string(),
            )
        })?;
        Self::new(&base, config.api_token())
    }

    /// Create a store for the given base URL.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        // Url::join treats a path without a trailing slash as a file.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| FichaError::Config(format!("invalid API base URL: {}", e)))?;

        Ok(Self {
            client: Client::new(),
            base_url,
            token,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| FichaError::Config(format!("invalid endpoint path '{}': {}", path, e)))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Treat any non-2xx response as a failure, surfacing the optional
    /// `error` message field when the body carries one.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
            .unwrap_or_else(|| status.to_string());

        Err(FichaError::Api(message))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {url}");
        let response = self.authorize(self.client.get(url)).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.endpoint(path)?;
        tracing::debug!("PUT {url}");
        let response = self.authorize(self.client.put(url)).json(body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn put_json_returning<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("PUT {url}");
        let response = self.authorize(self.client.put(url)).json(body).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn post_json_returning<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {url}");
        let response = self.authorize(self.client.post(url)).json(body).send().await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }
}

impl RemoteStore for HttpStore {
    async fn fetch_aggregate(&self, company: CompanyId) -> Result<AggregateView> {
        self.get_json(&format!("ficha-empresa/{}/completa", company))
            .await
    }

    async fn put_checklist(&self, company: CompanyId, checklist: &ChecklistState) -> Result<()> {
        self.put_json(&format!("ficha-empresa/{}/checklist", company), checklist)
            .await
    }

    async fn put_ficha(&self, company: CompanyId, payload: &FichaPayload) -> Result<()> {
        self.put_json(&format!("ficha-empresa/{}/ficha", company), payload)
            .await
    }

    async fn fetch_technical_sheet(&self, company: CompanyId) -> Result<TechnicalSheet> {
        self.get_json(&format!("ficha-empresa/{}/ficha-tecnica", company))
            .await
    }

    async fn put_technical_sheet(&self, company: CompanyId, sheet: &TechnicalSheet) -> Result<()> {
        self.put_json(&format!("ficha-empresa/{}/ficha-tecnica", company), sheet)
            .await
    }

    async fn fetch_network(&self, company: CompanyId) -> Result<NetworkConfig> {
        self.get_json(&format!("ficha-empresa/{}/isp", company)).await
    }

    async fn put_network(&self, company: CompanyId, network: &NetworkConfig) -> Result<()> {
        self.put_json(&format!("ficha-empresa/{}/isp", company), network)
            .await
    }

    async fn list_branches(&self, company: CompanyId) -> Result<Vec<Branch>> {
        self.get_json(&format!("ficha-empresa/{}/sucursales", company))
            .await
    }

    async fn fetch_branch(&self, branch: BranchId) -> Result<Branch> {
        self.get_json(&format!("ficha-empresa/sucursales/{}", branch))
            .await
    }

    async fn create_branch(&self, company: CompanyId, fields: &BranchFields) -> Result<Branch> {
        self.post_json_returning(&format!("ficha-empresa/{}/sucursales", company), fields)
            .await
    }

    async fn update_branch(&self, branch: BranchId, fields: &BranchFields) -> Result<Branch> {
        self.put_json_returning(&format!("ficha-empresa/sucursales/{}", branch), fields)
            .await
    }

    async fn fetch_branch_network(&self, branch: BranchId) -> Result<BranchNetwork> {
        self.get_json(&format!("ficha-empresa/sucursales/{}/red", branch))
            .await
    }

    async fn put_branch_network(&self, branch: BranchId, network: &BranchNetwork) -> Result<()> {
        self.put_json(&format!("ficha-empresa/sucursales/{}/red", branch), network)
            .await
    }
}
