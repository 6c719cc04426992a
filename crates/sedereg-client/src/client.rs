//! HTTP client for the registration portal API.
//!
//! Wraps `reqwest` with portal-specific error handling and typed response
//! deserialization. Every endpoint unwraps the `{"data", "errors"}` envelope
//! and surfaces entries in `errors` as [`ClientError::Api`].

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use sedereg_core::{AppConfig, RegistrationRequest};
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::types::{CatalogEntry, ProviderRecord, RegisteredSite, SupportingDocs};

/// Client for the registration portal API.
///
/// Use [`PortalClient::new`] with the loaded [`AppConfig`] for production or
/// [`PortalClient::with_base_url`] to point at a mock server in tests.
pub struct PortalClient {
    client: Client,
    base_url: Url,
}

impl PortalClient {
    /// Creates a client pointed at the configured portal.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::BadUrl`] for an unparseable
    /// base URL.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        Self::with_base_url(
            &config.portal_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Creates a client with an explicit base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Same conditions as [`PortalClient::new`].
    pub fn with_base_url(
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: exactly one trailing slash so that joining relative
        // paths appends instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ClientError::BadUrl(format!("{base_url}: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Looks up a provider by tax id to pre-fill the wizard context.
    ///
    /// A 404 means the provider is simply not in the registry yet and maps to
    /// `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the portal reports an envelope error.
    /// - [`ClientError::Http`] on network failure or another non-2xx status.
    /// - [`ClientError::Deserialize`] if the body does not match the shape.
    pub async fn lookup_provider(&self, nit: &str) -> Result<Option<ProviderRecord>, ClientError> {
        let url = self.endpoint("api/prestadores", &[("nit", nit)])?;
        let response = self.client.get(url.clone()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(nit, "provider not found in registry");
            return Ok(None);
        }
        let body = Self::parse_body(response, &url).await?;
        Self::check_api_error(&body)?;
        Self::extract_data(body, &format!("lookup_provider(nit={nit})")).map(Some)
    }

    /// Runs the supporting-documents precondition check for a provider.
    ///
    /// # Errors
    ///
    /// See [`PortalClient::lookup_provider`].
    pub async fn check_supporting_docs(&self, nit: &str) -> Result<SupportingDocs, ClientError> {
        let url = self.endpoint("api/soportes/check", &[("nit", nit)])?;
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;
        Self::extract_data(body, &format!("check_supporting_docs(nit={nit})"))
    }

    /// Fetches the department catalog, used only for display enrichment.
    ///
    /// # Errors
    ///
    /// See [`PortalClient::lookup_provider`].
    pub async fn departments(&self) -> Result<Vec<CatalogEntry>, ClientError> {
        let url = self.endpoint("api/catalogos/departamentos", &[])?;
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;
        Self::extract_data(body, "departments")
    }

    /// Fetches the municipalities of one department.
    ///
    /// # Errors
    ///
    /// See [`PortalClient::lookup_provider`].
    pub async fn municipalities(&self, department_id: &str) -> Result<Vec<CatalogEntry>, ClientError> {
        let url = self.endpoint("api/catalogos/municipios", &[("departamentoId", department_id)])?;
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;
        Self::extract_data(body, &format!("municipalities(department={department_id})"))
    }

    /// Lists the sites the backend already holds a registration for, so the
    /// wizard can skip them.
    ///
    /// # Errors
    ///
    /// See [`PortalClient::lookup_provider`].
    pub async fn registered_sites(&self, nit: &str) -> Result<Vec<RegisteredSite>, ClientError> {
        let url = self.endpoint("api/atencion/sedes", &[("nit", nit)])?;
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;
        Self::extract_data(body, &format!("registered_sites(nit={nit})"))
    }

    /// Submits the consolidated registration: every site or none.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the portal reports an envelope error.
    /// - [`ClientError::Http`] on network failure or a non-2xx status.
    pub async fn register_sites(&self, request: &RegistrationRequest) -> Result<(), ClientError> {
        let url = self.endpoint("api/atencion-usuarios", &[])?;
        tracing::debug!(nit = %request.nit, sites = request.sites.len(), "submitting site registration");
        let response = self.client.post(url).json(request).send().await?;
        let response = response.error_for_status()?;
        // The portal answers with an empty body on success; an envelope with
        // errors can still arrive under a 2xx from older deployments.
        let text = response.text().await?;
        if !text.trim().is_empty() {
            if let Ok(body) = serde_json::from_str::<serde_json::Value>(&text) {
                Self::check_api_error(&body)?;
            }
        }
        Ok(())
    }

    /// Builds the full request URL with percent-encoded query parameters.
    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ClientError::BadUrl(format!("{path}: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx status, and parses the body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, ClientError> {
        let response = self.client.get(url.clone()).send().await?;
        Self::parse_body(response, url).await
    }

    async fn parse_body(
        response: reqwest::Response,
        url: &Url,
    ) -> Result<serde_json::Value, ClientError> {
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }

    /// Surfaces the first entry of a non-empty `errors` array.
    fn check_api_error(body: &serde_json::Value) -> Result<(), ClientError> {
        let Some(first) = body
            .get("errors")
            .and_then(serde_json::Value::as_array)
            .and_then(|errors| errors.first())
        else {
            return Ok(());
        };
        let field = |key: &str| {
            first
                .get(key)
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown")
                .to_string()
        };
        Err(ClientError::Api {
            code: field("code"),
            message: field("message"),
        })
    }

    /// Deserializes the `data` field of the response envelope.
    fn extract_data<T: DeserializeOwned>(
        body: serde_json::Value,
        context: &str,
    ) -> Result<T, ClientError> {
        let data = body
            .get("data")
            .cloned()
            .unwrap_or(serde_json::Value::Null);
        serde_json::from_value(data).map_err(|e| ClientError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}
