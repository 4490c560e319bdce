//! HTTP client for the translation layer endpoints.
//!
//! [`TranslationLayerClient`] has two faces:
//!
//! - `try_*` methods return [`Result`] and keep the failure cause. The
//!   headless CLI and tests use these.
//! - The [`TranslationLayer`] impl wraps each `try_*` call, logs the failure
//!   and degrades to an empty/false/`None` value. The TUI uses this so a
//!   flaky backend never takes the screen down.
//!
//! ```text
//!   GET  status | supported-types | component-tree | extensions | extension-values
//!   GET  extensions/{name}/compatibility
//!   GET  component/{id}          GET/POST component/{id}/value
//!   POST component/{id}/event/{name}                 POST clear
//! ```

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;

use dlayer_core::prelude::*;
use dlayer_core::{
    AckResponse, ComponentNode, ComponentTreeResponse, ExtensionCompatibility, ExtensionInfo,
    ExtensionValues, LayerStatus, NodeResponse, SupportedTypes, ValueResponse,
};

use crate::endpoints::{parse_base_url, Endpoint};
use crate::layer::TranslationLayer;

/// Default backend address (the WebUI API port)
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:7861";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Connection settings for [`TranslationLayerClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Parse `base_url` and use the default timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// ---------------------------------------------------------------------------
// TranslationLayerClient
// ---------------------------------------------------------------------------

/// Async REST client for `/translation-layer/*`.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct TranslationLayerClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl TranslationLayerClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("dlayer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    // ── Strict API ───────────────────────────────────────────────────────────

    /// `GET /translation-layer/status`
    pub async fn try_fetch_status(&self) -> Result<LayerStatus> {
        self.get(Endpoint::Status).await
    }

    /// `GET /translation-layer/supported-types`
    pub async fn try_fetch_supported_types(&self) -> Result<SupportedTypes> {
        self.get(Endpoint::SupportedTypes).await
    }

    /// `GET /translation-layer/component-tree`
    pub async fn try_fetch_tree(&self) -> Result<ComponentTreeResponse> {
        self.get(Endpoint::ComponentTree).await
    }

    /// `GET /translation-layer/extensions`
    pub async fn try_fetch_extensions(&self) -> Result<Vec<ExtensionInfo>> {
        self.get(Endpoint::Extensions).await
    }

    /// `GET /translation-layer/extensions/{name}/compatibility`
    ///
    /// The backend answers 404 for extensions with no tracked components.
    pub async fn try_fetch_extension_compatibility(
        &self,
        name: &str,
    ) -> Result<ExtensionCompatibility> {
        self.get(Endpoint::ExtensionCompatibility(name)).await
    }

    /// `GET /translation-layer/component/{id}`
    pub async fn try_fetch_node(&self, id: &str) -> Result<NodeResponse> {
        self.get(Endpoint::Component(id)).await
    }

    /// `GET /translation-layer/component/{id}/value`
    pub async fn try_fetch_value(&self, id: &str) -> Result<ValueResponse> {
        self.get(Endpoint::ComponentValue(id)).await
    }

    /// `POST /translation-layer/component/{id}/value` with `{"value": ...}`
    pub async fn try_set_value(&self, id: &str, value: Value) -> Result<AckResponse> {
        let body = json!({ "value": value });
        self.post_ack(Endpoint::ComponentValue(id), &body).await
    }

    /// `POST /translation-layer/component/{id}/event/{event}`
    ///
    /// The body is `{"data": ...}` when data is given, `{}` otherwise.
    pub async fn try_trigger_event(
        &self,
        id: &str,
        event: &str,
        data: Option<Value>,
    ) -> Result<AckResponse> {
        let body = match data {
            Some(data) => json!({ "data": data }),
            None => json!({}),
        };
        self.post_ack(Endpoint::ComponentEvent(id, event), &body).await
    }

    /// `GET /translation-layer/extension-values`
    pub async fn try_fetch_extension_values(&self) -> Result<ExtensionValues> {
        self.get(Endpoint::ExtensionValues).await
    }

    /// `POST /translation-layer/clear`
    pub async fn try_clear(&self) -> Result<AckResponse> {
        self.post_ack(Endpoint::Clear, &json!({})).await
    }

    // ── Internal ─────────────────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> Result<T> {
        self.send(Method::GET, endpoint, None).await
    }

    /// POST to an acknowledging endpoint.
    ///
    /// Any 2xx is an acceptance unless the body is an ack saying
    /// `success: false`. Empty, `null` or non-ack bodies count as accepted.
    async fn post_ack(&self, endpoint: Endpoint<'_>, body: &Value) -> Result<AckResponse> {
        let bytes = self.send_raw(Method::POST, endpoint, Some(body)).await?;
        Ok(decode_ack(&bytes))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: Endpoint<'_>,
        body: Option<&Value>,
    ) -> Result<T> {
        let bytes = self.send_raw(method, endpoint, body).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Body of a 2xx response; other statuses become [`Error::Status`]
    async fn send_raw(
        &self,
        method: Method,
        endpoint: Endpoint<'_>,
        body: Option<&Value>,
    ) -> Result<Vec<u8>> {
        let url = endpoint.url(&self.config.base_url)?;
        trace!("{} {}", method, url);

        let mut request = self.http.request(method, url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e, &url))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            debug!("{} -> {}: {}", url, status, detail.trim());
            return Err(Error::status(status.as_u16(), url.as_str()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e, &url))?;
        Ok(bytes.to_vec())
    }

    fn transport_error(&self, err: reqwest::Error, url: &Url) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                url: url.to_string(),
                secs: self.config.timeout.as_secs(),
            }
        } else {
            Error::http(err.to_string())
        }
    }
}

fn decode_ack(bytes: &[u8]) -> AckResponse {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return AckResponse::accepted();
    }
    match serde_json::from_slice::<Option<AckResponse>>(bytes) {
        Ok(Some(ack)) => ack,
        Ok(None) => AckResponse::accepted(),
        Err(e) => {
            debug!("Treating undecodable 2xx ack body as accepted: {}", e);
            AckResponse::accepted()
        }
    }
}

// ---------------------------------------------------------------------------
// Degrading API
// ---------------------------------------------------------------------------

impl TranslationLayer for TranslationLayerClient {
    async fn fetch_status(&self) -> LayerStatus {
        self.try_fetch_status().await.unwrap_or_else(|e| {
            warn!("Failed to fetch translation layer status: {}", e);
            LayerStatus::default()
        })
    }

    async fn fetch_supported_types(&self) -> SupportedTypes {
        self.try_fetch_supported_types().await.unwrap_or_else(|e| {
            warn!("Failed to fetch supported types: {}", e);
            SupportedTypes::default()
        })
    }

    async fn fetch_tree(&self) -> ComponentTreeResponse {
        match self.try_fetch_tree().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Failed to fetch component tree: {}", e);
                ComponentTreeResponse::inactive(format!("Failed to fetch component tree: {e}"))
            }
        }
    }

    async fn fetch_extensions_with_compatibility(&self) -> Vec<ExtensionInfo> {
        self.try_fetch_extensions().await.unwrap_or_else(|e| {
            warn!("Failed to fetch extensions: {}", e);
            Vec::new()
        })
    }

    async fn fetch_extension_compatibility(&self, name: &str) -> Option<ExtensionCompatibility> {
        match self.try_fetch_extension_compatibility(name).await {
            Ok(compat) => Some(compat),
            Err(e) if e.status_code() == Some(StatusCode::NOT_FOUND.as_u16()) => {
                debug!("No tracked components for extension {}", name);
                None
            }
            Err(e) => {
                warn!("Failed to fetch compatibility for {}: {}", name, e);
                None
            }
        }
    }

    async fn fetch_node(&self, id: &str) -> Option<ComponentNode> {
        match self.try_fetch_node(id).await {
            Ok(response) => Some(response.node),
            Err(e) => {
                warn!("Failed to fetch component {}: {}", id, e);
                None
            }
        }
    }

    async fn fetch_value(&self, id: &str) -> Option<Value> {
        match self.try_fetch_value(id).await {
            Ok(response) => response.value,
            Err(e) => {
                warn!("Failed to fetch value of {}: {}", id, e);
                None
            }
        }
    }

    async fn set_value(&self, id: &str, value: Value) -> bool {
        match self.try_set_value(id, value).await {
            Ok(ack) => {
                if !ack.success {
                    warn!(
                        "Backend rejected value for {}: {}",
                        id,
                        ack.error.as_deref().unwrap_or("no reason given")
                    );
                }
                ack.success
            }
            Err(e) => {
                warn!("Failed to set value of {}: {}", id, e);
                false
            }
        }
    }

    async fn trigger_event(&self, id: &str, event: &str, data: Option<Value>) -> bool {
        match self.try_trigger_event(id, event, data).await {
            Ok(ack) => ack.success,
            Err(e) => {
                warn!("Failed to trigger {} on {}: {}", event, id, e);
                false
            }
        }
    }

    async fn fetch_extension_values(&self) -> ExtensionValues {
        match self.try_fetch_extension_values().await {
            Ok(values) => values,
            Err(e) => {
                warn!("Failed to fetch extension values: {}", e);
                ExtensionValues::inactive(format!("Failed to fetch extension values: {e}"))
            }
        }
    }

    async fn clear(&self) -> bool {
        match self.try_clear().await {
            Ok(ack) => ack.success,
            Err(e) => {
                warn!("Failed to clear component tree: {}", e);
                false
            }
        }
    }
}
