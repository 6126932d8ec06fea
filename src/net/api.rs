//! REST client for the clinic backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `ClinicApi` is the seam between panels and the network. `HttpApi` is the
//! production implementation over `reqwest`; tests swap in
//! `test_helpers::MockApi`.
//!
//! ERROR HANDLING
//! ==============
//! Calls return `ApiError` and never panic. Non-2xx responses keep their body
//! so the caller can log what the server said. No timeout is configured; the
//! transport defaults apply.

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

// =============================================================================
// RESOURCES
// =============================================================================

/// Collections exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Clients,
    Pets,
    Appointments,
}

impl Resource {
    /// Path segment under the API base URL.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Clients => "clientes",
            Self::Pets => "mascotas",
            Self::Appointments => "citas",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// Asynchronous access to the clinic REST API.
#[async_trait::async_trait]
pub trait ClinicApi: Send + Sync {
    /// `GET /{resource}`. Returns the JSON array in server order.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or an
    /// unparseable body.
    async fn list(&self, resource: Resource) -> Result<Value, ApiError>;

    /// `POST /{resource}` with a JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`ClinicApi::list`].
    async fn create(&self, resource: Resource, payload: Value) -> Result<Value, ApiError>;

    /// `PUT /{resource}/{id}` with a partial JSON body.
    ///
    /// # Errors
    ///
    /// Same as [`ClinicApi::list`].
    async fn update_partial(&self, resource: Resource, id: i64, patch: Value) -> Result<Value, ApiError>;

    /// `GET /health`.
    ///
    /// # Errors
    ///
    /// Same as [`ClinicApi::list`].
    async fn health(&self) -> Result<Value, ApiError>;
}

/// Rows decoded from one collection, plus how many rows were unreadable.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

/// Fetch `resource` and decode it as a list of `T`.
///
/// Rows are decoded one at a time; a row that does not fit `T` is logged and
/// counted in [`Decoded::skipped`] while the rest of the list survives.
///
/// # Errors
///
/// Propagates the call's [`ApiError`], or returns [`ApiError::Decode`] when
/// the body is not a JSON array.
pub async fn fetch_collection<T: DeserializeOwned>(api: &dyn ClinicApi, resource: Resource) -> Result<Decoded<T>, ApiError> {
    let value = api.list(resource).await?;
    decode_collection(resource, value)
}

fn decode_collection<T: DeserializeOwned>(resource: Resource, value: Value) -> Result<Decoded<T>, ApiError> {
    let Value::Array(rows) = value else {
        return Err(ApiError::Decode { url: format!("/{resource}"), message: "expected a JSON array".to_owned() });
    };

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0;
    for (index, row) in rows.into_iter().enumerate() {
        match serde_json::from_value(row) {
            Ok(record) => records.push(record),
            Err(error) => {
                skipped += 1;
                tracing::warn!(%resource, index, %error, "skipping unreadable row");
            }
        }
    }
    Ok(Decoded { records, skipped })
}

/// Serialize a typed payload for [`ClinicApi::create`] / [`ClinicApi::update_partial`].
///
/// # Errors
///
/// Returns [`ApiError::Encode`] if the payload cannot be represented as JSON.
pub fn encode_payload<T: serde::Serialize>(resource: Resource, payload: &T) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(|e| ApiError::Encode { url: format!("/{resource}"), message: e.to_string() })
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

/// `reqwest`-backed [`ClinicApi`].
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Build a client rooted at `base_url` (e.g. `http://localhost:5000/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the TLS backend fails to initialize.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        resource_url(&self.base_url, path)
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "api request");

        let request = self.http.request(method.clone(), &url);
        let request = if let Some(json) = body { request.json(json) } else { request };

        let response = request.send().await.map_err(|e| ApiError::Transport {
            method: method.to_string(),
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Transport {
            method: method.to_string(),
            url: url.clone(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            tracing::warn!(%method, %url, status = status.as_u16(), "api request rejected");
            return Err(ApiError::Status { method: method.to_string(), url, status: status.as_u16(), body: text });
        }

        parse_body(&url, &text)
    }
}

#[async_trait::async_trait]
impl ClinicApi for HttpApi {
    async fn list(&self, resource: Resource) -> Result<Value, ApiError> {
        self.send(Method::GET, resource.path(), None).await
    }

    async fn create(&self, resource: Resource, payload: Value) -> Result<Value, ApiError> {
        self.send(Method::POST, resource.path(), Some(&payload)).await
    }

    async fn update_partial(&self, resource: Resource, id: i64, patch: Value) -> Result<Value, ApiError> {
        let path = format!("{}/{id}", resource.path());
        self.send(Method::PUT, &path, Some(&patch)).await
    }

    async fn health(&self) -> Result<Value, ApiError> {
        self.send(Method::GET, "health", None).await
    }
}

fn resource_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Success bodies may be empty; treat those as `null`.
fn parse_body(url: &str, text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Decode { url: url.to_owned(), message: e.to_string() })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;
