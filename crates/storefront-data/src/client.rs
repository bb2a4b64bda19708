//! HTTP client for the storefront API.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::retry::{retry_with_backoff, RetryPolicy};
use crate::session::SessionContext;

/// Client shared by every resource client.
///
/// Attaches the bearer token from the [`SessionContext`], retries GET
/// requests according to the configured [`RetryPolicy`], and turns every
/// failure into an [`ApiError`]. A 401 response clears the session before
/// the error is returned.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
    session: Arc<SessionContext>,
}

impl HttpClient {
    /// Create a client from configuration and a shared session.
    pub fn new(config: &ApiConfig, session: Arc<SessionContext>) -> Result<Self, ApiError> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        Ok(Self {
            inner,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry: config.retry.clone(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session this client reads its token from.
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Create a GET request. GETs are retried.
    pub fn get(&self, path: impl Into<String>) -> ApiRequest<'_> {
        self.request(Method::GET, path)
    }

    /// Create a POST request.
    pub fn post(&self, path: impl Into<String>) -> ApiRequest<'_> {
        self.request(Method::POST, path)
    }

    /// Create a PUT request.
    pub fn put(&self, path: impl Into<String>) -> ApiRequest<'_> {
        self.request(Method::PUT, path)
    }

    /// Create a PATCH request.
    pub fn patch(&self, path: impl Into<String>) -> ApiRequest<'_> {
        self.request(Method::PATCH, path)
    }

    /// Create a DELETE request.
    pub fn delete(&self, path: impl Into<String>) -> ApiRequest<'_> {
        self.request(Method::DELETE, path)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, path: impl Into<String>) -> ApiRequest<'_> {
        ApiRequest {
            client: self,
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

/// Percent-encode one path segment so an identifier containing `/`, `?`
/// or `#` cannot change which resource a request targets.
pub fn path_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

#[derive(Debug, Clone)]
enum RequestBody {
    Empty,
    Json(serde_json::Value),
    File(FileUpload),
}

#[derive(Debug, Clone)]
struct FileUpload {
    field: String,
    bytes: Vec<u8>,
    file_name: String,
    mime: String,
}

/// A request bound to a client.
#[derive(Debug)]
pub struct ApiRequest<'a> {
    client: &'a HttpClient,
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
}

impl<'a> ApiRequest<'a> {
    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value =
            serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    /// Set a single-file multipart body.
    pub fn file(
        mut self,
        field: impl Into<String>,
        bytes: Vec<u8>,
        file_name: impl Into<String>,
        mime: impl Into<String>,
    ) -> Self {
        self.body = RequestBody::File(FileUpload {
            field: field.into(),
            bytes,
            file_name: file_name.into(),
            mime: mime.into(),
        });
        self
    }

    /// Send and decode the JSON response body.
    pub async fn send<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let bytes = self.dispatch().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!(path = %self.path, error = %e, "response did not match expected shape");
            ApiError::Decode(e.to_string())
        })
    }

    /// Send and discard the response body.
    pub async fn send_empty(self) -> Result<(), ApiError> {
        self.dispatch().await.map(|_| ())
    }

    async fn dispatch(&self) -> Result<Vec<u8>, ApiError> {
        if self.method == Method::GET {
            retry_with_backoff(&self.client.retry, move |attempt| self.execute(attempt)).await
        } else {
            self.execute(0).await
        }
    }

    async fn execute(&self, attempt: u32) -> Result<Vec<u8>, ApiError> {
        let client = self.client;
        let mut request = client
            .inner
            .request(self.method.clone(), client.url(&self.path));
        if !self.query.is_empty() {
            request = request.query(&self.query);
        }
        if let Some(token) = client.session.token() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        request = match &self.body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(value),
            RequestBody::File(upload) => request.multipart(upload.to_form()?),
        };

        tracing::debug!(method = %self.method, path = %self.path, attempt, "sending request");
        let response = request.send().await.map_err(|e| {
            tracing::warn!(method = %self.method, path = %self.path, error = %e, "request failed");
            ApiError::from(e)
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(ApiError::from)?;
        if status.is_success() {
            tracing::debug!(method = %self.method, path = %self.path, status = status.as_u16(), "request succeeded");
            return Ok(body.to_vec());
        }

        let error = ApiError::from_response(status.as_u16(), &body);
        if error.is_unauthorized() && client.session.clear() {
            tracing::warn!(path = %self.path, "unauthorized response, session cleared");
        }
        tracing::info!(
            method = %self.method,
            path = %self.path,
            status = status.as_u16(),
            message = %error,
            "request rejected"
        );
        Err(error)
    }
}

impl FileUpload {
    fn to_form(&self) -> Result<Form, ApiError> {
        let part = Part::bytes(self.bytes.clone())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        Ok(Form::new().part(self.field.clone(), part))
    }
}
