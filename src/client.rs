use reqwest::{
    Client, Method, RequestBuilder, Response, StatusCode, Url,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    config::ClientConfig,
    error::{ApiError, ApiResult},
    session::Session,
};

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Scope
///
/// Which flavour of client built a request. Only used for log context; the
/// `Authorization` header itself lives in the client's default headers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Public,
    Secure,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::Public => f.write_str("Public"),
            Scope::Secure => f.write_str("Secure"),
        }
    }
}

/// ApiClient
///
/// A configured request client with a fixed base URL, JSON content type and the
/// configured timeout. The secure flavour also sends `Authorization: Bearer <token>`.
///
/// Calls are at-most-once: a failed request is reported to the caller and never retried.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    scope: Scope,
}

impl ApiClient {
    /// Anonymous client for public endpoints.
    pub fn public(config: &ClientConfig) -> ApiResult<Self> {
        Self::build(config, None)
    }

    /// Bearer-token client for protected endpoints.
    pub fn secure(config: &ClientConfig, token: &str) -> ApiResult<Self> {
        Self::build(config, Some(token))
    }

    /// Secure client bound to the token of an explicit session.
    pub fn for_session(config: &ClientConfig, session: &Session) -> ApiResult<Self> {
        Self::secure(config, session.token())
    }

    fn build(config: &ClientConfig, token: Option<&str>) -> ApiResult<Self> {
        let base_url = Url::parse(&config.api_url)
            .map_err(|e| ApiError::Network(format!("invalid base URL {}: {}", config.api_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let scope = match token {
            Some(token) => {
                let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|_| ApiError::InvalidToken)?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
                Scope::Secure
            }
            None => Scope::Public,
        };

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            scope,
        })
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Resolves path segments against the base URL. Segments are percent-encoded,
    /// so emails and ids can be passed through verbatim.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let request = self.http.request(Method::GET, self.endpoint(segments));
        self.json(Method::GET, segments, request).await
    }

    pub(crate) async fn get_with_query<Q, T>(&self, segments: &[&str], query: &Q) -> ApiResult<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.request(Method::GET, self.endpoint(segments)).query(query);
        self.json(Method::GET, segments, request).await
    }

    pub(crate) async fn post<B, T>(&self, segments: &[&str], body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.request(Method::POST, self.endpoint(segments)).json(body);
        self.json(Method::POST, segments, request).await
    }

    pub(crate) async fn patch<B, T>(&self, segments: &[&str], body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.request(Method::PATCH, self.endpoint(segments)).json(body);
        self.json(Method::PATCH, segments, request).await
    }

    /// PATCH without a request body.
    pub(crate) async fn patch_empty<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let request = self.http.request(Method::PATCH, self.endpoint(segments));
        self.json(Method::PATCH, segments, request).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> ApiResult<T> {
        let request = self.http.request(Method::DELETE, self.endpoint(segments));
        self.json(Method::DELETE, segments, request).await
    }

    /// health_check
    ///
    /// `GET /` on the backend. Returns the raw body the server answers with.
    pub async fn health_check(&self) -> ApiResult<String> {
        let request = self.http.request(Method::GET, self.endpoint(&[]));
        let response = self.send(Method::GET, &[], request).await?;
        Ok(response.text().await?)
    }

    async fn json<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        request: RequestBuilder,
    ) -> ApiResult<T> {
        let response = self.send(method, segments, request).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| {
            tracing::error!("API Error ({}): undecodable response body: {}", self.scope, e);
            ApiError::Decode(e.to_string())
        })
    }

    /// Sends one request, tagging it with a fresh correlation id, and maps any
    /// non-2xx status to the matching `ApiError`.
    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        request: RequestBuilder,
    ) -> ApiResult<Response> {
        let request_id = Uuid::new_v4().to_string();
        let path = format!("/{}", segments.join("/"));
        let span = tracing::debug_span!(
            "api_request",
            scope = %self.scope,
            method = %method,
            path = %path,
            req_id = %request_id,
        );

        async move {
            tracing::debug!("dispatching request");
            let response = request
                .header(HeaderName::from_static(REQUEST_ID_HEADER), request_id.as_str())
                .send()
                .await
                .map_err(|e| {
                    let err = ApiError::from(e);
                    tracing::error!("API Error ({}): {}", self.scope, err);
                    err
                })?;

            let status = response.status();
            if status.is_success() {
                tracing::debug!(status = status.as_u16(), "request succeeded");
                return Ok(response);
            }

            let body = response.text().await.unwrap_or_default();
            Err(self.classify(status, &body))
        }
        .instrument(span)
        .await
    }

    fn classify(&self, status: StatusCode, body: &str) -> ApiError {
        let message = extract_message(status, body);
        match status {
            StatusCode::UNAUTHORIZED => {
                tracing::warn!(
                    "Unauthorized ({}): token expired or invalid. Please login again.",
                    self.scope
                );
                ApiError::Unauthorized(message)
            }
            StatusCode::FORBIDDEN => {
                tracing::warn!(
                    "Forbidden ({}): you don't have permission to access this resource.",
                    self.scope
                );
                ApiError::Forbidden(message)
            }
            s if s.is_server_error() => {
                tracing::error!("Server Error ({}): {} {}", self.scope, s.as_u16(), message);
                ApiError::Server {
                    status: s.as_u16(),
                    message,
                }
            }
            s => {
                tracing::warn!("API Error ({}): {} {}", self.scope, s.as_u16(), message);
                ApiError::Validation {
                    status: s.as_u16(),
                    message,
                }
            }
        }
    }
}

/// Picks the most useful message out of an error body: the JSON `message` or
/// `error` field, the raw text, or the canonical reason phrase.
pub(crate) fn extract_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('{') {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}
