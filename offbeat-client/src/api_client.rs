//! HTTP client bound to a [`SessionStore`].
//!
//! Every request carries `Authorization: Bearer <token>` while a token is
//! present. A 401 ends the session and signals a redirect to phone entry.

use std::sync::Arc;
use std::time::Duration;

use offbeat_config::ApiConfig;
use offbeat_core::{Route, SessionStore};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::ApiError;

/// Called with the route to show after the server rejects the session.
pub type UnauthorizedHook = Arc<dyn Fn(Route) + Send + Sync>;

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("has_token", &self.session.bearer_token().is_some())
            .field("has_unauthorized_hook", &self.on_unauthorized.is_some())
            .finish()
    }
}

impl ApiClient {
    /// `base_url` should already be absolute; a trailing slash is dropped.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: SessionStore,
    ) -> Result<Self, reqwest::Error> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        tracing::info!(
            "[ApiClient] Creating API client with base URL: {}",
            base_url
        );

        Ok(Self {
            client,
            base_url,
            session,
            on_unauthorized: None,
        })
    }

    pub fn from_config(
        config: &ApiConfig,
        session: SessionStore,
    ) -> Result<Self, reqwest::Error> {
        Self::new(config.base_url.clone(), config.timeout, session)
    }

    /// Register the redirect hook fired after a 401.
    pub fn with_unauthorized_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(Route) + Send + Sync + 'static,
    {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        format!("{}/{}", self.base_url, p.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: impl AsRef<str>,
    ) -> Result<T, ApiError> {
        let request = self.client.get(self.build_url(path));
        self.execute(request).await
    }

    pub async fn post<B, T>(
        &self,
        path: impl AsRef<str>,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.build_url(path)).json(body);
        self.execute(request).await
    }

    pub async fn put<B, T>(
        &self,
        path: impl AsRef<str>,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.put(self.build_url(path)).json(body);
        self.execute(request).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: impl AsRef<str>,
    ) -> Result<T, ApiError> {
        let request = self.client.delete(self.build_url(path));
        self.execute(request).await
    }

    /// Attach the session's bearer token, if any.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.bearer_token() {
            Some(token) => {
                builder.header("Authorization", token.bearer_header())
            }
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.authorize(request).send().await.map_err(|err| {
            tracing::warn!("[ApiClient] Request failed: {}", err);
            ApiError::transport(&err)
        })?;
        let status = response.status();
        let body = response.bytes().await.map_err(|err| {
            tracing::warn!("[ApiClient] Failed to read response body: {}", err);
            ApiError::transport(&err)
        })?;

        if status.is_success() {
            // Empty bodies decode as JSON null so `()` and `Option<_>` work.
            let body: &[u8] = if body.is_empty() { b"null" } else { &body };
            return serde_json::from_slice(body).map_err(|err| {
                tracing::warn!("[ApiClient] Unexpected response body: {}", err);
                ApiError::new(
                    status.as_u16(),
                    format!("Failed to decode response: {}", err),
                )
            });
        }

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
        }

        let error = ApiError::from_response(status.as_u16(), &body);
        tracing::debug!(
            "[ApiClient] Request failed with status {}: {}",
            status,
            error.message
        );
        Err(error)
    }

    fn handle_unauthorized(&self) {
        tracing::warn!("[ApiClient] Unauthorized; clearing session");
        self.session.logout();
        if let Some(hook) = &self.on_unauthorized {
            hook(Route::unauthorized());
        }
    }
}
