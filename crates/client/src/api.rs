//! # API Client
//!
//! JSON over HTTP against the TimeMesh server. Every request except sign-in,
//! token refresh and registration carries the stored access token. A 401 on
//! an authenticated request triggers exactly one refresh and one retry; when
//! that fails the stored credentials are cleared and the call ends with
//! [`ClientError::SessionExpired`].

use reqwest::{Method, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;
use timemesh_core::{
    errors::ErrorCode,
    models::user::{RefreshRequest, RefreshResponse},
};
use tokio::sync::Mutex;

use crate::{
    errors::{ClientError, ClientResult},
    session::SessionStore,
};

pub const TOKEN_PATH: &str = "/api/token/";
pub const TOKEN_REFRESH_PATH: &str = "/api/token/refresh/";
pub const REGISTER_PATH: &str = "/api/users/register/";

/// Paths that never carry a bearer token and never trigger a refresh.
pub fn is_public_path(path: &str) -> bool {
    path.starts_with(TOKEN_PATH) || path.starts_with(REGISTER_PATH)
}

#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, session)
    }

    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            session,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.send(Method::GET, path, None, None).await?;
        Ok(response.json().await?)
    }

    pub async fn get_with_query<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> ClientResult<T> {
        let response = self.send(Method::GET, path, Some(query), None).await?;
        Ok(response.json().await?)
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::POST, path, None, Some(&body)).await?;
        Ok(response.json().await?)
    }

    /// POST whose response body is ignored.
    pub async fn post_unit<B>(&self, path: &str, body: &B) -> ClientResult<()>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, None, Some(&body)).await?;
        Ok(())
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::PUT, path, None, Some(&body)).await?;
        Ok(response.json().await?)
    }

    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send(Method::DELETE, path, None, None).await?;
        Ok(())
    }

    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> ClientResult<Response> {
        let mut request = self.http.request(method.clone(), format!("{}{}", self.base_url, path));
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        tracing::debug!("{} {}", method, path);
        Ok(request.send().await?)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        body: Option<&Value>,
    ) -> ClientResult<Response> {
        if is_public_path(path) {
            let response = self.dispatch(&method, path, query, body, None).await?;
            return check(response).await;
        }

        let token = self.session.access_token();
        let response = self.dispatch(&method, path, query, body, token.as_deref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return check(response).await;
        }

        tracing::debug!("Access token rejected for {}, refreshing", path);
        let fresh = match self.refresh_access_token(token.as_deref()).await {
            Ok(fresh) => fresh,
            Err(e) => {
                tracing::warn!("Token refresh failed: {}", e);
                return Err(self.expire_session());
            }
        };

        let retry = self.dispatch(&method, path, query, body, Some(&fresh)).await?;
        if retry.status() == StatusCode::UNAUTHORIZED {
            tracing::warn!("Request to {} still unauthorized after refresh", path);
            return Err(self.expire_session());
        }
        check(retry).await
    }

    /// Obtains a new access token, reusing one another request refreshed meanwhile.
    async fn refresh_access_token(&self, rejected: Option<&str>) -> ClientResult<String> {
        let _guard = self.refresh_lock.lock().await;

        if let Some(current) = self.session.access_token() {
            if Some(current.as_str()) != rejected {
                return Ok(current);
            }
        }

        let refresh = self.session.refresh_token().ok_or(ClientError::NotAuthenticated)?;
        let body = serde_json::to_value(RefreshRequest { refresh })?;
        let response = self
            .dispatch(&Method::POST, TOKEN_REFRESH_PATH, None, Some(&body), None)
            .await?;
        let refreshed: RefreshResponse = check(response).await?.json().await?;

        self.session.set_access_token(&refreshed.access)?;
        Ok(refreshed.access)
    }

    fn expire_session(&self) -> ClientError {
        if let Err(e) = self.session.clear_credentials() {
            tracing::error!("Failed to clear credentials: {}", e);
        }
        ClientError::SessionExpired
    }
}

/// Passes successful responses through and turns the rest into [`ClientError::Api`].
async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    Err(api_error(status, &text))
}

/// Builds an API error from a status and raw body.
///
/// Reads `error` (or `detail`) and `code` when the body is JSON.
pub fn api_error(status: StatusCode, body: &str) -> ClientError {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    let message = parsed
        .as_ref()
        .and_then(|value| value.get("error").or_else(|| value.get("detail")))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status.canonical_reason().unwrap_or("Request failed").to_string()
            } else {
                body.trim().to_string()
            }
        });

    let code = parsed
        .as_ref()
        .and_then(|value| value.get("code"))
        .and_then(|code| serde_json::from_value::<ErrorCode>(code.clone()).ok());

    ClientError::Api {
        status: status.as_u16(),
        code,
        message,
    }
}
