use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    api::transport::{ApiRequest, ApiResponse, FormField, HttpMethod, HttpTransport, RequestBody},
    errors::{AppError, AppResult},
    session::SessionContext,
};

/// Whether an endpoint expects the session token as a bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Public,
    Bearer,
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    session: SessionContext,
    base_url: String,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>, session: SessionContext, base_url: &str) -> Self {
        Self {
            transport,
            session,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Absolute URLs pass through; anything else is joined to the base URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// Sends a request and turns any non-2xx status into `ServerRejected`.
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        auth: AuthMode,
        body: RequestBody,
    ) -> AppResult<ApiResponse> {
        let bearer = match auth {
            AuthMode::Public => None,
            AuthMode::Bearer => {
                let token = self.session.token()?;
                if token.is_none() {
                    log::warn!("{} {} requires a session but none is stored", method, path);
                }
                token
            }
        };

        let request = ApiRequest {
            method,
            url: self.url(path),
            bearer,
            body,
        };
        log::debug!("{} {}", request.method, request.url);

        let url = request.url.clone();
        let response = self.transport.execute(request).await.map_err(|e| {
            log::error!("{} {} failed: {}", method, url, e);
            e
        })?;

        if !response.is_success() {
            log::warn!("{} {} rejected with status {}", method, url, response.status);
            return Err(AppError::ServerRejected {
                status: response.status,
                message: response.message().unwrap_or_default(),
            });
        }

        Ok(response)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, auth: AuthMode) -> AppResult<T> {
        self.send(HttpMethod::Get, path, auth, RequestBody::Empty)
            .await?
            .json()
    }

    pub async fn send_json<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        auth: AuthMode,
        body: &B,
    ) -> AppResult<ApiResponse> {
        self.send(method, path, auth, RequestBody::json(body)?).await
    }

    pub async fn send_form(
        &self,
        method: HttpMethod,
        path: &str,
        auth: AuthMode,
        fields: Vec<FormField>,
    ) -> AppResult<ApiResponse> {
        self.send(method, path, auth, RequestBody::Multipart(fields))
            .await
    }

    pub async fn delete(&self, path: &str, auth: AuthMode) -> AppResult<()> {
        self.send(HttpMethod::Delete, path, auth, RequestBody::Empty)
            .await
            .map(|_| ())
    }
}
