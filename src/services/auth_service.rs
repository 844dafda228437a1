use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use validator::Validate;

use crate::{
    api::{ApiClient, AuthMode, HttpMethod},
    auth::{decode_claims, landing_route},
    errors::{AppError, AppResult},
    models::dto::{
        request::{GoogleLoginRequest, LoginRequest, SignupForm},
        response::{MessageResponse, TokenResponse},
    },
    navigation::{NavigateMode, Navigator, Route},
    session::SessionContext,
};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/Auth/register";
pub const GOOGLE_LOGIN_PATH: &str = "/api/auth/google";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Token stored and the user sent to their dashboard.
    SignedIn(Route),
    /// Shown inline under the form.
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    Registered(String),
    Failed(String),
}

/// Sign-in, sign-up and sign-out flows around the session token.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
    navigator: Arc<dyn Navigator>,
    google_client_id: Option<SecretString>,
}

impl AuthService {
    pub fn new(client: ApiClient, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            client,
            navigator,
            google_client_id: None,
        }
    }

    pub fn with_google_client_id(mut self, client_id: Option<SecretString>) -> Self {
        self.google_client_id = client_id;
        self
    }

    /// The OAuth client the host's Google button must be created with.
    pub fn google_client_id(&self) -> Option<&str> {
        self.google_client_id
            .as_ref()
            .map(|id| id.expose_secret())
            .filter(|id| !id.is_empty())
    }

    fn session(&self) -> &SessionContext {
        self.client.session()
    }

    /// Only a malformed form or an unwritable store is an `Err`. Anything the
    /// server says comes back as `Rejected`.
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginOutcome> {
        request.validate()?;

        let response = match self
            .client
            .send_json(HttpMethod::Post, LOGIN_PATH, AuthMode::Public, &request)
            .await
            .and_then(|response| response.json::<TokenResponse>())
        {
            Ok(response) => response,
            Err(e) => {
                log::warn!("Login failed: {}", e);
                let message = match e {
                    AppError::ServerRejected { message, .. } if !message.is_empty() => message,
                    _ => "Login failed".to_string(),
                };
                return Ok(LoginOutcome::Rejected(message));
            }
        };

        self.session().store_token(&response.token)?;
        let claims = match decode_claims(&response.token) {
            Ok(claims) => claims,
            Err(e) => {
                log::warn!("Login returned an undecodable token: {}", e);
                self.session().clear()?;
                return Ok(LoginOutcome::Rejected("Login failed".to_string()));
            }
        };

        match landing_route(&claims) {
            Some(route) => {
                log::info!("Signed in with role {:?}", claims.effective_role());
                self.navigator.navigate(route, NavigateMode::Push);
                Ok(LoginOutcome::SignedIn(route))
            }
            None => {
                log::warn!("Signed in with unrecognised role {:?}", claims.effective_role());
                Ok(LoginOutcome::Rejected("Wrong credentials".to_string()))
            }
        }
    }

    pub async fn register(&self, form: SignupForm) -> SignupOutcome {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(e) => return SignupOutcome::Failed(e.user_message()),
        };

        match self
            .client
            .send_json(HttpMethod::Post, REGISTER_PATH, AuthMode::Public, &request)
            .await
        {
            Ok(response) => {
                let message = response
                    .json::<MessageResponse>()
                    .ok()
                    .and_then(|body| body.message)
                    .unwrap_or_else(|| "Registration successful!".to_string());
                log::info!("Registered a new account");
                SignupOutcome::Registered(message)
            }
            Err(AppError::ServerRejected { message, .. }) => {
                log::warn!("Registration rejected: {}", message);
                if message.is_empty() {
                    SignupOutcome::Failed("Registration failed.".to_string())
                } else {
                    SignupOutcome::Failed(message)
                }
            }
            Err(e) => {
                log::error!("Registration request failed: {}", e);
                SignupOutcome::Failed("An error occurred while registering.".to_string())
            }
        }
    }

    /// Exchanges a Google ID token for an API token. On failure the session is
    /// left as it was.
    pub async fn google_login(&self, id_token: &str) -> AppResult<()> {
        if self.google_client_id().is_none() {
            log::error!("Google login attempted without GOOGLE_CLIENT_ID");
            return Err(AppError::ConfigError("GOOGLE_CLIENT_ID is not set".to_string()));
        }

        let request = GoogleLoginRequest {
            id_token: id_token.to_string(),
        };
        let response: TokenResponse = self
            .client
            .send_json(HttpMethod::Post, GOOGLE_LOGIN_PATH, AuthMode::Public, &request)
            .await
            .and_then(|response| response.json())
            .map_err(|e| {
                log::error!("Google login failed: {}", e);
                e
            })?;

        self.session().store_token(&response.token)?;
        self.navigator.navigate(Route::UserDashboard, NavigateMode::Push);
        Ok(())
    }

    pub fn logout(&self) -> AppResult<()> {
        self.session().clear()?;
        log::info!("Signed out");
        self.navigator.navigate(Route::Entry, NavigateMode::Push);
        Ok(())
    }

    /// Run when the entry page mounts. A signed-in user goes straight to their
    /// dashboard; an undecodable token is dropped. Expiry is left to the guards.
    pub fn redirect_signed_in(&self) -> Option<Route> {
        let token = match self.session().token() {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(e) => {
                log::error!("Could not read session token: {}", e);
                return None;
            }
        };

        let claims = match decode_claims(token.expose_secret()) {
            Ok(claims) => claims,
            Err(e) => {
                log::warn!("Discarding undecodable token: {}", e);
                if let Err(e) = self.session().clear() {
                    log::error!("Failed to purge session token: {}", e);
                }
                return None;
            }
        };

        let route = landing_route(&claims)?;
        self.navigator.navigate(route, NavigateMode::Push);
        Some(route)
    }
}
