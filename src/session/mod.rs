pub mod storage;

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::{jwt::decode_claims, Claims},
    errors::AppResult,
};

pub use storage::{FileStorage, MemoryStorage, SessionStorage};

/// Storage key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Owner of the single session token. Cloning shares the same storage.
///
/// Created once at startup, written by login and logout, read by the route
/// guard and the API client.
#[derive(Clone)]
pub struct SessionContext {
    storage: Arc<dyn SessionStorage>,
}

impl SessionContext {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    pub fn token(&self) -> AppResult<Option<SecretString>> {
        let token = self
            .storage
            .get_item(TOKEN_KEY)?
            .filter(|t| !t.is_empty())
            .map(SecretString::from);
        Ok(token)
    }

    pub fn has_token(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }

    /// Replaces any previous token.
    pub fn store_token(&self, token: &str) -> AppResult<()> {
        self.storage.set_item(TOKEN_KEY, token)?;
        log::info!("Session token stored");
        Ok(())
    }

    pub fn clear(&self) -> AppResult<()> {
        self.storage.remove_item(TOKEN_KEY)?;
        log::info!("Session token cleared");
        Ok(())
    }

    /// Decodes the stored token, if any. Recomputed on every call.
    pub fn claims(&self) -> AppResult<Option<Claims>> {
        match self.token()? {
            Some(token) => decode_claims(token.expose_secret()).map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("has_token", &self.has_token())
            .finish()
    }
}
