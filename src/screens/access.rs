use crate::{
    api::{AuthMode, HttpMethod, RequestBody},
    errors::AppResult,
    models::domain::UserAccount,
    services::remote_list::{Endpoint, RemoteList},
};

pub const USERS_PATH: &str = "/api/users";

pub fn endpoint() -> Endpoint {
    Endpoint::new("user", "users", USERS_PATH, AuthMode::Bearer)
}

/// Admin view of registered accounts.
pub struct AccessScreen {
    list: RemoteList<UserAccount>,
}

impl AccessScreen {
    pub fn new(list: RemoteList<UserAccount>) -> Self {
        Self { list }
    }

    pub fn list(&self) -> &RemoteList<UserAccount> {
        &self.list
    }

    pub async fn mount(&self) -> AppResult<()> {
        self.list.mount().await
    }

    pub async fn delete_user(&self, id: &str) -> AppResult<()> {
        self.list.delete(&id.to_string()).await
    }

    /// The body is the bare role name as a JSON string.
    pub async fn change_role(&self, id: &str, role: &str) -> AppResult<()> {
        let path = format!("{}/role/{}", USERS_PATH, id);
        let body = RequestBody::Json(serde_json::Value::String(role.to_string()));
        self.list
            .action(HttpMethod::Put, &path, body, "Failed to change role")
            .await?;

        log::info!("Changed role of user {} to {}", id, role);
        self.list.notifications().success("Role updated!");
        if let Err(e) = self.list.refresh().await {
            log::warn!("Refetch of users after role change failed: {}", e);
        }
        Ok(())
    }
}
