use serde::{Deserialize, Serialize};

use crate::services::remote_list::Resource;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserAccount {
    pub fn primary_role(&self) -> Option<&str> {
        self.roles.first().map(String::as_str)
    }
}

impl Resource for UserAccount {
    type Id = String;

    fn id(&self) -> Option<String> {
        Some(self.id.clone())
    }
}
