use serde::{Deserialize, Serialize};

use crate::services::remote_list::Resource;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: i64,
    pub topic: String,
    pub description: String,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_at: String,
}

impl Resource for Announcement {
    type Id = i64;

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }
}
