use serde::{Deserialize, Serialize};

use crate::services::remote_list::Resource;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub full_name: String,
    pub email: String,
    pub books: String,
    pub number: i64,
}

impl Resource for TestRecord {
    type Id = i64;

    fn id(&self) -> Option<i64> {
        self.id
    }
}
