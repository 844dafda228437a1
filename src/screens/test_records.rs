use validator::Validate;

use crate::{
    api::{AuthMode, RequestBody},
    errors::AppResult,
    models::{domain::TestRecord, dto::request::TestRecordRequest},
    services::remote_list::{Endpoint, RemoteList},
};

pub const TEST_RECORDS_PATH: &str = "/api/basic";

pub fn endpoint() -> Endpoint {
    Endpoint::new("test", "tests", TEST_RECORDS_PATH, AuthMode::Public).patch_locally()
}

/// The scratch CRUD page. Writes patch the list in place instead of refetching.
pub struct TestRecordsScreen {
    list: RemoteList<TestRecord>,
    editing: Option<i64>,
}

impl TestRecordsScreen {
    pub fn new(list: RemoteList<TestRecord>) -> Self {
        Self {
            list,
            editing: None,
        }
    }

    pub fn list(&self) -> &RemoteList<TestRecord> {
        &self.list
    }

    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub async fn mount(&self) -> AppResult<()> {
        self.list.mount().await
    }

    pub async fn begin_edit(&mut self, id: i64) -> Option<TestRecordRequest> {
        let record = self.list.find(&id).await?;
        self.editing = Some(id);
        Some(TestRecordRequest {
            id: record.id,
            full_name: record.full_name,
            email: record.email,
            books: record.books,
            number: record.number,
        })
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub async fn submit(&mut self, mut form: TestRecordRequest) -> AppResult<()> {
        form.validate()?;
        // The update body carries the id; creates let the server assign one.
        form.id = self.editing;
        let replacement = self.editing.map(|id| TestRecord {
            id: Some(id),
            full_name: form.full_name.clone(),
            email: form.email.clone(),
            books: form.books.clone(),
            number: form.number,
        });

        let body = RequestBody::json(&form)?;
        self.list.save(self.editing.as_ref(), body, replacement).await?;
        self.editing = None;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.list.delete(&id).await
    }
}
