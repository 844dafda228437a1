use validator::Validate;

use crate::{
    api::{AuthMode, RequestBody},
    errors::AppResult,
    models::{domain::Announcement, dto::request::AnnouncementRequest},
    services::remote_list::{Endpoint, RemoteList},
};

pub const USER_FEED_PATH: &str = "/api/UserAnnouncement";

pub fn admin_endpoint(announcement_api_url: &str) -> Endpoint {
    Endpoint::new("announcement", "announcements", announcement_api_url, AuthMode::Bearer)
}

pub fn feed_endpoint() -> Endpoint {
    Endpoint::new("announcement", "announcements", USER_FEED_PATH, AuthMode::Public)
}

/// Admin CRUD over announcements.
pub struct AnnouncementsScreen {
    list: RemoteList<Announcement>,
    editing: Option<i64>,
}

impl AnnouncementsScreen {
    pub fn new(list: RemoteList<Announcement>) -> Self {
        Self {
            list,
            editing: None,
        }
    }

    pub fn list(&self) -> &RemoteList<Announcement> {
        &self.list
    }

    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub async fn mount(&self) -> AppResult<()> {
        self.list.mount().await
    }

    /// Starts editing and returns the form prefilled from the listed item.
    pub async fn begin_edit(&mut self, id: i64) -> Option<AnnouncementRequest> {
        let announcement = self.list.find(&id).await?;
        self.editing = Some(id);
        Some(AnnouncementRequest {
            topic: announcement.topic,
            description: announcement.description,
        })
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub async fn submit(&mut self, form: AnnouncementRequest) -> AppResult<()> {
        form.validate()?;
        let body = RequestBody::json(&form)?;
        self.list.save(self.editing.as_ref(), body, None).await?;
        self.editing = None;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.list.delete(&id).await
    }
}
