use crate::{
    api::{AuthMode, RequestBody},
    errors::AppResult,
    models::{domain::Event, dto::request::EventForm, format::display_date},
    services::remote_list::{Endpoint, RemoteList},
};

pub const EVENTS_PATH: &str = "/api/Events";
pub const USER_FEED_PATH: &str = "/api/UserEvent";

pub fn admin_endpoint() -> Endpoint {
    Endpoint::new("event", "events", EVENTS_PATH, AuthMode::Public)
}

pub fn feed_endpoint() -> Endpoint {
    Endpoint::new("event", "events", USER_FEED_PATH, AuthMode::Public)
}

/// One line of the event feed: "Fri, Aug 22, 2025 • Patan".
pub fn event_summary(event: &Event) -> String {
    format!("{} \u{2022} {}", display_date(&event.event_date), event.location)
}

/// Admin CRUD over events. Writes are multipart so an image can ride along.
pub struct EventsScreen {
    list: RemoteList<Event>,
    editing: Option<i64>,
}

impl EventsScreen {
    pub fn new(list: RemoteList<Event>) -> Self {
        Self {
            list,
            editing: None,
        }
    }

    pub fn list(&self) -> &RemoteList<Event> {
        &self.list
    }

    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub async fn mount(&self) -> AppResult<()> {
        self.list.mount().await
    }

    /// Prefills everything but the image, which must be picked again.
    pub async fn begin_edit(&mut self, id: i64) -> Option<EventForm> {
        let event = self.list.find(&id).await?;
        self.editing = Some(id);
        Some(EventForm {
            title: event.title,
            description: event.description,
            event_date: event.event_date,
            location: event.location,
            image: None,
        })
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub async fn submit(&mut self, form: EventForm) -> AppResult<()> {
        let body = RequestBody::Multipart(form.into_fields()?);
        self.list.save(self.editing.as_ref(), body, None).await?;
        self.editing = None;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.list.delete(&id).await
    }
}
