use serde::{Deserialize, Serialize};

use crate::services::remote_list::Resource;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub event_date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Event {
    /// Upload path relative to the API host, if the event has an image.
    pub fn image_path(&self) -> Option<&str> {
        self.image.as_deref().filter(|path| !path.trim().is_empty())
    }
}

impl Resource for Event {
    type Id = i64;

    fn id(&self) -> Option<i64> {
        Some(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_deserialization_without_image() {
        let json = r#"{
            "id": 1,
            "title": "Hike",
            "description": "Morning hike",
            "image": null,
            "eventDate": "2025-08-22T06:00:00",
            "location": "Shivapuri"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_date, "2025-08-22T06:00:00");
        assert_eq!(event.image_path(), None);
    }

    #[test]
    fn test_image_path() {
        let event = Event {
            id: 1,
            title: "Hike".into(),
            description: String::new(),
            image: Some("/uploads/hike.jpg".into()),
            event_date: String::new(),
            location: String::new(),
            created_at: None,
        };

        assert_eq!(event.image_path(), Some("/uploads/hike.jpg"));

        let blank = Event {
            image: Some("  ".into()),
            ..event
        };
        assert_eq!(blank.image_path(), None);
    }
}
