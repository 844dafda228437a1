#[cfg(test)]
pub mod fixtures {
    use jsonwebtoken::{encode, EncodingKey, Header};

    use crate::models::domain::{Announcement, Event, Post, TestRecord, UserAccount};

    /// Signs an arbitrary payload; the decoder never checks the key.
    pub fn mint_token(payload: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &payload,
            &EncodingKey::from_secret(b"fixture-signing-key"),
        )
        .expect("fixture token encodes")
    }

    pub fn test_announcement(id: i64, topic: &str) -> Announcement {
        Announcement {
            id,
            topic: topic.to_string(),
            description: format!("{} details", topic),
            created_by: "admin".to_string(),
            created_at: "2025-08-20T10:00:00".to_string(),
        }
    }

    pub fn test_event(id: i64, title: &str) -> Event {
        Event {
            id,
            title: title.to_string(),
            description: "Community gathering".to_string(),
            image: Some(format!("uploads/{}.png", id)),
            event_date: "2025-08-22T18:00:00".to_string(),
            location: "Kathmandu".to_string(),
            created_at: None,
        }
    }

    pub fn test_record(id: i64, name: &str) -> TestRecord {
        TestRecord {
            id: Some(id),
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            books: "Rust in Action".to_string(),
            number: 3,
        }
    }

    pub fn test_post(id: i64, title: &str) -> Post {
        Post {
            post_id: id,
            title: title.to_string(),
            content: "Hello everyone".to_string(),
            image_url: None,
            created_by: "u-1".to_string(),
            full_name: Some("Author".to_string()),
            created_at: "2025-08-20T10:00:00".to_string(),
            comments: Vec::new(),
            likes: Vec::new(),
        }
    }

    pub fn test_user_account(id: &str, role: &str) -> UserAccount {
        UserAccount {
            id: id.to_string(),
            full_name: "Test User".to_string(),
            email: format!("{}@example.com", id),
            roles: vec![role.to_string()],
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::{collections::VecDeque, sync::Mutex};

    use async_trait::async_trait;

    use crate::{
        api::{ApiRequest, ApiResponse, HttpTransport},
        errors::{AppError, AppResult},
    };

    /// Replays scripted responses in order and records every request.
    #[derive(Default)]
    pub struct StubTransport {
        responses: Mutex<VecDeque<AppResult<ApiResponse>>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl StubTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn respond(&self, status: u16, body: &str) {
            self.responses
                .lock()
                .unwrap()
                .push_back(Ok(ApiResponse::new(status, body)));
        }

        pub fn respond_json(&self, status: u16, body: &impl serde::Serialize) {
            self.respond(status, &serde_json::to_string(body).unwrap());
        }

        pub fn fail(&self, message: &str) {
            self.responses
                .lock()
                .unwrap()
                .push_back(Err(AppError::NetworkFailure(message.to_string())));
        }

        pub fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub fn last_request(&self) -> ApiRequest {
            self.requests().last().cloned().expect("at least one request")
        }
    }

    #[async_trait]
    impl HttpTransport for StubTransport {
        async fn execute(&self, request: ApiRequest) -> AppResult<ApiResponse> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(AppError::NetworkFailure("no scripted response".into())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::auth::decode_claims;
    use serde_json::json;

    #[test]
    fn test_fixtures_mint_token_decodes() {
        let token = mint_token(json!({ "role": "admin" }));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.effective_role(), Some("admin"));
    }

    #[test]
    fn test_fixtures_records() {
        assert_eq!(test_record(4, "Ram").email, "ram@example.com");
        assert_eq!(test_post(2, "Hi").post_id, 2);
        assert_eq!(test_user_account("u1", "User").roles, vec!["User"]);
    }
}
