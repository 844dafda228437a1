use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use validator::Validate;

use crate::{
    api::{FormField, FormValue},
    errors::{AppError, AppResult},
};

pub const DEFAULT_COUNTRY_CODE: &str = "+977";

static PHONE_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9][0-9 \-]{5,19}$").expect("PHONE_NUMBER_REGEX is a valid regex pattern")
});

static COUNTRY_CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[0-9]{1,4}$").expect("COUNTRY_CODE_REGEX is a valid regex pattern"));

#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(regex(path = *COUNTRY_CODE_REGEX, message = "Invalid country code"))]
    pub country_code: String,

    #[validate(regex(path = *PHONE_NUMBER_REGEX, message = "Invalid phone number"))]
    pub phone: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,

    pub confirm_password: String,
}

impl SignupForm {
    /// Password confirmation is checked before anything else so its message wins.
    pub fn into_request(self) -> AppResult<RegisterRequest> {
        if self.password != self.confirm_password {
            return Err(AppError::ValidationError("Passwords do not match.".to_string()));
        }
        self.validate()?;

        Ok(RegisterRequest {
            phone_number: format!("{}{}", self.country_code, self.phone),
            full_name: self.full_name,
            email: self.email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    pub id_token: String,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct AnnouncementRequest {
    #[validate(length(min = 1, max = 200))]
    pub topic: String,

    #[validate(length(min = 1))]
    pub description: String,
}

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Upload {
    fn into_field(self, name: &str) -> FormField {
        FormField {
            name: name.to_string(),
            value: FormValue::File {
                file_name: self.file_name,
                content_type: self.content_type,
                bytes: self.bytes,
            },
        }
    }
}

#[derive(Debug, Clone, Validate)]
pub struct EventForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    pub description: String,

    #[validate(length(min = 1, message = "Event date is required"))]
    pub event_date: String,

    pub location: String,

    pub image: Option<Upload>,
}

impl EventForm {
    pub fn into_fields(self) -> AppResult<Vec<FormField>> {
        self.validate()?;

        let mut fields = vec![
            FormField::text("title", self.title),
            FormField::text("description", self.description),
            FormField::text("eventDate", self.event_date),
            FormField::text("location", self.location),
        ];
        if let Some(image) = self.image {
            fields.push(image.into_field("image"));
        }
        Ok(fields)
    }
}

#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TestRecordRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[validate(length(min = 1, max = 100))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub books: String,

    pub number: i64,
}

#[derive(Debug, Clone)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub image: Option<Upload>,
}

impl PostForm {
    pub fn into_fields(self, created_by: &str) -> AppResult<Vec<FormField>> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Title and content are required.".to_string(),
            ));
        }

        let mut fields = vec![
            FormField::text("title", self.title),
            FormField::text("content", self.content),
            FormField::text("createdBy", created_by),
        ];
        if let Some(image) = self.image {
            fields.push(image.into_field("imageFile"));
        }
        Ok(fields)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LikeRequest {
    #[serde(rename = "userID")]
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentRequest {
    #[serde(rename = "commentText")]
    pub comment_text: String,
    #[serde(rename = "userID")]
    pub user_id: String,
}
