use serde::{Deserialize, Serialize};

use crate::services::remote_list::Resource;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Comment {
    #[serde(rename = "commentID")]
    pub comment_id: i64,
    #[serde(rename = "commentText")]
    pub comment_text: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "userFullName", default)]
    pub user_full_name: Option<String>,
    #[serde(rename = "commentedAt")]
    pub commented_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Like {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "userFullName", default)]
    pub user_full_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Post {
    #[serde(rename = "postID")]
    pub post_id: i64,
    pub title: String,
    pub content: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "createdBy")]
    pub created_by: String,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub comments: Vec<Comment>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub likes: Vec<Like>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Post {
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|like| like.user_id == user_id)
    }

    /// Adds or removes `user_id` from the likes, returning whether the post is now liked.
    pub fn toggle_like(&mut self, user_id: &str, display_name: &str) -> bool {
        if self.is_liked_by(user_id) {
            self.likes.retain(|like| like.user_id != user_id);
            false
        } else {
            self.likes.push(Like {
                user_id: user_id.to_string(),
                user_full_name: Some(display_name.to_string()),
            });
            true
        }
    }
}

impl Resource for Post {
    type Id = i64;

    fn id(&self) -> Option<i64> {
        Some(self.post_id)
    }
}
