use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use chrono::{DateTime, Utc};

use crate::{
    api::{AuthMode, HttpMethod, RequestBody},
    clock::Clock,
    errors::AppResult,
    models::{
        domain::{Comment, Post},
        dto::request::{CommentRequest, LikeRequest, PostForm},
    },
    services::remote_list::{Endpoint, RemoteList},
};

pub const POSTS_PATH: &str = "/api/Post";
pub const UPLOAD_PATH: &str = "/api/Post/UploadPost";

/// Name shown on optimistic likes and comments until the server list comes back.
pub const SELF_DISPLAY_NAME: &str = "You";

pub fn endpoint() -> Endpoint {
    Endpoint::new("post", "posts", POSTS_PATH, AuthMode::Public).create_at(UPLOAD_PATH)
}

/// Who is acting on the feed, taken from the session claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub display_name: String,
}

impl CurrentUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: SELF_DISPLAY_NAME.to_string(),
        }
    }
}

/// The community feed on the user dashboard.
///
/// Likes and comments are applied to the local list before the request goes
/// out. When the server refuses, the list is refetched so it matches the server
/// again. Deletes remove the post locally; creates and edits refetch.
pub struct PostsScreen {
    list: RemoteList<Post>,
    user: CurrentUser,
    clock: Arc<dyn Clock>,
    editing: Option<i64>,
    open_comments: HashSet<i64>,
    drafts: HashMap<i64, String>,
}

impl PostsScreen {
    pub fn new(list: RemoteList<Post>, user: CurrentUser, clock: Arc<dyn Clock>) -> Self {
        Self {
            list,
            user,
            clock,
            editing: None,
            open_comments: HashSet::new(),
            drafts: HashMap::new(),
        }
    }

    pub fn list(&self) -> &RemoteList<Post> {
        &self.list
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    pub fn editing(&self) -> Option<i64> {
        self.editing
    }

    pub async fn mount(&self) -> AppResult<()> {
        self.list.mount().await
    }

    pub async fn begin_edit(&mut self, post_id: i64) -> Option<PostForm> {
        let post = self.list.find(&post_id).await?;
        self.editing = Some(post_id);
        Some(PostForm {
            title: post.title,
            content: post.content,
            image: None,
        })
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub async fn submit(&mut self, form: PostForm) -> AppResult<()> {
        let fields = form.into_fields(&self.user.id).map_err(|e| {
            self.list.notifications().error(e.user_message());
            e
        })?;
        self.list
            .save(self.editing.as_ref(), RequestBody::Multipart(fields), None)
            .await?;
        self.editing = None;
        Ok(())
    }

    pub async fn delete(&self, post_id: i64) -> AppResult<()> {
        let path = self.list.endpoint().item_path(&post_id);
        self.list
            .action(HttpMethod::Delete, &path, RequestBody::Empty, "Failed to delete post")
            .await?;

        self.list.notifications().success("Post deleted!");
        self.list
            .patch(|posts| posts.retain(|post| post.post_id != post_id))
            .await;
        Ok(())
    }

    pub fn toggle_comments(&mut self, post_id: i64) -> bool {
        if self.open_comments.remove(&post_id) {
            false
        } else {
            self.open_comments.insert(post_id);
            true
        }
    }

    pub fn comments_open(&self, post_id: i64) -> bool {
        self.open_comments.contains(&post_id)
    }

    pub fn set_draft(&mut self, post_id: i64, text: impl Into<String>) {
        self.drafts.insert(post_id, text.into());
    }

    pub fn draft(&self, post_id: i64) -> &str {
        self.drafts.get(&post_id).map(String::as_str).unwrap_or("")
    }

    pub async fn toggle_like(&self, post_id: i64) -> AppResult<()> {
        let user = self.user.clone();
        self.list
            .patch(move |posts| {
                if let Some(post) = posts.iter_mut().find(|post| post.post_id == post_id) {
                    post.toggle_like(&user.id, &user.display_name);
                }
            })
            .await;

        let body = RequestBody::json(&LikeRequest {
            user_id: self.user.id.clone(),
        })?;
        let path = format!("{}/like", self.list.endpoint().item_path(&post_id));
        if let Err(e) = self
            .list
            .action(HttpMethod::Post, &path, body, "Failed to like/unlike")
            .await
        {
            self.resync().await;
            return Err(e);
        }
        Ok(())
    }

    /// Posts the draft for `post_id`. Returns `false` when the draft is blank
    /// and nothing was sent.
    pub async fn add_comment(&mut self, post_id: i64) -> AppResult<bool> {
        let text = self.draft(post_id).trim().to_string();
        if text.is_empty() {
            return Ok(false);
        }

        let now_ms = self.clock.now_millis();
        let provisional = Comment {
            comment_id: now_ms,
            comment_text: text.clone(),
            user_id: self.user.id.clone(),
            user_full_name: Some(self.user.display_name.clone()),
            commented_at: DateTime::<Utc>::from_timestamp_millis(now_ms)
                .map(|at| at.to_rfc3339())
                .unwrap_or_default(),
        };
        self.list
            .patch(move |posts| {
                if let Some(post) = posts.iter_mut().find(|post| post.post_id == post_id) {
                    post.comments.push(provisional);
                }
            })
            .await;
        self.drafts.remove(&post_id);

        let body = RequestBody::json(&CommentRequest {
            comment_text: text,
            user_id: self.user.id.clone(),
        })?;
        let path = format!("{}/comment", self.list.endpoint().item_path(&post_id));
        if let Err(e) = self
            .list
            .action(HttpMethod::Post, &path, body, "Failed to add comment")
            .await
        {
            self.resync().await;
            return Err(e);
        }
        Ok(true)
    }

    async fn resync(&self) {
        if let Err(e) = self.list.refresh().await {
            log::warn!("Could not resync posts: {}", e);
        }
    }
}
