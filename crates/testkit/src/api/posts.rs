//! Blog post endpoints

use serde_json::json;

use super::{ApiResponse, BlogApi};
use crate::data::PostData;
use crate::error::TestkitResult;

pub struct PostsApi<'a> {
    pub(super) api: &'a BlogApi,
}

impl PostsApi<'_> {
    /// Paginated newsfeed, optionally personalized for a user.
    pub async fn newsfeed(
        &self,
        page: u32,
        limit: u32,
        user_id: Option<i64>,
    ) -> TestkitResult<ApiResponse> {
        let mut query = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(user_id) = user_id {
            query.push(("userId", user_id.to_string()));
        }
        self.api.get("newsfeed", &query).await
    }

    pub async fn create(&self, post: &PostData) -> TestkitResult<ApiResponse> {
        self.api.post("blog-posts", post.to_value()).await
    }

    pub async fn get(&self, post_id: i64, user_id: Option<i64>) -> TestkitResult<ApiResponse> {
        let query: Vec<(&str, String)> = user_id
            .map(|id| vec![("userId", id.to_string())])
            .unwrap_or_default();
        self.api.get(&format!("blog-posts/{post_id}"), &query).await
    }

    /// Partial update; only the fields present in `update` change.
    pub async fn update(
        &self,
        post_id: i64,
        update: serde_json::Value,
    ) -> TestkitResult<ApiResponse> {
        self.api.patch(&format!("blog-posts/{post_id}"), update).await
    }

    pub async fn delete(&self, post_id: i64) -> TestkitResult<ApiResponse> {
        self.api.delete(&format!("blog-posts/{post_id}"), &[]).await
    }

    pub async fn repost(&self, original_post_id: i64, author_id: i64) -> TestkitResult<ApiResponse> {
        self.api
            .post(
                "blog-posts/repost",
                json!({
                    "authorId": author_id,
                    "originalPostId": original_post_id,
                    "type": "REPOST"
                }),
            )
            .await
    }

    /// Whether the current user already reposted the given post.
    pub async fn check_reposted(&self, original_post_id: i64) -> TestkitResult<ApiResponse> {
        self.api
            .get(
                "blog-posts/repost/check",
                &[("originalPostId", original_post_id.to_string())],
            )
            .await
    }

    pub async fn delete_repost(&self, original_post_id: i64) -> TestkitResult<ApiResponse> {
        self.api
            .delete(
                "blog-posts/repost",
                &[("originalPostId", original_post_id.to_string())],
            )
            .await
    }
}
