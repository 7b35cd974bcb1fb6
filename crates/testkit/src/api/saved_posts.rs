//! Saved-post endpoints

use serde_json::json;

use super::{ApiResponse, BlogApi};
use crate::error::TestkitResult;

pub struct SavedPostsApi<'a> {
    pub(super) api: &'a BlogApi,
}

impl SavedPostsApi<'_> {
    /// Toggle whether the post is in the user's saved list.
    pub async fn toggle(&self, user_id: i64, post_id: i64) -> TestkitResult<ApiResponse> {
        self.api
            .post(
                "saved-posts/toggle",
                json!({"userId": user_id, "postId": post_id}),
            )
            .await
    }

    pub async fn list(&self, user_id: i64, page: u32, limit: u32) -> TestkitResult<ApiResponse> {
        self.api
            .get(
                "saved-posts",
                &[
                    ("userId", user_id.to_string()),
                    ("page", page.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await
    }
}
