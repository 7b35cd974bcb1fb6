//! Comment endpoints

use super::{ApiResponse, BlogApi};
use crate::data::CommentData;
use crate::error::TestkitResult;

pub struct CommentsApi<'a> {
    pub(super) api: &'a BlogApi,
}

impl CommentsApi<'_> {
    /// Create a comment or, when the data carries a parent id, a reply.
    pub async fn create(&self, comment: &CommentData) -> TestkitResult<ApiResponse> {
        self.api.post("comments", comment.to_value()).await
    }

    /// Paginated comments for a post.
    pub async fn list(&self, post_id: i64, page: u32, limit: u32) -> TestkitResult<ApiResponse> {
        self.api
            .get(
                "comments",
                &[
                    ("postId", post_id.to_string()),
                    ("page", page.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await
    }

    pub async fn delete(&self, comment_id: i64) -> TestkitResult<ApiResponse> {
        self.api.delete(&format!("comments/{comment_id}"), &[]).await
    }
}
