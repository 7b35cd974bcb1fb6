//! Emoji reaction endpoints

use serde_json::json;

use super::{ApiResponse, BlogApi};
use crate::error::TestkitResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactTarget {
    Post,
    Comment,
}

pub struct ReactsApi<'a> {
    pub(super) api: &'a BlogApi,
}

impl ReactsApi<'_> {
    /// React with an emoji. The backend expects the unused target id
    /// field present as an explicit null.
    pub async fn react(
        &self,
        user_id: i64,
        target_id: i64,
        emoji_id: i64,
        target: ReactTarget,
    ) -> TestkitResult<ApiResponse> {
        let (post_id, comment_id, type_name) = match target {
            ReactTarget::Post => (Some(target_id), None, "POST"),
            ReactTarget::Comment => (None, Some(target_id), "COMMENT"),
        };
        self.api
            .post(
                "user-reacts",
                json!({
                    "userId": user_id,
                    "postId": post_id,
                    "commentId": comment_id,
                    "emojiId": emoji_id,
                    "type": type_name
                }),
            )
            .await
    }

    /// All reactions on a post or comment.
    pub async fn list(&self, target_id: i64, target: ReactTarget) -> TestkitResult<ApiResponse> {
        let key = match target {
            ReactTarget::Post => "postId",
            ReactTarget::Comment => "commentId",
        };
        self.api.get("user-reacts", &[(key, target_id.to_string())]).await
    }
}
