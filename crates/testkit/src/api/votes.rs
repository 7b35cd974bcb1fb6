//! Voting endpoints

use serde_json::json;

use super::{ApiResponse, BlogApi};
use crate::error::TestkitResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteType {
    Upvote,
    Downvote,
}

impl VoteType {
    fn as_str(self) -> &'static str {
        match self {
            VoteType::Upvote => "upvote",
            VoteType::Downvote => "downvote",
        }
    }
}

pub struct VotesApi<'a> {
    pub(super) api: &'a BlogApi,
}

impl VotesApi<'_> {
    /// Cast a vote. Voting the same way twice toggles the vote off;
    /// voting the other way flips it.
    pub async fn vote(
        &self,
        user_id: i64,
        post_id: i64,
        vote_type: VoteType,
    ) -> TestkitResult<ApiResponse> {
        self.api
            .post(
                "votes",
                json!({
                    "userId": user_id,
                    "postId": post_id,
                    "voteType": vote_type.as_str()
                }),
            )
            .await
    }

    /// The user's current vote on a post, if any.
    pub async fn status(&self, user_id: i64, post_id: i64) -> TestkitResult<ApiResponse> {
        self.api
            .get(
                "votes/status",
                &[("userId", user_id.to_string()), ("postId", post_id.to_string())],
            )
            .await
    }
}
