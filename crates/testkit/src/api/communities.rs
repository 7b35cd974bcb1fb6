//! Community endpoints

use serde_json::json;

use super::{ApiResponse, BlogApi};
use crate::error::TestkitResult;

pub struct CommunitiesApi<'a> {
    pub(super) api: &'a BlogApi,
}

impl CommunitiesApi<'_> {
    pub async fn list(&self, page: u32, limit: u32) -> TestkitResult<ApiResponse> {
        self.api
            .get(
                "communities",
                &[("page", page.to_string()), ("limit", limit.to_string())],
            )
            .await
    }

    pub async fn get(&self, community_id: i64) -> TestkitResult<ApiResponse> {
        self.api.get(&format!("communities/{community_id}"), &[]).await
    }

    pub async fn join(&self, community_id: i64, user_id: i64) -> TestkitResult<ApiResponse> {
        self.api
            .post(
                &format!("communities/{community_id}/join"),
                json!({"userId": user_id}),
            )
            .await
    }
}
