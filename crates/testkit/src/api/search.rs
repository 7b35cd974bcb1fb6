//! Search endpoints

use super::{ApiResponse, BlogApi};
use crate::error::TestkitResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchType {
    #[default]
    All,
    Posts,
    Users,
    Communities,
}

impl SearchType {
    fn as_str(self) -> &'static str {
        match self {
            SearchType::All => "all",
            SearchType::Posts => "posts",
            SearchType::Users => "users",
            SearchType::Communities => "communities",
        }
    }
}

pub struct SearchApi<'a> {
    pub(super) api: &'a BlogApi,
}

impl SearchApi<'_> {
    pub async fn query(
        &self,
        query: &str,
        search_type: SearchType,
        page: u32,
        limit: u32,
    ) -> TestkitResult<ApiResponse> {
        self.api
            .get(
                "search",
                &[
                    ("query", query.to_string()),
                    ("type", search_type.as_str().to_string()),
                    ("page", page.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await
    }
}
