//! Search bar and suggestions

use crate::testkit::{Page, TestkitResult};

const SEARCH_INPUT: &str = "input[placeholder='Tìm kiếm...']";
const SUGGESTIONS_DROPDOWN: &str = "div.absolute.top-full";
const NO_RESULTS_MESSAGE: &str = "p:has-text('Không tìm thấy kết quả nào.')";

pub struct SearchBar<'a> {
    page: &'a Page,
}

impl<'a> SearchBar<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    /// The search input lives in the global navigation; any page with
    /// the navigation bar works.
    pub async fn wait_visible(&self) -> TestkitResult<()> {
        self.page.wait_visible(SEARCH_INPUT).await
    }

    pub async fn type_query(&self, query: &str) -> TestkitResult<()> {
        self.page.fill(SEARCH_INPUT, query).await?;
        self.page.settle().await;
        Ok(())
    }

    /// Current value of the search input.
    pub async fn query_value(&self) -> TestkitResult<String> {
        let script = format!(
            "document.querySelector({}).value",
            serde_json::to_string(SEARCH_INPUT)?
        );
        let value = self.page.eval(&script).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// True when the suggestions dropdown appears within the window.
    pub async fn suggestions_visible(&self, timeout_ms: u64) -> TestkitResult<bool> {
        self.page
            .is_visible_within(SUGGESTIONS_DROPDOWN, timeout_ms)
            .await
    }

    pub async fn no_results_visible(&self, timeout_ms: u64) -> TestkitResult<bool> {
        self.page
            .is_visible_within(NO_RESULTS_MESSAGE, timeout_ms)
            .await
    }

    pub async fn press_enter(&self) -> TestkitResult<()> {
        self.page.press(SEARCH_INPUT, "Enter").await
    }
}
