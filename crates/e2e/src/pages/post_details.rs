//! Post details page

use crate::testkit::{Page, TestkitResult};

const POST_CONTAINER: &str = "article.post-details";
const POST_TITLE: &str = "article.post-details h1";
const AUTHOR_NAME: &str = ".post-details__author";
const COMMENT_ITEM: &str = ".comment-item";

pub struct PostDetailsPage<'a> {
    page: &'a Page,
}

impl<'a> PostDetailsPage<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    pub async fn open(&self, post_id: i64) -> TestkitResult<()> {
        self.page.goto(&format!("/post/{post_id}")).await?;
        self.page.wait_visible(POST_CONTAINER).await?;
        tracing::info!("post details open: id={}", post_id);
        Ok(())
    }

    pub async fn title(&self) -> TestkitResult<String> {
        Ok(self.page.inner_text(POST_TITLE).await?.trim().to_string())
    }

    pub async fn author_name(&self) -> TestkitResult<String> {
        Ok(self.page.inner_text(AUTHOR_NAME).await?.trim().to_string())
    }

    pub async fn comment_count(&self) -> TestkitResult<usize> {
        self.page.count(COMMENT_ITEM).await
    }

    pub async fn visible(&self, timeout_ms: u64) -> TestkitResult<bool> {
        self.page.is_visible_within(POST_CONTAINER, timeout_ms).await
    }
}
