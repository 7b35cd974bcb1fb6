//! Newsfeed page

use crate::testkit::{Page, TestkitResult};

const POST_ITEM: &str = ".newsfeed-masonry-item";
const POST_CARD: &str = "article.newsfeed-card";
const POST_TITLE: &str = "h2.newsfeed-card__title";

pub struct NewsfeedPage<'a> {
    page: &'a Page,
}

impl<'a> NewsfeedPage<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    pub async fn open(&self) -> TestkitResult<()> {
        self.page.goto("/").await?;
        self.wait_for_posts().await?;
        tracing::info!("newsfeed open");
        Ok(())
    }

    pub async fn wait_for_posts(&self) -> TestkitResult<()> {
        self.page.wait_visible(POST_ITEM).await
    }

    pub async fn post_count(&self) -> TestkitResult<usize> {
        self.page.count(POST_CARD).await
    }

    pub async fn post_titles(&self) -> TestkitResult<Vec<String>> {
        let titles = self.page.all_inner_texts(POST_TITLE).await?;
        Ok(titles.into_iter().map(|t| t.trim().to_string()).collect())
    }

    /// Whether a post with the given title is on the current page.
    pub async fn has_post_titled(&self, title: &str) -> TestkitResult<bool> {
        Ok(self.post_titles().await?.iter().any(|t| t == title))
    }
}
