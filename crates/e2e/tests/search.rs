//! Search bar behavior in the UI.

use blogtest_e2e::pages::{NewsfeedPage, SearchBar};
use blogtest_e2e::require_live;
use blogtest_e2e::testkit::{fixtures, quick_post};

#[tokio::test]
async fn search_input_accepts_typed_text() {
    require_live!();
    fixtures::run("search_input_accepts_typed_text", |ctx| async move {
        let page = ctx.page().await?;
        NewsfeedPage::new(page).open().await?;

        let search = SearchBar::new(page);
        search.wait_visible().await?;
        search.type_query("test search query").await?;
        assert_eq!(search.query_value().await?, "test search query");
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn typing_a_seeded_title_surfaces_suggestions() {
    require_live!();
    fixtures::run("typing_a_seeded_title_surfaces_suggestions", |ctx| async move {
        let session = ctx.user().await?.clone();
        let record = ctx.seed_post(&quick_post(session.id, 1)).await?;
        let settings = ctx.settings().clone();

        let page = ctx.page().await?;
        NewsfeedPage::new(page).open().await?;

        let search = SearchBar::new(page);
        search.wait_visible().await?;
        search.type_query(&record.title).await?;
        assert!(
            search.suggestions_visible(settings.timeouts.element_ms).await?,
            "typing a known title should open the suggestions dropdown"
        );
        Ok(())
    })
    .await;
}
