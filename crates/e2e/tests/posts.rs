//! Post lifecycle, API and newsfeed UI.

use blogtest_e2e::pages::{NewsfeedPage, PostDetailsPage};
use blogtest_e2e::require_live;
use blogtest_e2e::testkit::{fixtures, quick_post, PostBuilder};
use serde_json::Value;

#[tokio::test]
async fn created_post_round_trips_through_the_api() {
    require_live!();
    fixtures::run("created_post_round_trips_through_the_api", |ctx| async move {
        let session = ctx.user().await?.clone();
        let post = PostBuilder::new()
            .author(session.id)
            .random_title()
            .random_text_blocks(2)
            .build();
        let title = post.title.clone();

        let record = ctx.seed_post(&post).await?;
        assert!(record.id > 0);

        let fetched = ctx.api().posts().get(record.id, Some(session.id)).await?;
        assert!(fetched.success, "created post must be fetchable");
        assert_eq!(
            fetched.data_field("title").and_then(Value::as_str),
            Some(title.as_str())
        );
        assert_eq!(
            fetched.data_field("id").and_then(Value::as_i64),
            Some(record.id)
        );
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn deleted_post_returns_not_found() {
    require_live!();
    fixtures::run("deleted_post_returns_not_found", |ctx| async move {
        let session = ctx.user().await?.clone();
        let post = quick_post(session.id, 1);

        let created = ctx.api().posts().create(&post).await?;
        assert!(created.success);
        let id = created
            .data_field("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                blogtest_e2e::testkit::TestkitError::Fixture("create returned no id".to_string())
            })?;

        let deleted = ctx.api().posts().delete(id).await?;
        assert!(deleted.success, "owner can delete their post");

        let fetched = ctx.api().posts().get(id, None).await?;
        assert!(!fetched.success);
        assert_eq!(fetched.status, 404, "deleted post should 404");
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn patched_title_sticks() {
    require_live!();
    fixtures::run("patched_title_sticks", |ctx| async move {
        let session = ctx.user().await?.clone();
        let record = ctx.seed_post(&quick_post(session.id, 1)).await?;
        let new_title = format!("{} (edited)", record.title);

        let patched = ctx
            .api()
            .posts()
            .update(record.id, serde_json::json!({"title": new_title}))
            .await?;
        assert!(patched.success, "update rejected: {}", patched.error_text());

        let fetched = ctx.api().posts().get(record.id, None).await?;
        assert_eq!(
            fetched.data_field("title").and_then(Value::as_str),
            Some(new_title.as_str())
        );
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn newsfeed_lists_posts() {
    require_live!();
    fixtures::run("newsfeed_lists_posts", |ctx| async move {
        let session = ctx.user().await?.clone();
        ctx.seed_post(&quick_post(session.id, 1)).await?;

        let feed = ctx.api().posts().newsfeed(1, 20, Some(session.id)).await?;
        assert!(feed.success);
        let posts = feed
            .data_field("items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        assert!(!posts.is_empty(), "newsfeed should contain posts");
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn seeded_post_appears_on_the_newsfeed_ui() {
    require_live!();
    fixtures::run("seeded_post_appears_on_the_newsfeed_ui", |ctx| async move {
        let auth = ctx.auth_user().await?.clone();
        let record = ctx.seed_post(&quick_post(auth.session.id, 1)).await?;

        let page = ctx.page().await?;
        let newsfeed = NewsfeedPage::new(page);
        newsfeed.open().await?;

        assert!(newsfeed.post_count().await? > 0);
        assert!(
            newsfeed.has_post_titled(&record.title).await?,
            "seeded post '{}' should be on the newsfeed",
            record.title
        );
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn post_details_page_shows_the_seeded_post() {
    require_live!();
    fixtures::run("post_details_page_shows_the_seeded_post", |ctx| async move {
        let auth = ctx.auth_user().await?.clone();
        let record = ctx.seed_post(&quick_post(auth.session.id, 2)).await?;

        let page = ctx.page().await?;
        let details = PostDetailsPage::new(page);
        details.open(record.id).await?;

        assert_eq!(details.title().await?, record.title);
        Ok(())
    })
    .await;
}
