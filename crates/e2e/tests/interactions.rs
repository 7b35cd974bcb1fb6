//! Votes, saves, reposts and search over the API.

use blogtest_e2e::require_live;
use blogtest_e2e::testkit::{fixtures, quick_post, ReactTarget, SearchType, VoteType};
use serde_json::Value;

#[tokio::test]
async fn upvote_registers_and_toggles_off() {
    require_live!();
    fixtures::run("upvote_registers_and_toggles_off", |ctx| async move {
        let session = ctx.user().await?.clone();
        let record = ctx.seed_post(&quick_post(session.id, 1)).await?;
        let votes = ctx.api().votes();

        let cast = votes.vote(session.id, record.id, VoteType::Upvote).await?;
        assert!(cast.success, "vote rejected: {}", cast.error_text());

        let status = votes.status(session.id, record.id).await?;
        assert!(status.success);
        assert_eq!(
            status.data_field("voteType").and_then(Value::as_str),
            Some("upvote")
        );

        // Same vote again toggles it off.
        let toggled = votes.vote(session.id, record.id, VoteType::Upvote).await?;
        assert!(toggled.success);
        let status = votes.status(session.id, record.id).await?;
        assert!(
            status.data_field("voteType").and_then(Value::as_str) != Some("upvote"),
            "second identical vote should clear the first"
        );
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn save_toggle_round_trips() {
    require_live!();
    fixtures::run("save_toggle_round_trips", |ctx| async move {
        let session = ctx.user().await?.clone();
        let record = ctx.seed_post(&quick_post(session.id, 1)).await?;
        let saved = ctx.api().saved_posts();

        let toggled = saved.toggle(session.id, record.id).await?;
        assert!(toggled.success, "save rejected: {}", toggled.error_text());

        let listed = saved.list(session.id, 1, 50).await?;
        assert!(listed.success);
        let body = listed.body_data().map(Value::to_string).unwrap_or_default();
        assert!(
            body.contains(&record.id.to_string()),
            "saved list should mention post {}",
            record.id
        );

        // Toggle back so the teardown delete is clean.
        let toggled = saved.toggle(session.id, record.id).await?;
        assert!(toggled.success);
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn repost_check_reflects_repost_lifecycle() {
    require_live!();
    fixtures::run("repost_check_reflects_repost_lifecycle", |ctx| async move {
        let session = ctx.user().await?.clone();
        let record = ctx.seed_post(&quick_post(session.id, 1)).await?;
        let posts = ctx.api().posts();

        let created = posts.repost(record.id, session.id).await?;
        assert!(created.success, "repost rejected: {}", created.error_text());

        let checked = posts.check_reposted(record.id).await?;
        assert!(checked.success);

        let removed = posts.delete_repost(record.id).await?;
        assert!(removed.success, "repost removal rejected");
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn emoji_react_lands_on_the_post() {
    require_live!();
    fixtures::run("emoji_react_lands_on_the_post", |ctx| async move {
        let session = ctx.user().await?.clone();
        let record = ctx.seed_post(&quick_post(session.id, 1)).await?;
        let reacts = ctx.api().reacts();

        let reacted = reacts
            .react(session.id, record.id, 1, ReactTarget::Post)
            .await?;
        assert!(reacted.success, "react rejected: {}", reacted.error_text());

        let listed = reacts.list(record.id, ReactTarget::Post).await?;
        assert!(listed.success);
        let body = listed.body_data().map(Value::to_string).unwrap_or_default();
        assert!(
            body.contains(&session.id.to_string()),
            "reaction list should include user {}",
            session.id
        );
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn communities_list_and_fetch_agree() {
    require_live!();
    fixtures::run("communities_list_and_fetch_agree", |ctx| async move {
        ctx.user().await?;
        let communities = ctx.api().communities();

        let listed = communities.list(1, 20).await?;
        assert!(listed.success);
        let first_id = listed
            .body_data()
            .and_then(|data| data.get("items"))
            .and_then(Value::as_array)
            .and_then(|items| items.first())
            .and_then(|item| item.get("id"))
            .and_then(Value::as_i64);

        // An empty deployment has no communities; nothing more to check.
        let Some(id) = first_id else { return Ok(()) };

        let fetched = communities.get(id).await?;
        assert!(fetched.success);
        assert_eq!(fetched.data_field("id").and_then(Value::as_i64), Some(id));
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn search_finds_a_seeded_post_by_title() {
    require_live!();
    fixtures::run("search_finds_a_seeded_post_by_title", |ctx| async move {
        let session = ctx.user().await?.clone();
        let record = ctx.seed_post(&quick_post(session.id, 1)).await?;

        let results = ctx
            .api()
            .search()
            .query(&record.title, SearchType::Posts, 1, 20)
            .await?;
        assert!(results.success, "search failed: {}", results.error_text());
        let body = results.body_data().map(Value::to_string).unwrap_or_default();
        assert!(
            body.contains(&record.title),
            "search for '{}' should surface the seeded post",
            record.title
        );
        Ok(())
    })
    .await;
}
