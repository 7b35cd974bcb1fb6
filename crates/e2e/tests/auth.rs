//! Authentication flows, API and UI.

use blogtest_e2e::pages::{LoginPage, RegisterPage};
use blogtest_e2e::require_live;
use blogtest_e2e::testkit::{fixtures, quick_user, TestkitError};

#[tokio::test]
async fn register_then_login_round_trip() {
    require_live!();
    fixtures::run("register_then_login_round_trip", |ctx| async move {
        let user = quick_user();
        let api = ctx.api();

        let response = api.auth().register(&user.email, &user.name, &user.password).await?;
        assert!(
            response.success,
            "registration rejected ({}): {}",
            response.status,
            response.error_text()
        );

        let response = api.auth().login(&user.email, &user.password).await?;
        assert!(response.success, "fresh account could not log in");
        assert!(
            api.bearer().is_some(),
            "login must install the bearer token"
        );

        let me = api.auth().me().await?;
        assert!(me.success);
        assert_eq!(
            me.data_field("email").and_then(serde_json::Value::as_str),
            Some(user.email.as_str())
        );
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn duplicate_email_registration_is_rejected() {
    require_live!();
    fixtures::run("duplicate_email_registration_is_rejected", |ctx| async move {
        let user = quick_user();
        let api = ctx.api();

        let first = api.auth().register(&user.email, &user.name, &user.password).await?;
        assert!(first.success);

        let second = api.auth().register(&user.email, &user.name, &user.password).await?;
        assert!(!second.success, "duplicate email must not register");
        assert!(
            second.status == 400 || second.status == 409,
            "expected 400 or 409, got {}",
            second.status
        );
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn logout_always_drops_the_bearer_token() {
    require_live!();
    fixtures::run("logout_always_drops_the_bearer_token", |ctx| async move {
        let session = ctx.user().await?;
        let api = ctx.api();
        assert!(api.bearer().is_some(), "logged-in client carries a token");
        assert!(!session.token.is_empty());

        api.auth().logout().await?;
        assert!(api.bearer().is_none(), "logout must drop the token");
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn ui_registration_of_a_fresh_account_succeeds() {
    require_live!();
    fixtures::run("ui_registration_of_a_fresh_account_succeeds", |ctx| async move {
        let settings = ctx.settings().clone();
        let user = quick_user();

        let page = ctx.page().await?;
        let register = RegisterPage::new(page);
        register.open().await?;
        register.register(&user.name, &user.email, &user.password).await?;

        assert!(
            register.left_register_page(settings.timeouts.navigation_ms).await?,
            "successful registration should leave the register page"
        );

        // The fresh account must be able to log in through the API.
        let response = ctx.api().auth().login(&user.email, &user.password).await?;
        assert!(
            response.success,
            "UI-registered account rejected at login ({}): {}",
            response.status,
            response.error_text()
        );
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn ui_login_with_valid_credentials_redirects() {
    require_live!();
    fixtures::run("ui_login_with_valid_credentials_redirects", |ctx| async move {
        let settings = ctx.settings().clone();
        let Some(credentials) = settings.credentials.clone() else {
            return Err(TestkitError::Skipped(
                "BLOG_USER_EMAIL / BLOG_USER_PASSWORD not set".to_string(),
            ));
        };

        let page = ctx.page().await?;
        let login = LoginPage::new(page);
        login.open().await?;
        login.login(&credentials.email, &credentials.password).await?;

        assert!(
            login.redirected_after_login(settings.timeouts.navigation_ms).await?,
            "valid credentials should leave the login page"
        );
        assert!(login.logged_in(settings.timeouts.element_ms).await?);
        Ok(())
    })
    .await;
}

#[tokio::test]
async fn ui_login_with_wrong_password_shows_error() {
    require_live!();
    fixtures::run("ui_login_with_wrong_password_shows_error", |ctx| async move {
        let settings = ctx.settings().clone();
        let Some(credentials) = settings.credentials.clone() else {
            return Err(TestkitError::Skipped(
                "BLOG_USER_EMAIL / BLOG_USER_PASSWORD not set".to_string(),
            ));
        };

        let page = ctx.page().await?;
        let login = LoginPage::new(page);
        login.open().await?;
        login.login(&credentials.email, "Definitely-Wrong-1").await?;

        assert!(
            login.error_visible(settings.timeouts.element_ms).await?,
            "wrong password should surface an error toast"
        );
        assert!(
            !login.redirected_after_login(2_000).await?,
            "wrong password must not log in"
        );
        Ok(())
    })
    .await;
}
