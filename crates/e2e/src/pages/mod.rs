//! Page objects
//!
//! Thin wrappers over [`testkit::Page`] that name the app's screens
//! and keep CSS locators in one place per page.

mod login;
mod newsfeed;
mod post_details;
mod register;
mod search;

pub use login::LoginPage;
pub use newsfeed::NewsfeedPage;
pub use post_details::PostDetailsPage;
pub use register::RegisterPage;
pub use search::SearchBar;
