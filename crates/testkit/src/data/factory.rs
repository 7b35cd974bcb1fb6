//! Quick factories
//!
//! One-call construction of fully valid random entities for tests that
//! do not care about specifics. Pure compositions of the builders.

use super::{CommentBuilder, CommentData, PostBuilder, PostData, UserBuilder, UserData};

/// A random registerable user with the default policy-compliant password.
pub fn quick_user() -> UserData {
    UserBuilder::new().random_email().random_name().build()
}

/// A random personal post with `blocks` text blocks by the given author.
pub fn quick_post(author_id: i64, blocks: usize) -> PostData {
    PostBuilder::new()
        .author(author_id)
        .random_title()
        .random_text_blocks(blocks)
        .build()
}

/// A random single-sentence comment on the given post.
pub fn quick_comment(post_id: i64, author_id: i64) -> CommentData {
    CommentBuilder::new()
        .post(post_id)
        .commenter(author_id)
        .random_content()
        .build()
}
