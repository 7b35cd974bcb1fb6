//! Fluent builders for test entities
//!
//! Each builder owns a mutable draft; configuration methods consume and
//! return the builder, and `build()` fills any missing required fields
//! with generated values before handing out the finished value. Builders
//! never validate and never perform I/O.

use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::Name;
use fake::Fake;
use rand::Rng;

use super::{BlockData, BlockType, CommentData, CommentScope, Gender, PostData, PostType, UserData};

/// Default password satisfying the backend policy (length, mixed case,
/// digit).
pub const DEFAULT_PASSWORD: &str = "Test@12345";

/// Vertical distance between stacked blocks when no explicit position
/// is given.
const BLOCK_STACK_STEP: i64 = 100;

const DEFAULT_BLOCK_WIDTH: i64 = 12;
const DEFAULT_BLOCK_HEIGHT: i64 = 100;
const IMAGE_BLOCK_HEIGHT: i64 = 200;

fn random_email() -> String {
    SafeEmail().fake()
}

fn random_name() -> String {
    Name().fake()
}

fn random_sentence() -> String {
    Sentence(5..12).fake()
}

fn random_title() -> String {
    let sentence: String = Sentence(4..8).fake();
    sentence.trim_end_matches('.').to_string()
}

fn random_paragraph() -> String {
    Paragraph(2..5).fake()
}

fn random_image_url() -> String {
    let seed: u32 = rand::thread_rng().gen_range(1..100_000);
    format!("https://picsum.photos/seed/{seed}/800/600")
}

fn random_video_url() -> String {
    let seed: u32 = rand::thread_rng().gen_range(1..100_000);
    format!("https://videos.example.com/clip-{seed}.mp4")
}

const DEFAULT_CODE_SNIPPET: &str = "console.log('hello world');";

/// Builder for user registration data.
///
/// ```
/// use blogtest_testkit::data::UserBuilder;
///
/// let user = UserBuilder::new()
///     .random_email()
///     .name("John Doe")
///     .build();
/// assert_eq!(user.name, "John Doe");
/// ```
#[derive(Debug)]
pub struct UserBuilder {
    draft: UserData,
}

impl UserBuilder {
    pub fn new() -> Self {
        Self {
            draft: UserData {
                email: String::new(),
                name: String::new(),
                password: DEFAULT_PASSWORD.to_string(),
                bio: None,
                gender: None,
            },
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.draft.email = email.into();
        self
    }

    pub fn random_email(mut self) -> Self {
        self.draft.email = random_email();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.draft.name = name.into();
        self
    }

    pub fn random_name(mut self) -> Self {
        self.draft.name = random_name();
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.draft.password = password.into();
        self
    }

    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.draft.bio = Some(bio.into());
        self
    }

    pub fn random_bio(mut self) -> Self {
        self.draft.bio = Some(random_paragraph());
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.draft.gender = Some(gender);
        self
    }

    pub fn male(self) -> Self {
        self.gender(Gender::Male)
    }

    pub fn female(self) -> Self {
        self.gender(Gender::Female)
    }

    /// Finish the draft, generating email/name if unset.
    pub fn build(mut self) -> UserData {
        if self.draft.email.is_empty() {
            self.draft.email = random_email();
        }
        if self.draft.name.is_empty() {
            self.draft.name = random_name();
        }
        self.draft
    }
}

impl Default for UserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for content blocks.
#[derive(Debug)]
pub struct BlockBuilder {
    draft: BlockData,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            draft: BlockData {
                block_type: BlockType::Text,
                content: String::new(),
                x: 0,
                y: 0,
                width: DEFAULT_BLOCK_WIDTH,
                height: DEFAULT_BLOCK_HEIGHT,
                image_caption: None,
                object_fit: None,
            },
        }
    }

    pub fn text(mut self) -> Self {
        self.draft.block_type = BlockType::Text;
        self
    }

    pub fn image(mut self) -> Self {
        self.draft.block_type = BlockType::Image;
        self
    }

    pub fn video(mut self) -> Self {
        self.draft.block_type = BlockType::Video;
        self
    }

    pub fn code(mut self) -> Self {
        self.draft.block_type = BlockType::Code;
        self
    }

    pub fn quote(mut self) -> Self {
        self.draft.block_type = BlockType::Quote;
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.draft.content = content.into();
        self
    }

    pub fn random_text(mut self) -> Self {
        self.draft.content = random_paragraph();
        self
    }

    pub fn random_image_url(mut self) -> Self {
        self.draft.content = random_image_url();
        self
    }

    /// Grid position. Out-of-range values are accepted as-is; the
    /// backend validates.
    pub fn position(mut self, x: i64, y: i64) -> Self {
        self.draft.x = x;
        self.draft.y = y;
        self
    }

    pub fn size(mut self, width: i64, height: i64) -> Self {
        self.draft.width = width;
        self.draft.height = height;
        self
    }

    pub fn caption(mut self, caption: impl Into<String>) -> Self {
        self.draft.image_caption = Some(caption.into());
        self
    }

    pub fn object_fit(mut self, fit: impl Into<String>) -> Self {
        self.draft.object_fit = Some(fit.into());
        self
    }

    /// Finish the draft, generating type-appropriate content if unset.
    pub fn build(mut self) -> BlockData {
        if self.draft.content.is_empty() {
            self.draft.content = match self.draft.block_type {
                BlockType::Text => random_paragraph(),
                BlockType::Image => random_image_url(),
                BlockType::Video => random_video_url(),
                BlockType::Code => DEFAULT_CODE_SNIPPET.to_string(),
                BlockType::Quote => random_sentence(),
            };
        }
        self.draft
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for blog post data.
///
/// ```
/// use blogtest_testkit::data::PostBuilder;
///
/// let post = PostBuilder::new()
///     .author(1)
///     .title("My Post")
///     .text_block("Content here")
///     .personal()
///     .build();
/// assert_eq!(post.blocks.len(), 1);
/// ```
#[derive(Debug)]
pub struct PostBuilder {
    draft: PostData,
}

impl PostBuilder {
    pub fn new() -> Self {
        Self {
            draft: PostData {
                title: String::new(),
                post_type: PostType::Personal,
                author_id: 0,
                blocks: Vec::new(),
                community_id: None,
                original_post_id: None,
                hashtag_ids: Vec::new(),
                thumbnail_url: None,
            },
        }
    }

    pub fn author(mut self, author_id: i64) -> Self {
        self.draft.author_id = author_id;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.draft.title = title.into();
        self
    }

    pub fn random_title(mut self) -> Self {
        self.draft.title = random_title();
        self
    }

    pub fn personal(mut self) -> Self {
        self.draft.post_type = PostType::Personal;
        self
    }

    pub fn community(mut self, community_id: i64) -> Self {
        self.draft.post_type = PostType::Community;
        self.draft.community_id = Some(community_id);
        self
    }

    pub fn repost(mut self, original_post_id: i64) -> Self {
        self.draft.post_type = PostType::Repost;
        self.draft.original_post_id = Some(original_post_id);
        self
    }

    pub fn block(mut self, block: BlockData) -> Self {
        self.draft.blocks.push(block);
        self
    }

    fn next_stack_y(&self) -> i64 {
        self.draft.blocks.len() as i64 * BLOCK_STACK_STEP
    }

    /// Append a text block, stacked below the existing blocks.
    pub fn text_block(mut self, content: impl Into<String>) -> Self {
        let y = self.next_stack_y();
        let block = BlockBuilder::new()
            .text()
            .content(content)
            .position(0, y)
            .size(DEFAULT_BLOCK_WIDTH, DEFAULT_BLOCK_HEIGHT)
            .build();
        self.draft.blocks.push(block);
        self
    }

    /// Append `count` random text blocks, stacked vertically.
    pub fn random_text_blocks(mut self, count: usize) -> Self {
        for _ in 0..count {
            let y = self.next_stack_y();
            let block = BlockBuilder::new()
                .text()
                .random_text()
                .position(0, y)
                .size(DEFAULT_BLOCK_WIDTH, DEFAULT_BLOCK_HEIGHT)
                .build();
            self.draft.blocks.push(block);
        }
        self
    }

    /// Append an image block, stacked below the existing blocks.
    pub fn image_block(mut self, image_url: impl Into<String>) -> Self {
        let y = self.next_stack_y();
        let block = BlockBuilder::new()
            .image()
            .content(image_url)
            .position(0, y)
            .size(DEFAULT_BLOCK_WIDTH, IMAGE_BLOCK_HEIGHT)
            .build();
        self.draft.blocks.push(block);
        self
    }

    pub fn hashtags(mut self, hashtag_ids: Vec<i64>) -> Self {
        self.draft.hashtag_ids = hashtag_ids;
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.draft.thumbnail_url = Some(url.into());
        self
    }

    /// Finish the draft. A missing title is generated; an empty block
    /// list gets one random text block so the result is always
    /// submittable.
    pub fn build(mut self) -> PostData {
        if self.draft.title.is_empty() {
            self.draft.title = random_title();
        }
        if self.draft.blocks.is_empty() {
            self = self.random_text_blocks(1);
        }
        self.draft
    }
}

impl Default for PostBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for comment data.
#[derive(Debug)]
pub struct CommentBuilder {
    draft: CommentData,
}

impl CommentBuilder {
    pub fn new() -> Self {
        Self {
            draft: CommentData {
                post_id: 0,
                commenter_id: 0,
                content: String::new(),
                scope: CommentScope::Post,
                parent_comment_id: None,
                reply_to_user_id: None,
                block_id: None,
            },
        }
    }

    pub fn post(mut self, post_id: i64) -> Self {
        self.draft.post_id = post_id;
        self
    }

    pub fn commenter(mut self, commenter_id: i64) -> Self {
        self.draft.commenter_id = commenter_id;
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.draft.content = content.into();
        self
    }

    pub fn random_content(mut self) -> Self {
        self.draft.content = random_sentence();
        self
    }

    /// Mark this comment as a reply to another comment.
    pub fn reply_to(mut self, parent_comment_id: i64) -> Self {
        self.draft.parent_comment_id = Some(parent_comment_id);
        self
    }

    pub fn reply_target(mut self, user_id: i64) -> Self {
        self.draft.reply_to_user_id = Some(user_id);
        self
    }

    /// Attach the comment to a single block instead of the whole post.
    pub fn block_scope(mut self, block_id: i64) -> Self {
        self.draft.scope = CommentScope::Block;
        self.draft.block_id = Some(block_id);
        self
    }

    pub fn build(mut self) -> CommentData {
        if self.draft.content.is_empty() {
            self.draft.content = random_sentence();
        }
        self.draft
    }
}

impl Default for CommentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_build_fills_missing_email_and_name() {
        let user = UserBuilder::new().build();
        assert!(!user.email.is_empty());
        assert!(user.email.contains('@'));
        assert!(!user.name.is_empty());
        assert_eq!(user.password, DEFAULT_PASSWORD);
    }

    #[test]
    fn block_build_fills_content_per_type() {
        let text = BlockBuilder::new().text().build();
        assert!(!text.content.is_empty());

        let image = BlockBuilder::new().image().build();
        assert!(image.content.starts_with("http"));

        let code = BlockBuilder::new().code().build();
        assert!(!code.content.is_empty());
    }

    #[test]
    fn block_explicit_content_wins_over_generation() {
        let block = BlockBuilder::new().text().content("exact words").build();
        assert_eq!(block.content, "exact words");
    }

    #[test]
    fn post_build_never_yields_empty_blocks() {
        let post = PostBuilder::new().author(1).build();
        assert!(!post.blocks.is_empty());
        assert!(!post.title.is_empty());
    }

    #[test]
    fn post_blocks_stack_vertically_by_default() {
        let post = PostBuilder::new()
            .author(1)
            .text_block("one")
            .text_block("two")
            .text_block("three")
            .build();
        let ys: Vec<i64> = post.blocks.iter().map(|b| b.y).collect();
        assert_eq!(ys, vec![0, 100, 200]);
        assert!(post.blocks.iter().all(|b| b.x == 0));
    }

    #[test]
    fn image_blocks_get_taller_default() {
        let post = PostBuilder::new()
            .author(1)
            .text_block("intro")
            .image_block("https://example.com/cat.png")
            .build();
        assert_eq!(post.blocks[1].height, 200);
        assert_eq!(post.blocks[1].y, 100);
    }

    #[test]
    fn community_post_without_author_keeps_default_author() {
        // Builders perform no validation; a community post with the
        // default author id of 0 is handed through unchanged.
        let post = PostBuilder::new().community(5).build();
        assert_eq!(post.author_id, 0);
        assert_eq!(post.post_type, PostType::Community);
        assert_eq!(post.community_id, Some(5));
    }

    #[test]
    fn repost_records_original_post() {
        let post = PostBuilder::new().author(3).repost(42).build();
        assert_eq!(post.post_type, PostType::Repost);
        assert_eq!(post.original_post_id, Some(42));
    }

    #[test]
    fn comment_build_fills_content() {
        let comment = CommentBuilder::new().post(1).commenter(2).build();
        assert!(!comment.content.is_empty());
        assert_eq!(comment.scope, CommentScope::Post);
    }

    #[test]
    fn reply_sets_parent_and_target() {
        let comment = CommentBuilder::new()
            .post(1)
            .commenter(2)
            .reply_to(10)
            .reply_target(3)
            .build();
        assert_eq!(comment.parent_comment_id, Some(10));
        assert_eq!(comment.reply_to_user_id, Some(3));
    }

    #[test]
    fn builders_start_from_fresh_drafts() {
        let first = PostBuilder::new().text_block("a").build();
        let second = PostBuilder::new().build();
        // No state leaks between builder instances.
        assert_eq!(first.blocks.len(), 1);
        assert_eq!(second.blocks.len(), 1);
        assert_ne!(first.blocks[0].content, second.blocks[0].content);
    }
}
