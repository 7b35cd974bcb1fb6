//! Test data model and builders
//!
//! Value types mirror the backend's request payloads. Serialization
//! omits unset optional fields entirely (never `null`) so the server
//! applies its own defaults.

pub mod builders;
pub mod factory;

pub use builders::{BlockBuilder, CommentBuilder, PostBuilder, UserBuilder};
pub use factory::{quick_comment, quick_post, quick_user};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// Blog post types matching the backend enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostType {
    Personal,
    Community,
    Repost,
}

/// Content block types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BlockType {
    Text,
    Image,
    Video,
    Code,
    Quote,
}

/// Whether a comment targets the whole post or a single block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CommentScope {
    Post,
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// User registration/profile data.
#[derive(Debug, Clone, Serialize)]
pub struct UserData {
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

/// One positioned content unit inside a post's layout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockData {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub content: String,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<String>,
}

/// Blog post creation data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    pub title: String,
    #[serde(rename = "type")]
    pub post_type: PostType,
    pub author_id: i64,
    pub blocks: Vec<BlockData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_post_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hashtag_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

/// Comment creation data.
///
/// `block_id` is only meaningful under BLOCK scope, which a
/// `skip_serializing_if` attribute cannot express, so serialization is
/// spelled out.
#[derive(Debug, Clone)]
pub struct CommentData {
    pub post_id: i64,
    pub commenter_id: i64,
    pub content: String,
    pub scope: CommentScope,
    pub parent_comment_id: Option<i64>,
    pub reply_to_user_id: Option<i64>,
    pub block_id: Option<i64>,
}

impl Serialize for CommentData {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("postId", &self.post_id)?;
        map.serialize_entry("commenterId", &self.commenter_id)?;
        map.serialize_entry("content", &self.content)?;
        map.serialize_entry("type", &self.scope)?;
        if let Some(parent) = self.parent_comment_id {
            map.serialize_entry("parentCommentId", &parent)?;
        }
        if let Some(user) = self.reply_to_user_id {
            map.serialize_entry("replyToUserId", &user)?;
        }
        if let Some(block) = self.block_id {
            if self.scope == CommentScope::Block {
                map.serialize_entry("blockId", &block)?;
            }
        }
        map.end()
    }
}

fn to_value<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

impl UserData {
    pub fn to_value(&self) -> Value {
        to_value(self)
    }
}

impl BlockData {
    pub fn to_value(&self) -> Value {
        to_value(self)
    }
}

impl PostData {
    pub fn to_value(&self) -> Value {
        to_value(self)
    }
}

impl CommentData {
    pub fn to_value(&self) -> Value {
        to_value(self)
    }
}
