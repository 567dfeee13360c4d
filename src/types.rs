//! Records extracted from the export.
//!
//! Produced by [`crate::extract`], rendered by [`crate::frontmatter`], and
//! written by [`crate::generate`]. Serializable so `scan --json` can dump the
//! extraction for inspection.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A published blog post.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// Platform post id (`wp:post_id`)
    pub id: String,
    pub title: String,
    /// Publish date; the Unix epoch when the item has none
    pub date: DateTime<Utc>,
    /// Category names in source order, duplicates kept
    pub tags: Vec<String>,
    /// Output file key, `YYYY-MM-<link tail>`
    pub slug: String,
    /// Raw body markup, written verbatim
    pub content: String,
    /// True iff the post carries a `passthrough_url` custom field
    pub is_link_blog: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_link: Option<String>,
}

/// A comment on a post.
///
/// Refers to its post by id only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    /// `{post_id}-{ordinal}`, ordinal zero-based in source order
    pub comment_id: String,
    pub post_id: String,
    pub name: String,
    pub text: String,
    pub date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

/// A post together with the comments attached to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedPost {
    pub post: Post,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<Comment>,
}
