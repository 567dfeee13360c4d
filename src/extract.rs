//! Item classification and record extraction.
//!
//! Turns a WXR `<item>` node into a [`Post`] plus its [`Comment`]s. Every
//! field goes through the [`crate::fields`] accessors, so a malformed item
//! never fails extraction; missing fields take their defaults instead.
//!
//! ## Dates
//!
//! `pubDate` is RFC 2822 in WordPress exports (`Thu, 15 Jun 2023 10:00:00
//! +0000`) and `wp:comment_date` is `YYYY-MM-DD HH:MM:SS`. Both are also
//! accepted as RFC 3339 or a bare `YYYY-MM-DD`. Times without an offset are
//! read as UTC. Anything unparseable resolves to the Unix epoch, the same as a
//! missing date.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

use crate::fields::Key;
use crate::naming::{comment_id, post_slug};
use crate::tree::Node;
use crate::types::{Comment, ExtractedPost, Post};

/// `wp:post_type` of the items that are converted.
pub const POST_TYPE: &str = "post";

/// `wp:meta_key` marking a link-blog post.
pub const PASSTHROUGH_URL_KEY: &str = "passthrough_url";

/// Whether an item is a blog post (as opposed to a page, attachment, ...).
pub fn is_post(item: &Node) -> bool {
    item.scalar(Key::PostType) == POST_TYPE
}

/// Extract a post and its comments from an item.
pub fn extract_post(item: &Node) -> ExtractedPost {
    let id = item.scalar(Key::PostId).to_string();
    let date = parse_date(item.scalar(Key::PubDate));
    let link = item.scalar(Key::Link);
    let url_link = passthrough_url(item);

    let post = Post {
        title: item.scalar(Key::Title).to_string(),
        slug: post_slug(&date, link),
        date,
        tags: tags(item),
        content: item.scalar(Key::Content).to_string(),
        is_link_blog: url_link.is_some(),
        url_link,
        id,
    };
    let comments = collect_comments(item, &post.id);
    ExtractedPost { post, comments }
}

/// Every comment on an item, in source order, numbered from zero.
pub fn collect_comments(item: &Node, post_id: &str) -> Vec<Comment> {
    item.nodes(Key::Comment)
        .enumerate()
        .map(|(ordinal, comment)| Comment {
            comment_id: comment_id(post_id, ordinal),
            post_id: post_id.to_string(),
            name: comment.scalar(Key::CommentAuthor).to_string(),
            text: comment.scalar(Key::CommentContent).to_string(),
            date: parse_date(comment.scalar(Key::CommentDate)),
            url: optional(comment, Key::CommentAuthorUrl),
            email: optional(comment, Key::CommentAuthorEmail),
            ip: optional(comment, Key::CommentAuthorIp),
        })
        .collect()
}

/// Category names in source order.
fn tags(item: &Node) -> Vec<String> {
    item.list(Key::Category)
        .iter()
        .map(|category| {
            category
                .text()
                .unwrap_or_else(|| Key::Category.default_value())
                .to_string()
        })
        .collect()
}

/// The `passthrough_url` custom field, if the post has a non-empty one.
///
/// When the field repeats, the last occurrence wins.
fn passthrough_url(item: &Node) -> Option<String> {
    item.nodes(Key::PostMeta)
        .filter(|meta| meta.scalar(Key::MetaKey) == PASSTHROUGH_URL_KEY)
        .map(|meta| meta.scalar(Key::MetaValue))
        .last()
        .filter(|url| !url.is_empty())
        .map(String::from)
}

/// Field value, or `None` when the element is present but empty.
fn optional(node: &Node, key: Key) -> Option<String> {
    Some(node.scalar(key))
        .filter(|value| !value.is_empty())
        .map(String::from)
}

/// Parse an export timestamp, falling back to the Unix epoch.
pub fn parse_date(raw: &str) -> DateTime<Utc> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return date.with_timezone(&Utc);
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return date.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return naive.and_utc();
    }
    if let Some(naive) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return naive.and_utc();
    }
    warn!(date = raw, "unparseable date, using 1970-01-01");
    DateTime::<Utc>::UNIX_EPOCH
}
