//! Field access with a fixed default policy.
//!
//! Every WXR field the converter reads is a [`Key`]. A key knows its tag name
//! and what a lookup resolves to when the tag is missing from an item:
//!
//! | Keys | Missing value |
//! |------|---------------|
//! | `pubDate`, `wp:comment_date` | `"1970-01-01"` |
//! | everything else | `"UNKNOWN"` |
//!
//! Both tables live in exhaustive `match`es on [`Key`], so adding a key forces
//! a decision about its default. Downstream code relies on the sentinels: an
//! epoch date string parses to 1970-01-01, and `"UNKNOWN"` flows into titles,
//! ids, and file names unchanged.

use crate::tree::{EMPTY_NODE, Node, Value};

/// Date string returned for missing date fields.
pub const EPOCH_DATE: &str = "1970-01-01";

/// Sentinel returned for any other missing field.
pub const UNKNOWN: &str = "UNKNOWN";

/// A field read from a WXR document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Rss,
    Channel,
    Item,
    PostType,
    PostId,
    PubDate,
    Title,
    Link,
    Category,
    PostMeta,
    MetaKey,
    MetaValue,
    Content,
    Comment,
    CommentDate,
    CommentAuthor,
    CommentAuthorUrl,
    CommentAuthorEmail,
    CommentAuthorIp,
    CommentContent,
}

/// What a missing field resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Epoch,
    Unknown,
}

impl Fallback {
    pub fn value(self) -> &'static str {
        match self {
            Fallback::Epoch => EPOCH_DATE,
            Fallback::Unknown => UNKNOWN,
        }
    }
}

impl Key {
    /// Element name as it appears in the export.
    pub fn tag(self) -> &'static str {
        match self {
            Key::Rss => "rss",
            Key::Channel => "channel",
            Key::Item => "item",
            Key::PostType => "wp:post_type",
            Key::PostId => "wp:post_id",
            Key::PubDate => "pubDate",
            Key::Title => "title",
            Key::Link => "link",
            Key::Category => "category",
            Key::PostMeta => "wp:postmeta",
            Key::MetaKey => "wp:meta_key",
            Key::MetaValue => "wp:meta_value",
            Key::Content => "content:encoded",
            Key::Comment => "wp:comment",
            Key::CommentDate => "wp:comment_date",
            Key::CommentAuthor => "wp:comment_author",
            Key::CommentAuthorUrl => "wp:comment_author_url",
            Key::CommentAuthorEmail => "wp:comment_author_email",
            Key::CommentAuthorIp => "wp:comment_author_IP",
            Key::CommentContent => "wp:comment_content",
        }
    }

    pub fn fallback(self) -> Fallback {
        match self {
            Key::PubDate | Key::CommentDate => Fallback::Epoch,
            Key::Rss
            | Key::Channel
            | Key::Item
            | Key::PostType
            | Key::PostId
            | Key::Title
            | Key::Link
            | Key::Category
            | Key::PostMeta
            | Key::MetaKey
            | Key::MetaValue
            | Key::Content
            | Key::Comment
            | Key::CommentAuthor
            | Key::CommentAuthorUrl
            | Key::CommentAuthorEmail
            | Key::CommentAuthorIp
            | Key::CommentContent => Fallback::Unknown,
        }
    }

    pub fn default_value(self) -> &'static str {
        self.fallback().value()
    }
}

impl Node {
    /// Single string value for `key`.
    ///
    /// A missing key resolves to the key's default. When the key repeats, the
    /// first occurrence wins. A value that is an element rather than plain
    /// text resolves to the element's text, or the default if it has none.
    pub fn scalar(&self, key: Key) -> &str {
        self.get(key.tag())
            .and_then(<[Value]>::first)
            .and_then(Value::text)
            .unwrap_or_else(|| key.default_value())
    }

    /// Every value stored under `key`, in document order. Empty when absent.
    pub fn list(&self, key: Key) -> &[Value] {
        self.get(key.tag()).unwrap_or(&[])
    }

    /// Every value under `key` viewed as an element.
    ///
    /// Occurrences that collapsed to plain text (e.g. `<wp:comment/>`) read as
    /// an empty element, so each of their fields resolves to its default.
    pub fn nodes(&self, key: Key) -> impl Iterator<Item = &Node> {
        self.list(key)
            .iter()
            .map(|value| value.as_node().unwrap_or(&EMPTY_NODE))
    }
}
