//! Front-matter document composition.
//!
//! Pure rendering: records in, file contents out. Writing happens in
//! [`crate::generate`].
//!
//! ## Post
//!
//! ```text
//! ---
//! id: "42"
//! slug: "2023-06-my-post"
//! title: "My Post"
//! date: 2023-06-15T00:00:00.000Z
//! isLinkBlog: true            (link-blog posts only)
//! urlLink: "https://..."      (link-blog posts only)
//! tags:                       (only when there are tags)
//!   - "Tech"
//! ---
//! <raw content>
//! ```
//!
//! ## Comment
//!
//! ```text
//! ---
//! commentId: "42-0"
//! postId: "42"
//! name: "Jane"
//! ip: "10.0.0.1"
//! date: 2023-06-16T08:00:00.000Z
//! email: "jane@example.com"   (when present)
//! url: "https://jane.dev"     (when present)
//! ---
//! <raw comment text>
//! ```
//!
//! String values go through [`yaml_scalar`]; dates, post content and comment
//! text are written as-is.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::escape::yaml_scalar;
use crate::types::{Comment, Post};

const DELIMITER: &str = "---";

/// Line-by-line builder for a front-matter header.
struct FrontMatter {
    out: String,
}

impl FrontMatter {
    fn new() -> Self {
        let mut out = String::new();
        out.push_str(DELIMITER);
        out.push('\n');
        Self { out }
    }

    fn line(&mut self, key: &str, value: &str) -> &mut Self {
        self.out.push_str(key);
        self.out.push_str(": ");
        self.out.push_str(value);
        self.out.push('\n');
        self
    }

    fn text(&mut self, key: &str, value: &str) -> &mut Self {
        self.line(key, &yaml_scalar(value))
    }

    fn optional_text(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.text(key, value);
        }
        self
    }

    fn date(&mut self, key: &str, value: &DateTime<Utc>) -> &mut Self {
        self.line(key, &iso_timestamp(value))
    }

    fn list(&mut self, key: &str, values: &[String]) -> &mut Self {
        if values.is_empty() {
            return self;
        }
        self.out.push_str(key);
        self.out.push_str(":\n");
        for value in values {
            self.out.push_str("  - ");
            self.out.push_str(&yaml_scalar(value));
            self.out.push('\n');
        }
        self
    }

    fn finish(&mut self, body: &str) -> String {
        let mut out = std::mem::take(&mut self.out);
        out.push_str(DELIMITER);
        out.push('\n');
        out.push_str(body);
        out
    }
}

/// ISO-8601 UTC with milliseconds, e.g. `2023-06-15T00:00:00.000Z`.
pub fn iso_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render a post file: front matter, then the content and a final newline.
pub fn render_post(post: &Post) -> String {
    let mut doc = FrontMatter::new();
    doc.text("id", &post.id)
        .text("slug", &post.slug)
        .text("title", &post.title)
        .date("date", &post.date);
    if post.is_link_blog {
        doc.line("isLinkBlog", "true");
    }
    doc.optional_text("urlLink", post.url_link.as_deref())
        .list("tags", &post.tags);

    let mut out = doc.finish(&post.content);
    out.push('\n');
    out
}

/// Render a comment file: front matter, then the comment text verbatim.
pub fn render_comment(comment: &Comment) -> String {
    let mut doc = FrontMatter::new();
    doc.text("commentId", &comment.comment_id)
        .text("postId", &comment.post_id)
        .text("name", &comment.name)
        .text("ip", comment.ip.as_deref().unwrap_or_default())
        .date("date", &comment.date)
        .optional_text("email", comment.email.as_deref())
        .optional_text("url", comment.url.as_deref());
    doc.finish(&comment.text)
}
