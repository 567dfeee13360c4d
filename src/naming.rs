//! Output file naming for posts and comments.
//!
//! ## Post slugs
//!
//! A post's file key is its publish year and month followed by the last
//! segment of its original permalink:
//!
//! - `2023-06-15`, `http://x/blog/my-post` → `2023-06-my-post`
//! - `2011-01-03`, `http://x/2011/1/3/hello-world` → `2011-01-hello-world`
//! - `2020-12-01`, `http://x/blog/` → `2020-12-` (trailing slash, empty tail)
//!
//! The slug is a pure function of date and link. Two posts from the same month
//! with the same link tail get the same slug; [`find_slug_collisions`] reports
//! them so the caller can decide whether the later file may replace the earlier.
//!
//! ## Comment ids
//!
//! Comments are keyed `{post_id}-{n}`, `n` counting from zero in source order.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::types::ExtractedPost;

/// Text after the last `/` of a permalink. The whole link if it has no `/`.
pub fn link_tail(link: &str) -> &str {
    match link.rfind('/') {
        Some(pos) => &link[pos + 1..],
        None => link,
    }
}

/// Derive a post's file key from its publish date and permalink.
pub fn post_slug(date: &DateTime<Utc>, link: &str) -> String {
    format!("{:04}-{:02}-{}", date.year(), date.month(), link_tail(link))
}

/// Identifier for the `ordinal`-th comment (zero-based) on a post.
pub fn comment_id(post_id: &str, ordinal: usize) -> String {
    format!("{post_id}-{ordinal}")
}

/// Posts that derive the same slug.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlugCollision {
    pub slug: String,
    /// Ids of every post sharing the slug, in source order. The last one's
    /// file is what ends up on disk.
    pub post_ids: Vec<String>,
}

/// Find every slug shared by more than one post, ordered by first occurrence.
pub fn find_slug_collisions(posts: &[ExtractedPost]) -> Vec<SlugCollision> {
    let mut by_slug: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for extracted in posts {
        let slug = extracted.post.slug.as_str();
        let ids = by_slug.entry(slug).or_default();
        if ids.is_empty() {
            order.push(slug);
        }
        ids.push(extracted.post.id.as_str());
    }

    order
        .into_iter()
        .filter_map(|slug| {
            let ids = &by_slug[slug];
            (ids.len() > 1).then(|| SlugCollision {
                slug: slug.to_string(),
                post_ids: ids.iter().map(|id| id.to_string()).collect(),
            })
        })
        .collect()
}
