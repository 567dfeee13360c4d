//! Shared test utilities for the blexit test suite.
//!
//! Provides WXR document builders, record constructors, and lookup helpers
//! that panic with a clear message on a miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let xml = wxr(&[
//!     post_xml("1", "2023-06-15", "http://x/blog/hello"),
//!     item_xml("page", "2"),
//! ]);
//! let manifest = scan_str(&xml).unwrap();
//! assert_eq!(post_ids(&manifest), vec!["1"]);
//! ```

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::scan::Manifest;
use crate::types::{ExtractedPost, Post};

// =========================================================================
// Fixtures
// =========================================================================

/// Path of the sample export under `fixtures/`.
pub fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/export.xml")
}

// =========================================================================
// WXR builders
// =========================================================================

/// Wrap items in an `rss > channel` envelope with the WXR namespaces.
pub fn wxr(items: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"
    xmlns:content="http://purl.org/rss/1.0/modules/content/"
    xmlns:wp="http://wordpress.org/export/1.2/">
<channel>
<title>Test Blog</title>
{}
</channel>
</rss>"#,
        items.join("\n")
    )
}

/// A bare item of the given post type.
pub fn item_xml(post_type: &str, id: &str) -> String {
    format!(
        "<item><title>Item {id}</title><wp:post_id>{id}</wp:post_id>\
         <wp:post_type>{post_type}</wp:post_type></item>"
    )
}

/// A post item with the given id, `pubDate`, and permalink.
pub fn post_xml(id: &str, pub_date: &str, link: &str) -> String {
    format!(
        "<item><title>Post {id}</title><link>{link}</link><pubDate>{pub_date}</pubDate>\
         <wp:post_id>{id}</wp:post_id><wp:post_type>post</wp:post_type>\
         <content:encoded><![CDATA[<p>Body {id}</p>]]></content:encoded></item>"
    )
}

/// A post item carrying one comment per author, in order.
pub fn post_with_comments_xml(id: &str, authors: &[&str]) -> String {
    let comments: String = authors
        .iter()
        .map(|author| {
            format!(
                "<wp:comment><wp:comment_author><![CDATA[{author}]]></wp:comment_author>\
                 <wp:comment_date>2023-06-16 08:00:00</wp:comment_date>\
                 <wp:comment_content><![CDATA[Hi from {author}]]></wp:comment_content>\
                 </wp:comment>"
            )
        })
        .collect();
    format!(
        "<item><title>Post {id}</title><link>http://x/blog/post-{id}</link>\
         <pubDate>Thu, 15 Jun 2023 10:00:00 +0000</pubDate>\
         <wp:post_id>{id}</wp:post_id><wp:post_type>post</wp:post_type>\
         <content:encoded><![CDATA[<p>Body</p>]]></content:encoded>{comments}</item>"
    )
}

// =========================================================================
// Record constructors
// =========================================================================

/// A comment-less post with the given id and slug.
pub fn post_with_slug(id: &str, slug: &str) -> ExtractedPost {
    ExtractedPost {
        post: Post {
            id: id.to_string(),
            title: format!("Post {id}"),
            date: DateTime::<Utc>::UNIX_EPOCH,
            tags: vec![],
            slug: slug.to_string(),
            content: String::new(),
            is_link_blog: false,
            url_link: None,
        },
        comments: vec![],
    }
}

// =========================================================================
// Lookups
// =========================================================================

/// All post ids in manifest order.
pub fn post_ids(manifest: &Manifest) -> Vec<&str> {
    manifest.posts.iter().map(|p| p.post.id.as_str()).collect()
}

/// Find a post by slug. Panics if not found.
pub fn find_post<'a>(manifest: &'a Manifest, slug: &str) -> &'a ExtractedPost {
    manifest
        .posts
        .iter()
        .find(|p| p.post.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = manifest.posts.iter().map(|p| p.post.slug.as_str()).collect();
            panic!("post '{slug}' not found. Available: {slugs:?}")
        })
}

/// Sorted file names in a directory.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", dir.display()))
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
