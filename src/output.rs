//! CLI output formatting.
//!
//! Each stage has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Posts
//! 001 My Post (2 comments)
//!     Slug: 2023-06-my-post
//!     Tags: Tech, Life
//! 002 Reading List (link)
//!     Slug: 2023-07-reading-list
//!     Link: https://example.com/list
//!
//! 2 posts, 2 comments, 3 items skipped
//! ```
//!
//! ## Build
//!
//! ```text
//! Creating public/posts
//! Generated public/posts/2023-06-my-post.md
//! Generated public/comments/42-0.md
//! Generated 2 posts and 2 comments (3 items skipped)
//! ```
//!
//! Slug collisions are listed after either summary.

use crate::convert::ConvertSummary;
use crate::generate::GenerateEvent;
use crate::naming::SlugCollision;
use crate::scan::Manifest;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Scan
// ============================================================================

/// Format the scan inventory: one entry per post in source order.
pub fn format_scan_output(manifest: &Manifest) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];

    for (i, extracted) in manifest.posts.iter().enumerate() {
        let post = &extracted.post;
        let detail = match (post.is_link_blog, extracted.comments.len()) {
            (true, 0) => " (link)".to_string(),
            (true, n) => format!(" (link, {})", plural(n, "comment", "comments")),
            (false, 0) => String::new(),
            (false, n) => format!(" ({})", plural(n, "comment", "comments")),
        };
        lines.push(format!("{} {}{}", format_index(i + 1), post.title, detail));
        lines.push(format!("    Slug: {}", post.slug));
        if !post.tags.is_empty() {
            lines.push(format!("    Tags: {}", post.tags.join(", ")));
        }
        if let Some(url) = &post.url_link {
            lines.push(format!("    Link: {url}"));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{}, {}, {} skipped",
        plural(manifest.posts.len(), "post", "posts"),
        plural(manifest.comment_count(), "comment", "comments"),
        plural(manifest.skipped, "item", "items"),
    ));
    lines.extend(format_collisions(&manifest.collisions));
    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest) {
    for line in format_scan_output(manifest) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format a single write progress event.
pub fn format_generate_event(event: &GenerateEvent) -> String {
    match event {
        GenerateEvent::DirectoryCreated { path } => format!("Creating {}", path.display()),
        GenerateEvent::PostWritten { path } | GenerateEvent::CommentWritten { path } => {
            format!("Generated {}", path.display())
        }
    }
}

/// Format the end-of-run summary.
pub fn format_summary(summary: &ConvertSummary) -> Vec<String> {
    let mut lines = vec![format!(
        "Generated {} and {} ({} skipped)",
        plural(summary.posts, "post", "posts"),
        plural(summary.comments, "comment", "comments"),
        plural(summary.skipped, "item", "items"),
    )];
    lines.extend(format_collisions(&summary.collisions));
    lines
}

pub fn print_summary(summary: &ConvertSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}

/// One warning line per shared slug, naming every post that derives it.
pub fn format_collisions(collisions: &[SlugCollision]) -> Vec<String> {
    collisions
        .iter()
        .map(|c| {
            format!(
                "Warning: slug {} is shared by posts {}; only post {} is kept",
                c.slug,
                c.post_ids.join(", "),
                c.post_ids.last().map(String::as_str).unwrap_or_default(),
            )
        })
        .collect()
}
