//! Export reading and item classification.
//!
//! Stage 1 of the conversion. Reads the whole export into memory, parses it,
//! and extracts every blog post with its comments. Nothing is written to disk.
//!
//! ## Document shape
//!
//! ```text
//! rss
//! └── channel              (first one only)
//!     ├── item             wp:post_type = post        → extracted
//!     ├── item             wp:post_type = page        → skipped
//!     └── item             wp:post_type = attachment  → skipped
//! ```
//!
//! Items are visited in document order and the resulting [`Manifest`] keeps
//! that order, which is also the order files are written in.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::extract::{extract_post, is_post};
use crate::fields::Key;
use crate::naming::{SlugCollision, find_slug_collisions};
use crate::tree::{self, Node, ParseError};
use crate::types::ExtractedPost;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed XML: {0}")]
    Xml(#[from] ParseError),
    #[error("Not a WordPress export: missing <{0}> element")]
    NotWxr(&'static str),
}

/// Everything extracted from one export.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub posts: Vec<ExtractedPost>,
    /// Items that were not blog posts
    pub skipped: usize,
    /// Slugs shared by several posts
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub collisions: Vec<SlugCollision>,
}

impl Manifest {
    pub fn comment_count(&self) -> usize {
        self.posts.iter().map(|p| p.comments.len()).sum()
    }
}

/// Read and extract the export at `path`.
pub fn scan(path: &Path) -> Result<Manifest, ScanError> {
    let xml = fs::read_to_string(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    scan_str(&xml)
}

/// Extract an export already held in memory.
pub fn scan_str(xml: &str) -> Result<Manifest, ScanError> {
    let document = tree::parse(xml)?;
    let channel = channel(&document)?;

    let mut posts = Vec::new();
    let mut skipped = 0;
    for item in channel.nodes(Key::Item) {
        if is_post(item) {
            posts.push(extract_post(item));
        } else {
            debug!(
                post_type = item.scalar(Key::PostType),
                id = item.scalar(Key::PostId),
                "skipping item"
            );
            skipped += 1;
        }
    }

    let collisions = find_slug_collisions(&posts);
    Ok(Manifest {
        posts,
        skipped,
        collisions,
    })
}

/// The first `<channel>` under `<rss>`.
fn channel(document: &Node) -> Result<&Node, ScanError> {
    let rss = first_node(document, Key::Rss)?;
    first_node(rss, Key::Channel)
}

fn first_node(parent: &Node, key: Key) -> Result<&Node, ScanError> {
    parent
        .nodes(key)
        .next()
        .ok_or(ScanError::NotWxr(key.tag()))
}
