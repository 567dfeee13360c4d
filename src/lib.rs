//! # blexit
//!
//! Converts a WordPress eXtended RSS (WXR) export into one markdown file per
//! blog post and one per comment, each opened by a YAML front-matter block.
//! The output is meant to be dropped into a static site generator's content
//! directories.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      export.xml  →  Manifest          (XML → typed posts and comments)
//! 2. Generate  Manifest    →  public/posts/     (one file per post)
//!                              public/comments/  (one file per comment)
//! ```
//!
//! The export is read and parsed in full before the first file is written.
//! A truncated or malformed export therefore never produces a half-written
//! output tree. [`convert::convert`] runs both stages back to back.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`tree`] | Generic XML element tree; every child is a scalar or a nested node |
//! | [`fields`] | Typed WXR keys and the default used when a key is absent |
//! | [`extract`] | Builds `Post` and `Comment` records from `<item>` nodes |
//! | [`scan`] | Stage 1: reads the export, classifies items, detects slug collisions |
//! | [`naming`] | Post slugs (`YYYY-MM-tail`) and comment ids (`postId-n`) |
//! | [`escape`] | Makes arbitrary text safe inside a double-quoted YAML scalar |
//! | [`frontmatter`] | Renders a record as `---` front matter plus body |
//! | [`generate`] | Stage 2: writes the post and comment files |
//! | [`convert`] | Runs scan and generate with the configured collision policy |
//! | [`config`] | `blexit.toml` loading, merging, and validation |
//! | [`types`] | Records shared between the stages (`Post`, `Comment`) |
//! | [`output`] | CLI output formatting for scan inventories and build progress |
//!
//! # Design Decisions
//!
//! ## Escape, Don't Quote-Aware Serialize
//!
//! Front matter is written by hand rather than through a YAML serializer.
//! Every string value is wrapped in double quotes after replacing backslash,
//! both quote characters, and the `": "` sequence with `\uXXXX` escapes. The
//! output is stable byte-for-byte across runs and readable in a diff.
//!
//! ## Missing Fields Are Not Errors
//!
//! Real exports are sloppy. A missing title becomes `"UNKNOWN"`, a missing date
//! becomes 1970-01-01, and the post is still written. Only an unreadable or
//! malformed document stops the run.

pub mod config;
pub mod convert;
pub mod escape;
pub mod extract;
pub mod fields;
pub mod frontmatter;
pub mod generate;
pub mod naming;
pub mod output;
pub mod scan;
pub mod tree;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
