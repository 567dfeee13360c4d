//! End-to-end conversion: scan the export, then write the files.
//!
//! The export is read and parsed in full before anything is written, so an
//! unreadable or malformed export leaves the output directories untouched.

use std::sync::mpsc::Sender;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{CollisionPolicy, ExportConfig};
use crate::generate::{self, GenerateError, GenerateEvent};
use crate::naming::SlugCollision;
use crate::scan::{self, ScanError};

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error("{}", describe_collisions(.0))]
    SlugCollisions(Vec<SlugCollision>),
}

/// One clause per shared slug, e.g. `Slug 2023-06-a is shared by posts 1, 2`.
fn describe_collisions(collisions: &[SlugCollision]) -> String {
    collisions
        .iter()
        .map(|c| format!("Slug {} is shared by posts {}", c.slug, c.post_ids.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Outcome of a completed conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertSummary {
    pub posts: usize,
    pub comments: usize,
    /// Items that were not blog posts
    pub skipped: usize,
    /// Slugs shared by several posts; only the last post of each was kept
    pub collisions: Vec<SlugCollision>,
}

/// Convert the export named by `config.input`.
pub fn convert(
    config: &ExportConfig,
    progress: Option<Sender<GenerateEvent>>,
) -> Result<ConvertSummary, ConvertError> {
    let manifest = scan::scan(&config.input)?;
    info!(
        posts = manifest.posts.len(),
        skipped = manifest.skipped,
        "export scanned"
    );

    if !manifest.collisions.is_empty() {
        match config.on_slug_collision {
            CollisionPolicy::Error => {
                return Err(ConvertError::SlugCollisions(manifest.collisions));
            }
            CollisionPolicy::Overwrite => {
                for collision in &manifest.collisions {
                    warn!(
                        slug = %collision.slug,
                        posts = ?collision.post_ids,
                        "slug collision, later post overwrites earlier"
                    );
                }
            }
        }
    }

    let report = generate::generate(&manifest.posts, config, progress)?;
    Ok(ConvertSummary {
        posts: report.posts,
        comments: report.comments,
        skipped: manifest.skipped,
        collisions: manifest.collisions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(tmp: &TempDir, xml: &str) -> ExportConfig {
        let input = tmp.path().join("export.xml");
        fs::write(&input, xml).unwrap();
        ExportConfig {
            input,
            posts_dir: tmp.path().join("posts"),
            comments_dir: tmp.path().join("comments"),
            ..ExportConfig::default()
        }
    }

    #[test]
    fn converts_posts_and_comments() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(
            &tmp,
            &wxr(&[
                post_with_comments_xml("7", &["Jane", "Bob"]),
                item_xml("page", "8"),
            ]),
        );
        let summary = convert(&config, None).unwrap();
        assert_eq!(summary.posts, 1);
        assert_eq!(summary.comments, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(file_names(&config.comments_dir), vec!["7-0.md", "7-1.md"]);
    }

    #[test]
    fn missing_input_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let config = ExportConfig {
            input: tmp.path().join("missing.xml"),
            posts_dir: tmp.path().join("posts"),
            comments_dir: tmp.path().join("comments"),
            ..ExportConfig::default()
        };
        let result = convert(&config, None);
        assert!(matches!(result, Err(ConvertError::Scan(ScanError::Io { .. }))));
        assert!(!config.posts_dir.exists());
        assert!(!config.comments_dir.exists());
    }

    #[test]
    fn malformed_input_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(&tmp, "<rss><channel><item></rss>");
        let result = convert(&config, None);
        assert!(matches!(result, Err(ConvertError::Scan(ScanError::Xml(_)))));
        assert!(!config.posts_dir.exists());
    }

    #[test]
    fn collision_policy_error_aborts_before_writing() {
        let tmp = TempDir::new().unwrap();
        let mut config = config_for(
            &tmp,
            &wxr(&[
                post_xml("1", "2023-06-01", "http://x/a/same"),
                post_xml("2", "2023-06-09", "http://x/b/same"),
            ]),
        );
        config.on_slug_collision = CollisionPolicy::Error;
        let err = convert(&config, None).unwrap_err();
        assert_eq!(err.to_string(), "Slug 2023-06-same is shared by posts 1, 2");
        assert!(!config.posts_dir.exists());
    }

    #[test]
    fn collision_policy_error_lists_every_collision() {
        let tmp = TempDir::new().unwrap();
        let mut config = config_for(
            &tmp,
            &wxr(&[
                post_xml("1", "2023-06-01", "http://x/a/same"),
                post_xml("2", "2023-07-01", "http://x/a/other"),
                post_xml("3", "2023-06-09", "http://x/b/same"),
                post_xml("4", "2023-07-09", "http://x/b/other"),
            ]),
        );
        config.on_slug_collision = CollisionPolicy::Error;
        match convert(&config, None) {
            Err(ConvertError::SlugCollisions(collisions)) => {
                let slugs: Vec<_> = collisions.iter().map(|c| c.slug.as_str()).collect();
                assert_eq!(slugs, vec!["2023-06-same", "2023-07-other"]);
            }
            other => panic!("expected slug collisions, got {other:?}"),
        }
        let err = convert(&config, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Slug 2023-06-same is shared by posts 1, 3; \
             Slug 2023-07-other is shared by posts 2, 4"
        );
    }

    #[test]
    fn collision_policy_overwrite_reports_and_writes() {
        let tmp = TempDir::new().unwrap();
        let config = config_for(
            &tmp,
            &wxr(&[
                post_xml("1", "2023-06-01", "http://x/a/same"),
                post_xml("2", "2023-06-09", "http://x/b/same"),
            ]),
        );
        let summary = convert(&config, None).unwrap();
        assert_eq!(summary.posts, 2);
        assert_eq!(summary.collisions.len(), 1);
        let written = fs::read_to_string(config.posts_dir.join("2023-06-same.md")).unwrap();
        assert!(written.starts_with("---\nid: \"2\"\n"));
    }
}
