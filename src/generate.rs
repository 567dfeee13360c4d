//! Post and comment file writing.
//!
//! Stage 2 of the conversion. Takes the extracted posts from the scan stage and
//! writes one file per post and one per comment.
//!
//! ## Output Structure
//!
//! ```text
//! public/
//! ├── posts/
//! │   ├── 2023-06-my-post.md      # {slug}.md
//! │   └── 2023-07-another.md
//! └── comments/
//!     ├── 42-0.md                 # {post id}-{n}.md
//!     └── 42-1.md
//! ```
//!
//! File names come from export data, so each must be a single plain path
//! component; anything that would land outside its directory is refused with
//! [`GenerateError::UnsafeName`].
//!
//! Both directories are created if missing. Every file is written whole in a
//! single call and replaces any existing file at the same path. The first
//! failed write ends the stage; files written before it stay on disk.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

use crate::config::ExportConfig;
use crate::frontmatter::{render_comment, render_post};
use crate::types::{Comment, ExtractedPost, Post};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Refusing to write {name:?}: not a plain file name")]
    UnsafeName { name: String },
}

/// Progress reported after each file is written.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateEvent {
    DirectoryCreated { path: PathBuf },
    PostWritten { path: PathBuf },
    CommentWritten { path: PathBuf },
}

/// Counts of files written by [`generate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateReport {
    pub posts: usize,
    pub comments: usize,
}

/// Write every post and its comments.
///
/// Each post is written before its comments; posts go in source order.
pub fn generate(
    posts: &[ExtractedPost],
    config: &ExportConfig,
    progress: Option<Sender<GenerateEvent>>,
) -> Result<GenerateReport, GenerateError> {
    let emit = |event: GenerateEvent| {
        if let Some(tx) = &progress {
            // The receiver only prints; a closed channel is not an error.
            let _ = tx.send(event);
        }
    };

    for dir in [&config.posts_dir, &config.comments_dir] {
        if ensure_dir(dir)? {
            emit(GenerateEvent::DirectoryCreated { path: dir.clone() });
        }
    }

    let mut report = GenerateReport::default();
    for extracted in posts {
        let path = write_post(&extracted.post, &config.posts_dir, &config.extension)?;
        report.posts += 1;
        emit(GenerateEvent::PostWritten { path });

        for comment in &extracted.comments {
            let path = write_comment(comment, &config.comments_dir, &config.extension)?;
            report.comments += 1;
            emit(GenerateEvent::CommentWritten { path });
        }
    }
    Ok(report)
}

/// Write `{slug}.{extension}` into `dir`.
pub fn write_post(post: &Post, dir: &Path, extension: &str) -> Result<PathBuf, GenerateError> {
    let path = output_path(dir, &post.slug, extension)?;
    write_file(&path, &render_post(post))?;
    Ok(path)
}

/// Write `{comment_id}.{extension}` into `dir`.
pub fn write_comment(
    comment: &Comment,
    dir: &Path,
    extension: &str,
) -> Result<PathBuf, GenerateError> {
    let path = output_path(dir, &comment.comment_id, extension)?;
    write_file(&path, &render_comment(comment))?;
    Ok(path)
}

/// `dir/{stem}.{extension}`, provided the name stays inside `dir`.
///
/// Stems come from the export (`wp:post_id`, permalinks), so a name with a
/// separator, a `..`, or a root would escape the output directory.
fn output_path(dir: &Path, stem: &str, extension: &str) -> Result<PathBuf, GenerateError> {
    let name = format!("{stem}.{extension}");
    let mut components = Path::new(&name).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\']);
    if plain {
        Ok(dir.join(name))
    } else {
        Err(GenerateError::UnsafeName { name })
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    fs::write(path, contents).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Create `dir` and its parents. Returns whether it had to be created.
fn ensure_dir(dir: &Path) -> Result<bool, GenerateError> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir).map_err(|source| GenerateError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(true)
}
