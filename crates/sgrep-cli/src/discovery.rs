//! Finds the source files a search runs over.
//!
//! A file named on the command line is searched as-is. A directory is walked
//! with `.gitignore` support, keeping files whose extension maps to a
//! supported language. Version-control and virtual-environment directories
//! are never entered.

use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};
use sgrep_syntax::SupportedLanguage;
use tracing::{debug, warn};

use crate::errors::AppError;

const ALWAYS_SKIPPED: &[&str] = &[".git", ".venv"];

/// A file selected for searching, with the grammar to parse it with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceFile {
    pub(crate) path: PathBuf,
    pub(crate) language: SupportedLanguage,
}

/// A path that could not be searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FileFailure {
    pub(crate) path: PathBuf,
    pub(crate) reason: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DiscoveryOptions {
    pub(crate) include_hidden: bool,
    pub(crate) language: Option<SupportedLanguage>,
}

/// Files found under a root, sorted by path, plus entries the walk could
/// not read.
#[derive(Debug, Default)]
pub(crate) struct Discovered {
    pub(crate) files: Vec<SourceFile>,
    pub(crate) failures: Vec<FileFailure>,
}

pub(crate) fn discover(root: &Path, options: DiscoveryOptions) -> Result<Discovered, AppError> {
    if root.is_file() {
        let language = match options.language {
            Some(language) => language,
            None => SupportedLanguage::detect(root).map_err(|source| {
                AppError::UnsearchableFile {
                    path: root.to_path_buf(),
                    source,
                }
            })?,
        };
        return Ok(Discovered {
            files: vec![SourceFile {
                path: root.to_path_buf(),
                language,
            }],
            failures: Vec::new(),
        });
    }
    if !root.is_dir() {
        return Err(AppError::MissingPath {
            path: root.to_path_buf(),
        });
    }

    let mut discovered = Discovered::default();
    let walker = WalkBuilder::new(root)
        .standard_filters(true)
        .hidden(!options.include_hidden)
        .require_git(false)
        .filter_entry(|entry| !is_always_skipped(entry))
        .build();

    for result in walker {
        match result {
            Ok(entry) => {
                if let Some(file) = select(&entry, options.language) {
                    discovered.files.push(file);
                }
            }
            Err(error) => {
                warn!(root = %root.display(), %error, "failed to read directory entry");
                discovered.failures.push(FileFailure {
                    path: root.to_path_buf(),
                    reason: error.to_string(),
                });
            }
        }
    }

    discovered.files.sort_by(|left, right| left.path.cmp(&right.path));
    debug!(
        root = %root.display(),
        files = discovered.files.len(),
        "discovered source files"
    );
    Ok(discovered)
}

fn is_always_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| ALWAYS_SKIPPED.contains(&name))
}

fn select(entry: &DirEntry, wanted: Option<SupportedLanguage>) -> Option<SourceFile> {
    if !entry.file_type().is_some_and(|kind| kind.is_file()) {
        return None;
    }
    let language = SupportedLanguage::from_path(entry.path())?;
    if wanted.is_some_and(|only| only != language) {
        return None;
    }
    Some(SourceFile {
        path: entry.path().to_path_buf(),
        language,
    })
}
