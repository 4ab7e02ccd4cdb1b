//! Runs a compiled query over many files in parallel.
//!
//! Every worker keeps its own parsers and hands back owned results, so the
//! shared [`CompiledQuery`] is only ever read.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;
use sgrep::{CompiledQuery, NodeHandle};
use sgrep_syntax::{Parser, SupportedLanguage, SyntaxError};
use tracing::{debug, warn};

use crate::discovery::{FileFailure, SourceFile};
use crate::errors::AppError;

/// One match, detached from the tree it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct MatchRecord {
    pub(crate) line: u32,
    pub(crate) column: u32,
    pub(crate) kind: &'static str,
    pub(crate) text: String,
}

impl From<NodeHandle<'_>> for MatchRecord {
    fn from(node: NodeHandle<'_>) -> Self {
        let (line, column) = node.start_position();
        Self {
            line,
            column,
            kind: node.kind(),
            text: node.render(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FileReport {
    pub(crate) path: PathBuf,
    pub(crate) matches: Vec<MatchRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FileOutcome {
    Searched(FileReport),
    Failed(FileFailure),
    Skipped,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchSettings {
    pub(crate) jobs: Option<usize>,
    pub(crate) max_file_bytes: u64,
    /// Search trees that needed error recovery instead of failing them.
    pub(crate) search_recovered: bool,
}

/// Searches `files`, returning one outcome per file in input order.
pub(crate) fn search_files(
    query: &CompiledQuery,
    files: &[SourceFile],
    settings: SearchSettings,
) -> Result<Vec<FileOutcome>, AppError> {
    let run = || {
        files
            .par_iter()
            .map_init(Parsers::default, |parsers, file| {
                search_file(query, file, parsers, settings)
            })
            .collect()
    };

    match settings.jobs {
        None => Ok(run()),
        Some(jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .map_err(|source| AppError::WorkerPool { jobs, source })?;
            Ok(pool.install(run))
        }
    }
}

/// Per-worker parser cache; Tree-sitter parsers are not shareable.
#[derive(Default)]
struct Parsers {
    by_language: HashMap<SupportedLanguage, Parser>,
}

impl Parsers {
    fn get(&mut self, language: SupportedLanguage) -> Result<&mut Parser, SyntaxError> {
        match self.by_language.entry(language) {
            Entry::Occupied(slot) => Ok(slot.into_mut()),
            Entry::Vacant(slot) => Ok(slot.insert(Parser::new(language)?)),
        }
    }
}

fn search_file(
    query: &CompiledQuery,
    file: &SourceFile,
    parsers: &mut Parsers,
    settings: SearchSettings,
) -> FileOutcome {
    let max_file_bytes = settings.max_file_bytes;
    let failed = |reason: String| {
        warn!(path = %file.path.display(), %reason, "skipping file");
        FileOutcome::Failed(FileFailure {
            path: file.path.clone(),
            reason,
        })
    };

    match fs::metadata(&file.path) {
        Ok(metadata) if metadata.len() > max_file_bytes => {
            debug!(
                path = %file.path.display(),
                bytes = metadata.len(),
                limit = max_file_bytes,
                "file exceeds size limit"
            );
            return FileOutcome::Skipped;
        }
        Ok(_) => {}
        Err(error) => return failed(error.to_string()),
    }

    let source = match fs::read_to_string(&file.path) {
        Ok(source) => source,
        Err(error) => return failed(error.to_string()),
    };
    let tree = match parsers
        .get(file.language)
        .and_then(|parser| parser.parse(&source))
    {
        Ok(tree) => tree,
        Err(error) => return failed(error.to_string()),
    };
    if let Err(error) = tree.check() {
        if !settings.search_recovered {
            return failed(error.to_string());
        }
        debug!(path = %file.path.display(), %error, "searching source with syntax errors");
    }

    let matches: Vec<MatchRecord> = query
        .find_all(&tree)
        .into_iter()
        .map(MatchRecord::from)
        .collect();
    debug!(path = %file.path.display(), matches = matches.len(), "searched file");

    FileOutcome::Searched(FileReport {
        path: file.path.clone(),
        matches,
    })
}
