use crate::errors::FileError;
use crate::name_table::NameTable;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"hash_[0-9A-Fa-f]{8}").unwrap());

/// Result of scanning one piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub content: String,
    pub changed: bool,
    /// Tokens that were resolved to a name
    pub replacements: usize,
}

/// Whether changed files are written back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    #[default]
    InPlace,
    DryRun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Read,
    Write,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Read => f.write_str("read"),
            FailureKind::Write => f.write_str("write"),
        }
    }
}

/// What happened to a single target file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Nothing to replace; the file was not touched
    Skipped,
    Written { replacements: usize },
    /// Dry run: the file would have been rewritten
    WouldWrite { replacements: usize },
    Failed { kind: FailureKind, reason: String },
}

impl Outcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

impl From<FileError> for Outcome {
    fn from(err: FileError) -> Self {
        let kind = match err {
            FileError::Read { .. } => FailureKind::Read,
            FileError::Write { .. } => FailureKind::Write,
        };
        Outcome::Failed {
            kind,
            reason: err.to_string(),
        }
    }
}

/// Replace every known hash token in `content` with its name.
///
/// Matching is left-to-right and non-overlapping. Tokens missing from the
/// table are copied through untouched.
pub fn apply(content: &str, table: &NameTable) -> Substitution {
    let mut replacements = 0;
    let replaced = TOKEN_PATTERN.replace_all(content, |caps: &Captures| {
        let matched = &caps[0];
        match table.get(matched) {
            Some(name) => {
                replacements += 1;
                name.to_string()
            }
            None => matched.to_string(),
        }
    });

    let changed = &*replaced != content;
    Substitution {
        content: replaced.into_owned(),
        changed,
        replacements,
    }
}

/// Read, substitute and (if anything changed) write back one file.
pub fn rewrite_file(path: &Path, table: &NameTable, mode: WriteMode) -> Result<Outcome, FileError> {
    let content = fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let substitution = apply(&content, table);
    if !substitution.changed {
        info!("No changes needed for {}", display_name(path));
        return Ok(Outcome::Skipped);
    }

    let replacements = substitution.replacements;
    match mode {
        WriteMode::DryRun => {
            info!("Would rewrite {} ({} tokens)", display_name(path), replacements);
            Ok(Outcome::WouldWrite { replacements })
        }
        WriteMode::InPlace => {
            fs::write(path, substitution.content).map_err(|source| FileError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Processed {} ({} tokens)", display_name(path), replacements);
            Ok(Outcome::Written { replacements })
        }
    }
}

/// Like [`rewrite_file`] but folds failures into the outcome.
pub fn process(path: &Path, table: &NameTable, mode: WriteMode) -> Outcome {
    debug!("Scanning {}", path.display());
    match rewrite_file(path, table, mode) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!("Error processing {}: {}", path.display(), err);
            err.into()
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
