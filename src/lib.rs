//! Restores readable names in text assets whose identifiers were replaced
//! by `hash_XXXXXXXX` joaat tokens.

pub mod batch;
pub mod config;
pub mod errors;
pub mod hasher;
pub mod logger;
pub mod metrics;
pub mod name_table;
pub mod scan;
pub mod substitutor;

pub use batch::{BatchConfig, BatchReport, BatchRunner, FileReport, Summary};
pub use config::{load_config, AppConfig, ConfigOverrides};
pub use errors::{AppError, FileError, LoadError};
pub use hasher::{default_hasher, hash, joaat, CachedHasher, HashToken, Joaat, TokenHasher};
pub use name_table::NameTable;
pub use substitutor::{apply, process, FailureKind, Outcome, Substitution, WriteMode};

use std::path::Path;
use tracing::debug;

/// Load the name list, then restore names in every target file.
///
/// The table is fully built before any target is opened, so a bad name
/// list never leaves the batch half-processed.
pub fn restore_names<P>(names: &Path, targets: &[P], config: &AppConfig) -> Result<BatchReport, AppError>
where
    P: AsRef<Path> + Sync,
{
    if targets.is_empty() {
        return Err(AppError::NoInputs);
    }

    // Only a non-default capacity needs a cache of its own
    let custom;
    let hasher = if config.cache_capacity == hasher::DEFAULT_CACHE_CAPACITY {
        default_hasher()
    } else {
        custom = CachedHasher::new(Joaat, config.cache_capacity);
        &custom
    };
    let table = NameTable::load(names, hasher)?;
    debug!(
        "Hash cache: {} hits, {} misses",
        hasher.hits(),
        hasher.misses()
    );

    let mode = if config.dry_run {
        WriteMode::DryRun
    } else {
        WriteMode::InPlace
    };
    let runner = BatchRunner::new(&BatchConfig {
        workers: config.workers,
        mode,
    })?;

    Ok(runner.run(targets, &table))
}
