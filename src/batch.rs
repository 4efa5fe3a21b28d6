use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::name_table::NameTable;
use crate::substitutor::{process, Outcome, WriteMode};

#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    /// Number of worker threads (0 = auto-detect)
    pub workers: usize,
    pub mode: WriteMode,
}

/// Runs the substitution over many files on a bounded worker pool.
///
/// Every file is handled independently: a failure is recorded in the
/// report and never stops the rest of the batch.
pub struct BatchRunner {
    pool: ThreadPool,
    mode: WriteMode,
}

impl BatchRunner {
    pub fn new(config: &BatchConfig) -> Result<Self, AppError> {
        let workers = if config.workers == 0 {
            num_cpus::get()
        } else {
            config.workers
        };

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|idx| format!("joaat-restore-{}", idx))
            .build()?;

        info!("Worker pool configured: {} threads", workers);

        Ok(Self {
            pool,
            mode: config.mode,
        })
    }

    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Process every distinct path and wait for all of them to finish.
    pub fn run<P>(&self, paths: &[P], table: &NameTable) -> BatchReport
    where
        P: AsRef<Path> + Sync,
    {
        let mut seen = HashSet::new();
        let unique: Vec<&Path> = paths
            .iter()
            .map(AsRef::as_ref)
            .filter(|path| seen.insert(*path))
            .collect();

        if unique.len() < paths.len() {
            warn!("Ignoring {} duplicate paths", paths.len() - unique.len());
        }

        let mode = self.mode;
        let files: Vec<FileReport> = self.pool.install(|| {
            unique
                .par_iter()
                .map(|path| FileReport {
                    path: path.to_path_buf(),
                    outcome: process(path, table, mode),
                })
                .collect()
        });

        let report = BatchReport::new(files);
        info!("{}", report.summary());
        report
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: Outcome,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub written: usize,
    pub would_write: usize,
    pub skipped: usize,
    pub failed: usize,
    pub replacements: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} written, {} skipped, {} failed ({} tokens restored)",
            self.written, self.skipped, self.failed, self.replacements
        )?;
        if self.would_write > 0 {
            write!(f, ", {} would be written", self.would_write)?;
        }
        Ok(())
    }
}

/// Consolidated per-file outcomes of one batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    summary: Summary,
    files: Vec<FileReport>,
}

impl BatchReport {
    pub fn new(files: Vec<FileReport>) -> Self {
        let mut summary = Summary::default();
        for file in &files {
            match &file.outcome {
                Outcome::Written { replacements } => {
                    summary.written += 1;
                    summary.replacements += replacements;
                }
                Outcome::WouldWrite { replacements } => {
                    summary.would_write += 1;
                    summary.replacements += replacements;
                }
                Outcome::Skipped => summary.skipped += 1,
                Outcome::Failed { .. } => summary.failed += 1,
            }
        }
        Self { summary, files }
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    pub fn outcome(&self, path: &Path) -> Option<&Outcome> {
        self.files
            .iter()
            .find(|file| file.path == path)
            .map(|file| &file.outcome)
    }

    pub fn written(&self) -> usize {
        self.summary.written
    }

    pub fn skipped(&self) -> usize {
        self.summary.skipped
    }

    pub fn failed(&self) -> usize {
        self.summary.failed
    }

    pub fn replacements(&self) -> usize {
        self.summary.replacements
    }

    pub fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|file| file.outcome.is_failed())
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processed {} files: {}", self.files.len(), self.summary)?;
        for file in self.failures() {
            if let Outcome::Failed { kind, reason } = &file.outcome {
                writeln!(f, "  {} [{} error]: {}", file.path.display(), kind, reason)?;
            }
        }
        Ok(())
    }
}
