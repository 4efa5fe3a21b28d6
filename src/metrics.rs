use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

use crate::batch::BatchReport;

pub struct Metrics {
    registry: Registry,
    pub files_written: IntCounter,
    pub files_would_write: IntCounter,
    pub files_skipped: IntCounter,
    pub files_failed: IntCounter,
    pub tokens_replaced: IntCounter,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let files_written = IntCounter::new("files_written_total", "Files rewritten with restored names")?;
        let files_would_write =
            IntCounter::new("files_would_write_total", "Files a dry run would have rewritten")?;
        let files_skipped = IntCounter::new("files_skipped_total", "Files left untouched")?;
        let files_failed = IntCounter::new("files_failed_total", "Files that could not be processed")?;
        let tokens_replaced = IntCounter::new("tokens_replaced_total", "Hash tokens resolved to names")?;

        registry.register(Box::new(files_written.clone()))?;
        registry.register(Box::new(files_would_write.clone()))?;
        registry.register(Box::new(files_skipped.clone()))?;
        registry.register(Box::new(files_failed.clone()))?;
        registry.register(Box::new(tokens_replaced.clone()))?;

        Ok(Self {
            registry,
            files_written,
            files_would_write,
            files_skipped,
            files_failed,
            tokens_replaced,
        })
    }

    pub fn record(&self, report: &BatchReport) {
        self.files_written.inc_by(report.written() as u64);
        self.files_would_write.inc_by(report.summary().would_write as u64);
        self.files_skipped.inc_by(report.skipped() as u64);
        self.files_failed.inc_by(report.failed() as u64);
        self.tokens_replaced.inc_by(report.replacements() as u64);
    }

    /// Render all counters in the Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
