use anyhow::{bail, Context, Result};
use clap::Parser;
use joaat_restore::config::{load_config, ConfigOverrides};
use joaat_restore::metrics::Metrics;
use joaat_restore::{logger, restore_names, scan};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "joaat-restore", version)]
#[command(about = "Replace hash_XXXXXXXX tokens with the names they were hashed from")]
struct Cli {
    /// Name list, one original name per line
    #[arg(short, long)]
    names: PathBuf,

    /// Target files to rewrite in place
    files: Vec<PathBuf>,

    /// Directories to scan recursively for target files
    #[arg(short, long = "dir")]
    dirs: Vec<PathBuf>,

    /// File name suffixes picked up by --dir (repeatable)
    #[arg(short, long = "ext")]
    extensions: Vec<String>,

    /// Settings file (json, yaml or toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    workers: Option<usize>,

    #[arg(long)]
    cache_capacity: Option<usize>,

    /// Report what would change without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    #[arg(long)]
    json_logs: bool,

    /// Print Prometheus counters after the run
    #[arg(long)]
    metrics: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        workers: cli.workers,
        cache_capacity: cli.cache_capacity,
        extensions: (!cli.extensions.is_empty()).then(|| cli.extensions.clone()),
        dry_run: cli.dry_run,
        json_logs: cli.json_logs,
    };
    let cfg = load_config(cli.config.as_deref(), &overrides)?;
    logger::init_logging(cfg.json_logs);

    let targets = scan::collect_targets(&cli.files, &cli.dirs, &cfg.extensions);
    info!("Restoring names in {} files using {}", targets.len(), cli.names.display());

    let report = match restore_names(&cli.names, &targets, &cfg) {
        Ok(report) => report,
        Err(err) => {
            error!("An error occurred: {}", err);
            return Err(err.into());
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }

    if cli.metrics {
        let metrics = Metrics::new().context("registering metrics")?;
        metrics.record(&report);
        print!("{}", metrics.render().context("rendering metrics")?);
    }

    if report.has_failures() {
        bail!("{} of {} files failed", report.failed(), report.files().len());
    }
    Ok(())
}
