//! CLI entry point for `ostfinder`.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use clap::{CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use ostfinder::error::OstError;
use ostfinder::export::csv::export_csv;
use ostfinder::extract::Extractor;
use ostfinder::filter::{filter_records, parse_instant, FilterMode, TimeWindow};
use ostfinder::model::record::MessageRecord;

#[derive(Parser)]
#[command(
    name = "ostfinder",
    version,
    about = "Filter Inbox messages in an OST mailbox by time window"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List Inbox messages matching a time window
    Search {
        /// Path to the .ost file
        path: PathBuf,
        /// Window start, ISO local, e.g. 2024-01-01T00:00:00 (inclusive)
        #[arg(long)]
        start: Option<String>,
        /// Window end, ISO local, e.g. 2024-02-01T00:00:00 (exclusive)
        #[arg(long)]
        end: Option<String>,
        /// Filter by received or sent time
        #[arg(long)]
        mode: Option<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export matching Inbox messages to a CSV file
    Export {
        /// Path to the .ost file
        path: PathBuf,
        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        mode: Option<String>,
    },
    /// Show Inbox statistics
    Stats {
        /// Path to the .ost file
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ostfinder::config::load_config();

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Commands::Search {
            path,
            start,
            end,
            mode,
            json,
        } => {
            let mode = resolve_mode(mode.as_deref(), &config)?;
            cmd_search(&path, start.as_deref(), end.as_deref(), mode, json)
        }
        Commands::Export {
            path,
            output,
            start,
            end,
            mode,
        } => {
            let mode = resolve_mode(mode.as_deref(), &config)?;
            let output = resolve_output(output, &config);
            cmd_export(&path, &output, start.as_deref(), end.as_deref(), mode)
        }
        Commands::Stats { path, json } => cmd_stats(&path, json),
        Commands::Completions { shell } => cmd_completions(shell),
        Commands::Manpage => cmd_manpage(),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &ostfinder::config::Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = ostfinder::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "ostfinder.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Pick the filter mode from the CLI flag, falling back to the config default.
fn resolve_mode(flag: Option<&str>, config: &ostfinder::config::Config) -> anyhow::Result<FilterMode> {
    let raw = flag.unwrap_or(config.general.default_mode.as_str());
    raw.parse::<FilterMode>().map_err(|e| anyhow::anyhow!(e))
}

/// Resolve a relative output path against the configured export directory.
fn resolve_output(output: PathBuf, config: &ostfinder::config::Config) -> PathBuf {
    match &config.export.default_output_dir {
        Some(dir) if output.is_relative() => dir.join(output),
        _ => output,
    }
}

/// Parse a `--start`/`--end` argument; `None` means the bound is open.
fn parse_bound(arg: Option<&str>) -> Result<Option<NaiveDateTime>, OstError> {
    match arg {
        None => Ok(None),
        Some(raw) => parse_instant(raw)
            .map(Some)
            .ok_or_else(|| OstError::InvalidTimestamp(raw.to_string())),
    }
}

/// Run the extraction pipeline and collect matching records.
///
/// The window is validated before the mailbox file is touched.
fn scan(
    path: &Path,
    start: Option<&str>,
    end: Option<&str>,
    mode: FilterMode,
) -> anyhow::Result<Vec<MessageRecord>> {
    let window = TimeWindow::new(parse_bound(start)?, parse_bound(end)?)?;

    if !path.exists() {
        return Err(OstError::FileNotFound(path.to_path_buf()).into());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} Scanning Inbox ({pos} messages)")
            .expect("valid template"),
    );

    let extractor = Extractor::new();
    let stream = extractor.stream(path)?;
    let records: Vec<MessageRecord> =
        filter_records(stream.inspect(|_| pb.inc(1)), window, mode).collect();

    pb.finish_and_clear();
    Ok(records)
}

/// List matching messages on the console.
fn cmd_search(
    path: &Path,
    start: Option<&str>,
    end: Option<&str>,
    mode: FilterMode,
    json: bool,
) -> anyhow::Result<()> {
    let records = scan(path, start, end, mode)?;

    if json {
        print_results_json(&records)?;
    } else {
        print_results_table(&records);
    }
    Ok(())
}

/// Export matching messages as CSV.
fn cmd_export(
    path: &Path,
    output: &Path,
    start: Option<&str>,
    end: Option<&str>,
    mode: FilterMode,
) -> anyhow::Result<()> {
    let records = scan(path, start, end, mode)?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let written = export_csv(&records, output)?;
    println!("Wrote {} rows to {}", written, output.display());
    Ok(())
}

/// Show Inbox statistics for a mailbox file.
fn cmd_stats(path: &Path, json: bool) -> anyhow::Result<()> {
    use humansize::{format_size, BINARY};

    if !path.exists() {
        return Err(OstError::FileNotFound(path.to_path_buf()).into());
    }
    let file_size = std::fs::metadata(path)?.len();

    let extractor = Extractor::new();
    let records: Vec<MessageRecord> = extractor.stream(path)?.collect();

    let mut received: Vec<&str> = records
        .iter()
        .filter_map(|r| r.received_time.as_deref())
        .collect();
    received.sort_unstable();
    let oldest = received.first().copied();
    let newest = received.last().copied();

    if json {
        let stats = serde_json::json!({
            "file": path.to_string_lossy(),
            "file_size": file_size,
            "message_count": records.len(),
            "oldest_received": oldest,
            "newest_received": newest,
        });
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!();
        println!("  {:<20} {}", "File", path.display());
        println!("  {:<20} {}", "File size", format_size(file_size, BINARY));
        println!("  {:<20} {}", "Inbox messages", records.len());
        if let (Some(oldest), Some(newest)) = (oldest, newest) {
            println!("  {:<20} {oldest} — {newest}", "Received range");
        }
        println!();
    }
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "ostfinder", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Print results as a human-readable table.
fn print_results_table(records: &[MessageRecord]) {
    println!();
    println!("  {} result(s)", records.len());
    println!();

    if records.is_empty() {
        return;
    }

    println!("  {:<20} {:<30} {:<45}", "Time", "From", "Subject");
    println!("  {}", "-".repeat(97));

    for record in records {
        let from_trunc: String = record.from.chars().take(29).collect();
        let subj_trunc: String = record.subject.chars().take(44).collect();
        println!(
            "  {:<20} {:<30} {:<45}",
            record.display_time(),
            from_trunc,
            subj_trunc
        );
    }
    println!();
}

/// Print results as JSON.
fn print_results_json(records: &[MessageRecord]) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "result_count": records.len(),
        "items": records,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
