//! meshchunk command-line splitter
//!
//! Reads a message from the command line or stdin and prints the chunks
//! that would be transmitted, one per line. Logs go to stderr so stdout
//! carries only chunks.

use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{Level, debug, info};
use tracing_subscriber::{EnvFilter, fmt};

use meshchunk_protocol::{
    DEFAULT_CHUNK_LIMIT, DEFAULT_TOTAL_LIMIT, MESH_CHUNK_LIMIT, MessageSplitter, SplitterConfig,
    SplitterConfigBuilder,
};

/// Split a message into size-limited "(i/N)" chunks
#[derive(Parser, Debug)]
#[command(name = "meshchunk")]
#[command(version, about, long_about = None)]
struct Args {
    /// Message to split (read from stdin when omitted)
    message: Option<String>,

    /// Maximum characters kept from the message before splitting
    #[arg(short, long, env = "MESHCHUNK_TOTAL_LIMIT", default_value_t = DEFAULT_TOTAL_LIMIT)]
    total_limit: usize,

    /// Maximum characters per chunk, marker included
    #[arg(short, long, env = "MESHCHUNK_CHUNK_LIMIT", default_value_t = DEFAULT_CHUNK_LIMIT)]
    chunk_limit: usize,

    /// Use the mesh radio chunk limit instead of --chunk-limit
    #[arg(long, env = "MESHCHUNK_MESH", default_value = "false")]
    mesh: bool,

    /// Print chunks as a JSON array
    #[arg(long, default_value = "false")]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MESHCHUNK_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    /// Log format (plain, json)
    #[arg(long, env = "MESHCHUNK_LOG_FORMAT", default_value = "plain")]
    log_format: String,
}

fn setup_logging(log_level: &str, log_format: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    match log_format.to_lowercase().as_str() {
        "json" => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to set subscriber")?;
        }
        _ => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to set subscriber")?;
        }
    }

    Ok(())
}

/// Build splitter configuration from CLI arguments
fn build_config(args: &Args) -> Result<SplitterConfig> {
    let chunk_limit = if args.mesh {
        MESH_CHUNK_LIMIT
    } else {
        args.chunk_limit
    };

    SplitterConfigBuilder::new()
        .with_total_limit(args.total_limit)
        .with_chunk_limit(chunk_limit)
        .build_validated()
        .context("Invalid limits")
}

fn read_message(args: &Args) -> Result<String> {
    match &args.message {
        Some(message) => Ok(message.clone()),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read message from stdin")?;
            // A trailing newline from `echo` or a heredoc is not part of the message.
            if buf.ends_with('\n') {
                buf.pop();
                if buf.ends_with('\r') {
                    buf.pop();
                }
            }
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level, &args.log_format)?;

    let config = build_config(&args)?;
    let limits = config.segment_limits()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        total_limit = limits.total_limit(),
        chunk_limit = limits.chunk_limit(),
        "Splitting message"
    );

    let message = read_message(&args)?;
    debug!(chars = message.chars().count(), "Read message");

    let chunks = MessageSplitter::new(limits).split_text(&message)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer(&mut out, &chunks).context("Failed to write JSON")?;
        writeln!(out)?;
    } else {
        for chunk in &chunks {
            writeln!(out, "{chunk}")?;
        }
    }

    info!(chunks = chunks.len(), "Done");
    Ok(())
}
