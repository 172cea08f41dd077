//! rtail - Print the last lines of large text files
//!
//! Reads the file backward in fixed-size chunks so memory stays bounded on huge files.

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, Command};
use rtail::output::write_lines;
use rtail::{ExtractionGate, TailConfig, TailRequest, TailService};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;

/// Exit status used when the user interrupts a scan
const EXIT_CANCELLED: i32 = 130;

fn cli() -> Command {
    let command = Command::new("rtail")
        .version(rtail::VERSION)
        .about("Print the last lines of a file")
        .long_about(
            "rtail prints the final lines of a text file. Large files are read backward \
             in fixed-size chunks, so memory use does not grow with the file size.",
        )
        .arg(
            Arg::new("file")
                .help("Path to the file to read")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("lines")
                .short('n')
                .long("lines")
                .value_name("N")
                .help("Number of lines to print")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("chunk-size")
                .short('c')
                .long("chunk-size")
                .value_name("BYTES")
                .help("Size of each backward read")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("number")
                .long("number")
                .help("Prefix each printed line with its position")
                .action(ArgAction::SetTrue),
        );

    #[cfg(feature = "config")]
    let command = command.arg(
        Arg::new("config")
            .long("config")
            .value_name("PATH")
            .help("Configuration file (defaults to the per-user rtail/config.toml)")
            .value_parser(value_parser!(PathBuf)),
    );

    command
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging, controlled by RUST_LOG
    env_logger::init();

    let matches = cli().get_matches();

    #[cfg(feature = "config")]
    let mut config = TailConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    #[cfg(not(feature = "config"))]
    let mut config = TailConfig::default();

    if let Some(&chunk_size) = matches.get_one::<usize>("chunk-size") {
        config.chunk_size = chunk_size;
        config.validate()?;
    }

    let file_path = matches
        .get_one::<PathBuf>("file")
        .cloned()
        .context("file argument is required")?;
    let line_count = matches
        .get_one::<usize>("lines")
        .copied()
        .unwrap_or(config.default_line_count);
    let request =
        TailRequest::new(&file_path, line_count).with_line_numbers(matches.get_flag("number"));

    let gate = ExtractionGate::new(config.max_concurrent_reads)?;
    let service = TailService::new(config, gate);

    // Ctrl-C cancels the scan instead of killing the process mid-read
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let result = service.tail(&request, &cancel).await;
    if matches!(&result, Err(e) if e.is_cancelled()) {
        eprintln!("rtail: cancelled");
        std::process::exit(EXIT_CANCELLED);
    }
    let output = result.with_context(|| format!("cannot tail {}", file_path.display()))?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match write_lines(&mut handle, &output) {
        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("failed to write output"),
    }
}
