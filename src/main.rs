use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process;
use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use regency_fan_lib::timing::REGENCY_FAN_PROFILE;
use regency_fan_lib::{DecoderConfig, RegencyFanDecoder, RowPolarity};

mod error;
mod input;
mod output;

use output::{OutputFormat, RecordWriter};

/// Decode captured Regency fan remote rows into records.
///
/// Reads one capture per line in `{N}hex` row notation, rows separated by `/`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Capture file to read, or `-` for stdin.
    #[arg(default_value = "-")]
    input: PathBuf,
    /// Output format for decoded records.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Invert every row before decoding.
    ///
    /// Needed for rows taken from rtl_433 `codes:` output or any stock PPM slicer,
    /// which reads the remote's narrow gap as `0`. Without it those rows fail the
    /// checksum and nothing is printed.
    #[arg(short, long)]
    invert: bool,
    /// Prefix every record with the local time it was decoded.
    #[arg(short, long)]
    timestamps: bool,
    /// Print the demodulator settings the rows must be captured with, then exit.
    #[arg(long)]
    show_profile: bool,
    /// Optional path to a file to write logs to, in addition to stderr.
    #[arg(short, long)]
    log_file: Option<PathBuf>,
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn setup_logging(log_file_path: Option<&PathBuf>, verbosity: &Verbosity<WarnLevel>) -> Result<Option<WorkerGuard>> {
    // Records go to stdout, so logs stay on stderr
    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .without_time();

    let (file_layer, guard) = if let Some(path) = log_file_path {
        let log_file = File::create(path).with_context(|| format!("Failed to create log file at: {:?}", path))?;
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(log_file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_writer)
            .with_ansi(false)
            .with_target(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    // WARN by default, -v for INFO, -vv for DEBUG (row rejections), -vvv for TRACE
    let filter = EnvFilter::builder()
        .with_default_directive(verbosity.tracing_level_filter().into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    if let Some(path) = log_file_path {
        info!("Logging to file: {:?}", path);
    }

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_file.as_ref(), &cli.verbose)?;

    if cli.show_profile {
        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&REGENCY_FAN_PROFILE)?),
            OutputFormat::Csv | OutputFormat::Kv => println!("{}", REGENCY_FAN_PROFILE),
        }
        return Ok(());
    }

    if let Err(e) = run(&cli) {
        error!("Decoding failed: {:?}", e);
        process::exit(1);
    }

    Ok(())
}

fn open_input(path: &PathBuf) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).with_context(|| format!("Failed to open capture file: {:?}", path))?;
    Ok(Box::new(BufReader::new(file)))
}

fn run(cli: &Cli) -> Result<()> {
    let polarity = if cli.invert {
        RowPolarity::Inverted
    } else {
        RowPolarity::AsReceived
    };
    let decoder = RegencyFanDecoder::new(DecoderConfig { polarity });
    info!(?polarity, format = ?cli.format, "Starting decoder");

    let reader = open_input(&cli.input)?;
    let mut writer = RecordWriter::new(io::stdout().lock(), cli.format, cli.timestamps)?;

    let mut captures = 0usize;
    let mut decoded_captures = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read capture input")?;
        let batch = match input::parse_capture_line(&line, index + 1) {
            Ok(Some(batch)) => batch,
            Ok(None) => continue,
            Err(e) => {
                warn!("Skipping capture: {}", e);
                continue;
            }
        };

        captures += 1;
        if decoder.decode_into(&batch, &mut writer)? {
            decoded_captures += 1;
        } else {
            debug!(line = index + 1, "Nothing decoded from capture");
        }
    }

    let records = writer.written();
    writer.into_inner()?;
    info!(captures, decoded_captures, records, "Finished");

    Ok(())
}
