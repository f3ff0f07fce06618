#![allow(clippy::needless_range_loop)]

mod app;
mod collector;
mod config;
mod render;
mod theme;

use clap::Parser;
use collector::{LineCollector, TuiCollector};
use config::{Config, OutputFormat, ThemeName};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use sudoku_key_core::{derive_key, prepare_challenge, Collector, DerivedKey, KeyError};
use theme::Theme;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Passphrase to derive the key from (read from the first line of stdin if omitted)
    #[arg(long)]
    passphrase: Option<String>,

    /// Hash rounds for the puzzle digest
    #[arg(short = 'n', long)]
    iterations: Option<u16>,

    /// Key output format
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,

    /// Board color scheme
    #[arg(long, value_enum)]
    theme: Option<ThemeName>,

    /// Read the solved grid from stdin instead of opening the board
    #[arg(long)]
    stdin: bool,

    /// Print the puzzle for the passphrase and exit without deriving a key
    #[arg(long)]
    print: bool,

    /// Config file (default: <config dir>/sudoku-key/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings to the config file and exit
    #[arg(long)]
    save_config: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("no config directory on this platform, pass --config")]
    NoConfigPath,
}

fn main() -> ExitCode {
    // Logs go to stderr so they never mix with the key on stdout
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Key(KeyError::ValidationFailed)) => {
            eprintln!("Sudoku solving failed.");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.clone().or_else(Config::default_path);
    let mut config = match &config_path {
        Some(path) => Config::load_from(path),
        None => Config::default(),
    };
    apply_overrides(&mut config, &cli);

    if cli.save_config {
        let path = config_path.ok_or(CliError::NoConfigPath)?;
        config.save_to(&path)?;
        eprintln!("Saved settings to {}", path.display());
        return Ok(());
    }

    let params = config.key_params();
    params.validate()?;

    let passphrase = match cli.passphrase {
        Some(p) => p,
        None => read_passphrase()?,
    };

    if cli.print {
        let challenge = prepare_challenge(&passphrase, &params)?;
        print!("{}", challenge.puzzle);
        return Ok(());
    }

    let mut collector: Box<dyn Collector> = if cli.stdin {
        Box::new(LineCollector::new(io::stdin().lock(), io::stderr()))
    } else {
        Box::new(TuiCollector::new(Theme::from(config.theme)))
    };

    info!(iterations = params.iterations, "deriving key");
    let key = derive_key(&passphrase, &params, collector.as_mut())?;
    eprintln!("Sudoku solved successfully.");

    write_key(&mut io::stdout().lock(), &key, config.output)?;
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(iterations) = cli.iterations {
        config.iterations = iterations;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
}

fn read_passphrase() -> io::Result<String> {
    eprint!("Passphrase: ");
    io::stderr().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn write_key<W: Write>(out: &mut W, key: &DerivedKey, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Hex => writeln!(out, "{}", hex::encode(key.as_bytes()))?,
        OutputFormat::Raw => out.write_all(key.as_bytes())?,
    }
    out.flush()
}
