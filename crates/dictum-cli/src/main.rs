mod command;
mod config;
mod document;
mod error;

use clap::Parser;
use command::{Command, Outcome};
use config::Config;
use dictum_state::{PathMap, Value};
use error::CliError;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dictum", version, about = "Read and edit JSON documents by dot-separated path")]
struct Args {
    /// Document to operate on. Without it the command runs against an empty
    /// document and changes are printed instead of saved.
    #[arg(long, env = "DICTUM_FILE")]
    file: Option<PathBuf>,

    /// JSON config file with `compact_on_delete`, `pretty` and `defaults`.
    #[arg(long, env = "DICTUM_CONFIG")]
    config: Option<PathBuf>,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

/// Log to stderr, filtered by `DICTUM_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("DICTUM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let config = match args.config.as_deref() {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("dictum: {e}");
                return ExitCode::from(2);
            }
        },
        None => Config::default(),
    };
    let config = Config {
        pretty: args.pretty || config.pretty,
        ..config
    };

    match run(&args, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("dictum: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args, config: &Config) -> Result<ExitCode, CliError> {
    let document = match args.file.as_deref() {
        Some(path) => document::open(path)?,
        None => PathMap::new(),
    };
    let mut document = config.apply_defaults(document);

    let pretty = config.pretty;
    match args.command.execute(&mut document, config)? {
        Outcome::Show(value) => {
            print(&value, pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Missing => Ok(ExitCode::from(1)),
        Outcome::Modified => {
            match args.file.as_deref() {
                Some(path) => document::save(path, &document, pretty)?,
                None => {
                    debug!("no document file given, printing result");
                    print(&document.serialize(), pretty)?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print(value: &Value, pretty: bool) -> Result<(), CliError> {
    let rendered = document::render(value, pretty)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}
