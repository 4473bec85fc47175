//! `gitbook-to-wiki` converts a GitBook directory into a GitHub wiki tree.
//!
//! Usage:
//!   gitbook-to-wiki -v ./iris-book ./iris.wiki /kataras/iris/wiki
//!   gitbook-to-wiki --keep-links --src=./book --dest=./out

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use bookwiki::config::validate_config;
use bookwiki::{load_config, ConfigError, ConvertConfig, Converter};

#[derive(Parser, Debug)]
#[command(name = "gitbook-to-wiki", version, about = "Convert a GitBook into GitHub wiki pages")]
struct Cli {
    /// Source GitBook directory
    #[arg(long = "src", value_name = "DIR")]
    src: Option<PathBuf>,

    /// Destination wiki directory
    #[arg(long = "dest", value_name = "DIR")]
    dest: Option<PathBuf>,

    /// GitHub wiki page base, e.g. /me/my_repo/wiki
    #[arg(long = "remote", value_name = "PATH")]
    remote: Option<String>,

    /// Enable verbose messages
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Keep the files and links as they are
    #[arg(long = "keep-links")]
    keep_links: bool,

    /// JSON configuration file
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Source directory (overrides --src)
    #[arg(value_name = "SRC")]
    source_arg: Option<PathBuf>,

    /// Destination directory (overrides --dest)
    #[arg(value_name = "DEST")]
    destination_arg: Option<PathBuf>,

    /// Wiki base (overrides --remote)
    #[arg(value_name = "REMOTE")]
    remote_arg: Option<String>,
}

fn build_config(cli: &Cli) -> Result<ConvertConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ConvertConfig::default(),
    };

    if let Some(src) = cli.source_arg.as_ref().or(cli.src.as_ref()) {
        config.source_directory = src.clone();
    }
    if let Some(dest) = cli.destination_arg.as_ref().or(cli.dest.as_ref()) {
        config.destination_directory = dest.clone();
    }
    if let Some(remote) = cli.remote_arg.as_ref().or(cli.remote.as_ref()) {
        config.wiki_base = remote.clone();
    }
    config.verbose |= cli.verbose;
    config.keep_links |= cli.keep_links;

    validate_config(&config)?;
    Ok(config)
}

fn init_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("bookwiki={level},gitbook_to_wiki={level}")));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    // The tree scanner logs through the `log` facade.
    tracing_log::LogTracer::init()?;
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(config.verbose) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let converter = Converter::from_config(Arc::new(config));
    match converter.run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Conversion aborted: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
