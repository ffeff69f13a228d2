//! stubgen - regenerate jQuery JSDoc stubs from the jQuery API feed

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use stubgen_core::{
    Config, ConfigFile, FileSource, GenerateError, Generator, HttpSource, Source, VersionFilter,
    CONFIG_FILE,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "stubgen")]
#[command(version = stubgen_core::VERSION)]
#[command(about = "Generate JSDoc-annotated jQuery stubs from the jQuery API feed", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./stubgen.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// URL of the API XML feed
    #[arg(long, conflicts_with = "input")]
    url: Option<String>,

    /// Read the API XML from a local file instead of fetching it
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Only include entries added in this version or earlier ("latest" for all)
    #[arg(short = 't', long)]
    target_version: Option<String>,

    /// Render every alternative of a type list as a union instead of only the first
    #[arg(long)]
    union_types: bool,

    /// Generated file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Hand-written header prepended to the generated file
    #[arg(long)]
    header: Option<PathBuf>,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<GenerateError>() {
                Some(cause) => error!(stage = %cause.stage(), "{err:#}"),
                None => error!("{err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli)?;
    let source = select_source(cli, &config);

    let generator = Generator::new(config);
    let report = generator
        .run(source.as_ref())
        .with_context(|| format!("failed to generate stubs from {}", source.describe()))?;

    info!(
        rendered = report.rendered,
        skipped_constructor = report.skipped_constructor,
        skipped_version = report.skipped_version,
        target_version = %generator.config().target_version,
        "done"
    );
    Ok(())
}

/// Defaults, then the configuration file, then command-line flags.
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match config_path(cli.config.as_deref()) {
        Some(path) => ConfigFile::from_path(&path)
            .with_context(|| format!("failed to load {}", path.display()))?
            .apply(Config::default()),
        None => Config::default(),
    };

    if let Some(url) = &cli.url {
        config.url.clone_from(url);
    }
    if let Some(version) = &cli.target_version {
        config.target_version = VersionFilter::parse(version);
    }
    if cli.union_types {
        config.single_return_type = false;
    }
    if let Some(output) = &cli.output {
        config.output.clone_from(output);
    }
    if let Some(header) = &cli.header {
        config.header.clone_from(header);
    }
    Ok(config)
}

/// An explicit path is always used; the default file only when it exists.
fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let default = Path::new(CONFIG_FILE);
            default.is_file().then(|| default.to_path_buf())
        }
    }
}

fn select_source(cli: &Cli, config: &Config) -> Box<dyn Source> {
    match &cli.input {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(config.url.clone())),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = match (quiet, verbose) {
        (true, _) => EnvFilter::new("error"),
        (false, 0) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        (false, 1) => EnvFilter::new("debug"),
        (false, _) => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();
}
