use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bundlescope::cli::commands;
use bundlescope::config::ConfigLoader;

#[derive(Parser)]
#[command(name = "bundlescope")]
#[command(
    version,
    about = "Fingerprint npm package versions and front-end frameworks from web bundles"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a version fingerprint corpus for an npm package
    Corpus {
        #[arg(help = "Package name (e.g. react, @angular/core)")]
        package: String,
        #[arg(long, value_delimiter = ',', help = "Explicit versions to fingerprint")]
        versions: Vec<String>,
        #[arg(long, help = "Sample this many versions evenly across the release history")]
        sample: Option<usize>,
        #[arg(long, short, help = "Output path for the corpus JSON")]
        output: Option<PathBuf>,
        #[arg(long, help = "Include alpha/beta/rc releases")]
        include_prerelease: bool,
        #[arg(long, help = "Keep the install workspace on disk")]
        keep_workspace: bool,
    },

    /// List the registry versions a corpus build would use
    Versions {
        #[arg(help = "Package name")]
        package: String,
        #[arg(long, help = "Sample this many versions evenly across the release history")]
        sample: Option<usize>,
        #[arg(long, help = "Include alpha/beta/rc releases")]
        include_prerelease: bool,
    },

    /// Match a bundle file against a fingerprint corpus
    Match {
        #[arg(help = "Path to the bundle file")]
        bundle: PathBuf,
        #[arg(help = "Path to the corpus JSON")]
        corpus: PathBuf,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
        #[arg(long, short, help = "Show per-string detail for the best candidate")]
        detailed: bool,
    },

    /// Scan saved page sources for framework evidence
    Scan {
        #[arg(required = true, help = "Saved HTML/JS files fetched from the site")]
        files: Vec<PathBuf>,
        #[arg(long, help = "Hostname the sources were fetched from")]
        host: String,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show the notable strings a package or entry file contributes
    Strings {
        #[arg(help = "Package directory, package.json, or entry file")]
        path: PathBuf,
        #[arg(long, help = "Do not cap the number of retained strings")]
        unlimited: bool,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(long, help = "Print as JSON instead of TOML")]
        json: bool,
    },
    /// Show configuration file paths
    Path,
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mBundleScope encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ConfigLoader::load()?;
    let rt = Runtime::new()?;

    match cli.command {
        Commands::Corpus {
            package,
            versions,
            sample,
            output,
            include_prerelease,
            keep_workspace,
        } => {
            rt.block_on(commands::corpus::run(
                &config,
                commands::corpus::CorpusOptions {
                    package,
                    versions,
                    sample,
                    output,
                    keep_workspace,
                    include_prerelease,
                },
            ))?;
        }
        Commands::Versions {
            package,
            sample,
            include_prerelease,
        } => {
            rt.block_on(commands::corpus::list_versions(
                &config,
                &package,
                sample,
                include_prerelease,
            ))?;
        }
        Commands::Match {
            bundle,
            corpus,
            format,
            detailed,
        } => {
            rt.block_on(commands::match_bundle::run(
                &bundle, &corpus, &format, detailed,
            ))?;
        }
        Commands::Scan {
            files,
            host,
            format,
        } => {
            rt.block_on(commands::scan::run(&config, &files, &host, &format))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => commands::config::show(json)?,
            ConfigAction::Path => commands::config::path(),
        },
        Commands::Strings {
            path,
            unlimited,
            format,
        } => {
            rt.block_on(commands::strings::run(&config, &path, unlimited, &format))?;
        }
    }

    Ok(())
}
