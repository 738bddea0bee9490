//! Parchment host maintenance CLI
//!
//! Terminal access to the reader's host layer. The GUI shell links the same
//! library; this binary exists for scripts, packaging checks, and cleaning up
//! profiles without starting the reader.
//!
//! # Usage
//!
//! ```bash
//! parchment which aria2c            # Locate a helper executable on PATH
//! parchment decode 'A%C3%A9B'      # Decode URL-encoded UTF-8 text
//! parchment list                    # List profiles (* = active)
//! parchment status                  # Active profile, storage usage, build info
//! parchment purge --cache           # Evict the active profile's render cache
//! parchment purge --all             # Cache + history + cookies
//! ```

use clap::{Parser, Subcommand};
use parchment::config;
use parchment::core::error::HostErrorPattern;
use parchment::core::history::HistoryLog;
use parchment::core::{fsops, lookup, profile, purge};
use shadow_rs::shadow;
use std::process::ExitCode;

shadow!(build);

#[derive(Parser)]
#[command(name = "parchment")]
#[command(about = "Parchment host layer - maintenance tools", long_about = None)]
#[command(version = build::PKG_VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate an executable on the search path
    Which {
        /// Executable name to search for
        name: String,
    },
    /// Decode URL-encoded UTF-8 text
    Decode {
        /// The encoded text
        text: String,
    },
    /// List all available profiles
    List,
    /// Show the active profile, its storage usage, and build info
    Status,
    /// Purge stores of the active profile
    Purge {
        /// Evict the render cache
        #[arg(long)]
        cache: bool,
        /// Clear the visit history
        #[arg(long)]
        history: bool,
        /// Remove the cookie jar
        #[arg(long)]
        cookies: bool,
        /// All of the above
        #[arg(long)]
        all: bool,
    },
}

fn main() -> ExitCode {
    let _ = parchment::utils::ensure_dirs();
    init_logging();

    let cli = Cli::parse();
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to create Tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(handle_cli(cli.command)) {
        Ok(code) => code,
        Err(e) => {
            let translation = HostErrorPattern::match_error(&e.to_string());
            eprintln!("Error: {}", translation.user_message);
            for suggestion in translation.suggestions {
                eprintln!("  hint: {suggestion}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Set up logging to a file under the state directory, falling back to stderr.
fn init_logging() {
    if let Some(mut log_path) = parchment::utils::get_state_dir() {
        log_path.push("parchment.log");
        if let Ok(file) = std::fs::File::create(log_path) {
            tracing_subscriber::fmt().with_writer(file).init();
        } else {
            tracing_subscriber::fmt::init();
        }
    } else {
        tracing_subscriber::fmt::init();
    }
}

async fn handle_cli(command: Commands) -> Result<ExitCode, Box<dyn std::error::Error>> {
    match command {
        Commands::Which { name } => {
            if let Some(path) = lookup::which(&name) {
                println!("{}", path.display());
                return Ok(ExitCode::SUCCESS);
            }

            // Fall back to the installation prefix for bundled helpers
            let config = config::load_config().await;
            if let Some(prefix) = config.install_prefix {
                let raw = prefix.join("bin").display().to_string();
                if let Some(path) = lookup::locate(&name, &raw, lookup::PathStyle::host()) {
                    println!("{}", path.display());
                    return Ok(ExitCode::SUCCESS);
                }
            }

            eprintln!("{name}: not found");
            Ok(ExitCode::FAILURE)
        }
        Commands::Decode { text } => {
            println!("{}", parchment::decode_url(&text)?);
            Ok(ExitCode::SUCCESS)
        }
        Commands::List => {
            let profiles = profile::list_profiles().await?;
            let config = config::load_config().await;
            println!("Available profiles (* = active):");
            for p in profiles {
                if p == config.active_profile {
                    println!("  * {p}");
                } else {
                    println!("    {p}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Status => {
            let config = config::load_config().await;
            println!("Active profile: {}", config.active_profile);

            let active = profile::open_profile(&config.active_profile).await?;
            let visits = HistoryLog::new(&active).entry_count().await?;
            let cache_bytes = fsops::dir_size(&active.cache_dir()).await?;
            println!("History entries: {visits}");
            println!("Cache size: {cache_bytes} bytes");

            if let Some(prefix) = &config.install_prefix {
                println!("Install prefix: {}", prefix.display());
            }

            println!(
                "Build: {} ({}, {})",
                build::PKG_VERSION,
                build::SHORT_COMMIT,
                build::BUILD_TIME
            );
            Ok(ExitCode::SUCCESS)
        }
        Commands::Purge {
            cache,
            history,
            cookies,
            all,
        } => {
            if !(cache || history || cookies || all) {
                eprintln!("Nothing selected; pass --cache, --history, --cookies or --all.");
                return Ok(ExitCode::FAILURE);
            }

            let config = config::load_config().await;
            let active = profile::open_profile(&config.active_profile).await?;

            if all {
                let report = purge::purge_all(&active).await;
                println!(
                    "Purged {} cache entries, history and cookies of '{}'.",
                    report.cache_entries_removed,
                    active.name()
                );
                if !report.is_clean() {
                    for failure in &report.failures {
                        eprintln!("  failed: {failure}");
                    }
                    return Ok(ExitCode::FAILURE);
                }
                return Ok(ExitCode::SUCCESS);
            }

            if cache {
                let removed = purge::purge_cache(&active).await?;
                println!("Purged {removed} cache entries.");
            }
            if history {
                purge::purge_history(&active).await?;
                println!("Purged history.");
            }
            if cookies {
                purge::purge_cookies(&active).await?;
                println!("Purged cookies.");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
