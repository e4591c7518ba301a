//! HAPI - command-line interface
//!
//! Project storage paths and background daemon management

use clap::{Parser, Subcommand};
use hapi_core::daemon::DaemonDispatcher;
use hapi_core::project::{get_project_path, sanitize_project_name};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "hapi")]
#[command(version)]
#[command(about = "HAPI command-line tool", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the storage directory for a project
    ProjectPath {
        /// Project working directory
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
    /// Print the project identifier for a path
    Sanitize {
        /// Path to flatten (used as given, not resolved)
        path: String,
    },
    /// Manage the background daemon (install, uninstall)
    Daemon {
        #[command(subcommand)]
        command: DaemonCommands,
    },
}

#[derive(Subcommand)]
enum DaemonCommands {
    /// Register the daemon with the OS service manager
    Install,
    /// Remove the daemon from the OS service manager
    Uninstall,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn handle_daemon(command: DaemonCommands) -> anyhow::Result<()> {
    let dispatcher = DaemonDispatcher::for_current_platform();

    match command {
        DaemonCommands::Install => {
            dispatcher.install().await?;
            println!("HAPI CLI daemon installed");
        }
        DaemonCommands::Uninstall => {
            dispatcher.uninstall().await?;
            println!("HAPI CLI daemon uninstalled");
        }
    }

    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::ProjectPath { dir } => {
            let path = get_project_path(&dir)?;
            println!("{}", path.display());
        }
        Commands::Sanitize { path } => {
            println!("{}", sanitize_project_name(&path));
        }
        Commands::Daemon { command } => handle_daemon(command).await?,
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
