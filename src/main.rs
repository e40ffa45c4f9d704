// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
//
//! Repovault CLI - local repository catalog, search and archiving

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use repovault::commands;
use repovault::config::Config;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "repovault")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,

    /// Data directory override
    #[arg(long, env = "REPOVAULT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Output records in JSON format
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory tree for git repositories and catalog them
    Scan {
        /// Root to scan
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// List every cataloged repository, most recently modified first
    List,

    /// Filter the catalog by a name or path substring
    Search {
        /// Case-insensitive substring
        query: String,
    },

    /// Export the catalog as CSV
    Export {
        /// Destination file
        #[arg(short, long)]
        output: PathBuf,

        /// Export only records matching this substring
        #[arg(long)]
        query: Option<String>,
    },

    /// Create a zip archive of one repository
    Archive {
        /// Repository root to archive
        path: PathBuf,

        /// Destination zip file
        #[arg(short, long)]
        output: PathBuf,

        /// Include the .git subtree in the archive
        #[arg(long)]
        include_git: bool,
    },

    /// Pick the best-fit preview image for one repository
    Preview {
        /// Repository root
        path: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.data_dir.clone());

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => config.log_level.parse().unwrap_or(tracing::Level::INFO),
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Scan { path } => commands::scan::run(&config, path),
        Commands::List => commands::list::run(&config, cli.json),
        Commands::Search { query } => commands::search::run(&config, &query, cli.json),
        Commands::Export { output, query } => commands::export::run(&config, output, query),
        Commands::Archive {
            path,
            output,
            include_git,
        } => commands::archive::run(path, output, include_git),
        Commands::Preview { path } => commands::preview::run(path),
        Commands::Completions { shell } => commands::completions::run(shell, &mut Cli::command()),
    };

    if let Err(ref err) = result {
        log_fatal_error(&config, err);
    }
    result
}

/// Append a fatal error to the startup log before the process exits.
fn log_fatal_error(config: &Config, err: &anyhow::Error) {
    use std::io::Write;

    let path = config.startup_log_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let line = format!(
        "{} ERROR {err:#}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    if let Ok(mut file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}
