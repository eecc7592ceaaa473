//! `gitconf` command-line entry point.
//!
//! Builds a [`StackedConfig`] from the flags, runs one subcommand against it
//! and, for `set`, writes the writable backend back to disk.
//!
//! ```text
//! gitconf [--file PATH | --repo DIR] get [--bool] KEY
//! gitconf [--file PATH | --repo DIR] set KEY VALUE
//! gitconf [--file PATH | --repo DIR] list [--json]
//! ```
//!
//! Without `--file` or `--repo` the default user and system files are read
//! and `set` is refused.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use gitconf_cli::application::{self, parse_key};
use gitconf_cli::infrastructure::storage::{self, ConfigFile};
use gitconf_core::StackedConfig;

#[derive(Debug, Parser)]
#[command(name = "gitconf", version, about = "Read and write Git-style configuration files")]
struct Cli {
    /// Use only this file.
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "repo")]
    file: Option<PathBuf>,

    /// Use `<DIR>/.git/config` in front of the user and system files.
    #[arg(long, global = true, value_name = "DIR")]
    repo: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the value of a key.
    Get {
        /// `section.name` or `section.subsection.name`.
        key: String,
        /// Print the value as `true` or `false`.
        #[arg(long = "bool")]
        as_bool: bool,
    },
    /// Set a key in the writable file.
    Set { key: String, value: String },
    /// Print every entry, lowest priority first.
    List {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stack = open_stack(&cli)?;
    debug!(backends = stack.backends().len(), "opened config stack");

    match cli.command {
        Command::Get { key, as_bool } => {
            let key = parse_key(&key)?;
            let result = if as_bool {
                application::get_bool(&stack, &key).map(|b| b.to_string())
            } else {
                application::get_value(&stack, &key).map(str::to_string)
            };
            match result {
                Ok(value) => println!("{value}"),
                Err(e) if e.is_not_found() => return Ok(ExitCode::from(1)),
                Err(e) => return Err(e.into()),
            }
        }
        Command::Set { key, value } => {
            let key = parse_key(&key)?;
            application::set_value(&mut stack, &key, &value)?;
            if let Some(file) = stack.writable() {
                file.write_to_path(None)?;
            }
        }
        Command::List { json } => {
            let entries = application::list_entries(&stack);
            print!("{}", application::render_entries(&entries, json)?);
            if json {
                println!();
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn open_stack(cli: &Cli) -> anyhow::Result<StackedConfig<ConfigFile>> {
    let stack = match (&cli.file, &cli.repo) {
        (Some(path), _) => storage::file_stack(path)
            .with_context(|| format!("failed to open {}", path.display()))?,
        (None, Some(dir)) => storage::repository_stack(dir)
            .with_context(|| format!("failed to open repository config in {}", dir.display()))?,
        (None, None) => storage::default_backends().context("failed to load default config")?,
    };
    Ok(stack)
}
