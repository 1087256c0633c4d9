//! CLI for the SDR download renamer.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use sdr_core::config;
use sdr_core::rules::RuleKind;
use sdr_core::settings::JsonFileStore;
use std::path::PathBuf;

use commands::{run_apply, run_header, run_preview, run_rules, run_strategy};

/// Top-level CLI for the SDR download renamer.
#[derive(Debug, Parser)]
#[command(name = "sdr")]
#[command(about = "SDR: rename downloads with an ordered list of rules", long_about = None)]
pub struct Cli {
    /// Settings file to use instead of the configured one.
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the stored rules on a filename, even when renaming is switched off.
    Apply {
        /// Filename or path; only the last segment is renamed.
        filename: String,
    },

    /// Show what a download would be renamed to right now.
    Preview {
        filename: String,
    },

    /// Inspect and edit the rule list.
    Rules {
        #[command(subcommand)]
        command: RulesCommand,
    },

    /// Rewrite a Content-Disposition header value with the stored rules.
    Header {
        /// Raw header value, e.g. `attachment; filename="a.pdf"`.
        value: String,
    },

    /// Print the interception strategy chosen for the configured host.
    Strategy,
}

#[derive(Debug, Subcommand)]
pub enum RulesCommand {
    /// List rules in the order they run.
    List,

    /// Append a rule.
    Add {
        /// Rule kind, e.g. `replace`, `addEnd`, `titleCase`.
        kind: RuleKind,
        /// Text parameter (search text for `replace`).
        text: Option<String>,
        /// Replacement text for `replace`.
        #[arg(long = "with", value_name = "TEXT")]
        replace_with: Option<String>,
    },

    /// Remove the rule at a 1-based position.
    Remove {
        position: usize,
    },

    /// Move a rule one step up or down.
    Move {
        position: usize,
        direction: Direction,
    },

    /// Switch renaming on.
    Enable,

    /// Switch renaming off, keeping the rules.
    Disable,

    /// Delete every rule.
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Direction {
    Up,
    Down,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let store = match cli.store {
            Some(path) => JsonFileStore::new(path),
            None => JsonFileStore::new(cfg.storage_path()?),
        };

        match cli.command {
            CliCommand::Apply { filename } => run_apply(&store, &filename).await?,
            CliCommand::Preview { filename } => run_preview(&store, &filename).await?,
            CliCommand::Rules { command } => run_rules(&store, command).await?,
            CliCommand::Header { value } => run_header(&store, &value).await?,
            CliCommand::Strategy => run_strategy(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
