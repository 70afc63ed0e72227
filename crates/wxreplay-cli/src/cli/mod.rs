//! CLI for wxreplay.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;
use wxreplay_core::config::{self, ConfigOverrides, ReplayConfig};
use wxreplay_core::payload::ValueMode;

use commands::{run_check, run_completions, run_replay};

/// Top-level CLI for wxreplay.
#[derive(Debug, Parser)]
#[command(name = "wxreplay")]
#[command(about = "Replay a weather observation file as a slow stream of HTTP submissions", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/wxreplay/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// How temperature and humidity are encoded in the JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValuesArg {
    /// Column text as JSON strings.
    Text,
    /// JSON numbers.
    Number,
}

impl From<ValuesArg> for ValueMode {
    fn from(v: ValuesArg) -> Self {
        match v {
            ValuesArg::Text => ValueMode::Text,
            ValuesArg::Number => ValueMode::Number,
        }
    }
}

/// Options shared by commands that read the input file.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Tab-separated observation file (date, temperature, humidity; no header).
    pub input: Option<PathBuf>,

    /// Value encoding for temperature and humidity.
    #[arg(long, value_enum, value_name = "MODE")]
    pub values: Option<ValuesArg>,

    /// Drop malformed rows with a warning instead of refusing the file.
    #[arg(long)]
    pub skip_malformed: bool,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Send each row of the input file as a JSON POST, pausing between rows.
    Replay {
        #[command(flatten)]
        input: InputArgs,

        /// Target endpoint (default http://localhost:8080/submit).
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// Seconds to wait between submissions (default 2, 0 disables).
        #[arg(long, value_name = "SECS")]
        delay: Option<f64>,

        /// Stop at the first failed submission instead of logging and continuing.
        #[arg(long)]
        fail_fast: bool,

        /// Print the payloads that would be sent; no network I/O.
        #[arg(long)]
        dry_run: bool,
    },

    /// Parse and validate the input file without sending anything.
    Check {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl InputArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input_path: self.input.clone(),
            values: self.values.map(ValueMode::from),
            skip_malformed: self.skip_malformed,
            ..Default::default()
        }
    }
}

fn load_config(explicit: Option<&PathBuf>) -> Result<ReplayConfig> {
    match explicit {
        Some(path) => config::load_from_path(path),
        None => config::load_or_init(),
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let mut cfg = load_config(cli.config.as_ref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Replay {
                input,
                url,
                delay,
                fail_fast,
                dry_run,
            } => {
                cfg.apply(ConfigOverrides {
                    target_url: url,
                    delay_secs: delay,
                    fail_fast,
                    ..input.overrides()
                });
                run_replay(&cfg, dry_run)?;
            }
            CliCommand::Check { input } => {
                cfg.apply(input.overrides());
                run_check(&cfg)?;
            }
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
