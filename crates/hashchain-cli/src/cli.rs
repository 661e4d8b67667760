//! # CLI Interface
//!
//! Defines the command-line argument structure for `hashchain` using
//! `clap` derive. Three subcommands: `write`, `verify`, and `list`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use hashchain::DigestAlgorithm;

use crate::logging::LogFormat;

/// Append-only hash-chained ledger of value transfers.
#[derive(Parser, Debug)]
#[command(
    name = "hashchain",
    about = "Append-only hash-chained ledger of value transfers",
    version,
    propagate_version = true
)]
pub struct HashchainCli {
    /// Directory holding the chain.
    #[arg(
        long,
        short = 'd',
        env = "HASHCHAIN_DIR",
        default_value = "./Blockchain",
        global = true
    )]
    pub chain_dir: PathBuf,

    /// Storage backend for the chain.
    #[arg(
        long,
        value_enum,
        env = "HASHCHAIN_BACKEND",
        default_value_t = Backend::File,
        global = true
    )]
    pub backend: Backend,

    /// Digest algorithm: sha256, legacy-hmac, or blake3.
    ///
    /// Use `legacy-hmac` to read or extend chains created by the JavaScript
    /// tool.
    #[arg(long, env = "HASHCHAIN_DIGEST", default_value = "sha256", global = true)]
    pub digest: DigestAlgorithm,

    /// Log output format (written to stderr).
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    pub log_format: LogFormat,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

impl HashchainCli {
    /// Default `EnvFilter` directive for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn,hashchain=info",
            1 => "info,hashchain=debug,hashchain_store=debug",
            _ => "trace",
        }
    }
}

/// Storage backends selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// One `<index>.json` file per block in the chain directory.
    File,
    /// One row per block in `<chain-dir>/chain.db`.
    Sqlite,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Append a transfer to the chain, creating the chain if needed.
    #[command(visible_alias = "w")]
    Write(WriteArgs),
    /// Run the soft and hard integrity checks over the whole chain.
    #[command(visible_alias = "r")]
    Verify,
    /// Print every block in the chain.
    #[command(visible_alias = "a")]
    List,
}

/// Arguments for the `write` subcommand.
///
/// All three are optional at the parser level so a missing one prints the
/// usage line instead of a clap error.
#[derive(Parser, Debug)]
pub struct WriteArgs {
    /// Party sending the amount.
    pub sender: Option<String>,
    /// Party receiving the amount.
    pub receiver: Option<String>,
    /// Amount transferred, stored as given.
    pub amount: Option<String>,
}
