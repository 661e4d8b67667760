//! # Hashchain CLI
//!
//! Entry point for the `hashchain` binary. Parses arguments, initializes
//! logging, opens the chain store, and runs one command:
//!
//! - `write`  - append a transfer, creating the chain on first use
//! - `verify` - soft and hard integrity checks over the whole chain
//! - `list`   - print every block
//!
//! Exit codes: 0 success, 2 usage error, 3 missing chain or genesis,
//! 4 storage failure, 5 verification found corruption.

mod cli;
mod logging;
mod output;

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use hashchain::core::{validate_payload, Payload};
use hashchain::store::{ChainStore, FileStore, SqliteStore, StoreError};
use hashchain::{Ledger, LedgerConfig, LedgerError};

use cli::{Backend, Commands, HashchainCli};
use output::Printer;

/// Database file name inside the chain directory for the SQLite backend.
const SQLITE_FILE: &str = "chain.db";

const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;
const EXIT_MISSING_CHAIN: u8 = 3;
const EXIT_STORAGE: u8 = 4;
const EXIT_CORRUPTED: u8 = 5;

/// A parsed command, with write arguments already checked.
enum Action {
    Write(Payload),
    Verify,
    List,
}

fn main() -> ExitCode {
    let cli = HashchainCli::parse();
    logging::init_logging(cli.log_level(), cli.log_format);

    let printer = Printer::new(io::stdout().is_terminal());
    match run(&cli, printer) {
        Ok(code) => code,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            let _ = printer.error(&mut io::stdout(), &format!("{err:#}"));
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: &HashchainCli, printer: Printer) -> Result<ExitCode> {
    let action = match &cli.command {
        Commands::Write(args) => {
            match validate_payload(
                args.sender.clone(),
                args.receiver.clone(),
                args.amount.clone(),
            ) {
                Ok(payload) => Action::Write(payload),
                Err(err) => {
                    tracing::debug!(%err, "write arguments rejected");
                    let mut out = io::stdout().lock();
                    printer.error(&mut out, "More information required!")?;
                    printer.usage(&mut out)?;
                    return Ok(ExitCode::from(EXIT_USAGE));
                }
            }
        }
        Commands::Verify => Action::Verify,
        Commands::List => Action::List,
    };

    let config = LedgerConfig::with_digest(cli.digest);
    tracing::debug!(
        chain_dir = %cli.chain_dir.display(),
        backend = ?cli.backend,
        digest = %cli.digest,
        "opening chain"
    );

    match cli.backend {
        Backend::File => {
            let ledger = Ledger::new(FileStore::new(&cli.chain_dir), config);
            execute(&ledger, action, printer)
        }
        Backend::Sqlite => {
            let ledger = Ledger::new(open_sqlite(cli, &action)?, config);
            execute(&ledger, action, printer)
        }
    }
}

/// Open `<chain-dir>/chain.db`, creating it only for writes.
fn open_sqlite(cli: &HashchainCli, action: &Action) -> Result<SqliteStore> {
    let path = cli.chain_dir.join(SQLITE_FILE);
    let store = if matches!(action, Action::Write(_)) {
        fs::create_dir_all(&cli.chain_dir)
            .map_err(|e| LedgerError::from(StoreError::Io(e)))
            .with_context(|| {
                format!(
                    "failed to create chain directory: {}",
                    cli.chain_dir.display()
                )
            })?;
        SqliteStore::open(&path)
    } else {
        SqliteStore::open_existing(&path)
    };
    store
        .map_err(LedgerError::from)
        .with_context(|| format!("failed to open database at {}", path.display()))
}

fn execute<S: ChainStore>(ledger: &Ledger<S>, action: Action, printer: Printer) -> Result<ExitCode> {
    let mut out = io::stdout().lock();
    match action {
        Action::Write(payload) => {
            let block = ledger.append_block(payload).context("failed to append block")?;
            tracing::info!(index = block.index, digest = %block.digest.short(), "block appended");
            printer.ok(&mut out, "Block saved!")?;
            Ok(ExitCode::SUCCESS)
        }
        Action::Verify => {
            let report = ledger.verify_chain()?;
            printer.report(&mut out, &report)?;
            out.flush()?;
            if report.is_intact() {
                Ok(ExitCode::SUCCESS)
            } else {
                tracing::warn!(last_index = report.last_index, "chain is corrupted");
                Ok(ExitCode::from(EXIT_CORRUPTED))
            }
        }
        Action::List => {
            let genesis = ledger.genesis()?;
            let blocks = ledger.list_blocks()?;
            printer.listing(&mut out, &genesis, &blocks)?;
            if blocks.is_empty() {
                printer.info(&mut out, "Blocks not found")?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Map a failure onto the documented exit codes.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<LedgerError>() {
        Some(LedgerError::MissingChainDirectory(_) | LedgerError::MissingGenesisBlock) => {
            EXIT_MISSING_CHAIN
        }
        Some(LedgerError::Validation(_)) => EXIT_USAGE,
        Some(
            LedgerError::MissingBlock(_)
            | LedgerError::DigestMismatch { .. }
            | LedgerError::LinkMismatch { .. }
            | LedgerError::MalformedBlock { .. },
        ) => EXIT_CORRUPTED,
        Some(LedgerError::Storage(_) | LedgerError::Core(_)) => EXIT_STORAGE,
        None => EXIT_FAILURE,
    }
}
