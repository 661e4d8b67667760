//! Chain verification: the soft and hard integrity checks.
//!
//! The **soft check** recomputes each block's digest from its own stored
//! fields and compares it with the stored digest. It proves a block was not
//! altered after it recorded its digest, nothing more: a block whose payload
//! and digest were rewritten together passes.
//!
//! The **hard check** walks adjacent pairs `(i-1, i)` and requires the
//! predecessor's recomputed digest to equal both the successor's recorded
//! link and the predecessor's own stored digest. It catches the consistent
//! rewrite the soft check misses.
//!
//! Every run re-derives all statuses from storage. Defects are findings in
//! the report, never errors; only storage failures abort a run.

use std::fmt;

use hashchain_core::{Block, Digest, DigestAlgorithm, GENESIS_INDEX};
use hashchain_store::{ChainStore, StoreError, StoreExt};
use tracing::{debug, info};

use crate::error::{LedgerError, Result};

/// Classification of one block within one verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChainStatus {
    /// Not examined by this run.
    Unverified,
    /// Passed the check.
    Readable,
    /// Could not be judged because its neighbour is missing.
    Unknown,
    /// Missing, undecodable, or failed the check.
    Corrupted,
}

impl ChainStatus {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            ChainStatus::Unverified => "Unverified",
            ChainStatus::Readable => "Readable",
            ChainStatus::Unknown => "Unknown",
            ChainStatus::Corrupted => "Corrupted",
        }
    }
}

impl fmt::Display for ChainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a block was not classified `Readable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Defect {
    /// No record at this index.
    MissingBlock { index: u64 },
    /// The record could not be decoded.
    Malformed { index: u64, reason: String },
    /// Stored digest differs from the digest of the stored fields.
    DigestMismatch {
        index: u64,
        computed: Digest,
        stored: Digest,
    },
    /// The predecessor at `index` does not match the link recorded after it.
    LinkMismatch {
        index: u64,
        computed: Digest,
        recorded: Digest,
        stored: Digest,
    },
}

impl Defect {
    /// The index the defect is attributed to.
    pub fn index(&self) -> u64 {
        match self {
            Defect::MissingBlock { index }
            | Defect::Malformed { index, .. }
            | Defect::DigestMismatch { index, .. }
            | Defect::LinkMismatch { index, .. } => *index,
        }
    }
}

impl From<Defect> for LedgerError {
    fn from(defect: Defect) -> Self {
        match defect {
            Defect::MissingBlock { index } => LedgerError::MissingBlock(index),
            Defect::Malformed { index, reason } => LedgerError::MalformedBlock { index, reason },
            Defect::DigestMismatch {
                index,
                computed,
                stored,
            } => LedgerError::DigestMismatch {
                index,
                computed,
                stored,
            },
            Defect::LinkMismatch {
                index,
                computed,
                recorded,
                ..
            } => LedgerError::LinkMismatch {
                index,
                computed,
                recorded,
            },
        }
    }
}

/// Soft check result for one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftFinding {
    pub index: u64,
    pub status: ChainStatus,
    pub defect: Option<Defect>,
}

/// Hard check result for one adjacent pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFinding {
    /// `(predecessor, successor)`.
    pub pair: (u64, u64),
    /// One verdict for the predecessor, plus one for the successor when it
    /// is missing.
    pub verdicts: Vec<(u64, ChainStatus)>,
    pub defect: Option<Defect>,
}

impl LinkFinding {
    /// Verdict for `index`, if this finding judged it.
    pub fn status_of(&self, index: u64) -> Option<ChainStatus> {
        self.verdicts
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, s)| *s)
    }

    /// Whether every verdict is `Readable`.
    pub fn is_readable(&self) -> bool {
        self.verdicts.iter().all(|(_, s)| *s == ChainStatus::Readable)
    }
}

/// Outcome of the hard check over the whole range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HardCheck {
    /// Fewer than two non-genesis blocks are stored.
    Skipped { present: usize },
    /// One finding per pair `(i-1, i)`, `i` in `[2, last_index]`.
    Ran(Vec<LinkFinding>),
}

impl HardCheck {
    /// Findings, empty when skipped.
    pub fn findings(&self) -> &[LinkFinding] {
        match self {
            HardCheck::Skipped { .. } => &[],
            HardCheck::Ran(findings) => findings,
        }
    }
}

/// Full result of [`Verifier::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainReport {
    pub last_index: u64,
    pub soft: Vec<SoftFinding>,
    pub hard: HardCheck,
}

impl ChainReport {
    /// Worst classification of `index` across both checks.
    pub fn status_of(&self, index: u64) -> ChainStatus {
        let soft = self
            .soft
            .iter()
            .filter(|f| f.index == index)
            .map(|f| f.status);
        let hard = self
            .hard
            .findings()
            .iter()
            .filter_map(|f| f.status_of(index));
        soft.chain(hard).max().unwrap_or(ChainStatus::Unverified)
    }

    /// Whether no check found anything other than `Readable`.
    pub fn is_intact(&self) -> bool {
        self.soft.iter().all(|f| f.status == ChainStatus::Readable)
            && self.hard.findings().iter().all(LinkFinding::is_readable)
    }

    /// All defects, soft check first.
    pub fn defects(&self) -> impl Iterator<Item = &Defect> {
        self.soft
            .iter()
            .filter_map(|f| f.defect.as_ref())
            .chain(self.hard.findings().iter().filter_map(|f| f.defect.as_ref()))
    }

    /// Turn the first defect into an error.
    pub fn ensure_intact(self) -> Result<Self> {
        let first = self.defects().next().cloned();
        match first {
            Some(defect) => Err(defect.into()),
            None => Ok(self),
        }
    }
}

/// Loaded record, or the defect that replaced it.
enum Loaded {
    Block(Block),
    Defective(Defect),
}

/// Runs integrity checks against a store.
pub struct Verifier<'a, S: ChainStore> {
    store: &'a S,
    algorithm: DigestAlgorithm,
}

impl<'a, S: ChainStore> Verifier<'a, S> {
    /// Create a verifier using `algorithm` to recompute digests.
    pub fn new(store: &'a S, algorithm: DigestAlgorithm) -> Self {
        Self { store, algorithm }
    }

    fn load(&self, index: u64) -> Result<Loaded> {
        match self.store.read_block(index) {
            Ok(block) => Ok(Loaded::Block(block)),
            Err(StoreError::NotFound(_)) => Ok(Loaded::Defective(Defect::MissingBlock { index })),
            Err(StoreError::InvalidRecord { reason, .. }) => {
                Ok(Loaded::Defective(Defect::Malformed { index, reason }))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Soft check of block `index`.
    pub fn soft_check(&self, index: u64) -> Result<SoftFinding> {
        let block = match self.load(index)? {
            Loaded::Block(block) => block,
            Loaded::Defective(defect) => {
                return Ok(SoftFinding {
                    index,
                    status: ChainStatus::Corrupted,
                    defect: Some(defect),
                })
            }
        };

        let computed = block.compute_digest(self.algorithm);
        let finding = if computed == block.digest {
            SoftFinding {
                index,
                status: ChainStatus::Readable,
                defect: None,
            }
        } else {
            SoftFinding {
                index,
                status: ChainStatus::Corrupted,
                defect: Some(Defect::DigestMismatch {
                    index,
                    computed,
                    stored: block.digest,
                }),
            }
        };
        debug!(index, status = %finding.status, "soft check");
        Ok(finding)
    }

    /// Hard check of the pair `(index - 1, index)`.
    ///
    /// Only pairs of two blocks are judged: for `index < 2` nothing is read
    /// and `index` comes back `Unverified`.
    pub fn hard_check(&self, index: u64) -> Result<LinkFinding> {
        let prev_index = index.saturating_sub(1);
        let pair = (prev_index, index);
        if prev_index == GENESIS_INDEX {
            return Ok(LinkFinding {
                pair,
                verdicts: vec![(index, ChainStatus::Unverified)],
                defect: None,
            });
        }

        let prev = match self.load(prev_index)? {
            Loaded::Block(block) => block,
            Loaded::Defective(defect) => {
                return Ok(LinkFinding {
                    pair,
                    verdicts: vec![(prev_index, ChainStatus::Corrupted)],
                    defect: Some(defect),
                })
            }
        };

        let curr = match self.load(index)? {
            Loaded::Block(block) => block,
            Loaded::Defective(defect) => {
                return Ok(LinkFinding {
                    pair,
                    verdicts: vec![
                        (prev_index, ChainStatus::Unknown),
                        (index, ChainStatus::Corrupted),
                    ],
                    defect: Some(defect),
                })
            }
        };

        let computed = prev.compute_digest(self.algorithm);
        let finding = if computed == curr.previous_digest && computed == prev.digest {
            LinkFinding {
                pair,
                verdicts: vec![(prev_index, ChainStatus::Readable)],
                defect: None,
            }
        } else {
            LinkFinding {
                pair,
                verdicts: vec![(prev_index, ChainStatus::Corrupted)],
                defect: Some(Defect::LinkMismatch {
                    index: prev_index,
                    computed,
                    recorded: curr.previous_digest,
                    stored: prev.digest,
                }),
            }
        };
        debug!(prev = prev_index, index, linked = finding.is_readable(), "hard check");
        Ok(finding)
    }

    /// Soft check over `[1, last_index]`, then hard check over every pair.
    pub fn run(&self) -> Result<ChainReport> {
        let indices = self.store.list_indices()?;
        let last_index = indices.last().copied().unwrap_or(GENESIS_INDEX);

        let soft = (1..=last_index)
            .map(|i| self.soft_check(i))
            .collect::<Result<Vec<_>>>()?;

        let present = indices.iter().filter(|&&i| i != GENESIS_INDEX).count();
        let hard = if present < 2 {
            info!(present, "not enough blocks for hard check");
            HardCheck::Skipped { present }
        } else {
            HardCheck::Ran(
                (2..=last_index)
                    .map(|i| self.hard_check(i))
                    .collect::<Result<Vec<_>>>()?,
            )
        };

        Ok(ChainReport {
            last_index,
            soft,
            hard,
        })
    }
}
