//! Human-facing report lines on stdout.

use std::io::{self, Write};

use hashchain::{ChainReport, ChainStatus, Digest, GenesisRecord, HardCheck, ListedBlock};

const RED: &str = "\x1b[91m";
const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";
const BLUE: &str = "\x1b[94m";
const RESET: &str = "\x1b[0m";

const SEPARATOR: &str = "-----------------------------";

/// Usage line for `write`.
pub const WRITE_USAGE: &str = "hashchain write {SENDER} {RECEIVER} {AMOUNT}";

/// Renders report lines, with or without ANSI colors.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, code: &'static str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    pub fn ok(&self, w: &mut impl Write, msg: &str) -> io::Result<()> {
        writeln!(w, "[{}] {msg}", self.paint(GREEN, "  OK  "))
    }

    pub fn error(&self, w: &mut impl Write, msg: &str) -> io::Result<()> {
        writeln!(w, "[ {}] {msg}", self.paint(RED, "ERROR "))
    }

    pub fn info(&self, w: &mut impl Write, msg: &str) -> io::Result<()> {
        writeln!(w, "[{}] {msg}", self.paint(BLUE, " INFO "))
    }

    pub fn usage(&self, w: &mut impl Write) -> io::Result<()> {
        writeln!(w, "USAGE:")?;
        writeln!(w, "{WRITE_USAGE}")
    }

    fn status(&self, status: ChainStatus) -> String {
        let code = match status {
            ChainStatus::Readable => GREEN,
            ChainStatus::Corrupted => RED,
            ChainStatus::Unknown => YELLOW,
            ChainStatus::Unverified => return status.label().to_string(),
        };
        self.paint(code, status.label())
    }

    fn block_status(&self, w: &mut impl Write, index: u64, status: ChainStatus) -> io::Result<()> {
        writeln!(w, "[BLOCK]: {index} [STATUS] -> {}", self.status(status))
    }

    /// Soft check lines, then hard check lines.
    pub fn report(&self, w: &mut impl Write, report: &ChainReport) -> io::Result<()> {
        writeln!(w, "SOFT TEST (from block):")?;
        for finding in &report.soft {
            self.block_status(w, finding.index, finding.status)?;
        }

        writeln!(w)?;
        writeln!(w, "HARD TEST (from next block):")?;
        match &report.hard {
            HardCheck::Skipped { .. } => self.info(w, "Not enough blocks")?,
            HardCheck::Ran(findings) => {
                for finding in findings {
                    for (index, status) in &finding.verdicts {
                        self.block_status(w, *index, *status)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// The genesis header followed by every block, or a notice per gap.
    pub fn listing(
        &self,
        w: &mut impl Write,
        genesis: &(GenesisRecord, Digest),
        blocks: &[ListedBlock],
    ) -> io::Result<()> {
        let (record, digest) = genesis;
        writeln!(w, "{SEPARATOR}")?;
        writeln!(w, "GENESIS: {} by {}", record.title, record.author)?;
        writeln!(w, "DATE : {}", record.timestamp)?;
        writeln!(w, "HASH : {digest}")?;
        writeln!(w, "{SEPARATOR}")?;

        for entry in blocks {
            match entry {
                ListedBlock::Present(block) => {
                    writeln!(w, "BLOCK: #{}", block.index)?;
                    writeln!(w, "DATE : {}", block.timestamp)?;
                    writeln!(w, "DATA : Sender   -> {}", block.payload.sender)?;
                    writeln!(w, "       Receiver -> {}", block.payload.receiver)?;
                    writeln!(w, "       Amount   -> {}", block.payload.amount)?;
                    writeln!(w, "PREVIOUS HASH: {}", block.previous_digest)?;
                    writeln!(w, "CURRENT HASH : {}", block.digest)?;
                }
                ListedBlock::Unavailable { index } => {
                    writeln!(w, "BLOCK: #{index}")?;
                    writeln!(w, "Not found. Probably it was corrupted.")?;
                    writeln!(w, "Run `hashchain verify` to check.")?;
                }
            }
            writeln!(w, "{SEPARATOR}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashchain::{LinkFinding, SoftFinding};

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn soft(index: u64, status: ChainStatus) -> SoftFinding {
        SoftFinding {
            index,
            status,
            defect: None,
        }
    }

    #[test]
    fn test_report_lines() {
        let report = ChainReport {
            last_index: 3,
            soft: vec![
                soft(1, ChainStatus::Readable),
                soft(2, ChainStatus::Readable),
                soft(3, ChainStatus::Corrupted),
            ],
            hard: HardCheck::Ran(vec![
                LinkFinding {
                    pair: (1, 2),
                    verdicts: vec![(1, ChainStatus::Readable)],
                    defect: None,
                },
                LinkFinding {
                    pair: (2, 3),
                    verdicts: vec![(2, ChainStatus::Unknown), (3, ChainStatus::Corrupted)],
                    defect: None,
                },
            ]),
        };

        let out = render(|w| Printer::new(false).report(w, &report));
        let expected = "SOFT TEST (from block):\n\
                        [BLOCK]: 1 [STATUS] -> Readable\n\
                        [BLOCK]: 2 [STATUS] -> Readable\n\
                        [BLOCK]: 3 [STATUS] -> Corrupted\n\
                        \n\
                        HARD TEST (from next block):\n\
                        [BLOCK]: 1 [STATUS] -> Readable\n\
                        [BLOCK]: 2 [STATUS] -> Unknown\n\
                        [BLOCK]: 3 [STATUS] -> Corrupted\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_skipped_hard_check_notice() {
        let report = ChainReport {
            last_index: 1,
            soft: vec![soft(1, ChainStatus::Readable)],
            hard: HardCheck::Skipped { present: 1 },
        };
        let out = render(|w| Printer::new(false).report(w, &report));
        assert!(out.ends_with("[ INFO ] Not enough blocks\n"));
    }

    #[test]
    fn test_colored_status() {
        let out = render(|w| Printer::new(true).block_status(w, 4, ChainStatus::Corrupted));
        assert_eq!(out, "[BLOCK]: 4 [STATUS] -> \x1b[91mCorrupted\x1b[0m\n");

        let out = render(|w| Printer::new(true).ok(w, "Block saved!"));
        assert_eq!(out, "[\x1b[92m  OK  \x1b[0m] Block saved!\n");
    }

    #[test]
    fn test_listing_marks_gaps() {
        let genesis = (
            GenesisRecord::new("Blockchain", "t0", "PixHead"),
            Digest::from_stored("abcd"),
        );
        let blocks = vec![ListedBlock::Unavailable { index: 1 }];

        let out = render(|w| Printer::new(false).listing(w, &genesis, &blocks));
        assert!(out.contains("GENESIS: Blockchain by PixHead"));
        assert!(out.contains("BLOCK: #1\nNot found. Probably it was corrupted."));
    }
}
