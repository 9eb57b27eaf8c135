//! Script replay loop.
//!
//! Reads command lines, feeds every parsed request to the desk in
//! order, and writes one formatted line per response. Blank lines and
//! `#` comments are skipped silently; lines that do not parse are
//! logged and skipped. Rejected trades are ordinary output, not errors.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rand::Rng;
use tracing::{debug, warn};
use trading_core::TradingDesk;
use trading_protocol::{format_response, parse_command_line};

/// Counters for one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub commands: usize,
    pub responses: usize,
    pub rejections: usize,
    pub unparsed: usize,
}

/// Replay every line of `input` through `desk`, writing responses to `output`.
pub fn run_script<G, I, O>(desk: &mut TradingDesk<G>, input: I, mut output: O) -> Result<RunSummary>
where
    G: Rng,
    I: BufRead,
    O: Write,
{
    let mut summary = RunSummary::default();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("reading script line {}", line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(request) = parse_command_line(trimmed) else {
            warn!(line_no, line = trimmed, "unrecognized command, skipping");
            summary.unparsed += 1;
            continue;
        };

        debug!(line_no, ?request, "processing");
        summary.commands += 1;

        for response in desk.process_message(request) {
            if response.is_rejection() {
                summary.rejections += 1;
            }
            summary.responses += 1;
            writeln!(output, "{}", format_response(&response))
                .context("writing response")?;
        }
    }

    output.flush().context("flushing output")?;
    Ok(summary)
}
