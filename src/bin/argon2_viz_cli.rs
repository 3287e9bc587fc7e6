//! CLI tool for argon2-viz - prints the formula grid of one pass
//!
//! Usage:
//!   argon2_viz_cli --memory 2048 --parallelism 2 --iterations 3 --pass 2
//!   argon2_viz_cli --memory 4096 --parallelism 4 --lanes 0..=3 --columns 1020..1024 --json
//!
//! Windows follow Rust range syntax: `A..B` excludes `B`, `A..=B` includes it.

#![allow(clippy::exit)]

use clap::Parser;
use std::io::{self, Write};
use std::process;

use argon2_viz::error::{Result, VizError};
use argon2_viz::layout::LabelSheet;
use argon2_viz::session::Session;
use argon2_viz::types::{Config, Variant, MIN_ITERATIONS, MIN_MEMORY, MIN_PARALLELISM};

#[derive(Parser, Debug)]
#[command(name = "argon2_viz_cli", version, about = "Show how Argon2 fills its memory matrix")]
struct Cli {
    /// Argon2 variant (i, d, id)
    #[arg(long, default_value = "i")]
    variant: Variant,

    /// Total memory in KiB
    #[arg(short, long, default_value_t = MIN_MEMORY)]
    memory: u32,

    /// Number of passes
    #[arg(short = 't', long, default_value_t = MIN_ITERATIONS)]
    iterations: u32,

    /// Number of lanes
    #[arg(short, long, default_value_t = MIN_PARALLELISM)]
    parallelism: u32,

    /// Pass to display (1-based); clamped to the available passes
    #[arg(long, default_value_t = 1)]
    pass: u32,

    /// Lane window: `A..B` (B excluded) or `A..=B` (B included), e.g. `0..4`
    #[arg(long, value_parser = parse_window)]
    lanes: Option<(u32, u32)>,

    /// Column window: `A..B` (B excluded) or `A..=B` (B included), e.g. `1020..=1023`
    #[arg(long, value_parser = parse_window)]
    columns: Option<(u32, u32)>,

    /// Print the labeled window as JSON instead of a table
    #[arg(long)]
    json: bool,
}

/// Default number of lanes shown when no window is given
const DEFAULT_LANES_SHOWN: u32 = 4;

/// Default number of columns shown when no window is given
const DEFAULT_COLUMNS_SHOWN: u32 = 8;

/// Parse `A..B` or `A..=B` into an inclusive `(first, last)` pair.
fn parse_window(s: &str) -> std::result::Result<(u32, u32), String> {
    let (start, end, inclusive) = if let Some((start, end)) = s.split_once("..=") {
        (start, end, true)
    } else if let Some((start, end)) = s.split_once("..") {
        (start, end, false)
    } else {
        return Err(format!("expected START..END or START..=END, got {s:?}"));
    };
    let start: u32 = start.trim().parse().map_err(|e| format!("{start:?}: {e}"))?;
    let end: u32 = end.trim().parse().map_err(|e| format!("{end:?}: {e}"))?;
    let last = if inclusive { Some(end) } else { end.checked_sub(1) };
    match last {
        Some(last) if start <= last => Ok((start, last)),
        _ => Err(format!("window {s:?} is empty")),
    }
}

/// First `count` indices of a dimension with `len` entries, as an inclusive window.
fn leading_window(len: u32, count: u32) -> (u32, u32) {
    (0, len.min(count).saturating_sub(1))
}

fn render(cli: &Cli) -> Result<String> {
    let mut session = Session::new();
    let config = Config::new(cli.memory, cli.iterations, cli.parallelism, cli.variant);
    for advisory in config.advisories() {
        eprintln!("Warning: {advisory}");
    }
    session.start(config)?;

    while session.current_pass().unwrap_or(0) < cli.pass && session.has_next_pass() {
        session.advance()?;
    }

    let run = session.run().ok_or(VizError::NotStarted)?;
    let lanes = cli
        .lanes
        .unwrap_or_else(|| leading_window(run.lane_count(), DEFAULT_LANES_SHOWN));
    let columns = cli
        .columns
        .unwrap_or_else(|| leading_window(run.columns_per_lane(), DEFAULT_COLUMNS_SHOWN));
    let sheet = LabelSheet::build(run, lanes, columns)?;

    if cli.json {
        Ok(serde_json::to_string_pretty(&sheet)?)
    } else {
        Ok(format!(
            "{} | {} lanes x {} columns | pass {}/{}\n{}",
            sheet.variant,
            sheet.lanes,
            sheet.columns_per_lane,
            sheet.pass,
            sheet.iterations,
            sheet.to_text_table()
        ))
    }
}

fn main() {
    let cli = Cli::parse();

    let output = match render(&cli) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{}", output.trim_end()) {
        eprintln!("Error writing output: {}", e);
        process::exit(1);
    }
}
