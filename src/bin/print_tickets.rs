//! Print or export Tambola tickets.
//!
//! Usage: `tambola-tickets [--count N] [--per-sheet N] [--seed S] [--json]`
//!
//! Defaults come from `TAMBOLA_TICKETS` and `TAMBOLA_SEED`. Text output prints
//! each sheet as grids; `--json` writes `{"seed": .., "sheets": [[ticket, ..], ..]}`.

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tambola::core::{validate_ticket, Ticket, TicketGenerator};
use tambola::types::DEFAULT_TICKETS_PER_SHEET;
use tambola::GameConfig;

#[derive(Debug, Parser)]
#[command(name = "tambola-tickets")]
#[command(about = "Print or export Tambola tickets", long_about = None)]
struct Cli {
    /// Number of tickets (default: TAMBOLA_TICKETS)
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Tickets per sheet
    #[arg(long, default_value_t = DEFAULT_TICKETS_PER_SHEET)]
    per_sheet: usize,

    /// Seed for reproducible tickets (default: TAMBOLA_SEED)
    #[arg(long)]
    seed: Option<u32>,

    /// Write JSON instead of text grids
    #[arg(long)]
    json: bool,
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    count: usize,
    per_sheet: usize,
    seed: Option<u32>,
    json: bool,
}

impl Args {
    fn resolve(cli: Cli, config: &GameConfig) -> Self {
        Self {
            count: cli.count.unwrap_or(config.tickets),
            per_sheet: cli.per_sheet,
            seed: cli.seed.or(config.seed),
            json: cli.json,
        }
    }
}

#[derive(Serialize)]
struct Export<'a> {
    seed: Option<u32>,
    sheets: &'a [Vec<Ticket>],
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let config = GameConfig::from_env();
    let args = Args::resolve(Cli::parse(), &config);

    let sheets = match args.seed {
        Some(seed) => TicketGenerator::with_seed(seed).generate_ticket_sheets(args.count, args.per_sheet),
        None => TicketGenerator::from_entropy().generate_ticket_sheets(args.count, args.per_sheet),
    };
    let invalid = sheets.iter().flatten().filter(|t| !validate_ticket(t)).count();
    if invalid > 0 {
        bail!("{invalid} generated tickets failed validation");
    }
    info!(tickets = args.count, sheets = sheets.len(), seed = ?args.seed, "tickets generated");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let export = Export {
            seed: args.seed,
            sheets: &sheets,
        };
        serde_json::to_writer_pretty(&mut out, &export).context("write json")?;
        writeln!(out)?;
    } else {
        let mut number = 1;
        for (s, sheet) in sheets.iter().enumerate() {
            writeln!(out, "== Sheet {} ==", s + 1)?;
            for ticket in sheet {
                writeln!(out, "Ticket {number}")?;
                writeln!(out, "{ticket}")?;
                writeln!(out)?;
                number += 1;
            }
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, clap::Error> {
        let argv = std::iter::once("tambola-tickets").chain(list.iter().copied());
        let config = GameConfig {
            seed: Some(99),
            ..GameConfig::default()
        };
        Cli::try_parse_from(argv).map(|cli| Args::resolve(cli, &config))
    }

    #[test]
    fn defaults_follow_config() {
        let a = args(&[]).unwrap();
        assert_eq!(a.count, 3);
        assert_eq!(a.per_sheet, DEFAULT_TICKETS_PER_SHEET);
        assert_eq!(a.seed, Some(99));
        assert!(!a.json);
    }

    #[test]
    fn flags() {
        let a = args(&["--count", "12", "--per-sheet", "4", "--seed", "7", "--json"]).unwrap();
        assert_eq!(
            a,
            Args {
                count: 12,
                per_sheet: 4,
                seed: Some(7),
                json: true,
            }
        );
        assert_eq!(args(&["-n", "2"]).unwrap().count, 2);
    }

    #[test]
    fn bad_flags() {
        assert!(args(&["--count"]).is_err());
        assert!(args(&["--count", "lots"]).is_err());
        assert!(args(&["--colour"]).is_err());
    }
}
