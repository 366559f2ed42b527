mod candidates;
mod cli;
mod commands;
mod link;
mod paths;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use colored::*;
use link::ParsedLink;
use paths::Paths;

fn main() -> Result<()> {
    let args = Cli::parse();

    let link = ParsedLink::parse(&args.link).context("Invalid VLESS link format")?;

    if args.verbose {
        eprintln!(
            "{} Parsed link: host={} port={} path={:?} query={:?} remark={:?}",
            "[INFO]".green(),
            link.host,
            link.port
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            link.path,
            link.query,
            link.remark
        );
    }

    if args.inspect {
        return commands::inspect::inspect(&link);
    }

    let paths = Paths::new().with_csv_override(args.csv_file);
    commands::replace::replace(&paths, &link, args.columns, args.json, args.verbose)
}
