use anyhow::Result;
use colored::*;

use crate::candidates;
use crate::link::ParsedLink;
use crate::paths::Paths;

pub fn replace(
    paths: &Paths,
    link: &ParsedLink,
    columns: Vec<String>,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let columns = if columns.is_empty() {
        candidates::default_columns()
    } else {
        columns
    };

    if verbose {
        eprintln!(
            "{} Reading candidates from {} (columns: {})",
            "[INFO]".green(),
            paths.csv_file.display(),
            columns.join(", ")
        );
    }

    let hosts = candidates::load(&paths.csv_file, &columns)?;

    if verbose {
        eprintln!("{} Found {} candidates.", "[INFO]".green(), hosts.len());
    }

    let links = rebuild_all(link, &hosts);

    if json {
        println!("{}", serde_json::to_string(&links)?);
    } else {
        for l in &links {
            println!("{}", l);
        }
    }

    Ok(())
}

pub fn rebuild_all(link: &ParsedLink, hosts: &[String]) -> Vec<String> {
    hosts.iter().map(|h| link.with_host(h)).collect()
}
