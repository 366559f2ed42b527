use anyhow::Result;

use crate::link::ParsedLink;

pub fn inspect(link: &ParsedLink) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(link)?);
    Ok(())
}
