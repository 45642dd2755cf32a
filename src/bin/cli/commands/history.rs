use std::collections::HashSet;

use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, _use_color: bool) -> Result<()> {
    let history = app
        .storage()
        .history()
        .context("Failed to read history")?;

    // First-seen order, duplicates dropped
    let mut seen = HashSet::new();
    let originals: Vec<&str> = history
        .iter()
        .map(String::as_str)
        .filter(|original| seen.insert(*original))
        .collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&originals)?);
        }
        OutputFormat::Plain => {
            if originals.is_empty() {
                println!("No cards shown yet.");
                return Ok(());
            }
            for original in &originals {
                println!("{}", original);
            }
            println!("\n{} cards seen", originals.len());
        }
    }

    Ok(())
}
