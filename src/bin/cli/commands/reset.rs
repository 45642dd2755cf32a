use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, forget_history: bool, format: &OutputFormat, _use_color: bool) -> Result<()> {
    let mut storage = app.storage();
    if forget_history {
        storage.reset().context("Failed to clear session and history")?;
    } else {
        storage.reset_session().context("Failed to clear session")?;
    }

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "namespace": app.config.namespace,
                "historyCleared": forget_history,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if forget_history {
                println!("Cleared session and history for '{}'.", app.config.namespace);
            } else {
                println!("Cleared session for '{}'. History kept.", app.config.namespace);
            }
        }
    }

    Ok(())
}
