use anyhow::{Context, Result};

use flashdrill_lib::session::Scheduler;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let restored = app
        .storage()
        .restore()
        .context("Failed to read saved session")?;

    let Some(state) = restored else {
        match format {
            OutputFormat::Json => println!("{}", serde_json::json!({ "session": null })),
            OutputFormat::Plain => println!("No session in progress in '{}'.", app.config.namespace),
        }
        return Ok(());
    };

    let scheduler = Scheduler::initialize(Vec::new(), Some(state), app.config.scheduler_options())?;
    let stats = scheduler.stats();
    let current = scheduler.current();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "namespace": app.config.namespace,
                "current": current,
                "stats": stats,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Namespace: {}", app.config.namespace);
            match current {
                Some(card) => println!("Current card: {}", card.original),
                None if stats.remaining == 0 => println!("Session complete."),
                None => println!("Current card: (none)"),
            }
            println!("{}", terminal::render_progress(&stats, use_color));
            println!("Shown: {}  Correct: {}/{}", stats.shown, stats.correct, stats.total);
        }
    }

    Ok(())
}
