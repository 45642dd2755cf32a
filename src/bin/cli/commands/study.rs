use std::io::{self, BufRead, Write};

use anyhow::Result;

use flashdrill_lib::session::{Advance, SessionError, SessionStats};
use flashdrill_lib::storage::FileStore;
use flashdrill_lib::wordlist::load_word_list;
use flashdrill_lib::{Error, SessionController};

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

/// One line of user input
enum Action<'a> {
    Quit,
    Help,
    Stats,
    Reset,
    Next,
    Reveal,
    Hard,
    Easy,
    Answer(&'a str),
}

/// Commands start with `:` (or are `?` / an empty line). A leading `\` makes
/// the rest of the line an answer, so `\:s` answers ":s".
fn parse_action(line: &str) -> Action<'_> {
    let trimmed = line.trim();
    if let Some(literal) = trimmed.strip_prefix('\\') {
        return Action::Answer(literal);
    }
    match trimmed {
        ":quit" | ":q" => Action::Quit,
        ":help" | ":h" | "?" => Action::Help,
        ":stats" => Action::Stats,
        ":reset" => Action::Reset,
        "" | ":next" | ":n" => Action::Next,
        ":show" | ":s" => Action::Reveal,
        ":hard" => Action::Hard,
        ":easy" => Action::Easy,
        _ => Action::Answer(line),
    }
}

pub fn run(app: &App, words: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let source = app.word_source(words);
    let opened = SessionController::open(&app.config, app.storage(), || {
        load_word_list(source.as_ref())
    });
    let (mut controller, first) = match opened {
        Ok(opened) => opened,
        Err(Error::Session(SessionError::EmptyInput)) => {
            anyhow::bail!(
                "No unseen cards left in namespace '{}'. Run `flashdrill reset --history` to start from the full list.",
                app.config.namespace
            );
        }
        Err(e) => return Err(e.into()),
    };

    if let OutputFormat::Plain = format {
        println!("{}", terminal::render_help(use_color));
    }
    emit_advance(&controller, &first, format, use_color)?;

    let stdin = io::stdin();
    prompt(format)?;
    for line in stdin.lock().lines() {
        let line = line?;
        match parse_action(&line) {
            Action::Quit => break,
            Action::Help => println!("{}", terminal::render_help(use_color)),
            Action::Stats => emit_stats(&controller.stats(), format, use_color)?,
            Action::Reset => {
                match controller.reset(false, || load_word_list(source.as_ref())) {
                    Ok(advance) => emit_advance(&controller, &advance, format, use_color)?,
                    Err(Error::Session(SessionError::EmptyInput)) => {
                        println!("No unseen cards left. Run `flashdrill reset --history` to start from the full list.");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            _ if controller.current().is_none() => {
                println!("Session complete. Type :reset to start over or :quit to exit.");
            }
            Action::Next => {
                let advance = controller.next()?;
                emit_advance(&controller, &advance, format, use_color)?;
            }
            Action::Reveal => {
                if let Some(card) = controller.current() {
                    match format {
                        OutputFormat::Json => println!(
                            "{}",
                            serde_json::json!({ "event": "reveal", "translated": card.translated })
                        ),
                        OutputFormat::Plain => println!("{}", terminal::render_translation(&card, use_color)),
                    }
                }
            }
            Action::Hard => {
                let outcome = controller.mark_hard()?;
                match format {
                    OutputFormat::Json => println!(
                        "{}",
                        serde_json::json!({ "event": "hard", "outcome": outcome, "stats": controller.stats() })
                    ),
                    OutputFormat::Plain => println!("{}", terminal::render_hard(outcome, use_color)),
                }
            }
            Action::Easy => {
                let outcome = controller.mark_easy()?;
                match format {
                    OutputFormat::Json => println!(
                        "{}",
                        serde_json::json!({ "event": "easy", "outcome": outcome, "stats": controller.stats() })
                    ),
                    OutputFormat::Plain => println!("{}", terminal::render_easy(outcome, use_color)),
                }
            }
            Action::Answer(text) => {
                let result = controller.answer(text)?;
                match format {
                    OutputFormat::Json => println!(
                        "{}",
                        serde_json::json!({ "event": "answer", "result": result, "correct": controller.stats().correct })
                    ),
                    OutputFormat::Plain => println!("{}", terminal::render_answer(result, use_color)),
                }
            }
        }
        prompt(format)?;
    }

    log::info!("Leaving study session; progress saved");
    Ok(())
}

fn prompt(format: &OutputFormat) -> Result<()> {
    if let OutputFormat::Plain = format {
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}

fn emit_advance(
    controller: &SessionController<FileStore>,
    advance: &Advance,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "event": "advance",
                "advance": advance,
                "stats": controller.stats(),
            });
            println!("{}", serde_json::to_string(&output)?);
        }
        OutputFormat::Plain => match advance {
            Advance::Card(card) => {
                println!("{}", terminal::render_card(card, &controller.stats(), use_color));
            }
            Advance::Complete(done) => println!("{}", terminal::render_complete(done, use_color)),
        },
    }
    Ok(())
}

fn emit_stats(stats: &SessionStats, format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({ "event": "stats", "stats": stats });
            println!("{}", serde_json::to_string(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", terminal::render_progress(stats, use_color));
            println!("Shown: {}  Correct: {}/{}", stats.shown, stats.correct, stats.total);
        }
    }
    Ok(())
}
