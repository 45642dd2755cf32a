mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "flashdrill", about = "Translation flashcards in the terminal", version)]
struct Cli {
    /// Config file (default: <config dir>/flashdrill/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Session namespace; each namespace keeps its own session and history
    #[arg(long, global = true)]
    namespace: Option<String>,

    /// Where sessions are stored
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Do not skip cards shown in earlier sessions
    #[arg(long, global = true)]
    no_history: bool,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Study cards; resumes the saved session if there is one
    Study {
        /// Word list file or http(s) URL (default: `word_list` from the config)
        words: Option<String>,
    },

    /// Show progress of the saved session
    Status,

    /// List card originals shown in earlier sessions
    History,

    /// Discard the saved session
    Reset {
        /// Also forget which cards were shown
        #[arg(long)]
        history: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();

    let app = app::App::new(app::Overrides {
        config: cli.config,
        namespace: cli.namespace,
        data_dir: cli.data_dir,
        no_history: cli.no_history,
    })?;

    match cli.command {
        Command::Study { words } => {
            commands::study::run(&app, words.as_deref(), &cli.format, use_color)?;
        }
        Command::Status => {
            commands::status::run(&app, &cli.format, use_color)?;
        }
        Command::History => {
            commands::history::run(&app, &cli.format, use_color)?;
        }
        Command::Reset { history } => {
            commands::reset::run(&app, history, &cli.format, use_color)?;
        }
    }

    Ok(())
}
