use flashdrill_lib::session::{
    AnswerResult, DisplayCard, EasyOutcome, HardOutcome, SessionComplete, SessionStats,
};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Width of the progress bar in cells
const BAR_WIDTH: usize = 30;

pub fn render_card(card: &DisplayCard, stats: &SessionStats, use_color: bool) -> String {
    let word = if use_color {
        format!("{}{}{}", Color::BOLD, card.original, Color::RESET)
    } else {
        card.original.clone()
    };
    format!("\n{}\n  {}\n", render_progress(stats, use_color), word)
}

pub fn render_translation(card: &DisplayCard, use_color: bool) -> String {
    format!("  = {}", paint(&card.translated, Color::CYAN, use_color))
}

pub fn render_answer(result: AnswerResult, use_color: bool) -> String {
    match result {
        AnswerResult::Correct => paint("Correct!", Color::GREEN, use_color),
        AnswerResult::Incorrect => paint(
            "Incorrect. Try again or type :show to see the translation.",
            Color::RED,
            use_color,
        ),
    }
}

pub fn render_hard(outcome: HardOutcome, use_color: bool) -> String {
    let text = match outcome {
        HardOutcome::Queued { target } => {
            format!("Marked as hard. Will reappear after card {}.", target)
        }
        HardOutcome::AlreadyQueued { target } => {
            format!("Already marked hard. Will reappear after card {}.", target)
        }
    };
    paint(&text, Color::YELLOW, use_color)
}

pub fn render_easy(outcome: EasyOutcome, use_color: bool) -> String {
    let text = match outcome {
        EasyOutcome::RemovedFromHard => "Card removed from hard queue.",
        EasyOutcome::MarkedEasyNoop => "Card marked as easy.",
    };
    paint(text, Color::GREEN, use_color)
}

pub fn render_complete(done: &SessionComplete, use_color: bool) -> String {
    let title = paint("Session complete!", Color::BOLD, use_color);
    format!(
        "\n{}\nYou've completed all the flashcards.\nCorrect answers: {}/{}\nType :reset to start over.",
        title, done.correct_count, done.total_cards
    )
}

/// Progress bar plus remaining/hard counters
pub fn render_progress(stats: &SessionStats, use_color: bool) -> String {
    let filled = ((stats.progress_percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let bar = format!(
        "[{}{}]",
        "\u{2588}".repeat(filled),
        "\u{2591}".repeat(BAR_WIDTH - filled)
    );
    let counters = format!(
        "Cards remaining: {}  Hard cards: {}",
        stats.remaining, stats.hard
    );
    format!(
        "{} {:>5.1}%  {}",
        bar,
        stats.progress_percent,
        paint(&counters, Color::GRAY, use_color)
    )
}

pub fn render_help(use_color: bool) -> String {
    let lines = [
        "Type the translation and press Enter to check it.",
        "  :show   reveal the translation",
        "  :hard   see this card again later",
        "  :easy   drop this card from the hard queue",
        "  :next   next card (or an empty line)",
        "  :stats  show counters",
        "  :reset  start over (history is kept)",
        "  :quit   save and exit",
        "Start a line with \\ to answer literally (\\:s answers \":s\").",
    ];
    paint(&lines.join("\n"), Color::DIM, use_color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> SessionStats {
        SessionStats {
            remaining: 2,
            hard: 1,
            shown: 3,
            correct: 1,
            total: 6,
            progress_percent: 50.0,
        }
    }

    #[test]
    fn test_plain_output_has_no_escape_codes() {
        let plain = [
            render_progress(&stats(), false),
            render_answer(AnswerResult::Incorrect, false),
            render_hard(HardOutcome::Queued { target: 11 }, false),
            render_help(false),
        ];
        assert!(plain.iter().all(|s| !s.contains('\x1b')));
        assert!(plain[0].contains("Cards remaining: 2  Hard cards: 1"));
        assert!(plain[2].contains("after card 11"));
    }

    #[test]
    fn test_colored_output() {
        assert_eq!(
            render_answer(AnswerResult::Correct, true),
            format!("{}Correct!{}", Color::GREEN, Color::RESET)
        );
        assert!(render_easy(EasyOutcome::MarkedEasyNoop, true).starts_with(Color::GREEN));
        assert!(render_progress(&stats(), true).contains(Color::GRAY));
        assert!(render_help(true).starts_with(Color::DIM));
    }
}
