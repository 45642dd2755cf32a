//! Data models for a flashcard session

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// A translation prompt. Two cards are the same card when both fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub original: String,
    pub translated: String,
}

impl Card {
    pub fn new(original: impl Into<String>, translated: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            translated: translated.into(),
        }
    }
}

/// A card deferred by the learner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardEntry {
    pub card: Card,
    /// Value of the shown counter at which the card rejoins the deck
    #[serde(rename = "target", alias = "targetCount")]
    pub target_count: u64,
}

impl HardEntry {
    pub fn is_eligible(&self, shown_count: u64) -> bool {
        shown_count >= self.target_count
    }
}

/// Everything the scheduler needs to continue a session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Cards waiting to be shown, front first
    pub deck: VecDeque<Card>,
    #[serde(default)]
    pub hard_queue: Vec<HardEntry>,
    /// Cards dispatched so far; only ever grows
    #[serde(default)]
    pub shown_count: u64,
    #[serde(default)]
    pub correct_count: u64,
    /// Deck size when the session started
    #[serde(default)]
    pub total_cards: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_card: Option<Card>,
}

impl SessionState {
    /// Fresh state over an already shuffled deck
    pub fn new(deck: Vec<Card>) -> Self {
        let total_cards = deck.len() as u64;
        Self {
            deck: deck.into(),
            total_cards,
            ..Default::default()
        }
    }

    pub fn stats(&self) -> SessionStats {
        let progress_percent = if self.total_cards == 0 {
            0.0
        } else {
            self.shown_count as f64 / self.total_cards as f64 * 100.0
        };

        SessionStats {
            remaining: self.deck.len(),
            hard: self.hard_queue.len(),
            shown: self.shown_count,
            correct: self.correct_count,
            total: self.total_cards,
            progress_percent,
        }
    }
}

/// The card handed to the rendering layer. `translated` stays hidden until revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayCard {
    pub original: String,
    pub translated: String,
}

impl From<&Card> for DisplayCard {
    fn from(card: &Card) -> Self {
        Self {
            original: card.original.clone(),
            translated: card.translated.clone(),
        }
    }
}

/// Final score once the deck runs dry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionComplete {
    pub correct_count: u64,
    pub total_cards: u64,
}

/// Result of asking for the next card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Advance {
    Card(DisplayCard),
    Complete(SessionComplete),
}

impl Advance {
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerResult {
    Correct,
    Incorrect,
}

/// Result of marking the current card hard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HardOutcome {
    /// A new entry was queued
    Queued { target: u64 },
    /// The card already had an entry; it was left untouched
    AlreadyQueued { target: u64 },
}

/// Result of marking the current card easy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EasyOutcome {
    RemovedFromHard,
    /// The card was not in the hard queue; nothing changed
    MarkedEasyNoop,
}

/// Running counters for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    /// Cards left in the deck
    pub remaining: usize,
    /// Cards waiting in the hard queue
    pub hard: usize,
    pub shown: u64,
    pub correct: u64,
    pub total: u64,
    /// May exceed 100 once hard cards come back
    pub progress_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_equality_uses_both_fields() {
        assert_eq!(Card::new("Hund", "dog"), Card::new("Hund", "dog"));
        assert_ne!(Card::new("Hund", "dog"), Card::new("Hund", "hound"));
    }

    #[test]
    fn test_hard_entry_wire_format() {
        let entry = HardEntry {
            card: Card::new("Katze", "cat"),
            target_count: 11,
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["target"], 11);
        assert_eq!(json["card"]["original"], "Katze");

        let parsed: HardEntry = serde_json::from_str(
            r#"{"card":{"original":"Katze","translated":"cat"},"targetCount":4}"#,
        )
        .unwrap();
        assert_eq!(parsed.target_count, 4);
    }

    #[test]
    fn test_eligibility_is_inclusive() {
        let entry = HardEntry {
            card: Card::new("a", "b"),
            target_count: 5,
        };
        assert!(!entry.is_eligible(4));
        assert!(entry.is_eligible(5));
        assert!(entry.is_eligible(6));
    }

    #[test]
    fn test_stats_progress() {
        let mut state = SessionState::new(vec![Card::new("a", "1"), Card::new("b", "2")]);
        assert_eq!(state.stats().progress_percent, 0.0);

        state.shown_count = 3;
        let stats = state.stats();
        assert_eq!(stats.remaining, 2);
        assert_eq!(stats.total, 2);
        assert!((stats.progress_percent - 150.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stats_empty_total() {
        let state = SessionState::default();
        assert_eq!(state.stats().progress_percent, 0.0);
    }
}
