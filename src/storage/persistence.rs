//! Session snapshots and shown-card history

use std::collections::{HashSet, VecDeque};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::store::{KeyValueStore, Result};
use crate::session::{Card, HardEntry, SessionState};

const DECK_KEY: &str = "session/deck";
const HARD_QUEUE_KEY: &str = "session/hardQueue";
const SHOWN_COUNT_KEY: &str = "session/shownCount";
const CORRECT_COUNT_KEY: &str = "session/correctCount";
const CURRENT_CARD_KEY: &str = "session/currentCard";
const TOTAL_CARDS_KEY: &str = "session/totalCards";
const HISTORY_KEY: &str = "history/shown";

const SESSION_KEYS: [&str; 6] = [
    DECK_KEY,
    HARD_QUEUE_KEY,
    SHOWN_COUNT_KEY,
    CORRECT_COUNT_KEY,
    CURRENT_CARD_KEY,
    TOTAL_CARDS_KEY,
];

/// Persists scheduler state and the cross-session history
pub struct SessionStorage<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> SessionStorage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // ===== Session state =====

    /// Overwrite the stored session with `state`
    pub fn snapshot(&mut self, state: &SessionState) -> Result<()> {
        self.store
            .set(DECK_KEY, &serde_json::to_string(&state.deck)?)?;
        self.store
            .set(HARD_QUEUE_KEY, &serde_json::to_string(&state.hard_queue)?)?;
        self.store
            .set(SHOWN_COUNT_KEY, &state.shown_count.to_string())?;
        self.store
            .set(CORRECT_COUNT_KEY, &state.correct_count.to_string())?;
        self.store
            .set(TOTAL_CARDS_KEY, &state.total_cards.to_string())?;

        match &state.current_card {
            Some(card) => self
                .store
                .set(CURRENT_CARD_KEY, &serde_json::to_string(card)?)?,
            None => self.store.remove(CURRENT_CARD_KEY)?,
        }
        Ok(())
    }

    /// Load the stored session. `None` when nothing is stored or the stored
    /// JSON cannot be decoded.
    pub fn restore(&self) -> Result<Option<SessionState>> {
        let Some(deck_json) = self.store.get(DECK_KEY)? else {
            return Ok(None);
        };
        let Some(deck) = decode::<VecDeque<Card>>(DECK_KEY, &deck_json) else {
            return Ok(None);
        };

        let hard_queue = match self.store.get(HARD_QUEUE_KEY)? {
            Some(json) => match decode::<Vec<HardEntry>>(HARD_QUEUE_KEY, &json) {
                Some(queue) => queue,
                None => return Ok(None),
            },
            None => Vec::new(),
        };

        let current_card = match self.store.get(CURRENT_CARD_KEY)? {
            Some(json) => match decode::<Card>(CURRENT_CARD_KEY, &json) {
                Some(card) => Some(card),
                None => return Ok(None),
            },
            None => None,
        };

        let state = SessionState {
            deck,
            hard_queue,
            shown_count: self.counter(SHOWN_COUNT_KEY)?,
            correct_count: self.counter(CORRECT_COUNT_KEY)?,
            total_cards: self.counter(TOTAL_CARDS_KEY)?,
            current_card,
        };

        log::info!(
            "Restored session: {} in deck, {} hard, {} shown",
            state.deck.len(),
            state.hard_queue.len(),
            state.shown_count
        );
        Ok(Some(state))
    }

    /// Read a counter; missing or non-numeric values count as 0
    fn counter(&self, key: &str) -> Result<u64> {
        let raw = self.store.get(key)?;
        Ok(raw.as_deref().map(parse_counter).unwrap_or(0))
    }

    // ===== History =====

    /// Every original recorded so far, duplicates included
    pub fn history(&self) -> Result<Vec<String>> {
        match self.store.get(HISTORY_KEY)? {
            Some(json) => Ok(decode(HISTORY_KEY, &json).unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    pub fn record_shown(&mut self, original: &str) -> Result<()> {
        let mut history = self.history()?;
        history.push(original.to_string());
        self.store
            .set(HISTORY_KEY, &serde_json::to_string(&history)?)?;
        Ok(())
    }

    /// Keep the cards whose original has never been shown
    pub fn filter_unseen(&self, cards: Vec<Card>) -> Result<Vec<Card>> {
        let history = self.history()?;
        let seen: HashSet<&str> = history.iter().map(String::as_str).collect();

        let before = cards.len();
        let unseen: Vec<Card> = cards
            .into_iter()
            .filter(|card| !seen.contains(card.original.as_str()))
            .collect();

        log::debug!(
            "History filter kept {} of {} cards",
            unseen.len(),
            before
        );
        Ok(unseen)
    }

    // ===== Reset =====

    /// Delete session state, keeping history
    pub fn reset_session(&mut self) -> Result<()> {
        for key in SESSION_KEYS {
            self.store.remove(key)?;
        }
        Ok(())
    }

    /// Delete session state and history
    pub fn reset(&mut self) -> Result<()> {
        self.reset_session()?;
        self.store.remove(HISTORY_KEY)?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(key: &str, json: &str) -> Option<T> {
    match serde_json::from_str(json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Discarding malformed stored value for {}: {}", key, e);
            None
        }
    }
}

/// Accepts `5`, `"5"` and bare `5` with surrounding whitespace
fn parse_counter(raw: &str) -> u64 {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Ok(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => raw.trim().parse().unwrap_or(0),
    }
}
