//! Session scheduler
//!
//! Decides which card is shown next. Cards marked hard wait in the hard
//! queue until the shown counter reaches their target, then rejoin the back
//! of the deck. The session ends the first time a card is requested while
//! the deck is empty.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::*;

/// Default number of new cards between marking a card hard and seeing it again
pub const DEFAULT_HARD_OFFSET: u64 = 10;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("No cards to study")]
    EmptyInput,

    #[error("No card is being shown")]
    NoCurrentCard,
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Tunables for the hard queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerOptions {
    pub hard_offset: u64,
    /// Keep at most one hard entry per card
    pub dedupe_hard: bool,
    /// Flush the hard queue into the deck instead of ending the session
    pub drain_hard_queue: bool,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            hard_offset: DEFAULT_HARD_OFFSET,
            dedupe_hard: true,
            drain_hard_queue: false,
        }
    }
}

pub struct Scheduler {
    state: SessionState,
    options: SchedulerOptions,
}

impl Scheduler {
    /// Start a session, shuffling `cards` with the thread RNG unless a
    /// restored state is given.
    pub fn initialize(
        cards: Vec<Card>,
        restored: Option<SessionState>,
        options: SchedulerOptions,
    ) -> Result<Self> {
        Self::initialize_with_rng(cards, restored, options, &mut rand::thread_rng())
    }

    pub fn initialize_with_rng<R: Rng + ?Sized>(
        mut cards: Vec<Card>,
        restored: Option<SessionState>,
        options: SchedulerOptions,
        rng: &mut R,
    ) -> Result<Self> {
        let state = match restored {
            Some(mut state) => {
                if state.total_cards == 0 {
                    state.total_cards = (state.deck.len() + state.hard_queue.len()) as u64;
                }
                state
            }
            None => {
                shuffle(&mut cards, rng);
                if cards.is_empty() {
                    return Err(SessionError::EmptyInput);
                }
                SessionState::new(cards)
            }
        };

        log::debug!(
            "Session initialized: {} cards in deck, {} hard",
            state.deck.len(),
            state.hard_queue.len()
        );

        Ok(Self { state, options })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn into_state(self) -> SessionState {
        self.state
    }

    pub fn options(&self) -> SchedulerOptions {
        self.options
    }

    pub fn current(&self) -> Option<DisplayCard> {
        self.state.current_card.as_ref().map(DisplayCard::from)
    }

    pub fn stats(&self) -> SessionStats {
        self.state.stats()
    }

    /// Move to the next card. Must run exactly once per "next" request.
    pub fn advance(&mut self) -> Advance {
        self.requeue_eligible();

        if self.state.deck.is_empty() && self.options.drain_hard_queue {
            let drained = std::mem::take(&mut self.state.hard_queue);
            if !drained.is_empty() {
                log::debug!("Draining {} hard cards into an empty deck", drained.len());
            }
            self.state.deck.extend(drained.into_iter().map(|entry| entry.card));
        }

        let Some(card) = self.state.deck.pop_front() else {
            self.state.current_card = None;
            log::info!(
                "Session complete: {}/{} correct, {} hard cards dropped",
                self.state.correct_count,
                self.state.total_cards,
                self.state.hard_queue.len()
            );
            return Advance::Complete(SessionComplete {
                correct_count: self.state.correct_count,
                total_cards: self.state.total_cards,
            });
        };

        self.state.shown_count += 1;
        let display = DisplayCard::from(&card);
        self.state.current_card = Some(card);
        Advance::Card(display)
    }

    /// Move every hard entry whose target has been reached to the back of
    /// the deck, keeping queue order.
    fn requeue_eligible(&mut self) {
        let shown = self.state.shown_count;
        let (eligible, remaining): (Vec<HardEntry>, Vec<HardEntry>) = self
            .state
            .hard_queue
            .drain(..)
            .partition(|entry| entry.is_eligible(shown));

        self.state.hard_queue = remaining;
        for entry in eligible {
            log::debug!("Hard card '{}' rejoins the deck", entry.card.original);
            self.state.deck.push_back(entry.card);
        }
    }

    /// Check an answer against the current card. Retries are unlimited.
    pub fn submit_answer(&mut self, raw_input: &str) -> Result<AnswerResult> {
        let card = self
            .state
            .current_card
            .as_ref()
            .ok_or(SessionError::NoCurrentCard)?;

        if normalize_answer(raw_input) == normalize_answer(&card.translated) {
            self.state.correct_count += 1;
            Ok(AnswerResult::Correct)
        } else {
            Ok(AnswerResult::Incorrect)
        }
    }

    /// Defer the current card. Does not advance.
    pub fn mark_hard(&mut self) -> Result<HardOutcome> {
        let card = self
            .state
            .current_card
            .as_ref()
            .ok_or(SessionError::NoCurrentCard)?;

        if self.options.dedupe_hard {
            if let Some(existing) = self.state.hard_queue.iter().find(|e| &e.card == card) {
                return Ok(HardOutcome::AlreadyQueued {
                    target: existing.target_count,
                });
            }
        }

        let target = self.state.shown_count + self.options.hard_offset;
        self.state.hard_queue.push(HardEntry {
            card: card.clone(),
            target_count: target,
        });
        Ok(HardOutcome::Queued { target })
    }

    /// Drop the first hard entry matching the current card, if any
    pub fn mark_easy(&mut self) -> Result<EasyOutcome> {
        let card = self
            .state
            .current_card
            .as_ref()
            .ok_or(SessionError::NoCurrentCard)?;

        match self.state.hard_queue.iter().position(|e| &e.card == card) {
            Some(pos) => {
                self.state.hard_queue.remove(pos);
                Ok(EasyOutcome::RemovedFromHard)
            }
            None => Ok(EasyOutcome::MarkedEasyNoop),
        }
    }
}

/// Uniform Fisher-Yates shuffle in place
pub fn shuffle<T, R: Rng + ?Sized>(cards: &mut [T], rng: &mut R) {
    cards.shuffle(rng);
}

/// Trim surrounding whitespace and lowercase
pub fn normalize_answer(input: &str) -> String {
    input.trim().to_lowercase()
}
