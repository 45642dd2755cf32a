//! Session controller
//!
//! Owns the scheduler and its storage. Every operation that changes session
//! state is followed by a snapshot, and every card put on screen is recorded
//! in the history when history filtering is enabled.

use crate::config::Config;
use crate::error::Result;
use crate::session::{
    Advance, AnswerResult, Card, DisplayCard, EasyOutcome, HardOutcome, Scheduler,
    SchedulerOptions, SessionState, SessionStats,
};
use crate::storage::{KeyValueStore, SessionStorage};
use crate::wordlist::LoadError;

pub struct SessionController<S: KeyValueStore> {
    scheduler: Scheduler,
    storage: SessionStorage<S>,
    history_aware: bool,
}

impl<S: KeyValueStore> SessionController<S> {
    /// Resume the stored session, or start a new one from `load()`.
    ///
    /// A resumed session re-presents the card that was on screen; the word
    /// list is only loaded when nothing could be restored.
    pub fn open<F>(config: &Config, storage: SessionStorage<S>, load: F) -> Result<(Self, Advance)>
    where
        F: FnOnce() -> std::result::Result<Vec<Card>, LoadError>,
    {
        let options = config.scheduler_options();
        let scheduler = match storage.restore()? {
            Some(state) => Scheduler::initialize(Vec::new(), Some(state), options)?,
            None => fresh_scheduler(&storage, config.history_aware, options, load)?,
        };

        let mut controller = Self {
            scheduler,
            storage,
            history_aware: config.history_aware,
        };

        let first = match controller.scheduler.current() {
            Some(card) => {
                log::info!("Resuming on '{}'", card.original);
                Advance::Card(card)
            }
            None => controller.next()?,
        };
        Ok((controller, first))
    }

    pub fn state(&self) -> &SessionState {
        self.scheduler.state()
    }

    pub fn current(&self) -> Option<DisplayCard> {
        self.scheduler.current()
    }

    pub fn stats(&self) -> SessionStats {
        self.scheduler.stats()
    }

    pub fn storage(&self) -> &SessionStorage<S> {
        &self.storage
    }

    pub fn into_storage(self) -> SessionStorage<S> {
        self.storage
    }

    /// Show the next card
    pub fn next(&mut self) -> Result<Advance> {
        let advance = self.scheduler.advance();
        if let Advance::Card(card) = &advance {
            if self.history_aware {
                self.storage.record_shown(&card.original)?;
            }
        }
        self.snapshot()?;
        Ok(advance)
    }

    pub fn answer(&mut self, input: &str) -> Result<AnswerResult> {
        let result = self.scheduler.submit_answer(input)?;
        self.snapshot()?;
        Ok(result)
    }

    pub fn mark_hard(&mut self) -> Result<HardOutcome> {
        let outcome = self.scheduler.mark_hard()?;
        self.snapshot()?;
        Ok(outcome)
    }

    pub fn mark_easy(&mut self) -> Result<EasyOutcome> {
        let outcome = self.scheduler.mark_easy()?;
        self.snapshot()?;
        Ok(outcome)
    }

    /// Discard the stored session and start over from `load()`.
    /// History survives unless `forget_history` is set.
    ///
    /// Nothing is deleted unless the new session can be built; on error the
    /// current session and storage are left as they were.
    pub fn reset<F>(&mut self, forget_history: bool, load: F) -> Result<Advance>
    where
        F: FnOnce() -> std::result::Result<Vec<Card>, LoadError>,
    {
        let options = self.scheduler.options();
        let filter_history = self.history_aware && !forget_history;
        let scheduler = fresh_scheduler(&self.storage, filter_history, options, load)?;

        if forget_history {
            self.storage.reset()?;
        } else {
            self.storage.reset_session()?;
        }
        log::info!("Session reset (history cleared: {})", forget_history);

        self.scheduler = scheduler;
        self.next()
    }

    fn snapshot(&mut self) -> Result<()> {
        self.storage.snapshot(self.scheduler.state())?;
        Ok(())
    }
}

fn fresh_scheduler<S, F>(
    storage: &SessionStorage<S>,
    history_aware: bool,
    options: SchedulerOptions,
    load: F,
) -> Result<Scheduler>
where
    S: KeyValueStore,
    F: FnOnce() -> std::result::Result<Vec<Card>, LoadError>,
{
    let mut cards = load()?;
    if history_aware {
        cards = storage.filter_unseen(cards)?;
    }
    Ok(Scheduler::initialize(cards, None, options)?)
}
