//! Flashcard session core
//!
//! This module provides:
//! - Card, hard queue and session state models
//! - The scheduler deciding which card comes next

pub mod models;
pub mod scheduler;

pub use models::*;
pub use scheduler::{Scheduler, SchedulerOptions, SessionError};
