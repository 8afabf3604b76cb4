//! Error types for slot generation and calendar operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    /// An argument had an invalid shape or violated a value invariant
    /// (e.g. a slot ending before it starts).
    #[error("Usage error: {0}")]
    Usage(String),

    /// The event to remove is not part of the calendar.
    #[error("Not found: {0}")]
    NotFound(String),

    /// `duration + gap` rounded down to zero or fewer whole minutes.
    #[error("Degenerate interval: step of {minutes} minutes")]
    DegenerateInterval { minutes: i64 },

    /// The recurrence engine rejected the generated rule.
    #[error("Recurrence error: {0}")]
    Recurrence(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SlotError>;
