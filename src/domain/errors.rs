// ============================================================================
// Exchange Errors
// Error types for order admission, routing and book invariants
// ============================================================================

use std::fmt;

/// Errors surfaced by the matching core.
///
/// Every error is returned to the immediate caller of `submit`; nothing is
/// caught and logged inside the matching loop, so a submission either
/// completes fully or is rejected before any book state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// Order rejected at admission: non-positive quantity or price.
    InvalidOrder { reason: &'static str },
    /// The bounded instrument universe is exhausted.
    TooManyInstruments { limit: usize },
    /// An order with this sequence number is already resting in the queue.
    /// Sequence numbers are globally unique, so this signals a caller bug
    /// in sequence allocation and is fatal for the affected submission.
    DuplicateSequence { sequence: u64 },
    /// Registry configuration failed validation.
    InvalidConfig { reason: String },
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeError::InvalidOrder { reason } => {
                write!(f, "invalid order: {}", reason)
            },
            ExchangeError::TooManyInstruments { limit } => {
                write!(f, "instrument universe exhausted: limit is {}", limit)
            },
            ExchangeError::DuplicateSequence { sequence } => {
                write!(f, "duplicate sequence number {} in book queue", sequence)
            },
            ExchangeError::InvalidConfig { reason } => {
                write!(f, "invalid registry configuration: {}", reason)
            },
        }
    }
}

impl std::error::Error for ExchangeError {}

/// Result type alias for matching-core operations
pub type ExchangeResult<T> = Result<T, ExchangeError>;
