use thiserror::Error;

/// Error type that captures every failure class the ledger core can surface.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed currency, date, or identifier text.
    #[error("format error: {0}")]
    Format(String),
    /// A log block whose action/kind header is not recognized.
    #[error("unknown directive `{0}`")]
    UnknownDirective(String),
    /// A payload that fails an entity-level invariant.
    #[error("validation failed: {0}")]
    Validation(String),
    /// A reference to a missing or already-deleted entity.
    #[error("unknown reference: {0}")]
    Reference(String),
    /// Replay aborted; `position` is the 1-based ordinal of the offending
    /// directive. Fatal at start-up: the store holds partial state.
    #[error("replay halted at directive {position}: {source}")]
    Replay {
        position: usize,
        #[source]
        source: Box<LedgerError>,
    },
    /// The journal append failed after the store commit succeeded. Fatal:
    /// the store and the log no longer agree.
    #[error("store and journal diverged: {0}")]
    Divergence(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    /// Wraps an error with the directive position it occurred at.
    pub fn at_position(self, position: usize) -> Self {
        LedgerError::Replay {
            position,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
