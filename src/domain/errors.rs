use crate::domain::wallet::TradeSide;
use thiserror::Error;

/// Everything that can go wrong between the market API and the screen.
///
/// None of these are fatal: callers turn them into a feedback line and keep
/// whatever values were already displayed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TerminalError {
    /// Non-ok HTTP status, `ok: false` payload or an unreadable body.
    #[error("{0}")]
    Fetch(String),
    /// Zero rows where at least one is required.
    #[error("No {0} rows")]
    EmptyData(&'static str),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// User input rejected by the wallet simulator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Enter a valid {side} amount.")]
    InvalidAmount { side: TradeSide },
    #[error("Not enough {asset} for this buy.")]
    InsufficientQuote { asset: String },
    #[error("Not enough {asset} for this sell.")]
    InsufficientBase { asset: String },
}

impl TerminalError {
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }
}

pub type TerminalResult<T> = Result<T, TerminalError>;
