use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Money-moving operation an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Capture,
    Refund,
}

impl Operation {
    fn verb(self) -> &'static str {
        match self {
            Operation::Capture => "capture",
            Operation::Refund => "refund",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Capture => f.write_str("Capture"),
            Operation::Refund => f.write_str("Refund"),
        }
    }
}

/// Malformed or missing input, detected before any state is touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid CreditCard - No Number provided")]
    MissingNumber,
    #[error("Invalid CreditCard - No Expiry provided")]
    MissingExpiry,
    #[error("Invalid CreditCard - No Cvv provided")]
    MissingCvv,
    #[error("Invalid CreditCard - Cvv is not valid")]
    InvalidCvv,
    #[error("Invalid amount - Amount must not be negative")]
    NegativeAmount,
}

/// Failure reported by (or while waiting for) the card network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettlementError {
    #[error("Capture failure - Unknown Error")]
    CaptureFailed,
    #[error("Refund failure - Unknown Error")]
    RefundFailed,
    #[error("Settlement failure - No response from card network after {0:?}")]
    Timeout(Duration),
}

/// Misuse of an authorization given its current ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("{} failure - Cannot {} on void transaction", .operation, .operation.verb())]
    Voided { operation: Operation },
    #[error("Capture failure - Cannot capture amount that exceeds authorization's availability.")]
    ExceedsAuthorized,
    #[error("Capture failure - Cannot capture more than the remaining amount")]
    ExceedsBalance,
    #[error("Refund failure - Cannot refund more than total captured amount")]
    ExceedsCaptured,
    #[error("Void Failure - Transaction already void")]
    AlreadyVoided,
    #[error("Void Failure - Cannot void transaction with captured amount")]
    HasCaptures,
    #[error("Capture failure - Captured total would overflow")]
    LedgerOverflow,
}

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Settlement(#[from] SettlementError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error("Malformed request - {0}")]
    MalformedRequest(String),
    #[error("Authorization failure - Unknown Error")]
    AuthorizationDeclined,
    #[error("Wrong auth Id: {0}")]
    UnknownAuthorization(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
