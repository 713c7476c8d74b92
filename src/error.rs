use thiserror::Error;

/// Failure kinds of a fit. Every failure is fatal for the call; running out of
/// rounds is not an error and is reported through `BtFit::converged`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BtError {
    /// Malformed matrix encoding or out-of-range hyperparameters.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A quantity that must stay positive and finite did not.
    #[error("numerical failure: {0}")]
    NumericalFailure(String),
}

pub type Result<T> = std::result::Result<T, BtError>;

macro_rules! invalid {
    ($($arg:tt)*) => {
        return Err($crate::error::BtError::InvalidArgument(format!($($arg)*)))
    };
}

macro_rules! numerical {
    ($($arg:tt)*) => {
        return Err($crate::error::BtError::NumericalFailure(format!($($arg)*)))
    };
}

pub(crate) use invalid;
pub(crate) use numerical;
