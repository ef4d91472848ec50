use thiserror::Error;

/// Errors raised on the user-drafted path.
///
/// Normalization and balance computation never raise: malformed stored data
/// degrades to empty defaults instead, since historical records may be
/// inconsistent.
#[derive(Error, Debug, PartialEq)]
pub enum EngineError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    #[error("split group is empty")]
    EmptySplit,
}
