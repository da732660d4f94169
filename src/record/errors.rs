//! Record lookup errors

use thiserror::Error;

/// Raised when reading a label that was never resolved.
///
/// Distinct from a validation failure: the caller asked for data that was
/// never collected, because the field was inapplicable, absent without a
/// stored representation, or failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no value for label \"{label}\"")]
pub struct LookupError {
    /// The label that was looked up
    pub label: String,
}
