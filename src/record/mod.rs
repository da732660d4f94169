//! Parsed records
//!
//! A record is the immutable output of one parse: the resolved values, the
//! ordered list of validation failures, and the raw input it was parsed
//! from. Parsing always completes; callers branch on `Record::is_valid`
//! instead of catching errors.

mod errors;
mod types;

pub use errors::LookupError;
pub use types::{Failure, FailureKind, Record};
