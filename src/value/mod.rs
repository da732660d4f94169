//! Raw scalars and coerced values
//!
//! Input arrives as a closed scalar variant rather than a dynamic value, so
//! coercion logic is exhaustive and total. A successful coercion produces one
//! of the two typed representations a schema can store.

pub mod timestamp;

mod types;

pub use types::{Scalar, Value};
