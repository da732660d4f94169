//! Schema subsystem
//!
//! An ordered, declarative description of the fields a caller collects.
//!
//! # Design principles
//!
//! - Construction validates all global invariants and fails fast
//! - Definition order is resolution order; conditions reference earlier
//!   fields only
//! - A built schema is immutable: reuse it across any number of parses,
//!   from any number of threads
//! - Parsing never fails part-way; failures accumulate on the record

mod errors;
mod types;
mod validator;

pub use errors::{SchemaError, SchemaResult};
pub use types::{FieldDescriptor, FieldSpec, FieldType, Schema};
