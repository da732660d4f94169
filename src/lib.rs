//! intake - A strict, schema-driven validator and coercer for structured input
//!
//! A schema is an ordered sequence of field definitions, built once and
//! reused for many parses. `Schema::parse` walks a raw input mapping field by
//! field (conditions, presence, coercion, constraints) and returns a typed
//! record together with a structured error report; it never fails part-way.
//! Callers that collect input interactively drive the same engine one field
//! at a time through the applicability iterator and the single-field
//! primitive.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use intake::schema::{FieldSpec, Schema};
//! use intake::value::Scalar;
//!
//! let schema = Schema::new(vec![
//!     FieldSpec::new("name"),
//!     FieldSpec::new("dob").field_type("timestamp").required(false),
//! ])
//! .unwrap();
//!
//! let mut input = HashMap::new();
//! input.insert("name".to_string(), Scalar::from("Ada"));
//!
//! let record = schema.parse(&input, false);
//! assert!(record.is_valid());
//! assert_eq!(record.value("name").unwrap().as_text(), Some("Ada"));
//! ```

pub mod condition;
pub mod record;
pub mod schema;
pub mod value;
