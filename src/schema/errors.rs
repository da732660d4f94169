//! Schema construction errors
//!
//! All of these are programmer errors in the schema definition itself. They
//! are raised once at construction, and a schema that failed to build must
//! never be used. Parse-time validation failures are data on the record, not
//! errors (see the record module).

use thiserror::Error;

use crate::condition::ExprError;

/// Result type for schema construction
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors found while building a schema from field specifications
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A field specification without a label
    #[error("field specification at position {index} has an empty label")]
    EmptyLabel {
        /// Position of the offending specification
        index: usize,
    },

    /// Two field specifications share a label
    #[error("multiple declarations for label \"{label}\"")]
    DuplicateLabel {
        /// The repeated label
        label: String,
    },

    /// The declared type is not a supported one
    #[error("unsupported type \"{type_name}\" for field \"{label}\"")]
    UnknownType {
        /// Field the type was declared on
        label: String,
        /// The unsupported type name
        type_name: String,
    },

    /// A condition references a label that is not declared earlier
    #[error(
        "invalid label \"{referenced}\" in condition for \"{label}\"; conditions \
         can only reference labels declared in earlier fields"
    )]
    UndeclaredConditionLabel {
        /// Field the condition was declared on
        label: String,
        /// The label the condition references
        referenced: String,
    },

    /// A condition literal that does not follow the expression syntax
    #[error("malformed condition for field \"{label}\": {source}")]
    MalformedCondition {
        /// Field the condition was declared on
        label: String,
        /// The underlying expression error
        source: ExprError,
    },

    /// A choices list with nothing to choose from
    #[error("field \"{label}\" declares an empty choices list")]
    EmptyChoices {
        /// Field the choices were declared on
        label: String,
    },

    /// A choices list that repeats a value
    #[error("field \"{label}\" repeats the choice \"{choice}\"")]
    DuplicateChoice {
        /// Field the choices were declared on
        label: String,
        /// The repeated choice
        choice: String,
    },

    /// A matches pattern that does not compile
    #[error("invalid pattern for field \"{label}\": {source}")]
    InvalidPattern {
        /// Field the pattern was declared on
        label: String,
        /// The underlying regex error
        source: regex::Error,
    },

    /// A field-specification document that does not deserialize
    #[error("malformed field specification: {reason}")]
    MalformedSpec {
        /// What the deserializer rejected
        reason: String,
    },
}
