//! Record and failure types

use std::collections::HashMap;
use std::fmt;

use crate::value::{Scalar, Value};

use super::errors::LookupError;

/// What went wrong for one field, or for the input as a whole
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The field was applicable and required but no value was supplied
    Required,
    /// The raw value could not be coerced into a timestamp
    InvalidTimestamp,
    /// The coerced value is not one of the configured choices
    NotAChoice {
        /// The configured choices
        choices: Vec<String>,
    },
    /// The coerced value does not match the configured pattern
    PatternMismatch {
        /// The configured pattern
        pattern: String,
    },
    /// Strict mode: input keys no field declares
    UnknownLabels {
        /// The offending keys, sorted
        labels: Vec<String>,
    },
    /// Strict mode: input keys supplied for fields whose condition failed
    ConditionFailedLabels {
        /// The offending keys, sorted
        labels: Vec<String>,
    },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Required => write!(f, "This field is required."),
            FailureKind::InvalidTimestamp => write!(f, "Invalid date/time."),
            FailureKind::NotAChoice { choices } => {
                write!(f, "Must be one of the choices: {}.", choices.join(", "))
            }
            FailureKind::PatternMismatch { pattern } => {
                write!(f, "Must match the pattern \"{}\".", pattern)
            }
            FailureKind::UnknownLabels { labels } => {
                write!(f, "Labels \"{}\" not present in schema.", labels.join(", "))
            }
            FailureKind::ConditionFailedLabels { labels } => {
                write!(f, "Labels \"{}\" failed conditions in schema.", labels.join(", "))
            }
        }
    }
}

/// One validation failure collected during a parse.
///
/// A field contributes at most one failure per parse. Strict-mode aggregates
/// carry no label and render as a standalone sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    label: Option<String>,
    kind: FailureKind,
}

impl Failure {
    /// A failure attributed to one field
    pub(crate) fn field(label: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            label: Some(label.into()),
            kind,
        }
    }

    /// A whole-input failure with no single field
    pub(crate) fn aggregate(kind: FailureKind) -> Self {
        Self { label: None, kind }
    }

    /// The field the failure belongs to, when it has one
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The failure classification
    pub fn kind(&self) -> &FailureKind {
        &self.kind
    }

    /// The message without the label prefix
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{}: {}", label, self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// The immutable result of one parse
#[derive(Debug, Clone)]
pub struct Record {
    values: HashMap<String, Value>,
    failures: Vec<Failure>,
    raw: HashMap<String, Scalar>,
}

impl Record {
    pub(crate) fn new(
        values: HashMap<String, Value>,
        failures: Vec<Failure>,
        raw: HashMap<String, Scalar>,
    ) -> Self {
        Self {
            values,
            failures,
            raw,
        }
    }

    /// Looks up a resolved value by label.
    ///
    /// Fails when the label was never resolved: the field was inapplicable,
    /// absent without a stored representation, or failed validation.
    pub fn value(&self, label: &str) -> Result<&Value, LookupError> {
        self.values.get(label).ok_or_else(|| LookupError {
            label: label.to_string(),
        })
    }

    /// Looks up a resolved value, `None` when the label was never resolved
    pub fn get(&self, label: &str) -> Option<&Value> {
        self.values.get(label)
    }

    /// All resolved values
    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    /// Validation failures in field order, strict-mode aggregates last
    pub fn errors(&self) -> &[Failure] {
        &self.failures
    }

    /// True when parsing produced no failures
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// The raw input the record was parsed from
    pub fn raw(&self) -> &HashMap<String, Scalar> {
        &self.raw
    }
}
