//! Pure evaluation of condition expressions
//!
//! Evaluation runs against the values resolved from earlier fields. A label
//! with no resolved value (its own condition was false, it was absent, or it
//! failed validation) makes any comparison over it false; evaluation never
//! errors and always terminates.

use std::collections::HashMap;

use crate::value::{timestamp, Scalar, Value};

use super::ast::Expr;

/// Evaluates condition expressions against resolved values
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// True when the expression holds over the resolved values
    pub fn evaluate(expr: &Expr, resolved: &HashMap<String, Value>) -> bool {
        match expr {
            Expr::Eq { label, literal } => resolved
                .get(label)
                .map_or(false, |value| Self::literal_match(value, literal)),
            // An absent value compares false even under "!="
            Expr::Ne { label, literal } => resolved
                .get(label)
                .map_or(false, |value| !Self::literal_match(value, literal)),
            Expr::In { label, literals } => resolved.get(label).map_or(false, |value| {
                literals
                    .iter()
                    .any(|literal| Self::literal_match(value, literal))
            }),
            Expr::And(left, right) => {
                Self::evaluate(left, resolved) && Self::evaluate(right, resolved)
            }
            Expr::Or(left, right) => {
                Self::evaluate(left, resolved) || Self::evaluate(right, resolved)
            }
            Expr::Not(inner) => !Self::evaluate(inner, resolved),
        }
    }

    /// Equality between a resolved value and a literal.
    ///
    /// No cross-kind coercion, except that a timestamp value matches an
    /// integer literal read as epoch seconds or a text literal that itself
    /// parses as a timestamp.
    fn literal_match(value: &Value, literal: &Scalar) -> bool {
        match (value, literal) {
            (Value::Text(text), Scalar::Text(expected)) => text == expected,
            (Value::Timestamp(ts), Scalar::Timestamp(expected)) => ts == expected,
            (Value::Timestamp(ts), Scalar::Int(secs)) => {
                timestamp::from_epoch(*secs).map_or(false, |expected| expected == *ts)
            }
            (Value::Timestamp(ts), Scalar::Text(text)) => {
                timestamp::parse(text).map_or(false, |expected| expected == *ts)
            }
            _ => false,
        }
    }
}
