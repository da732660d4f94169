//! Parsing and per-field validation
//!
//! Fields are processed strictly in definition order: field N's applicability
//! and value may depend on fields 0..N-1, so a parse is sequential by
//! construction. A parse always completes and returns a record, even when
//! every field fails.

use std::collections::{HashMap, HashSet};

use crate::condition::ConditionEvaluator;
use crate::record::{Failure, FailureKind, Record};
use crate::value::{Scalar, Value};

use super::types::{FieldDescriptor, FieldType, Schema};

impl FieldDescriptor {
    /// True when the field participates, given the values resolved so far
    pub fn is_applicable(&self, resolved: &HashMap<String, Value>) -> bool {
        match self.condition() {
            None => true,
            Some(expr) => ConditionEvaluator::evaluate(expr, resolved),
        }
    }

    /// Validates and coerces one raw value for this field.
    ///
    /// This is the single-field primitive interactive front ends drive:
    /// `Ok(Some(value))` is stored, `Ok(None)` means optional-and-absent with
    /// nothing to store, `Err` carries the failure to display. Empty text
    /// counts as absent.
    pub fn validate_value(&self, raw: Option<&Scalar>) -> Result<Option<Value>, Failure> {
        let scalar = match raw {
            Some(scalar) if !scalar.is_empty_text() => scalar,
            _ => {
                if self.required() {
                    return Err(Failure::field(self.label(), FailureKind::Required));
                }
                // Optional and absent: text keeps its empty representation,
                // timestamps stay unset
                return Ok(match self.field_type() {
                    FieldType::Text => Some(Value::Text(String::new())),
                    FieldType::Timestamp => None,
                });
            }
        };

        let value = match self.field_type() {
            FieldType::Text => Value::Text(scalar.to_text()),
            FieldType::Timestamp => match scalar.to_timestamp() {
                Some(ts) => Value::Timestamp(ts),
                None => {
                    return Err(Failure::field(self.label(), FailureKind::InvalidTimestamp))
                }
            },
        };

        // Constraints apply to text values only; the first violation wins
        if let Value::Text(text) = &value {
            if let Some(choices) = self.choices() {
                if !choices.iter().any(|choice| choice == text) {
                    return Err(Failure::field(
                        self.label(),
                        FailureKind::NotAChoice {
                            choices: choices.to_vec(),
                        },
                    ));
                }
            }
            if let Some(pattern) = self.compiled_pattern() {
                if !pattern.is_match(text) {
                    return Err(Failure::field(
                        self.label(),
                        FailureKind::PatternMismatch {
                            pattern: pattern.as_str().to_string(),
                        },
                    ));
                }
            }
        }

        Ok(Some(value))
    }
}

impl Schema {
    /// Parses a raw input mapping into a record.
    ///
    /// Always returns a record; callers branch on `Record::is_valid` rather
    /// than an error path. With `strict`, input keys unknown to the schema or
    /// supplied for fields whose condition failed are reported as aggregate
    /// failures after the per-field ones.
    pub fn parse(&self, input: &HashMap<String, Scalar>, strict: bool) -> Record {
        let mut resolved: HashMap<String, Value> = HashMap::new();
        let mut failures: Vec<Failure> = Vec::new();
        let mut condition_failed: HashSet<&str> = HashSet::new();

        for field in self.fields() {
            if !field.is_applicable(&resolved) {
                tracing::trace!("field \"{}\" skipped: condition false", field.label());
                condition_failed.insert(field.label());
                continue;
            }
            match field.validate_value(input.get(field.label())) {
                Ok(Some(value)) => {
                    resolved.insert(field.label().to_string(), value);
                }
                Ok(None) => {}
                Err(failure) => failures.push(failure),
            }
        }

        if strict {
            let mut unknown: Vec<String> = input
                .keys()
                .filter(|key| !self.contains(key))
                .cloned()
                .collect();
            unknown.sort();
            if !unknown.is_empty() {
                failures.push(Failure::aggregate(FailureKind::UnknownLabels {
                    labels: unknown,
                }));
            }

            let mut inapplicable: Vec<String> = input
                .keys()
                .filter(|key| condition_failed.contains(key.as_str()))
                .cloned()
                .collect();
            inapplicable.sort();
            if !inapplicable.is_empty() {
                failures.push(Failure::aggregate(FailureKind::ConditionFailedLabels {
                    labels: inapplicable,
                }));
            }
        }

        tracing::debug!(
            "parsed {} of {} fields with {} failures",
            resolved.len(),
            self.len(),
            failures.len()
        );
        Record::new(resolved, failures, input.clone())
    }

    /// Fields currently applicable given the values resolved so far, in
    /// definition order.
    ///
    /// Interactive front ends re-run this after each answer: collecting a
    /// value can change which later fields apply.
    pub fn applicable_fields<'a>(
        &'a self,
        resolved: &'a HashMap<String, Value>,
    ) -> impl Iterator<Item = &'a FieldDescriptor> {
        self.fields()
            .iter()
            .filter(move |field| field.is_applicable(resolved))
    }
}
