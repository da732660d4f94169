//! Field and schema definitions
//!
//! A schema is an ordered sequence of field descriptors. Order is
//! semantically significant: it is the resolution order for conditions and
//! the collection order for interactive front ends. Construction validates
//! the global invariants and fails fast; a schema that built successfully is
//! immutable and safe to share across threads.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::condition::Expr;

use super::errors::{SchemaError, SchemaResult};

/// Supported coercion targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Plain text, stored unchanged
    Text,
    /// Calendar timestamp, parsed from date/time strings or epoch seconds
    Timestamp,
}

impl FieldType {
    /// Returns the type name used in field specifications
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Timestamp => "timestamp",
        }
    }

    /// Looks up a declared type name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(FieldType::Text),
            "timestamp" => Some(FieldType::Timestamp),
            _ => None,
        }
    }
}

/// One field-specification record, as accepted at schema construction.
///
/// Every key except `label` is optional; defaults are resolved when the
/// schema is built. Unknown keys fail deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldSpec {
    /// Unique field identifier and output key
    pub label: String,
    /// Display name; a humanized form of the label when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Coercion target; "text" when absent
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Presence requirement; true when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Allowed literal values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    /// Pattern the coerced text value must match
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<String>,
    /// Applicability predicate in the [operator, operand, operand] syntax
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Json>,
    /// UI hint: collect multi-line input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiline: Option<bool>,
    /// UI hint: help text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl FieldSpec {
    /// Create a specification with only a label; everything else defaults
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set the display name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the declared type name
    pub fn field_type(mut self, type_name: impl Into<String>) -> Self {
        self.field_type = Some(type_name.into());
        self
    }

    /// Set the presence requirement
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Set the allowed values
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// Set the pattern constraint
    pub fn matches(mut self, pattern: impl Into<String>) -> Self {
        self.matches = Some(pattern.into());
        self
    }

    /// Set the applicability condition, in the literal syntax
    pub fn condition(mut self, condition: Json) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Mark the field as multi-line for interactive front ends
    pub fn multiline(mut self, multiline: bool) -> Self {
        self.multiline = Some(multiline);
        self
    }

    /// Set the help text shown by interactive front ends
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Immutable definition of one schema entry
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    label: String,
    name: String,
    field_type: FieldType,
    required: bool,
    choices: Option<Vec<String>>,
    pattern: Option<Regex>,
    condition: Option<Expr>,
    multiline: bool,
    help: Option<String>,
}

impl FieldDescriptor {
    /// Builds a descriptor from a specification.
    ///
    /// `declared` holds the labels of all earlier fields, for the
    /// earlier-label-only condition check.
    fn from_spec(spec: FieldSpec, index: usize, declared: &HashSet<String>) -> SchemaResult<Self> {
        if spec.label.is_empty() {
            return Err(SchemaError::EmptyLabel { index });
        }

        let field_type = match &spec.field_type {
            None => FieldType::Text,
            Some(name) => {
                FieldType::from_name(name).ok_or_else(|| SchemaError::UnknownType {
                    label: spec.label.clone(),
                    type_name: name.clone(),
                })?
            }
        };

        let condition = match &spec.condition {
            None => None,
            Some(literal) => {
                let expr =
                    Expr::from_value(literal).map_err(|source| SchemaError::MalformedCondition {
                        label: spec.label.clone(),
                        source,
                    })?;
                for referenced in expr.labels() {
                    if !declared.contains(referenced) {
                        return Err(SchemaError::UndeclaredConditionLabel {
                            label: spec.label.clone(),
                            referenced: referenced.to_string(),
                        });
                    }
                }
                Some(expr)
            }
        };

        if let Some(choices) = &spec.choices {
            if choices.is_empty() {
                return Err(SchemaError::EmptyChoices {
                    label: spec.label.clone(),
                });
            }
            let mut seen = HashSet::new();
            for choice in choices {
                if !seen.insert(choice.as_str()) {
                    return Err(SchemaError::DuplicateChoice {
                        label: spec.label.clone(),
                        choice: choice.clone(),
                    });
                }
            }
        }

        let pattern = match &spec.matches {
            None => None,
            Some(pattern) => {
                Some(
                    Regex::new(pattern).map_err(|source| SchemaError::InvalidPattern {
                        label: spec.label.clone(),
                        source,
                    })?,
                )
            }
        };

        let name = spec.name.clone().unwrap_or_else(|| humanize(&spec.label));

        Ok(Self {
            label: spec.label,
            name,
            field_type,
            required: spec.required.unwrap_or(true),
            choices: spec.choices,
            pattern,
            condition,
            multiline: spec.multiline.unwrap_or(false),
            help: spec.help,
        })
    }

    /// Unique field identifier and output key
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Display name for prompts
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coercion target
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Whether a value must be present when the field is applicable
    pub fn required(&self) -> bool {
        self.required
    }

    /// Allowed values, when constrained
    pub fn choices(&self) -> Option<&[String]> {
        self.choices.as_deref()
    }

    /// Pattern constraint, when declared
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    /// Compiled pattern for constraint checks
    pub(super) fn compiled_pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }

    /// Applicability condition, when declared
    pub fn condition(&self) -> Option<&Expr> {
        self.condition.as_ref()
    }

    /// UI hint: whether front ends should collect multi-line input
    pub fn multiline(&self) -> bool {
        self.multiline
    }

    /// UI hint: help text, forwarded verbatim
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Prompt line for interactive front ends
    pub fn prompt_text(&self) -> String {
        if self.multiline {
            format!("{}: \n> ", self.name)
        } else {
            format!("{}: ", self.name)
        }
    }

    /// One-line help summary for interactive front ends
    pub fn help_text(&self) -> String {
        let mut text = String::new();
        if let Some(help) = &self.help {
            text.push_str(help);
            text.push(' ');
        }
        if !self.required {
            text.push_str("Optional. ");
        }
        if let Some(choices) = &self.choices {
            text.push_str(&format!("Choices: {}. ", choices.join(", ")));
        } else if let Some(pattern) = &self.pattern {
            text.push_str(&format!("Matches: {}. ", pattern.as_str()));
        }
        text.trim_end().to_string()
    }
}

/// An immutable, ordered sequence of field descriptors
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
    by_label: HashMap<String, usize>,
}

impl Schema {
    /// Builds a schema from an ordered sequence of field specifications.
    ///
    /// Fails fast on the first invariant violation. Construction performs no
    /// coercion and evaluates no condition; those happen only during parse.
    pub fn new(specs: Vec<FieldSpec>) -> SchemaResult<Self> {
        let mut fields = Vec::with_capacity(specs.len());
        let mut by_label = HashMap::with_capacity(specs.len());
        let mut declared = HashSet::new();

        for (index, spec) in specs.into_iter().enumerate() {
            if declared.contains(&spec.label) {
                return Err(SchemaError::DuplicateLabel { label: spec.label });
            }
            let descriptor = FieldDescriptor::from_spec(spec, index, &declared)?;
            declared.insert(descriptor.label().to_string());
            by_label.insert(descriptor.label().to_string(), fields.len());
            fields.push(descriptor);
        }

        tracing::debug!("schema constructed with {} fields", fields.len());
        Ok(Self { fields, by_label })
    }

    /// Builds a schema from a JSON sequence of field-specification records
    pub fn from_value(value: Json) -> SchemaResult<Self> {
        let specs: Vec<FieldSpec> = serde_json::from_value(value)
            .map_err(|err| SchemaError::MalformedSpec {
                reason: err.to_string(),
            })?;
        Self::new(specs)
    }

    /// Builds a schema from a JSON document
    pub fn from_json(document: &str) -> SchemaResult<Self> {
        let specs: Vec<FieldSpec> = serde_json::from_str(document)
            .map_err(|err| SchemaError::MalformedSpec {
                reason: err.to_string(),
            })?;
        Self::new(specs)
    }

    /// Field descriptors in definition order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a field by label
    pub fn field(&self, label: &str) -> Option<&FieldDescriptor> {
        self.by_label.get(label).map(|&index| &self.fields[index])
    }

    /// True when the label is declared
    pub fn contains(&self, label: &str) -> bool {
        self.by_label.contains_key(label)
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the schema declares no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Humanizes a label into a display name ("zip_code" becomes "Zip Code")
fn humanize(label: &str) -> String {
    label
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
