//! Condition expression trees
//!
//! The literal syntax accepted inside schema documents is a JSON sequence
//! `[operator, operand, operand]` with operator one of `==`, `!=`, `in`,
//! `and`, `or`, `not`. Comparison and membership operators take a label and a
//! literal (or sequence of literals); `and`/`or` take two nested expressions;
//! `not` takes one.

use serde_json::Value as Json;

use crate::value::Scalar;

use super::errors::ExprError;

/// A condition expression node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// The value under `label` equals the literal
    Eq {
        /// Referenced label, declared earlier in the schema
        label: String,
        /// Literal to compare against
        literal: Scalar,
    },
    /// The value under `label` differs from the literal
    Ne {
        /// Referenced label, declared earlier in the schema
        label: String,
        /// Literal to compare against
        literal: Scalar,
    },
    /// The value under `label` is a member of the literal set
    In {
        /// Referenced label, declared earlier in the schema
        label: String,
        /// Literals to match against
        literals: Vec<Scalar>,
    },
    /// Both sub-expressions hold
    And(Box<Expr>, Box<Expr>),
    /// Either sub-expression holds
    Or(Box<Expr>, Box<Expr>),
    /// The sub-expression does not hold
    Not(Box<Expr>),
}

impl Expr {
    /// Create an equality comparison
    pub fn eq(label: impl Into<String>, literal: impl Into<Scalar>) -> Self {
        Expr::Eq {
            label: label.into(),
            literal: literal.into(),
        }
    }

    /// Create an inequality comparison
    pub fn ne(label: impl Into<String>, literal: impl Into<Scalar>) -> Self {
        Expr::Ne {
            label: label.into(),
            literal: literal.into(),
        }
    }

    /// Create a membership test
    pub fn is_in<I, S>(label: impl Into<String>, literals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        Expr::In {
            label: label.into(),
            literals: literals.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a conjunction
    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    /// Create a disjunction
    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    /// Create a negation
    pub fn not(inner: Expr) -> Self {
        Expr::Not(Box::new(inner))
    }

    /// Labels referenced anywhere in the tree
    pub fn labels(&self) -> Vec<&str> {
        let mut labels = Vec::new();
        self.collect_labels(&mut labels);
        labels
    }

    fn collect_labels<'a>(&'a self, into: &mut Vec<&'a str>) {
        match self {
            Expr::Eq { label, .. } | Expr::Ne { label, .. } | Expr::In { label, .. } => {
                into.push(label)
            }
            Expr::And(left, right) | Expr::Or(left, right) => {
                left.collect_labels(into);
                right.collect_labels(into);
            }
            Expr::Not(inner) => inner.collect_labels(into),
        }
    }

    /// Reads the literal syntax into an expression tree
    pub fn from_value(value: &Json) -> Result<Expr, ExprError> {
        let items = value.as_array().ok_or_else(|| ExprError::NotASequence {
            found: json_kind(value).to_string(),
        })?;
        let operator = items
            .first()
            .and_then(Json::as_str)
            .ok_or(ExprError::MissingOperator)?;

        match operator {
            "==" | "!=" => {
                expect_operands(operator, items.len(), 2)?;
                let label = operand_label(operator, &items[1])?;
                let literal = parse_literal(&items[2])?;
                Ok(if operator == "==" {
                    Expr::Eq { label, literal }
                } else {
                    Expr::Ne { label, literal }
                })
            }
            "in" => {
                expect_operands(operator, items.len(), 2)?;
                let label = operand_label(operator, &items[1])?;
                let set = items[2].as_array().ok_or_else(|| ExprError::BadSet {
                    found: json_kind(&items[2]).to_string(),
                })?;
                if set.is_empty() {
                    return Err(ExprError::EmptySet);
                }
                let literals = set.iter().map(parse_literal).collect::<Result<Vec<_>, _>>()?;
                Ok(Expr::In { label, literals })
            }
            "and" | "or" => {
                expect_operands(operator, items.len(), 2)?;
                let left = Expr::from_value(&items[1])?;
                let right = Expr::from_value(&items[2])?;
                Ok(if operator == "and" {
                    Expr::and(left, right)
                } else {
                    Expr::or(left, right)
                })
            }
            "not" => {
                expect_operands(operator, items.len(), 1)?;
                Ok(Expr::not(Expr::from_value(&items[1])?))
            }
            other => Err(ExprError::UnknownOperator {
                operator: other.to_string(),
            }),
        }
    }
}

fn expect_operands(operator: &str, sequence_len: usize, expected: usize) -> Result<(), ExprError> {
    let found = sequence_len.saturating_sub(1);
    if found != expected {
        return Err(ExprError::WrongArity {
            operator: operator.to_string(),
            expected,
            found,
        });
    }
    Ok(())
}

fn operand_label(operator: &str, operand: &Json) -> Result<String, ExprError> {
    operand
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ExprError::BadLabel {
            operator: operator.to_string(),
        })
}

fn parse_literal(value: &Json) -> Result<Scalar, ExprError> {
    match value {
        Json::String(text) => Ok(Scalar::Text(text.clone())),
        Json::Number(number) => match number.as_i64() {
            Some(int) => Ok(Scalar::Int(int)),
            None => Err(ExprError::BadLiteral {
                found: "non-integer number".to_string(),
            }),
        },
        other => Err(ExprError::BadLiteral {
            found: json_kind(other).to_string(),
        }),
    }
}

/// Returns the JSON kind name for error messages
fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
