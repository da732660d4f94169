//! Condition expression errors

use thiserror::Error;

/// Errors found while reading a condition expression literal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    /// The expression literal is not a sequence
    #[error("expected an [operator, operand, operand] sequence, got {found}")]
    NotASequence {
        /// Kind of value found instead
        found: String,
    },

    /// The sequence is empty or its first element is not an operator name
    #[error("missing operator element")]
    MissingOperator,

    /// The operator is not part of the closed set
    #[error("unknown operator \"{operator}\"")]
    UnknownOperator {
        /// The operator that was supplied
        operator: String,
    },

    /// The operator got the wrong number of operands
    #[error("operator \"{operator}\" takes {expected} operand(s), got {found}")]
    WrongArity {
        /// The operator in question
        operator: String,
        /// Operand count the operator requires
        expected: usize,
        /// Operand count that was supplied
        found: usize,
    },

    /// A comparison or membership operator without a label operand
    #[error("operator \"{operator}\" expects a label as its first operand")]
    BadLabel {
        /// The operator in question
        operator: String,
    },

    /// A literal operand outside the supported scalar kinds
    #[error("unsupported literal ({found}); only text and integer literals are allowed")]
    BadLiteral {
        /// Kind of value found instead
        found: String,
    },

    /// The membership operand is not a sequence of literals
    #[error("\"in\" expects a sequence of literals, got {found}")]
    BadSet {
        /// Kind of value found instead
        found: String,
    },

    /// A membership test with nothing to match
    #[error("\"in\" requires a non-empty sequence of literals")]
    EmptySet,
}
