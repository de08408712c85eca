use thiserror::Error;

/// Errors produced while compiling an expression. Positions are byte offsets
/// into the source text.
///
/// A compilation failure is terminal for that attempt: no partial
/// [`Rule`](crate::Rule) is ever produced.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompileError {
    #[error("empty expression")]
    EmptyExpression,

    #[error("unmatched '(' at position {pos}")]
    UnmatchedOpen { pos: usize },

    #[error("unmatched ')' at position {pos}")]
    UnmatchedClose { pos: usize },

    #[error("misplaced token '{token}' at position {pos}")]
    MisplacedToken { token: String, pos: usize },

    #[error("unknown operand '{name}' at position {pos}: {detail}")]
    UnknownOperand {
        name: String,
        pos: usize,
        detail: String,
    },

    #[error("invalid syntax near position {pos}")]
    InvalidSyntax { pos: usize },
}

/// Errors produced during one evaluation call.
///
/// These abort only the failing call; the [`Rule`](crate::Rule) stays valid
/// and can be re-evaluated with corrected inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("missing tag '{tag}' in inputs (required by operand '{operand}')")]
    MissingInput { operand: String, tag: String },

    /// Defensive guard for arity or registry violations that successful
    /// compilation rules out. Seeing this indicates a bug in the compiler.
    #[error("internal invariant violated: {detail}")]
    InvariantViolation { detail: &'static str },
}
