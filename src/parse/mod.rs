mod lexer;
mod precedence;
mod validate;

pub use precedence::OperandValidator;

use crate::types::RpnToken;
use crate::CompileError;

/// Run the full compilation pipeline: tokenize, check parenthesis balance,
/// check token adjacency, then produce the RPN program.
///
/// Both structural checks run before the precedence pass; the first failure
/// aborts the attempt.
pub(crate) fn compile(
    expr: &str,
    validators: &[&dyn OperandValidator],
) -> Result<Vec<RpnToken>, CompileError> {
    let tokens = lexer::tokenize(expr)?;
    validate::check_balance(&tokens)?;
    validate::check_adjacency(&tokens)?;
    precedence::to_rpn(&tokens, expr.len(), validators)
}
