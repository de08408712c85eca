use crate::types::{Condition, Inputs, RpnToken};
use crate::EvalError;

/// Execute a compiled RPN program against one set of inputs.
///
/// A single left-to-right pass over the program with one boolean stack.
/// Operand actions run the moment their token is reached, so both sides of
/// every `&`/`|` are evaluated unconditionally; the operators only combine
/// booleans that already exist.
///
/// Successful compilation guarantees the arity invariants hold; the
/// underflow and leftover checks exist so that a violated invariant surfaces
/// as an error instead of a panic.
pub(crate) fn evaluate(
    rpn: &[RpnToken],
    cond: &Condition,
    inputs: &Inputs,
) -> Result<bool, EvalError> {
    let mut stack: Vec<bool> = Vec::with_capacity(rpn.len());

    for token in rpn {
        match token {
            RpnToken::Operand(name) => {
                let (tag, action) = cond.get(name).ok_or(EvalError::InvariantViolation {
                    detail: "operand missing from condition registry",
                })?;
                let actual = inputs.get(tag).ok_or_else(|| EvalError::MissingInput {
                    operand: name.clone(),
                    tag: tag.to_owned(),
                })?;
                stack.push(action.evaluate(actual));
            }
            RpnToken::Not => {
                let value = pop(&mut stack)?;
                stack.push(!value);
            }
            RpnToken::And => {
                // Right-hand operand was pushed last.
                let rhs = pop(&mut stack)?;
                let lhs = pop(&mut stack)?;
                stack.push(lhs & rhs);
            }
            RpnToken::Or => {
                let rhs = pop(&mut stack)?;
                let lhs = pop(&mut stack)?;
                stack.push(lhs | rhs);
            }
        }
    }

    let result = pop(&mut stack)?;
    if !stack.is_empty() {
        return Err(EvalError::InvariantViolation {
            detail: "operand stack not drained after final token",
        });
    }
    Ok(result)
}

fn pop(stack: &mut Vec<bool>) -> Result<bool, EvalError> {
    stack.pop().ok_or(EvalError::InvariantViolation {
        detail: "operand stack underflow",
    })
}
