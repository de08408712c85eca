use crate::types::{Category, RpnToken, Token};
use crate::CompileError;

/// A caller-supplied check applied to every operand name met during
/// compilation. Rejection aborts the compile with
/// [`CompileError::UnknownOperand`] carrying the returned detail.
///
/// Any `Fn(&str) -> Result<(), String>` closure qualifies.
pub trait OperandValidator {
    fn validate(&self, name: &str) -> Result<(), String>;
}

impl<F> OperandValidator for F
where
    F: Fn(&str) -> Result<(), String>,
{
    fn validate(&self, name: &str) -> Result<(), String> {
        self(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    /// Incoming operator binds tighter or opens scope: push it, advance.
    Push,
    /// Stack top binds at least as tight: pop it to the output, re-examine
    /// the same incoming token against the new top.
    Reduce,
    /// Incoming `)` closes the top `(`, or the trailing sentinel closes the
    /// bottom sentinel: discard both, advance.
    Match,
    /// Unreachable after adjacency validation; kept as a defensive fence.
    Undefined,
}

use Relation::{Match, Push, Reduce, Undefined};

/// Operator-precedence relation over the six non-operand categories.
/// Row: stack top, column: incoming token, ordered by `Category`
/// discriminant (sentinel, `&`, `|`, `!`, `(`, `)`).
///
/// `&` and `|` share one precedence level and associate left; `!` binds
/// tighter than both. `)` is never pushed, so its row stays undefined.
const RELATION: [[Relation; 6]; 6] = [
    //            0       &      |      !     (      )
    /* 0 */ [Match, Push, Push, Push, Push, Undefined],
    /* & */ [Reduce, Reduce, Reduce, Push, Push, Reduce],
    /* | */ [Reduce, Reduce, Reduce, Push, Push, Reduce],
    /* ! */ [Reduce, Reduce, Reduce, Push, Push, Reduce],
    /* ( */ [Undefined, Push, Push, Push, Push, Match],
    /* ) */ [Undefined; 6],
];

/// Shift/reduce the validated token stream into an RPN program.
///
/// Operands bypass the relation table: each is run through every validator
/// and appended straight to the output. The loop terminates when the final
/// sentinel MATCH drains the stack. `end` is the byte length of the source,
/// used as the trailing sentinel's position.
pub(crate) fn to_rpn(
    tokens: &[Token<'_>],
    end: usize,
    validators: &[&dyn OperandValidator],
) -> Result<Vec<RpnToken>, CompileError> {
    let mut stack: Vec<Category> = vec![Category::Sentinel];
    let mut output: Vec<RpnToken> = Vec::with_capacity(tokens.len());
    let mut next = 0;

    while let Some(&top) = stack.last() {
        let (category, text, pos) = match tokens.get(next) {
            Some(token) => (token.category, token.text, token.pos),
            None => (Category::Sentinel, "", end),
        };

        if category == Category::Operand {
            for validator in validators {
                validator
                    .validate(text)
                    .map_err(|detail| CompileError::UnknownOperand {
                        name: text.to_owned(),
                        pos,
                        detail,
                    })?;
            }
            output.push(RpnToken::Operand(text.to_owned()));
            next += 1;
            continue;
        }

        match RELATION[top as usize][category as usize] {
            Push => {
                stack.push(category);
                next += 1;
            }
            Reduce => {
                // Only &, |, ! ever resolve to Reduce as stack top.
                let reduced = match stack.pop() {
                    Some(Category::And) => RpnToken::And,
                    Some(Category::Or) => RpnToken::Or,
                    Some(Category::Not) => RpnToken::Not,
                    _ => return Err(CompileError::InvalidSyntax { pos }),
                };
                output.push(reduced);
            }
            Match => {
                stack.pop();
                next += 1;
            }
            Undefined => return Err(CompileError::InvalidSyntax { pos }),
        }
    }

    Ok(output)
}
