use crate::types::{Category, Token};
use crate::CompileError;

const T: bool = true;
const F: bool = false;

/// Adjacency legality over the seven lexical categories. Row: previous
/// category, column: next category, both ordered by `Category` discriminant
/// (sentinel, `&`, `|`, `!`, `(`, `)`, operand).
///
/// Sentinel and the operators/`(` expect something that produces a value
/// next; `)` and operands expect a binary operator, `)`, or the end.
const LEGAL_NEXT: [[bool; 7]; 7] = [
    //        0  &  |  !  (  )  operand
    /* 0 */ [F, F, F, T, T, F, T],
    /* & */ [F, F, F, T, T, F, T],
    /* | */ [F, F, F, T, T, F, T],
    /* ! */ [F, F, F, T, T, F, T],
    /* ( */ [F, F, F, T, T, F, T],
    /* ) */ [T, T, T, F, F, T, F],
    /* o */ [T, T, T, F, F, T, F],
];

/// Check parenthesis balance with an explicit stack of `(` positions.
pub(crate) fn check_balance(tokens: &[Token<'_>]) -> Result<(), CompileError> {
    let mut opens: Vec<usize> = Vec::new();
    for token in tokens {
        match token.category {
            Category::LParen => opens.push(token.pos),
            Category::RParen => {
                if opens.pop().is_none() {
                    return Err(CompileError::UnmatchedClose { pos: token.pos });
                }
            }
            _ => {}
        }
    }
    // Report the oldest unmatched open, not the most recent.
    match opens.first() {
        Some(&pos) => Err(CompileError::UnmatchedOpen { pos }),
        None => Ok(()),
    }
}

/// Check that every adjacent pair of tokens (with a sentinel at both ends)
/// is legal per [`LEGAL_NEXT`].
pub(crate) fn check_adjacency(tokens: &[Token<'_>]) -> Result<(), CompileError> {
    let Some(last) = tokens.last() else {
        return Err(CompileError::EmptyExpression);
    };

    let mut prev = Category::Sentinel;
    for token in tokens {
        if !LEGAL_NEXT[prev as usize][token.category as usize] {
            return Err(CompileError::MisplacedToken {
                token: token.text.to_owned(),
                pos: token.pos,
            });
        }
        prev = token.category;
    }

    // The trailing sentinel pair has no token of its own; blame the last one.
    if !LEGAL_NEXT[prev as usize][Category::Sentinel as usize] {
        return Err(CompileError::MisplacedToken {
            token: last.text.to_owned(),
            pos: last.pos,
        });
    }

    Ok(())
}
