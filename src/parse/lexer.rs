use winnow::combinator::{alt, preceded, repeat, terminated};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::stream::LocatingSlice;
use winnow::token::take_while;

use crate::types::{Category, Token};
use crate::CompileError;

type Input<'i> = LocatingSlice<&'i str>;

// Unicode whitespace, not just ASCII.
fn ws(input: &mut Input<'_>) -> ModalResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

fn operator(input: &mut Input<'_>) -> ModalResult<Category> {
    alt((
        '&'.value(Category::And),
        '|'.value(Category::Or),
        '!'.value(Category::Not),
        '('.value(Category::LParen),
        ')'.value(Category::RParen),
    ))
    .parse_next(input)
}

fn operator_token<'i>(input: &mut Input<'i>) -> ModalResult<Token<'i>> {
    operator
        .with_taken()
        .with_span()
        .map(|((category, text), span)| Token {
            category,
            text,
            pos: span.start,
        })
        .parse_next(input)
}

/// An operand is a maximal run of code points not interrupted by whitespace
/// or a single-character operator/parenthesis.
fn operand_token<'i>(input: &mut Input<'i>) -> ModalResult<Token<'i>> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && Category::of_char(c).is_none()
    })
    .with_span()
    .map(|(text, span)| Token {
        category: Category::Operand,
        text,
        pos: span.start,
    })
    .parse_next(input)
}

/// Scan the whole expression into tokens, skipping whitespace.
///
/// Every code point is either whitespace, an operator, or part of an operand
/// run, so the scan itself cannot reject input; the error arm is defensive.
pub(crate) fn tokenize(expr: &str) -> Result<Vec<Token<'_>>, CompileError> {
    let tokens: Vec<Token<'_>> = terminated(
        repeat(0.., preceded(ws, alt((operator_token, operand_token)))),
        ws,
    )
    .parse(LocatingSlice::new(expr))
    .map_err(|_| CompileError::InvalidSyntax { pos: 0 })?;
    Ok(tokens)
}
