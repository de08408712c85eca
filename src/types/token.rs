use std::fmt;

/// Lexical category of a token, including the synthetic [`Sentinel`](Category::Sentinel)
/// that bounds both ends of the token stream.
///
/// The discriminant values index directly into the adjacency and relation
/// tables, so the order here must match the table layouts in `parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub(crate) enum Category {
    Sentinel = 0,
    And = 1,
    Or = 2,
    Not = 3,
    LParen = 4,
    RParen = 5,
    Operand = 6,
}

impl Category {
    /// Classify a single operator/parenthesis code point.
    /// Returns `None` for anything that belongs to an operand run.
    pub(crate) fn of_char(ch: char) -> Option<Category> {
        match ch {
            '&' => Some(Category::And),
            '|' => Some(Category::Or),
            '!' => Some(Category::Not),
            '(' => Some(Category::LParen),
            ')' => Some(Category::RParen),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Sentinel => "end of expression",
            Category::And => "&",
            Category::Or => "|",
            Category::Not => "!",
            Category::LParen => "(",
            Category::RParen => ")",
            Category::Operand => "operand",
        };
        write!(f, "{s}")
    }
}

/// A lexed token: its category, the source slice it covers, and the byte
/// offset of that slice in the original expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'i> {
    pub(crate) category: Category,
    pub(crate) text: &'i str,
    pub(crate) pos: usize,
}

/// One element of a compiled RPN program.
///
/// Operands keep their source name; the three operators are unit variants.
/// [`Display`](fmt::Display) renders the literal symbol (`&`, `|`, `!`) or the
/// operand name, which is what [`Rule::compiled_form`](crate::Rule::compiled_form)
/// joins with spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RpnToken {
    And,
    Or,
    Not,
    Operand(String),
}

impl fmt::Display for RpnToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RpnToken::And => write!(f, "&"),
            RpnToken::Or => write!(f, "|"),
            RpnToken::Not => write!(f, "!"),
            RpnToken::Operand(name) => write!(f, "{name}"),
        }
    }
}
