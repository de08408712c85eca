mod action;
mod condition;
mod error;
mod inputs;
mod rule;
mod token;
mod value;

pub use action::Action;
pub use condition::Condition;
pub use error::{CompileError, EvalError};
pub use inputs::Inputs;
pub use rule::Rule;
pub use token::RpnToken;
pub(crate) use token::{Category, Token};
pub use value::{CompareOp, Value};
