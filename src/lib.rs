pub mod actions;
mod evaluate;
mod parse;
#[cfg(feature = "binary-cache")]
pub mod serial;
mod types;

pub use parse::OperandValidator;
#[cfg(feature = "binary-cache")]
pub use serial::{DeserializeError, SerializeError};
pub use types::{
    Action, CompareOp, CompileError, Condition, EvalError, Inputs, RpnToken, Rule, Value,
};
