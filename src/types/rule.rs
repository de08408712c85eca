use std::fmt;
use std::sync::Arc;

use crate::parse::{self, OperandValidator};
use crate::types::{Condition, Inputs, RpnToken};
use crate::{CompileError, EvalError};

/// An immutable compiled rule: the source expression, its RPN program, and a
/// shared handle on the condition registry it was compiled against.
///
/// A `Rule` is stateless and reentrant; clone it or wrap it in an
/// [`Arc`] and evaluate from as many threads as you like. Registries are
/// shared, so many rules can be compiled against one [`Condition`].
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use boolex::{actions, Condition, Inputs, Rule};
///
/// let cond = Arc::new(
///     Condition::new()
///         .add("a", "height", actions::gt(165_i64))
///         .add("b", "height", actions::lt(180_i64)),
/// );
/// let rule = Rule::compile("a & b", Arc::clone(&cond)).unwrap();
///
/// let inputs = Inputs::new().set("height", 175_i64);
/// assert_eq!(rule.evaluate(&inputs), Ok(true));
/// assert_eq!(rule.compiled_form(), "a b &");
/// ```
#[derive(Debug, Clone)]
pub struct Rule {
    pub(crate) expr: String,
    pub(crate) rpn: Vec<RpnToken>,
    pub(crate) cond: Arc<Condition>,
}

impl Rule {
    /// Compile an expression against a condition registry.
    ///
    /// Every operand name in the expression must be registered in `cond`.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] on any tokenization, structure, or operand
    /// failure; no partial rule is produced.
    pub fn compile(expr: &str, cond: Arc<Condition>) -> Result<Self, CompileError> {
        Self::compile_with(expr, cond, &[])
    }

    /// Compile with extra operand validators, applied to each operand name
    /// before the registry-membership check.
    ///
    /// # Errors
    ///
    /// Returns [`CompileError::UnknownOperand`] if any validator rejects a
    /// name, alongside the failure modes of [`compile`](Self::compile).
    pub fn compile_with(
        expr: &str,
        cond: Arc<Condition>,
        validators: &[&dyn OperandValidator],
    ) -> Result<Self, CompileError> {
        let membership = |name: &str| -> Result<(), String> {
            if cond.has(name) {
                Ok(())
            } else {
                Err("no condition registered under this name".to_owned())
            }
        };

        let mut all: Vec<&dyn OperandValidator> = Vec::with_capacity(validators.len() + 1);
        all.extend_from_slice(validators);
        all.push(&membership);

        let rpn = parse::compile(expr, &all)?;

        Ok(Self {
            expr: expr.to_owned(),
            rpn,
            cond,
        })
    }

    /// Evaluate the rule against one set of runtime inputs.
    ///
    /// Both operands of `&`/`|` are always evaluated; there is no
    /// short-circuiting.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::MissingInput`] if a required tag is absent.
    /// The rule remains valid and reusable after a failed call.
    pub fn evaluate(&self, inputs: &Inputs) -> Result<bool, EvalError> {
        crate::evaluate::evaluate(&self.rpn, &self.cond, inputs)
    }

    /// The original expression text.
    #[must_use]
    pub fn source_text(&self) -> &str {
        &self.expr
    }

    /// The compiled program as space-joined RPN tokens, e.g. `"a b | c &"`.
    /// Stable output, suitable for golden tests and diagnostics.
    #[must_use]
    pub fn compiled_form(&self) -> String {
        self.rpn
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The registry this rule was compiled against.
    #[must_use]
    pub fn condition(&self) -> &Arc<Condition> {
        &self.cond
    }
}

#[cfg(feature = "binary-cache")]
impl Rule {
    /// Serialize this compiled rule to a byte vector.
    ///
    /// The registry is not serialized; [`from_bytes`](Self::from_bytes)
    /// re-binds the program to a registry supplied by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`](crate::serial::SerializeError) if encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, crate::serial::SerializeError> {
        crate::serial::encode(self)
    }

    /// Deserialize a compiled rule from bytes previously produced by
    /// [`to_bytes`](Self::to_bytes), binding it to `cond`.
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError`](crate::serial::DeserializeError) on
    /// format, integrity, or validation failure, including any operand of
    /// the stored program missing from `cond`.
    pub fn from_bytes(
        bytes: &[u8],
        cond: Arc<Condition>,
    ) -> Result<Self, crate::serial::DeserializeError> {
        crate::serial::decode(bytes, cond)
    }

    /// Serialize this compiled rule and write it to a file.
    ///
    /// # Errors
    ///
    /// Returns [`SerializeError`](crate::serial::SerializeError) on encoding
    /// or I/O failure.
    pub fn to_binary_file(
        &self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<(), crate::serial::SerializeError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Read a file and deserialize the compiled rule it contains.
    ///
    /// # Errors
    ///
    /// Returns [`DeserializeError`](crate::serial::DeserializeError) on I/O,
    /// format, integrity, or validation failure.
    pub fn from_binary_file(
        path: impl AsRef<std::path::Path>,
        cond: Arc<Condition>,
    ) -> Result<Self, crate::serial::DeserializeError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, cond)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}
