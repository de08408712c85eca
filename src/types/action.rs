use super::Value;

/// The atomic predicate behind one operand name.
///
/// An action receives the actual value fetched from the input map and decides
/// whether the operand holds. Actions must be total: a value of an unexpected
/// type is answered with `false`, never an error or a panic. The built-in
/// comparison actions in [`actions`](crate::actions) follow this contract via
/// [`Value::compare`].
///
/// Any `Fn(&Value) -> bool` closure is an action:
///
/// ```
/// use boolex::{Action, Value};
///
/// let is_https = |v: &Value| matches!(v, Value::String(s) if s.starts_with("https://"));
/// assert!(is_https.evaluate(&Value::from("https://example.com")));
/// assert!(!is_https.evaluate(&Value::Int(3)));
/// ```
pub trait Action: Send + Sync {
    fn evaluate(&self, actual: &Value) -> bool;
}

impl<F> Action for F
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn evaluate(&self, actual: &Value) -> bool {
        self(actual)
    }
}
