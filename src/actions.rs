//! Built-in comparison actions.
//!
//! Each constructor captures its expected value(s) at registration time and
//! returns an [`Action`] comparing against them through [`Value::compare`].
//! A type mismatch between the actual and expected value is answered with
//! `false`, never an error.

use crate::types::{Action, CompareOp, Value};

fn compare_to(op: CompareOp, expected: impl Into<Value>) -> impl Action {
    let expected = expected.into();
    move |actual: &Value| actual.compare(op, &expected).unwrap_or(false)
}

/// `actual > expected`.
pub fn gt(expected: impl Into<Value>) -> impl Action {
    compare_to(CompareOp::Gt, expected)
}

/// `actual >= expected`.
pub fn gte(expected: impl Into<Value>) -> impl Action {
    compare_to(CompareOp::Gte, expected)
}

/// `actual < expected`.
pub fn lt(expected: impl Into<Value>) -> impl Action {
    compare_to(CompareOp::Lt, expected)
}

/// `actual <= expected`.
pub fn lte(expected: impl Into<Value>) -> impl Action {
    compare_to(CompareOp::Lte, expected)
}

/// `actual == expected`.
pub fn eq(expected: impl Into<Value>) -> impl Action {
    compare_to(CompareOp::Eq, expected)
}

/// `actual != expected`.
pub fn neq(expected: impl Into<Value>) -> impl Action {
    compare_to(CompareOp::Neq, expected)
}

/// Closed-interval membership: `low <= actual <= high`.
pub fn between(low: impl Into<Value>, high: impl Into<Value>) -> impl Action {
    between_with(low, high, true, true)
}

/// Interval membership with per-bound closedness. A closed bound admits
/// equality with the endpoint, an open bound does not, so all four interval
/// shapes are expressible.
pub fn between_with(
    low: impl Into<Value>,
    high: impl Into<Value>,
    low_closed: bool,
    high_closed: bool,
) -> impl Action {
    let low = low.into();
    let high = high.into();
    let low_op = if low_closed { CompareOp::Gte } else { CompareOp::Gt };
    let high_op = if high_closed { CompareOp::Lte } else { CompareOp::Lt };
    move |actual: &Value| {
        actual.compare(low_op, &low).unwrap_or(false)
            && actual.compare(high_op, &high).unwrap_or(false)
    }
}

/// Membership in a fixed list of values.
pub fn one_of<V: Into<Value>>(allowed: impl IntoIterator<Item = V>) -> impl Action {
    let allowed: Vec<Value> = allowed.into_iter().map(Into::into).collect();
    move |actual: &Value| {
        allowed
            .iter()
            .any(|v| actual.compare(CompareOp::Eq, v).unwrap_or(false))
    }
}

/// Absence from a fixed list of values.
///
/// An actual value that is type-incompatible with every listed value yields
/// `false`, same as the other builtins, not `true`.
pub fn none_of<V: Into<Value>>(denied: impl IntoIterator<Item = V>) -> impl Action {
    let denied: Vec<Value> = denied.into_iter().map(Into::into).collect();
    move |actual: &Value| {
        let mut comparable = false;
        for v in &denied {
            match actual.compare(CompareOp::Eq, v) {
                Some(true) => return false,
                Some(false) => comparable = true,
                None => {}
            }
        }
        comparable
    }
}
