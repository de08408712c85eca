use std::collections::HashMap;

use super::Value;

/// The runtime input map for one evaluation call: tag -> actual value.
///
/// Supplied fresh per [`Rule::evaluate`](crate::Rule::evaluate) call and only
/// borrowed for its duration. Tags are the field names conditions were
/// registered with, not operand names; several operands may read one tag.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    values: HashMap<String, Value>,
}

impl Inputs {
    /// Create an empty input map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a tag's value, chaining style.
    #[must_use]
    pub fn set(mut self, tag: &str, value: impl Into<Value>) -> Self {
        self.insert(tag, value.into());
        self
    }

    /// Set a tag's value through a mutable reference.
    pub fn insert(&mut self, tag: &str, value: impl Into<Value>) {
        self.values.insert(tag.to_owned(), value.into());
    }

    /// Look up the actual value for a tag.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&Value> {
        self.values.get(tag)
    }
}
