use std::collections::HashMap;
use std::fmt;

use super::Action;

/// Registry of named conditions: operand name -> (input tag, action).
///
/// Built once during setup, then shared read-only (typically behind an
/// [`Arc`](std::sync::Arc)) by every [`Rule`](crate::Rule) compiled against
/// it. The first entry registered for a name wins; later `add` calls for the
/// same name are no-ops, not errors.
///
/// # Example
///
/// ```
/// use boolex::{actions, Condition};
///
/// let cond = Condition::new()
///     .add("a", "height", actions::gt(165_i64))
///     .add("b", "height", actions::lt(180_i64));
/// assert!(cond.has("a"));
/// assert!(!cond.has("c"));
/// ```
#[derive(Default)]
pub struct Condition {
    entries: HashMap<String, Entry>,
}

struct Entry {
    tag: String,
    action: Box<dyn Action>,
}

impl Condition {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named condition, chaining style. No-op if `name` is
    /// already present.
    #[must_use]
    pub fn add(mut self, name: &str, tag: &str, action: impl Action + 'static) -> Self {
        self.insert(name, tag, action);
        self
    }

    /// Register a named condition through a mutable reference. No-op if
    /// `name` is already present.
    pub fn insert(&mut self, name: &str, tag: &str, action: impl Action + 'static) {
        self.entries.entry(name.to_owned()).or_insert_with(|| Entry {
            tag: tag.to_owned(),
            action: Box::new(action),
        });
    }

    /// Whether a condition with this name is registered.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// The number of registered conditions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the (tag, action) pair behind an operand name.
    pub(crate) fn get(&self, name: &str) -> Option<(&str, &dyn Action)> {
        self.entries
            .get(name)
            .map(|e| (e.tag.as_str(), e.action.as_ref()))
    }
}

impl fmt::Debug for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Condition").field("names", &names).finish()
    }
}
