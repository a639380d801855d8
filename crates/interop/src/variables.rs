//! Custom-property scopes.
//!
//! Each component that sets variables gives its subtree a new
//! [`VariableScope`] chained to the parent's. Scopes are read-only once
//! built; values the host may change later (the `:root` variables) are
//! stored as observables instead of being rebuilt.

use std::collections::HashMap;
use std::rc::Rc;

use ncss::Descriptor;

use crate::observable::Observable;

#[derive(Debug, Clone)]
pub enum VariableValue {
    /// Fixed for the lifetime of the scope.
    Static(Descriptor),
    /// Re-read on every evaluation; changes notify subscribers.
    Reactive(Observable<Option<Descriptor>>),
}

#[derive(Debug, Default)]
pub struct VariableScope {
    values: HashMap<String, VariableValue>,
    parent: Option<Rc<VariableScope>>,
}

impl VariableScope {
    /// An empty scope with no parent.
    pub fn root() -> Self {
        Self::default()
    }

    /// A scope for `values`, falling back to `parent`.
    pub fn child(parent: Rc<VariableScope>, values: HashMap<String, Descriptor>) -> Self {
        Self {
            values: values
                .into_iter()
                .map(|(name, value)| (name, VariableValue::Static(value)))
                .collect(),
            parent: Some(parent),
        }
    }

    pub fn insert(&mut self, name: &str, value: VariableValue) {
        self.values.insert(name.to_string(), value);
    }

    /// Nearest definition of `name`, walking up the chain.
    pub fn lookup(&self, name: &str) -> Option<&VariableValue> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(value) = current.values.get(name) {
                return Some(value);
            }
            scope = current.parent.as_deref();
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
