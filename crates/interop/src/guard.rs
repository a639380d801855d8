//! Guards: non-reactive facts a style pass relied on.
//!
//! Props, inherited variables and the identity of the nearest container
//! are not observables, so a pass records what it saw. When the host
//! re-renders the component with new inputs, any guard that no longer
//! holds means the pass must run again; otherwise the previous output is
//! reused.

use std::rc::Rc;

use ncss::{AttributeKind, ContainerQuery, Descriptor, Value};

use crate::conditions::{get_container, read_attribute, test_container};
use crate::state::{Refs, SharedState};
use crate::variables::VariableValue;

#[derive(Debug, Clone)]
pub enum Guard {
    /// Which container a query resolved to, and whether it matched.
    Container {
        query: ContainerQuery,
        container: Option<Rc<SharedState>>,
        result: bool,
    },
    /// An attribute or `dataSet` value read from props.
    Attribute {
        kind: AttributeKind,
        name: String,
        value: Option<Value>,
    },
    /// An inherited, non-reactive variable.
    Variable {
        name: String,
        value: Option<Descriptor>,
    },
}

// Containers compare by identity.
impl PartialEq for Guard {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Guard::Container {
                    query: a_query,
                    container: a,
                    result: a_result,
                },
                Guard::Container {
                    query: b_query,
                    container: b,
                    result: b_result,
                },
            ) => {
                let same_container = match (a, b) {
                    (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                    (None, None) => true,
                    _ => false,
                };
                same_container && a_query == b_query && a_result == b_result
            }
            (
                Guard::Attribute {
                    kind: a_kind,
                    name: a_name,
                    value: a,
                },
                Guard::Attribute {
                    kind: b_kind,
                    name: b_name,
                    value: b,
                },
            ) => a_kind == b_kind && a_name == b_name && a == b,
            (
                Guard::Variable { name: a_name, value: a },
                Guard::Variable { name: b_name, value: b },
            ) => a_name == b_name && a == b,
            _ => false,
        }
    }
}

impl Guard {
    pub fn is_stale(&self, next: &Refs) -> bool {
        match self {
            Guard::Container {
                query,
                container,
                result,
            } => {
                let next_container = get_container(query, next);
                let same = match (container, &next_container) {
                    (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                    (None, None) => true,
                    _ => false,
                };
                !same
                    || test_container(query, next_container.as_deref(), &next.environment, None)
                        != *result
            }
            Guard::Attribute { kind, name, value } => {
                read_attribute(&next.props, *kind, name) != value.as_ref()
            }
            Guard::Variable { name, value } => match next.variables.lookup(name) {
                Some(VariableValue::Static(next_value)) => value.as_ref() != Some(next_value),
                Some(VariableValue::Reactive(_)) => true,
                None => value.is_some(),
            },
        }
    }
}
