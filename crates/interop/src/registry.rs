//! The style registry: a compiled stylesheet indexed for lookup.
//!
//! The registry is an explicit object handed to every component, not a
//! process-wide cache. `:root` and `*` variables are kept in observables so
//! the host can retheme at runtime and only readers of a changed variable
//! re-render.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use ncss::{Descriptor, Keyframes, StyleRule, StyleSheet};

use crate::observable::{Effect, Observable, observable};
use crate::variables::{VariableScope, VariableValue};

#[derive(Debug)]
struct IndexedRule {
    order: usize,
    rule: Rc<StyleRule>,
}

#[derive(Debug, Default)]
pub struct StyleRegistry {
    rules: HashMap<String, Vec<IndexedRule>>,
    keyframes: HashMap<String, Rc<Keyframes>>,
    root_variables: VariableCells,
    universal_variables: VariableCells,
    root_scope: RefCell<Rc<VariableScope>>,
}

impl StyleRegistry {
    pub fn new(sheet: StyleSheet) -> Self {
        let mut rules: HashMap<String, Vec<IndexedRule>> = HashMap::new();
        for (order, class_rule) in sheet.rules.into_iter().enumerate() {
            rules
                .entry(class_rule.class_name)
                .or_default()
                .push(IndexedRule {
                    order,
                    rule: Rc::new(class_rule.rule),
                });
        }

        let keyframes = sheet
            .keyframes
            .into_iter()
            .map(|(name, frames)| (name, Rc::new(frames)))
            .collect();

        let observed = |vars: HashMap<String, Descriptor>| {
            vars.into_iter()
                .map(|(name, value)| (name, observable(Some(value))))
                .collect::<HashMap<_, _>>()
        };

        let registry = Self {
            rules,
            keyframes,
            root_variables: RefCell::new(observed(sheet.root_variables)),
            universal_variables: RefCell::new(observed(sheet.universal_variables)),
            root_scope: RefCell::new(Rc::new(VariableScope::root())),
        };
        registry.rebuild_root_scope();

        log::debug!(
            "registry: {} class names, {} keyframes",
            registry.rules.len(),
            registry.keyframes.len()
        );
        registry
    }

    /// Rules for every class in a whitespace-separated list, in stylesheet
    /// order.
    ///
    /// ```
    /// use ncss::{StyleRule, StyleSheet};
    /// use interop::StyleRegistry;
    ///
    /// let mut sheet = StyleSheet::new();
    /// sheet.add_rule("text-red", StyleRule::new().declare("color", "red"));
    /// sheet.add_rule("p-2", StyleRule::new().declare("padding", 8));
    ///
    /// let registry = StyleRegistry::new(sheet);
    /// let rules = registry.class_rules("  p-2 text-red unknown ");
    /// assert_eq!(rules.len(), 2);
    /// assert_eq!(rules[0].declarations[0].property(), "color");
    /// ```
    pub fn class_rules(&self, class_names: &str) -> Vec<Rc<StyleRule>> {
        let mut matched: Vec<&IndexedRule> = class_names
            .split_whitespace()
            .filter_map(|name| self.rules.get(name))
            .flatten()
            .collect();
        matched.sort_by_key(|indexed| indexed.order);
        matched.dedup_by_key(|indexed| indexed.order);
        matched
            .into_iter()
            .map(|indexed| Rc::clone(&indexed.rule))
            .collect()
    }

    pub fn keyframes(&self, name: &str) -> Option<Rc<Keyframes>> {
        self.keyframes.get(name).cloned()
    }

    /// Reads a `*` variable, subscribing `effect` to later changes.
    ///
    /// A miss leaves an empty cell behind, so defining the name later still
    /// reaches the reader.
    pub fn universal_variable(&self, name: &str, effect: Option<&Effect>) -> Option<Descriptor> {
        read_cell(&self.universal_variables, name).get(effect)
    }

    /// Reads a `:root` variable directly, subscribing `effect` like
    /// [`Self::universal_variable`].
    pub fn root_variable(&self, name: &str, effect: Option<&Effect>) -> Option<Descriptor> {
        read_cell(&self.root_variables, name).get(effect)
    }

    /// Scope holding the `:root` variables; the parent of every top-level
    /// component scope.
    pub fn root_scope(&self) -> Rc<VariableScope> {
        Rc::clone(&self.root_scope.borrow())
    }

    pub fn set_root_variable(&self, name: &str, value: Option<Descriptor>) {
        let scoped = self.root_scope.borrow().lookup(name).is_some();
        read_cell(&self.root_variables, name).set(value);
        if !scoped {
            self.rebuild_root_scope();
        }
    }

    pub fn set_universal_variable(&self, name: &str, value: Option<Descriptor>) {
        read_cell(&self.universal_variables, name).set(value);
    }

    fn rebuild_root_scope(&self) {
        let mut scope = VariableScope::root();
        for (name, cell) in self.root_variables.borrow().iter() {
            scope.insert(name, VariableValue::Reactive(cell.clone()));
        }
        *self.root_scope.borrow_mut() = Rc::new(scope);
    }
}

type VariableCells = RefCell<HashMap<String, Observable<Option<Descriptor>>>>;

// The map borrow ends before the caller reads or writes the cell; writes
// run effects that read the registry again.
fn read_cell(cells: &VariableCells, name: &str) -> Observable<Option<Descriptor>> {
    cells
        .borrow_mut()
        .entry(name.to_string())
        .or_insert_with(|| observable(None))
        .clone()
}
