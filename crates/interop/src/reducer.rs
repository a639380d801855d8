//! The style pass: matched rules in, a style object out.
//!
//! Rules are applied in stylesheet order in two buckets, normal then
//! important, so an important declaration wins over any normal one no
//! matter where it appears. Inline styles from the target prop are merged
//! last.

use std::collections::HashMap;
use std::rc::Rc;

use ncss::{
    AnimationDeclaration, AnimationName, Descriptor, Map, PseudoClasses, StyleRule,
    TransitionDeclaration, Value,
};

use crate::animation::target_style;
use crate::conditions::test_rule;
use crate::defaults::set_deep;
use crate::error::{InteropError, Result};
use crate::resolve::resolve_value;
use crate::state::{ReducerState, ReducerTracking, Refs};

/// Everything one pass produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOutput {
    /// The resolved style object for the target prop.
    pub style: Map,
    /// Variables this component provides to its subtree.
    pub variables: HashMap<String, Descriptor>,
    /// Names this component registers as a container under, if any.
    pub container_names: Option<Vec<String>>,
    pub animation: Option<AnimationDeclaration>,
    pub transition: Option<TransitionDeclaration>,
    /// Pseudo-classes any candidate rule asked about.
    pub pseudo_classes: PseudoClasses,
    /// How many rules matched.
    pub matched: usize,
}

impl StyleOutput {
    pub fn is_container(&self) -> bool {
        self.container_names.is_some()
    }

    pub fn has_animation(&self) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|a| a.names.iter().any(|n| matches!(n, AnimationName::Named(_))))
    }
}

/// One evaluation of a component's rules.
pub struct StylePass<'a> {
    state: &'a mut ReducerState,
    refs: &'a Refs,
    tracking: &'a mut ReducerTracking,
}

impl<'a> StylePass<'a> {
    pub fn new(
        state: &'a mut ReducerState,
        refs: &'a Refs,
        tracking: &'a mut ReducerTracking,
    ) -> Self {
        Self {
            state,
            refs,
            tracking,
        }
    }

    pub fn run(self, rules: &[Rc<StyleRule>]) -> Result<StyleOutput> {
        let mut output = StyleOutput::default();
        let mut normal = Vec::new();
        let mut important = Vec::new();

        for rule in rules {
            if let Some(pseudo_classes) = rule.pseudo_classes {
                output.pseudo_classes |= pseudo_classes;
            }
            if test_rule(rule, self.refs, self.tracking) {
                if rule.important {
                    important.push(Rc::clone(rule));
                } else {
                    normal.push(Rc::clone(rule));
                }
            }
        }
        output.matched = normal.len() + important.len();

        // Variables first: declarations may read them.
        self.state.variables.clear();
        for rule in normal.iter().chain(&important) {
            for (name, value) in &rule.variables {
                self.state.variables.insert(name.clone(), value.clone());
            }
            if let Some(names) = &rule.container_names {
                output.container_names = Some(names.clone());
            }
            if let Some(animation) = &rule.animation {
                output.animation = Some(animation.clone());
            }
            if let Some(transition) = &rule.transition {
                output.transition = Some(transition.clone());
            }
        }
        output.variables = self.state.variables.clone();

        self.check_animation(&output)?;

        let mut style = Map::new();
        for rule in normal.iter().chain(&important) {
            for declaration in &rule.declarations {
                let value = resolve_value(
                    self.state,
                    self.refs,
                    self.tracking,
                    Some(&declaration.value),
                    Some(&style),
                    false,
                );
                match value {
                    Some(value) => set_deep(&mut style, &declaration.path, value),
                    None => log::trace!(
                        "style: dropped `{}` ({:?})",
                        declaration.path.join("."),
                        declaration.value
                    ),
                }
            }
        }

        if let Some(inline) = target_style(self.state, self.refs) {
            for (key, value) in inline {
                style.insert(key.clone(), value.clone());
            }
        }

        output.style = style;
        Ok(output)
    }

    /// Transform animations need a component that accepts animated values.
    fn check_animation(&self, output: &StyleOutput) -> Result<()> {
        let config = &self.state.config;
        if config.animatable {
            return Ok(());
        }
        let Some(animation) = &output.animation else {
            return Ok(());
        };

        for name in &animation.names {
            let AnimationName::Named(name) = name else {
                continue;
            };
            let Some(keyframes) = self.state.registry.keyframes(name) else {
                continue;
            };
            if let Some(interpolation) = keyframes.transform_interpolation() {
                return Err(InteropError::UnsupportedAnimation {
                    component: config.component.clone(),
                    property: interpolation.path.join("."),
                });
            }
        }
        Ok(())
    }
}

/// Pretty-prints a pass for `testID="debugClassName..."` components.
pub(crate) fn debug_dump(class_name: &str, props: &Map, output: &StyleOutput) {
    if let Some(message) = debug_message(class_name, props, output) {
        log::info!("{message}");
    }
}

fn debug_message(class_name: &str, props: &Map, output: &StyleOutput) -> Option<String> {
    let is_debug = props
        .get("testID")
        .and_then(Value::as_str)
        .is_some_and(|id| id.starts_with("debugClassName"));
    is_debug.then(|| {
        format!(
            "debugClassName: `{}` matched {} rules\n  props: {}\n  style: {}\n  variables: {:?}\n  container: {:?}",
            class_name,
            output.matched,
            Value::Object(props.clone()),
            Value::Object(output.style.clone()),
            output.variables,
            output.container_names
        )
    })
}
