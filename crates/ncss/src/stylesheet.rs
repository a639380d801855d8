//! The compiled stylesheet: the unit handed over by the compiler.

use std::collections::HashMap;

use crate::descriptor::Descriptor;
use crate::keyframes::Keyframes;
use crate::rule::StyleRule;

/// A rule registered under a class name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassRule {
    pub class_name: String,
    pub rule: StyleRule,
}

/// Everything the runtime needs from one compiled stylesheet.
///
/// Rules keep stylesheet order; that order decides which declaration wins
/// when two matching rules set the same property.
///
/// # Example
///
/// ```
/// use ncss::{StyleRule, StyleSheet};
///
/// let mut sheet = StyleSheet::new();
/// sheet.add_rule("text-red-500", StyleRule::new().declare("color", "red"));
/// sheet.set_root_variable("--gap", 8);
///
/// assert_eq!(sheet.rules.len(), 1);
/// assert!(sheet.root_variables.contains_key("--gap"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleSheet {
    pub rules: Vec<ClassRule>,
    pub keyframes: HashMap<String, Keyframes>,
    /// Variables declared on `:root`.
    pub root_variables: HashMap<String, Descriptor>,
    /// Variables declared on `*`.
    pub universal_variables: HashMap<String, Descriptor>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rule(&mut self, class_name: &str, rule: StyleRule) -> &mut Self {
        self.rules.push(ClassRule {
            class_name: class_name.to_string(),
            rule,
        });
        self
    }

    pub fn add_keyframes(&mut self, name: &str, keyframes: Keyframes) -> &mut Self {
        self.keyframes.insert(name.to_string(), keyframes);
        self
    }

    pub fn set_root_variable(&mut self, name: &str, value: impl Into<Descriptor>) -> &mut Self {
        self.root_variables.insert(name.to_string(), value.into());
        self
    }

    pub fn set_universal_variable(
        &mut self,
        name: &str,
        value: impl Into<Descriptor>,
    ) -> &mut Self {
        self.universal_variables
            .insert(name.to_string(), value.into());
        self
    }
}
