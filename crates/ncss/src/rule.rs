//! Compiled style rules and the conditions attached to them.
//!
//! A [`StyleRule`] is immutable once compiled. It carries its declarations in
//! source order plus up to four independent conditions: a pseudo-class set,
//! media queries, container queries and attribute conditions.

use bitflags::bitflags;

use crate::descriptor::Descriptor;
use crate::media::{Condition, MediaQuery};

bitflags! {
    /// Interaction pseudo-classes a rule (or container query) requires.
    ///
    /// # Example
    ///
    /// ```
    /// use ncss::PseudoClasses;
    ///
    /// let required = PseudoClasses::HOVER | PseudoClasses::FOCUS;
    /// assert!(required.contains(PseudoClasses::HOVER));
    /// assert!(!required.contains(PseudoClasses::ACTIVE));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PseudoClasses: u8 {
        /// Pointer is over the component
        const HOVER  = 0b0000_0001;
        /// Component is being pressed
        const ACTIVE = 0b0000_0010;
        /// Component has focus
        const FOCUS  = 0b0000_0100;
    }
}

/// Whether an attribute condition reads a prop or a `dataSet` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AttributeKind {
    #[default]
    Attribute,
    DataAttribute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AttributeOperator {
    /// Non-standard: the attribute coerces to `true`.
    Truthy,
    /// Non-standard: the attribute is null or an empty string.
    Empty,
    Equal,
    Includes,
    DashMatch,
    Prefix,
    Substring,
    Suffix,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeOperation {
    pub operator: AttributeOperator,
    pub value: String,
}

/// `[name]`, `[name="value"]`, `[data-name~="value"]`, ...
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeCondition {
    pub kind: AttributeKind,
    pub name: String,
    /// `None` means the attribute only has to exist.
    pub operation: Option<AttributeOperation>,
}

impl AttributeCondition {
    pub fn attribute(name: &str) -> Self {
        Self {
            kind: AttributeKind::Attribute,
            name: name.to_string(),
            operation: None,
        }
    }

    pub fn data(name: &str) -> Self {
        Self {
            kind: AttributeKind::DataAttribute,
            name: name.to_string(),
            operation: None,
        }
    }

    pub fn with_operation(mut self, operator: AttributeOperator, value: &str) -> Self {
        self.operation = Some(AttributeOperation {
            operator,
            value: value.to_string(),
        });
        self
    }
}

/// One `@container` query.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerQuery {
    /// `None` targets the nearest unnamed container.
    pub name: Option<String>,
    pub pseudo_classes: Option<PseudoClasses>,
    pub attrs: Option<Vec<AttributeCondition>>,
    pub condition: Option<Condition>,
}

impl ContainerQuery {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_pseudo_classes(mut self, pseudo_classes: PseudoClasses) -> Self {
        self.pseudo_classes = Some(pseudo_classes);
        self
    }

    pub fn with_attr(mut self, attr: AttributeCondition) -> Self {
        self.attrs.get_or_insert_with(Vec::new).push(attr);
        self
    }
}

/// A property path relative to the component's target prop, and its value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Declaration {
    pub path: Vec<String>,
    pub value: Descriptor,
}

impl Declaration {
    /// `path` is dot separated: `"textShadowOffset.width"`.
    pub fn new(path: &str, value: impl Into<Descriptor>) -> Self {
        Self {
            path: path.split('.').map(str::to_string).collect(),
            value: value.into(),
        }
    }

    /// The last path segment, the property actually written.
    pub fn property(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }
}

/// A duration as written in the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Time {
    Milliseconds(f64),
    Seconds(f64),
}

impl Time {
    pub fn to_ms(self) -> f64 {
        match self {
            Time::Milliseconds(ms) => ms,
            Time::Seconds(s) => s * 1000.0,
        }
    }
}

impl Default for Time {
    fn default() -> Self {
        Time::Milliseconds(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum EasingFunction {
    #[default]
    Linear,
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    CubicBezier {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Steps {
        count: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum AnimationName {
    None,
    Named(String),
}

/// `animation-*` longhands of one rule.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationDeclaration {
    pub names: Vec<AnimationName>,
    pub durations: Vec<Time>,
    pub delays: Vec<Time>,
    pub timing_functions: Vec<EasingFunction>,
}

impl AnimationDeclaration {
    pub fn named(names: &[&str]) -> Self {
        Self {
            names: names
                .iter()
                .map(|name| match *name {
                    "none" => AnimationName::None,
                    other => AnimationName::Named(other.to_string()),
                })
                .collect(),
            ..Default::default()
        }
    }

    pub fn with_duration(mut self, duration: Time) -> Self {
        self.durations.push(duration);
        self
    }

    pub fn with_delay(mut self, delay: Time) -> Self {
        self.delays.push(delay);
        self
    }
}

/// `transition-*` longhands of one rule.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionDeclaration {
    pub properties: Vec<String>,
    pub durations: Vec<Time>,
    pub delays: Vec<Time>,
    pub timing_functions: Vec<EasingFunction>,
}

impl TransitionDeclaration {
    pub fn new(properties: &[&str]) -> Self {
        Self {
            properties: properties.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn with_duration(mut self, duration: Time) -> Self {
        self.durations.push(duration);
        self
    }

    pub fn with_delay(mut self, delay: Time) -> Self {
        self.delays.push(delay);
        self
    }

    pub fn with_timing_function(mut self, easing: EasingFunction) -> Self {
        self.timing_functions.push(easing);
        self
    }
}

/// A compiled style rule.
///
/// # Example
///
/// ```
/// use ncss::{PseudoClasses, StyleRule};
///
/// let rule = StyleRule::new()
///     .declare("color", "red")
///     .with_pseudo_classes(PseudoClasses::HOVER);
///
/// assert_eq!(rule.declarations.len(), 1);
/// assert!(rule.pseudo_classes.unwrap().contains(PseudoClasses::HOVER));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleRule {
    pub declarations: Vec<Declaration>,
    /// Custom properties (`--name`) set by this rule.
    pub variables: Vec<(String, Descriptor)>,
    /// Rules from the `!important` bucket are applied after all normal rules.
    pub important: bool,
    pub pseudo_classes: Option<PseudoClasses>,
    pub media: Option<Vec<MediaQuery>>,
    pub container_query: Option<Vec<ContainerQuery>>,
    pub attrs: Option<Vec<AttributeCondition>>,
    /// `container-name` values; an empty list makes an unnamed container.
    pub container_names: Option<Vec<String>>,
    pub animation: Option<AnimationDeclaration>,
    pub transition: Option<TransitionDeclaration>,
}

impl StyleRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(mut self, path: &str, value: impl Into<Descriptor>) -> Self {
        self.declarations.push(Declaration::new(path, value));
        self
    }

    pub fn set_variable(mut self, name: &str, value: impl Into<Descriptor>) -> Self {
        self.variables.push((name.to_string(), value.into()));
        self
    }

    pub fn important(mut self) -> Self {
        self.important = true;
        self
    }

    pub fn with_pseudo_classes(mut self, pseudo_classes: PseudoClasses) -> Self {
        self.pseudo_classes = Some(pseudo_classes);
        self
    }

    pub fn with_media(mut self, query: MediaQuery) -> Self {
        self.media.get_or_insert_with(Vec::new).push(query);
        self
    }

    pub fn with_container_query(mut self, query: ContainerQuery) -> Self {
        self.container_query.get_or_insert_with(Vec::new).push(query);
        self
    }

    pub fn with_attr(mut self, attr: AttributeCondition) -> Self {
        self.attrs.get_or_insert_with(Vec::new).push(attr);
        self
    }

    pub fn container(mut self, names: &[&str]) -> Self {
        self.container_names = Some(names.iter().map(|n| n.to_string()).collect());
        self
    }

    pub fn with_animation(mut self, animation: AnimationDeclaration) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn with_transition(mut self, transition: TransitionDeclaration) -> Self {
        self.transition = Some(transition);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declaration_paths_split_on_dots() {
        let decl = Declaration::new("textShadowOffset.width", 2);
        assert_eq!(decl.path, vec!["textShadowOffset", "width"]);
        assert_eq!(decl.property(), "width");
    }

    #[test]
    fn time_converts_to_milliseconds() {
        assert_eq!(Time::Seconds(1.5).to_ms(), 1500.0);
        assert_eq!(Time::Milliseconds(250.0).to_ms(), 250.0);
    }

    #[test]
    fn animation_none_is_recognised() {
        let animation = AnimationDeclaration::named(&["none", "spin"]);
        assert_eq!(animation.names[0], AnimationName::None);
        assert_eq!(animation.names[1], AnimationName::Named("spin".into()));
    }
}
