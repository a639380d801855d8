//! Rule applicability.
//!
//! [`test_rule`] checks, in order and short-circuiting: pseudo-classes,
//! media queries, container queries, attribute conditions. Reactive inputs
//! are read through the pass's effect; props and container identity are
//! recorded as guards.

use std::rc::Rc;

use ncss::{
    AttributeCondition, AttributeKind, AttributeOperator, Comparison, Condition, ContainerQuery,
    FeatureName, FeatureValue, LengthUnit, Map, MediaQuery, MediaType, Operator, PseudoClasses,
    Qualifier, QueryFeature, StyleRule, Value,
};

use crate::environment::Environment;
use crate::guard::Guard;
use crate::observable::{Effect, Observable};
use crate::state::{DEFAULT_CONTAINER_NAME, ReducerTracking, Refs, SharedState};

/// One side of a size comparison: the viewport (reactive) or a measured
/// container layout (already read).
#[derive(Debug, Clone, Copy)]
pub enum Dimension<'a> {
    Fixed(f64),
    Reactive(&'a Observable<f64>),
}

impl Dimension<'_> {
    fn read(self, effect: Option<&Effect>) -> f64 {
        match self {
            Dimension::Fixed(value) => value,
            Dimension::Reactive(cell) => cell.get(effect),
        }
    }
}

/// The box conditions are evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct ConditionReference<'a> {
    pub width: Dimension<'a>,
    pub height: Dimension<'a>,
}

impl<'a> ConditionReference<'a> {
    pub fn viewport(environment: &'a Environment) -> Self {
        Self {
            width: Dimension::Reactive(&environment.window_width),
            height: Dimension::Reactive(&environment.window_height),
        }
    }

    pub fn fixed(width: f64, height: f64) -> Self {
        Self {
            width: Dimension::Fixed(width),
            height: Dimension::Fixed(height),
        }
    }
}

pub fn test_rule(rule: &StyleRule, refs: &Refs, tracking: &mut ReducerTracking) -> bool {
    if let Some(pseudo_classes) = rule.pseudo_classes {
        if !test_pseudo_classes(&refs.shared_state, pseudo_classes, Some(&tracking.effect)) {
            return false;
        }
    }
    if let Some(media) = &rule.media {
        if !test_media_queries(&refs.environment, media, Some(&tracking.effect)) {
            return false;
        }
    }
    if let Some(queries) = &rule.container_query {
        if !test_container_query(refs, tracking, queries) {
            return false;
        }
    }
    if let Some(attrs) = &rule.attrs {
        if !test_attributes(refs, tracking, attrs) {
            return false;
        }
    }
    true
}

/// All requested flags must be set. Stops reading at the first unset one.
pub fn test_pseudo_classes(
    state: &SharedState,
    required: PseudoClasses,
    effect: Option<&Effect>,
) -> bool {
    required
        .iter()
        .filter_map(|flag| state.pseudo_class(flag))
        .all(|cell| cell.get(effect))
}

pub fn test_media_queries(
    environment: &Environment,
    queries: &[MediaQuery],
    effect: Option<&Effect>,
) -> bool {
    let reference = ConditionReference::viewport(environment);
    queries
        .iter()
        .all(|query| test_media_query(query, &reference, environment, effect))
}

pub fn test_media_query(
    query: &MediaQuery,
    reference: &ConditionReference<'_>,
    environment: &Environment,
    effect: Option<&Effect>,
) -> bool {
    let pass = query.media_type != MediaType::Print
        && test_condition(query.condition.as_ref(), reference, environment, effect);
    if query.qualifier == Some(Qualifier::Not) {
        !pass
    } else {
        pass
    }
}

pub fn test_container_query(
    refs: &Refs,
    tracking: &mut ReducerTracking,
    queries: &[ContainerQuery],
) -> bool {
    for query in queries {
        let container = get_container(query, refs);
        let result = test_container(
            query,
            container.as_deref(),
            &refs.environment,
            Some(&tracking.effect),
        );
        tracking.push_guard(Guard::Container {
            query: query.clone(),
            container,
            result,
        });
        if !result {
            return false;
        }
    }
    true
}

pub(crate) fn get_container(query: &ContainerQuery, refs: &Refs) -> Option<Rc<SharedState>> {
    let name = query.name.as_deref().unwrap_or(DEFAULT_CONTAINER_NAME);
    refs.containers.get(name).cloned()
}

pub(crate) fn test_container(
    query: &ContainerQuery,
    container: Option<&SharedState>,
    environment: &Environment,
    effect: Option<&Effect>,
) -> bool {
    let Some(container) = container else {
        return false;
    };

    if let Some(pseudo_classes) = query.pseudo_classes {
        if !test_pseudo_classes(container, pseudo_classes, effect) {
            return false;
        }
    }

    if let Some(attrs) = &query.attrs {
        let props = container.original_props();
        let passing = attrs
            .iter()
            .all(|attr| test_attribute(read_attribute(&props, attr.kind, &attr.name), attr));
        if !passing {
            return false;
        }
    }

    let Some(condition) = &query.condition else {
        return true;
    };

    let Some((width, height)) = container.layout().get(effect) else {
        return false;
    };
    test_condition(
        Some(condition),
        &ConditionReference::fixed(width, height),
        environment,
        effect,
    )
}

/// Evaluates a media or container condition tree. No condition passes.
pub fn test_condition(
    condition: Option<&Condition>,
    reference: &ConditionReference<'_>,
    environment: &Environment,
    effect: Option<&Effect>,
) -> bool {
    let Some(condition) = condition else {
        return true;
    };

    match condition {
        Condition::Operation {
            operator: Operator::And,
            conditions,
        } => conditions
            .iter()
            .all(|c| test_condition(Some(c), reference, environment, effect)),
        Condition::Operation {
            operator: Operator::Or,
            conditions,
        } => conditions
            .iter()
            .any(|c| test_condition(Some(c), reference, environment, effect)),
        Condition::Not(inner) => {
            !test_condition(Some(inner.as_ref()), reference, environment, effect)
        }
        Condition::Style => false,
        Condition::Feature(feature) => test_feature(feature, reference, environment, effect),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum FeatureInput<'a> {
    Number(f64),
    Ident(&'a str),
}

impl FeatureInput<'_> {
    fn number(&self) -> Option<f64> {
        match self {
            FeatureInput::Number(n) => Some(*n),
            FeatureInput::Ident(_) => None,
        }
    }
}

fn feature_value<'a>(
    value: &'a FeatureValue,
    environment: &Environment,
    effect: Option<&Effect>,
) -> Option<FeatureInput<'a>> {
    match value {
        FeatureValue::Number(n) => Some(FeatureInput::Number(*n)),
        FeatureValue::Length(length) => match length.unit {
            LengthUnit::Px | LengthUnit::Unitless => Some(FeatureInput::Number(length.value)),
            LengthUnit::Rem => Some(FeatureInput::Number(
                length.value * environment.rem.get(effect),
            )),
            _ => None,
        },
        FeatureValue::Ident(ident) => Some(FeatureInput::Ident(ident)),
        FeatureValue::Unsupported => None,
    }
}

fn test_feature(
    feature: &QueryFeature,
    reference: &ConditionReference<'_>,
    environment: &Environment,
    effect: Option<&Effect>,
) -> bool {
    match feature {
        QueryFeature::Plain { name, value } => {
            let Some(value) = feature_value(value, environment, effect) else {
                return false;
            };
            test_plain_feature(name, &value, reference, environment, effect)
        }
        QueryFeature::Range {
            name,
            operator,
            value,
        } => {
            let Some(value) = feature_value(value, environment, effect).and_then(|v| v.number())
            else {
                return false;
            };
            match dimension(name, reference) {
                Some(dim) => operator.compare(dim.read(effect), value),
                None => false,
            }
        }
        QueryFeature::Boolean { name } => test_boolean(name, environment, effect),
        QueryFeature::Interval {
            name,
            start,
            start_operator,
            end,
            end_operator,
        } => {
            let start = feature_value(start, environment, effect).and_then(|v| v.number());
            let end = feature_value(end, environment, effect).and_then(|v| v.number());
            let (Some(start), Some(end), Some(dim)) = (start, end, dimension(name, reference))
            else {
                return false;
            };
            let actual = dim.read(effect);
            start_operator.compare(start, actual) && end_operator.compare(actual, end)
        }
    }
}

fn dimension<'a>(name: &FeatureName, reference: &ConditionReference<'a>) -> Option<Dimension<'a>> {
    match name {
        FeatureName::Width => Some(reference.width),
        FeatureName::Height => Some(reference.height),
        _ => None,
    }
}

fn test_plain_feature(
    name: &FeatureName,
    value: &FeatureInput<'_>,
    reference: &ConditionReference<'_>,
    environment: &Environment,
    effect: Option<&Effect>,
) -> bool {
    let compare = |op: Comparison, dim: Dimension| match value.number() {
        Some(expected) => op.compare(dim.read(effect), expected),
        None => false,
    };

    match name {
        FeatureName::DisplayMode => match value {
            FeatureInput::Ident(mode) => *mode == "native" || environment.os.as_str() == *mode,
            FeatureInput::Number(_) => false,
        },
        FeatureName::PrefersColorScheme => match value {
            FeatureInput::Ident(scheme) => environment.color_scheme.get(effect).as_str() == *scheme,
            FeatureInput::Number(_) => false,
        },
        FeatureName::Width => compare(Comparison::Equal, reference.width),
        FeatureName::MinWidth => compare(Comparison::GreaterThanEqual, reference.width),
        FeatureName::MaxWidth => compare(Comparison::LessThanEqual, reference.width),
        FeatureName::Height => compare(Comparison::Equal, reference.height),
        FeatureName::MinHeight => compare(Comparison::GreaterThanEqual, reference.height),
        FeatureName::MaxHeight => compare(Comparison::LessThanEqual, reference.height),
        FeatureName::Orientation => {
            let height = reference.height.read(effect);
            let width = reference.width.read(effect);
            match value {
                FeatureInput::Ident("landscape") => height < width,
                FeatureInput::Ident("portrait") => height >= width,
                _ => false,
            }
        }
        _ => false,
    }
}

fn test_boolean(name: &FeatureName, environment: &Environment, effect: Option<&Effect>) -> bool {
    match name {
        FeatureName::PrefersReducedMotion => environment.reduced_motion.get(effect),
        FeatureName::Ltr => !environment.rtl.get(effect),
        FeatureName::Rtl => environment.rtl.get(effect),
        _ => false,
    }
}

pub fn test_attributes(
    refs: &Refs,
    tracking: &mut ReducerTracking,
    conditions: &[AttributeCondition],
) -> bool {
    for condition in conditions {
        let value = read_attribute(&refs.props, condition.kind, &condition.name);
        tracking.push_guard(Guard::Attribute {
            kind: condition.kind,
            name: condition.name.clone(),
            value: value.cloned(),
        });
        if !test_attribute(value, condition) {
            return false;
        }
    }
    true
}

/// A prop, or an entry of the `dataSet` prop.
pub(crate) fn read_attribute<'a>(
    props: &'a Map,
    kind: AttributeKind,
    name: &str,
) -> Option<&'a Value> {
    match kind {
        AttributeKind::Attribute => props.get(name),
        AttributeKind::DataAttribute => props.get("dataSet").and_then(|set| set.get(name)),
    }
}

pub fn test_attribute(value: Option<&Value>, condition: &AttributeCondition) -> bool {
    let present = value.filter(|v| !v.is_null());

    let Some(operation) = &condition.operation else {
        return present.is_some();
    };

    match operation.operator {
        AttributeOperator::Empty => match present {
            None => true,
            Some(v) => v.as_str() == Some(""),
        },
        AttributeOperator::Truthy => present.is_some_and(Value::is_truthy),
        // Selector-only operators; never match at runtime.
        AttributeOperator::DashMatch
        | AttributeOperator::Prefix
        | AttributeOperator::Substring
        | AttributeOperator::Suffix => false,
        AttributeOperator::Includes => {
            present.is_some_and(|v| v.to_string().contains(operation.value.as_str()))
        }
        AttributeOperator::Equal => present.is_some_and(|v| v.to_string() == operation.value),
    }
}
