//! Keyframe animation and transition inputs.
//!
//! The runtime does not tick animations itself. It resolves keyframe
//! values for the current environment and hands the host either
//! interpolation tables (progress breakpoints to values, driven by a
//! progress value the host owns) or a timed frame sequence.

use std::collections::HashMap;

use ncss::{
    AnimationDeclaration, AnimationName, Descriptor, EasingFunction, INHERIT_VALUE,
    KeyframeInterpolation, Map, Time, TransitionDeclaration, Value, is_transform_key,
};

use crate::defaults::{default_value, get_base_value};
use crate::resolve::resolve_value;
use crate::state::{ReducerState, ReducerTracking, Refs};

/// Host-side easing curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    Ease,
    QuadIn,
    QuadOut,
    QuadInOut,
    Bezier(f64, f64, f64, f64),
}

impl From<EasingFunction> for Easing {
    fn from(easing: EasingFunction) -> Self {
        match easing {
            EasingFunction::Linear => Easing::Linear,
            EasingFunction::Ease => Easing::Ease,
            EasingFunction::EaseIn => Easing::QuadIn,
            EasingFunction::EaseOut => Easing::QuadOut,
            EasingFunction::EaseInOut => Easing::QuadInOut,
            EasingFunction::CubicBezier { x1, y1, x2, y2 } => Easing::Bezier(x1, y1, x2, y2),
            EasingFunction::Steps { .. } => Easing::Linear,
        }
    }
}

pub fn time_to_ms(time: Time) -> f64 {
    time.to_ms()
}

/// One property of a running animation, resolved for this component.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationInterpolation {
    pub path: Vec<String>,
    pub progress: Vec<f64>,
    pub easing: Vec<Easing>,
    /// One value per breakpoint; `Null` where a value could not be resolved.
    pub values: Vec<Value>,
    pub transform: bool,
}

/// Resolves one keyframe value. [`INHERIT_VALUE`] reads the property's
/// current value from props, falling back to its default.
pub fn resolve_animation_value(
    state: &ReducerState,
    refs: &Refs,
    tracking: &mut ReducerTracking,
    path: &[String],
    descriptor: &Descriptor,
) -> Option<Value> {
    if matches!(descriptor, Descriptor::String(s) if s == INHERIT_VALUE) {
        let property = path.last()?;
        return get_base_value(&refs.props, &state.config.target, path).or_else(|| {
            default_value(property, &refs.environment, Some(&tracking.effect))
        });
    }

    let style = target_style(state, refs);
    resolve_value(state, refs, tracking, Some(descriptor), style, false)
}

/// The component's inline style object at the configured target.
pub(crate) fn target_style<'r>(state: &ReducerState, refs: &'r Refs) -> Option<&'r Map> {
    let (first, rest) = state.config.target.split_first()?;
    let mut current = refs.props.get(first)?;
    for segment in rest {
        current = current.get(segment)?;
    }
    current.as_object()
}

fn resolve_interpolation(
    state: &ReducerState,
    refs: &Refs,
    tracking: &mut ReducerTracking,
    interpolation: &KeyframeInterpolation,
) -> AnimationInterpolation {
    let values = interpolation
        .values
        .iter()
        .map(|value| {
            resolve_animation_value(state, refs, tracking, &interpolation.path, value)
                .unwrap_or_default()
        })
        .collect();

    AnimationInterpolation {
        path: interpolation.path.clone(),
        progress: interpolation.progress.clone(),
        easing: interpolation.easing.iter().copied().map(Easing::from).collect(),
        values,
        transform: interpolation.transform,
    }
}

/// Builds interpolation tables for every named animation that has both a
/// progress driver and registered keyframes. `none` and unknown names are
/// skipped.
pub fn build_animation_interpolations<D: Clone>(
    state: &ReducerState,
    refs: &Refs,
    tracking: &mut ReducerTracking,
    animation: &AnimationDeclaration,
    drivers: &HashMap<String, D>,
) -> Vec<(D, Vec<AnimationInterpolation>)> {
    let mut built = Vec::new();

    for name in &animation.names {
        let AnimationName::Named(name) = name else {
            continue;
        };
        let (Some(driver), Some(keyframes)) = (drivers.get(name), state.registry.keyframes(name))
        else {
            log::debug!("animation: no keyframes or driver for `{}`", name);
            continue;
        };

        let interpolations = keyframes
            .interpolations
            .iter()
            .map(|interpolation| resolve_interpolation(state, refs, tracking, interpolation))
            .collect();
        built.push((driver.clone(), interpolations));
    }

    built
}

/// A step of a timed animation.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimatableValue {
    /// Jump straight to a value.
    Value(Value),
    /// Animate to `to` over `duration_ms`.
    Timing {
        to: Value,
        duration_ms: f64,
        easing: Easing,
    },
    Delayed {
        delay_ms: f64,
        value: Box<AnimatableValue>,
    },
}

/// Turns one keyframe table into a start value plus timed segments.
///
/// Each segment lasts `total_duration * (its progress - previous progress)`.
/// The delay only applies to the first segment.
pub fn resolve_animation_frames(
    state: &ReducerState,
    refs: &Refs,
    tracking: &mut ReducerTracking,
    interpolation: &KeyframeInterpolation,
    delay: Time,
    total_duration: Time,
) -> Vec<AnimatableValue> {
    let path = &interpolation.path;
    let mut frames = interpolation.progress.iter().zip(&interpolation.values);

    let Some((_, initial)) = frames.next() else {
        return Vec::new();
    };
    let mut sequence = vec![AnimatableValue::Value(
        resolve_animation_value(state, refs, tracking, path, initial).unwrap_or_default(),
    )];

    let total_ms = time_to_ms(total_duration);
    let delay_ms = time_to_ms(delay);
    let mut progress = interpolation.progress.first().copied().unwrap_or_default();

    for (index, (frame_progress, value)) in frames.enumerate() {
        let segment = frame_progress - progress;
        progress = *frame_progress;

        let timing = AnimatableValue::Timing {
            to: resolve_animation_value(state, refs, tracking, path, value).unwrap_or_default(),
            duration_ms: total_ms * segment,
            easing: interpolation.easing_at(index).into(),
        };

        sequence.push(if index == 0 && delay_ms > 0.0 {
            AnimatableValue::Delayed {
                delay_ms,
                value: Box::new(timing),
            }
        } else {
            timing
        });
    }

    sequence
}

/// Timed frames for one property of a named animation.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedAnimation {
    pub name: String,
    pub path: Vec<String>,
    pub frames: Vec<AnimatableValue>,
}

/// Resolves every named animation into timed frames, picking each
/// animation's duration and delay by index like CSS list properties.
pub fn build_timed_animations(
    state: &ReducerState,
    refs: &Refs,
    tracking: &mut ReducerTracking,
    animation: &AnimationDeclaration,
) -> Vec<TimedAnimation> {
    let mut timed = Vec::new();

    for (index, name) in animation.names.iter().enumerate() {
        let AnimationName::Named(name) = name else {
            continue;
        };
        let Some(keyframes) = state.registry.keyframes(name) else {
            continue;
        };
        let duration = cycle(&animation.durations, index);
        let delay = cycle(&animation.delays, index);

        for interpolation in &keyframes.interpolations {
            timed.push(TimedAnimation {
                name: name.clone(),
                path: interpolation.path.clone(),
                frames: resolve_animation_frames(
                    state,
                    refs,
                    tracking,
                    interpolation,
                    delay,
                    duration,
                ),
            });
        }
    }

    timed
}

/// A property a transition should animate towards.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionTarget {
    pub property: String,
    pub value: Value,
    pub duration_ms: f64,
    pub delay_ms: f64,
    pub easing: Easing,
}

fn cycle<T: Copy + Default>(list: &[T], index: usize) -> T {
    if list.is_empty() {
        T::default()
    } else {
        list[index % list.len()]
    }
}

/// Pairs each transitioned property with its target value in `style`.
///
/// Duration, delay and timing lists repeat to cover every property.
/// Properties also driven by an animation are left to the animation.
pub fn build_transition_targets(
    transition: &TransitionDeclaration,
    style: &Map,
    animated: &[AnimationInterpolation],
    refs: &Refs,
    tracking: &ReducerTracking,
) -> Vec<TransitionTarget> {
    transition
        .properties
        .iter()
        .enumerate()
        .filter(|(_, property)| {
            !animated
                .iter()
                .any(|a| a.path.last() == Some(*property))
        })
        .filter_map(|(index, property)| {
            let current = match style.get(property) {
                Some(value) => Some(value.clone()),
                None if is_transform_key(property) => style
                    .get("transform")
                    .and_then(Value::as_array)
                    .and_then(|entries| entries.iter().find_map(|e| e.get(property)))
                    .cloned(),
                None => None,
            };
            let value = current.or_else(|| {
                default_value(property, &refs.environment, Some(&tracking.effect))
            })?;

            Some(TransitionTarget {
                property: property.clone(),
                value,
                duration_ms: time_to_ms(cycle(&transition.durations, index)),
                delay_ms: time_to_ms(cycle(&transition.delays, index)),
                easing: cycle(&transition.timing_functions, index).into(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestHarness;
    use ncss::{Keyframes, StyleSheet};

    fn fade() -> KeyframeInterpolation {
        KeyframeInterpolation::new(
            "opacity",
            [
                (0.0, Descriptor::from(INHERIT_VALUE)),
                (0.5, Descriptor::from(0.2)),
                (1.0, Descriptor::from(1)),
            ],
        )
    }

    #[test]
    fn inherit_reads_props_then_defaults() {
        let harness = TestHarness::new(StyleSheet::new());
        let opacity = vec!["opacity".to_string()];
        let inherit = Descriptor::from(INHERIT_VALUE);

        let (state, refs, mut tracking) = harness.pass_inputs(Map::new());
        assert_eq!(
            resolve_animation_value(&state, &refs, &mut tracking, &opacity, &inherit),
            Some(Value::from(1))
        );

        let mut props = Map::new();
        props.insert("style".into(), Value::object([("opacity", Value::from(0.3))]));
        let (state, refs, mut tracking) = harness.pass_inputs(props);
        assert_eq!(
            resolve_animation_value(&state, &refs, &mut tracking, &opacity, &inherit),
            Some(Value::from(0.3))
        );
    }

    #[test]
    fn frames_split_the_duration_by_progress() {
        let harness = TestHarness::new(StyleSheet::new());
        let (state, refs, mut tracking) = harness.pass_inputs(Map::new());

        let frames = resolve_animation_frames(
            &state,
            &refs,
            &mut tracking,
            &fade().with_easing(EasingFunction::EaseIn),
            Time::Milliseconds(100.0),
            Time::Seconds(1.0),
        );

        assert_eq!(
            frames,
            vec![
                AnimatableValue::Value(Value::from(1)),
                AnimatableValue::Delayed {
                    delay_ms: 100.0,
                    value: Box::new(AnimatableValue::Timing {
                        to: Value::from(0.2),
                        duration_ms: 500.0,
                        easing: Easing::QuadIn,
                    }),
                },
                AnimatableValue::Timing {
                    to: Value::from(1),
                    duration_ms: 500.0,
                    easing: Easing::QuadIn,
                },
            ]
        );
    }

    #[test]
    fn unknown_animations_are_skipped() {
        let mut sheet = StyleSheet::new();
        sheet.add_keyframes("fade", Keyframes::new(vec![fade()]));
        let harness = TestHarness::new(sheet);
        let (state, refs, mut tracking) = harness.pass_inputs(Map::new());

        let drivers = HashMap::from([("fade".to_string(), 7u32), ("spin".to_string(), 8u32)]);
        let animation = AnimationDeclaration::named(&["none", "spin", "fade"]);
        let built =
            build_animation_interpolations(&state, &refs, &mut tracking, &animation, &drivers);

        assert_eq!(built.len(), 1);
        assert_eq!(built[0].0, 7);
        assert_eq!(
            built[0].1[0].values,
            vec![Value::from(1), Value::from(0.2), Value::from(1)]
        );
    }

    #[test]
    fn transition_lists_cycle() {
        let harness = TestHarness::new(StyleSheet::new());
        let (_, refs, tracking) = harness.pass_inputs(Map::new());

        let transition = TransitionDeclaration::new(&["opacity", "color", "rotate"])
            .with_duration(Time::Milliseconds(150.0))
            .with_duration(Time::Milliseconds(300.0));

        let mut style = Map::new();
        style.insert("opacity".into(), Value::from(0.5));
        style.insert(
            "transform".into(),
            Value::from(vec![Value::entry("rotate", "90deg".into())]),
        );

        let targets = build_transition_targets(&transition, &style, &[], &refs, &tracking);
        let summary: Vec<_> = targets
            .iter()
            .map(|t| (t.property.as_str(), t.value.to_string(), t.duration_ms))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("opacity", "0.5".to_string(), 150.0),
                ("color", "black".to_string(), 300.0),
                ("rotate", "90deg".to_string(), 150.0),
            ]
        );
    }
}
