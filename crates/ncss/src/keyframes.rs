//! Precomputed `@keyframes` interpolation tables.

use crate::descriptor::Descriptor;
use crate::rule::EasingFunction;

/// The sentinel keyframe value meaning "the property's pre-animation value".
pub const INHERIT_VALUE: &str = "!INHERIT!";

/// One animated property: its breakpoints and the unresolved value at each.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyframeInterpolation {
    /// Property path relative to the component's target prop.
    pub path: Vec<String>,
    /// Progress breakpoints in `0.0..=1.0`, ascending.
    pub progress: Vec<f64>,
    /// Easing per segment; a single entry applies to every segment.
    pub easing: Vec<EasingFunction>,
    /// One descriptor per breakpoint.
    pub values: Vec<Descriptor>,
    /// The property lives in the `transform` array.
    pub transform: bool,
}

impl KeyframeInterpolation {
    pub fn new(path: &str, breakpoints: impl IntoIterator<Item = (f64, Descriptor)>) -> Self {
        let (progress, values): (Vec<f64>, Vec<Descriptor>) = breakpoints.into_iter().unzip();
        let path: Vec<String> = path.split('.').map(str::to_string).collect();
        let transform = path
            .last()
            .is_some_and(|p| crate::descriptor::is_transform_key(p));
        Self {
            path,
            progress,
            easing: Vec::new(),
            values,
            transform,
        }
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing.push(easing);
        self
    }

    /// Easing for the segment that ends at breakpoint `index`.
    pub fn easing_at(&self, index: usize) -> EasingFunction {
        self.easing
            .get(index)
            .or_else(|| self.easing.first())
            .copied()
            .unwrap_or_default()
    }
}

/// A compiled `@keyframes` block.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keyframes {
    pub interpolations: Vec<KeyframeInterpolation>,
}

impl Keyframes {
    pub fn new(interpolations: Vec<KeyframeInterpolation>) -> Self {
        Self { interpolations }
    }

    /// The first animated property that is a transform entry.
    pub fn transform_interpolation(&self) -> Option<&KeyframeInterpolation> {
        self.interpolations.iter().find(|i| i.transform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_flag_is_derived_from_the_path() {
        let spin = KeyframeInterpolation::new(
            "rotate",
            [(0.0, Descriptor::from("0deg")), (1.0, Descriptor::from("360deg"))],
        );
        assert!(spin.transform);
        assert_eq!(spin.progress, vec![0.0, 1.0]);

        let fade = KeyframeInterpolation::new("opacity", [(0.0, 0.into()), (1.0, 1.into())]);
        assert!(!fade.transform);
        let keyframes = Keyframes::new(vec![fade, spin]);
        assert_eq!(
            keyframes.transform_interpolation().map(|i| i.path.join(".")),
            Some("rotate".to_string())
        );
    }

    #[test]
    fn easing_falls_back_to_first_then_linear() {
        let fade = KeyframeInterpolation::new("opacity", [(0.0, 0.into()), (1.0, 1.into())]);
        assert_eq!(fade.easing_at(3), EasingFunction::Linear);

        let eased = fade.with_easing(EasingFunction::EaseIn);
        assert_eq!(eased.easing_at(3), EasingFunction::EaseIn);
    }
}
