//! Descriptor resolution.
//!
//! Turns a compiled [`Descriptor`] into a concrete [`Value`], reading
//! variables, environment units and layout through the pass's tracking so
//! the result stays correct when any of them change.
//!
//! Resolution never fails outward. A descriptor that cannot produce a usable
//! value (mixed calc units, an unknown variable, malformed platform
//! arguments) resolves to `None` and the declaration is skipped.

mod calc;
mod color;
mod platform;

pub use calc::{CalcMode, CalcResult};

use ncss::{Descriptor, FunctionCall, FunctionKind, Map, TransformKey, Value, units};

use crate::error::ResolveError;
use crate::guard::Guard;
use crate::state::{ReducerState, ReducerTracking, Refs};
use crate::variables::VariableValue;

/// Deepest descriptor nesting followed before giving up. Catches variables
/// that (indirectly) reference themselves.
pub const MAX_DEPTH: usize = 64;

/// Resolves `descriptor` for one component.
///
/// `style` is the style built so far in this pass; `em()` reads its
/// `fontSize` and `rnw()`/`rnh()` its `width`/`height`. With
/// `cast_to_array`, single values come back wrapped in an array.
///
/// ```
/// use ncss::{Descriptor, StyleSheet, Value};
/// use interop::resolve::resolve_value;
/// use interop::testing::TestHarness;
///
/// let harness = TestHarness::new(StyleSheet::new());
/// let (state, refs, mut tracking) = harness.pass_inputs(Default::default());
///
/// let padding = Descriptor::function("rem", [Descriptor::from(2)]);
/// let value = resolve_value(&state, &refs, &mut tracking, Some(&padding), None, false);
/// assert_eq!(value, Some(Value::from(28)));
/// ```
pub fn resolve_value(
    state: &ReducerState,
    refs: &Refs,
    tracking: &mut ReducerTracking,
    descriptor: Option<&Descriptor>,
    style: Option<&Map>,
    cast_to_array: bool,
) -> Option<Value> {
    let descriptor = descriptor?;
    let mut resolver = Resolver {
        state,
        refs,
        tracking,
        style,
        depth: 0,
    };
    match resolver.value(descriptor, cast_to_array) {
        Ok(value) => value,
        Err(err) => {
            if !state.options.trusted {
                log::error!("failed to resolve {:?}: {}", descriptor, err);
            }
            None
        }
    }
}

/// Rounds to two decimals, nudging halves away from zero.
pub fn round(n: f64) -> f64 {
    ((n + f64::EPSILON) * 100.0).round() / 100.0
}

type Resolved = Result<Option<Value>, ResolveError>;

pub(crate) struct Resolver<'a> {
    pub(crate) state: &'a ReducerState,
    pub(crate) refs: &'a Refs,
    pub(crate) tracking: &'a mut ReducerTracking,
    pub(crate) style: Option<&'a Map>,
    depth: usize,
}

impl Resolver<'_> {
    /// Full resolution: px strings become numbers, arrays are flattened one
    /// level and drop unresolvable items.
    pub(crate) fn value(&mut self, descriptor: &Descriptor, cast_to_array: bool) -> Resolved {
        match descriptor {
            Descriptor::Bool(b) => Ok(Some(Value::Bool(*b))),
            Descriptor::Number(n) => Ok(Some(Value::Number(*n))),
            Descriptor::String(s) => Ok(Some(match units::strip_px(s) {
                Some(n) => Value::Number(n),
                None => Value::String(s.clone()),
            })),
            Descriptor::Array(items) => {
                let mut resolved = Vec::with_capacity(items.len());
                for item in items {
                    match self.value(item, false)? {
                        Some(Value::Array(nested)) => resolved.extend(nested),
                        Some(value) => resolved.push(value),
                        None => {}
                    }
                }
                Ok(Some(Value::Array(resolved)))
            }
            Descriptor::Function(call) => {
                self.depth += 1;
                let result = if self.depth > MAX_DEPTH {
                    Err(ResolveError::DepthExceeded(MAX_DEPTH))
                } else {
                    self.function(call, cast_to_array)
                };
                self.depth -= 1;
                result
            }
        }
    }

    /// Argument resolution: literals pass through untouched, arrays keep
    /// their shape, function calls are resolved.
    pub(crate) fn arg(&mut self, descriptor: Option<&Descriptor>) -> Resolved {
        match descriptor {
            None => Ok(None),
            Some(Descriptor::Bool(b)) => Ok(Some(Value::Bool(*b))),
            Some(Descriptor::Number(n)) => Ok(Some(Value::Number(*n))),
            Some(Descriptor::String(s)) => Ok(Some(Value::String(s.clone()))),
            Some(Descriptor::Array(items)) => {
                let mut resolved = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(value) = self.arg(Some(item))? {
                        resolved.push(value);
                    }
                }
                Ok(Some(Value::Array(resolved)))
            }
            Some(function @ Descriptor::Function(_)) => self.value(function, false),
        }
    }

    /// A numeric argument, or `None`.
    pub(crate) fn number_arg(
        &mut self,
        descriptor: Option<&Descriptor>,
    ) -> Result<Option<f64>, ResolveError> {
        Ok(self.arg(descriptor)?.and_then(|v| v.as_f64()))
    }

    fn function(&mut self, call: &FunctionCall, cast_to_array: bool) -> Resolved {
        let cast = |value: Option<Value>| match value {
            Some(value) if cast_to_array && !matches!(value, Value::Array(_)) => {
                Some(Value::Array(vec![value]))
            }
            other => other,
        };

        let effect = self.tracking.effect.clone();
        let refs = self.refs;
        let environment = &refs.environment;

        Ok(match call.kind() {
            FunctionKind::Var => {
                let value = match self.arg(call.arg(0))? {
                    Some(Value::String(name)) => self.variable(&name)?,
                    other => other,
                };
                let value = match (value, call.arg(1)) {
                    (None, Some(fallback)) => self.value(fallback, false)?,
                    (value, _) => value,
                };
                cast(value)
            }
            FunctionKind::Calc => cast(self.calc(call.args())?.map(|r| r.value())),
            FunctionKind::Min => cast(self.extremum(call.args(), f64::min)?),
            FunctionKind::Max => cast(self.extremum(call.args(), f64::max)?),
            FunctionKind::Clamp => cast(self.clamp(call.args())?),
            FunctionKind::Vh => {
                let factor = environment.window_height.get(Some(&effect)) / 100.0;
                cast(self.scaled(call, factor)?)
            }
            FunctionKind::Vw => {
                let factor = environment.window_width.get(Some(&effect)) / 100.0;
                cast(self.scaled(call, factor)?)
            }
            FunctionKind::Em => {
                let font_size = match self.style_number("fontSize") {
                    Some(size) => size,
                    None => environment.rem.get(Some(&effect)),
                };
                cast(self.scaled(call, font_size)?)
            }
            FunctionKind::Rem => {
                let rem = environment.rem.get(Some(&effect));
                cast(self.scaled(call, rem)?)
            }
            FunctionKind::Rnh => {
                let height = match self.style_number("height") {
                    Some(height) => height,
                    None => refs.shared_state.layout_or_zero(Some(&effect)).1,
                };
                cast(self.scaled(call, height)?)
            }
            FunctionKind::Rnw => {
                let width = match self.style_number("width") {
                    Some(width) => width,
                    None => refs.shared_state.layout_or_zero(Some(&effect)).0,
                };
                cast(self.scaled(call, width)?)
            }
            FunctionKind::Rgb | FunctionKind::Rgba => {
                cast(self.color(call, &[(3, "rgb"), (4, "rgba")])?)
            }
            FunctionKind::Hsl | FunctionKind::Hsla => {
                cast(self.color(call, &[(3, "hsl"), (4, "hsla")])?)
            }
            FunctionKind::Hwb => cast(self.color(call, &[(3, "hwb")])?),
            FunctionKind::HairlineWidth
            | FunctionKind::PlatformColor
            | FunctionKind::PlatformSelect
            | FunctionKind::GetPixelSizeForLayoutSize
            | FunctionKind::FontScale
            | FunctionKind::PixelScale
            | FunctionKind::PixelScaleSelect
            | FunctionKind::FontScaleSelect
            | FunctionKind::RoundToNearestPixel => cast(self.platform(call)?),
            FunctionKind::Transform(TransformKey::Scale) if call.args().len() == 2 => {
                self.transform_pair(call, TransformKey::ScaleX, TransformKey::ScaleY)?
            }
            FunctionKind::Transform(key) => cast(
                self.arg(call.arg(0))?
                    .map(|value| Value::entry(key.as_str(), value)),
            ),
            FunctionKind::Translate => {
                self.transform_pair(call, TransformKey::TranslateX, TransformKey::TranslateY)?
            }
            FunctionKind::Unknown => {
                let mut args = Vec::with_capacity(call.args().len());
                for arg in call.args() {
                    if let Some(value) = self.arg(Some(arg))? {
                        args.push(value.to_string());
                    }
                }
                cast(Some(Value::String(format!(
                    "{}({})",
                    call.name(),
                    args.join(", ")
                ))))
            }
        })
    }

    /// Looks a variable up: this component's own rules, then `*`, then the
    /// inherited scope chain.
    fn variable(&mut self, name: &str) -> Resolved {
        if name.is_empty() {
            return Ok(None);
        }

        let mut found = self.state.variables.get(name).cloned();
        if found.is_none() {
            found = self
                .state
                .registry
                .universal_variable(name, Some(&self.tracking.effect));
        }
        if found.is_none() {
            found = match self.refs.variables.lookup(name) {
                Some(VariableValue::Reactive(cell)) => cell.get(Some(&self.tracking.effect)),
                Some(VariableValue::Static(value)) => {
                    self.tracking.push_guard(Guard::Variable {
                        name: name.to_string(),
                        value: Some(value.clone()),
                    });
                    Some(value.clone())
                }
                None => {
                    self.tracking.push_guard(Guard::Variable {
                        name: name.to_string(),
                        value: None,
                    });
                    self.state
                        .registry
                        .root_variable(name, Some(&self.tracking.effect))
                }
            };
        }

        match found {
            Some(descriptor) => {
                self.depth += 1;
                let result = if self.depth > MAX_DEPTH {
                    Err(ResolveError::DepthExceeded(MAX_DEPTH))
                } else {
                    self.value(&descriptor, false)
                };
                self.depth -= 1;
                result
            }
            None => Ok(None),
        }
    }

    fn style_number(&self, property: &str) -> Option<f64> {
        self.style
            .and_then(|style| style.get(property))
            .and_then(Value::as_f64)
    }

    /// `factor * arg`, rounded; `None` unless the argument is a number.
    fn scaled(&mut self, call: &FunctionCall, factor: f64) -> Resolved {
        Ok(self
            .number_arg(call.arg(0))?
            .map(|n| Value::Number(round(factor * n))))
    }

    /// Two-argument transform shorthands expand to both axis entries.
    fn transform_pair(
        &mut self,
        call: &FunctionCall,
        x: TransformKey,
        y: TransformKey,
    ) -> Resolved {
        let mut entries = Vec::with_capacity(2);
        if let Some(value) = self.arg(call.arg(0))? {
            entries.push(Value::entry(x.as_str(), value));
        }
        if let Some(value) = self.arg(call.arg(1))? {
            entries.push(Value::entry(y.as_str(), value));
        }
        Ok((!entries.is_empty()).then_some(Value::Array(entries)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestHarness;
    use ncss::StyleSheet;

    fn resolve(harness: &TestHarness, descriptor: Descriptor) -> Option<Value> {
        let (state, refs, mut tracking) = harness.pass_inputs(Map::new());
        resolve_value(&state, &refs, &mut tracking, Some(&descriptor), None, false)
    }

    #[test]
    fn rounding_nudges_halves_up() {
        assert_eq!(round(1.005), 1.01);
        assert_eq!(round(2.0 / 3.0), 0.67);
    }

    #[test]
    fn px_strings_become_numbers() {
        let harness = TestHarness::new(StyleSheet::new());
        assert_eq!(resolve(&harness, "10px".into()), Some(Value::from(10)));
        assert_eq!(resolve(&harness, "10.5px".into()), Some(Value::from(10.5)));
        assert_eq!(resolve(&harness, "50%".into()), Some(Value::from("50%")));
        assert_eq!(resolve(&harness, "pxx".into()), Some(Value::from("pxx")));
    }

    #[test]
    fn arrays_flatten_and_drop_missing_values() {
        let harness = TestHarness::new(StyleSheet::new());
        let descriptor = Descriptor::Array(vec![
            Descriptor::function("translate", [1.into(), 2.into()]),
            Descriptor::var("--missing", None),
            Descriptor::from(3),
        ]);
        assert_eq!(
            resolve(&harness, descriptor),
            Some(Value::from(vec![
                Value::entry("translateX", 1.into()),
                Value::entry("translateY", 2.into()),
                Value::from(3),
            ]))
        );
    }

    #[test]
    fn var_falls_back_when_missing() {
        let harness = TestHarness::new(StyleSheet::new());
        let descriptor = Descriptor::var("--missing", Some("10px".into()));
        assert_eq!(resolve(&harness, descriptor), Some(Value::from(10)));
    }

    #[test]
    fn self_referencing_variables_resolve_to_nothing() {
        let mut sheet = StyleSheet::new();
        sheet.set_universal_variable("--loop", Descriptor::var("--loop", None));
        let harness = TestHarness::new(sheet);
        assert_eq!(resolve(&harness, Descriptor::var("--loop", None)), None);
    }

    #[test]
    fn unknown_functions_print_their_arguments() {
        let harness = TestHarness::new(StyleSheet::new());
        let descriptor = Descriptor::function(
            "blur",
            [Descriptor::from(4), Descriptor::function("rem", [1.into()])],
        );
        assert_eq!(resolve(&harness, descriptor), Some(Value::from("blur(4, 14)")));
    }

    #[test]
    fn transforms_wrap_their_argument() {
        let harness = TestHarness::new(StyleSheet::new());
        assert_eq!(
            resolve(&harness, Descriptor::function("rotate", ["45deg".into()])),
            Some(Value::entry("rotate", "45deg".into()))
        );
        assert_eq!(
            resolve(&harness, Descriptor::function("scale", [2.into(), 3.into()])),
            Some(Value::from(vec![
                Value::entry("scaleX", 2.into()),
                Value::entry("scaleY", 3.into()),
            ]))
        );
    }

    #[test]
    fn cast_wraps_single_values() {
        let harness = TestHarness::new(StyleSheet::new());
        let (state, refs, mut tracking) = harness.pass_inputs(Map::new());
        let descriptor = Descriptor::function("rotate", ["90deg".into()]);
        let value = resolve_value(&state, &refs, &mut tracking, Some(&descriptor), None, true);
        assert_eq!(
            value,
            Some(Value::from(vec![Value::entry("rotate", "90deg".into())]))
        );
    }

    #[test]
    fn em_prefers_the_style_font_size() {
        let harness = TestHarness::new(StyleSheet::new());
        let (state, refs, mut tracking) = harness.pass_inputs(Map::new());
        let mut style = Map::new();
        style.insert("fontSize".to_string(), Value::from(20));

        let em = Descriptor::function("em", [1.5.into()]);
        assert_eq!(
            resolve_value(&state, &refs, &mut tracking, Some(&em), Some(&style), false),
            Some(Value::from(30))
        );
        assert_eq!(
            resolve_value(&state, &refs, &mut tracking, Some(&em), None, false),
            Some(Value::from(21))
        );
    }

    #[test]
    fn viewport_units_subscribe_the_pass() {
        let harness = TestHarness::new(StyleSheet::new());
        let (state, refs, mut tracking) = harness.pass_inputs(Map::new());
        let vw = Descriptor::function("vw", [50.into()]);

        let value = resolve_value(&state, &refs, &mut tracking, Some(&vw), None, false);
        assert_eq!(value, Some(Value::from(187.5)));

        harness.environment.window_width.set(400.0);
        assert_eq!(tracking.effect.run_count(), 1);
    }
}
