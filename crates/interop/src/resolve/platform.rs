use ncss::{Descriptor, FunctionCall, FunctionKind, Value, format_number};

use super::Resolver;
use crate::environment::PlatformOs;
use crate::error::ResolveError;

/// Reads `[[key, value], ...]` argument pairs.
fn pairs<'d>(call: &'d FunctionCall) -> Result<Vec<(String, &'d Descriptor)>, ResolveError> {
    call.args()
        .iter()
        .map(|arg| match arg {
            Descriptor::Array(pair) if pair.len() == 2 => {
                let key = match &pair[0] {
                    Descriptor::String(key) => key.clone(),
                    Descriptor::Number(n) => format_number(*n),
                    _ => return Err(malformed(call, "keys must be strings or numbers")),
                };
                Ok((key, &pair[1]))
            }
            _ => Err(malformed(call, "expected [key, value] pairs")),
        })
        .collect()
}

fn malformed(call: &FunctionCall, reason: &str) -> ResolveError {
    ResolveError::MalformedArguments {
        function: call.name().to_string(),
        reason: reason.to_string(),
    }
}

fn select<'d>(pairs: &[(String, &'d Descriptor)], keys: &[&str]) -> Option<&'d Descriptor> {
    keys.iter()
        .find_map(|key| pairs.iter().find(|(k, _)| k.as_str() == *key).map(|(_, d)| *d))
}

impl Resolver<'_> {
    /// Device and platform helpers.
    pub(crate) fn platform(&mut self, call: &FunctionCall) -> Result<Option<Value>, ResolveError> {
        let effect = self.tracking.effect.clone();
        let refs = self.refs;
        let environment = &refs.environment;

        match call.kind() {
            FunctionKind::HairlineWidth => {
                Ok(Some(Value::Number(environment.hairline_width(Some(&effect)))))
            }
            FunctionKind::PlatformColor => {
                let mut names = Vec::with_capacity(call.args().len());
                for arg in call.args() {
                    if let Some(value) = self.arg(Some(arg))? {
                        names.push(value);
                    }
                }
                let key = match environment.os {
                    PlatformOs::Android => "resource_paths",
                    _ => "semantic",
                };
                Ok(Some(Value::entry(key, Value::Array(names))))
            }
            FunctionKind::PlatformSelect => {
                let pairs = pairs(call)?;
                let os = environment.os.as_str();
                let selected = if environment.os.is_native() {
                    select(&pairs, &[os, "native", "default"])
                } else {
                    select(&pairs, &[os, "default"])
                };
                self.arg(selected)
            }
            FunctionKind::PixelScaleSelect | FunctionKind::FontScaleSelect => {
                let pairs = pairs(call)?;
                let current = if call.kind() == FunctionKind::PixelScaleSelect {
                    environment.pixel_ratio.get(Some(&effect))
                } else {
                    environment.font_scale.get(Some(&effect))
                };
                let selected = pairs
                    .iter()
                    .find(|(key, _)| key.parse::<f64>().is_ok_and(|k| k == current))
                    .map(|(_, d)| *d)
                    .or_else(|| select(&pairs, &["default"]));
                self.arg(selected)
            }
            FunctionKind::GetPixelSizeForLayoutSize => {
                let size = self.number_arg(call.arg(0))?;
                Ok(size.map(|n| {
                    Value::Number(environment.pixel_size_for_layout_size(n, Some(&effect)))
                }))
            }
            FunctionKind::RoundToNearestPixel => {
                let size = self.number_arg(call.arg(0))?;
                Ok(size.map(|n| Value::Number(environment.round_to_nearest_pixel(n, Some(&effect)))))
            }
            FunctionKind::FontScale => {
                let scale = environment.font_scale.get(Some(&effect));
                Ok(self.number_arg(call.arg(0))?.map(|n| Value::Number(scale * n)))
            }
            FunctionKind::PixelScale => {
                let ratio = environment.pixel_ratio.get(Some(&effect));
                Ok(self.number_arg(call.arg(0))?.map(|n| Value::Number(ratio * n)))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use ncss::{Descriptor, Map, StyleSheet, Value};

    use crate::environment::{EnvironmentConfig, PlatformOs};
    use crate::resolve::resolve_value;
    use crate::testing::TestHarness;

    fn pair(key: &str, value: Descriptor) -> Descriptor {
        Descriptor::Array(vec![Descriptor::from(key), value])
    }

    fn eval(harness: &TestHarness, descriptor: Descriptor) -> Option<Value> {
        let (state, refs, mut tracking) = harness.pass_inputs(Map::new());
        resolve_value(&state, &refs, &mut tracking, Some(&descriptor), None, false)
    }

    #[test]
    fn platform_select_prefers_os_then_native_then_default() {
        let select = |pairs: Vec<Descriptor>| Descriptor::function("platformSelect", pairs);

        let ios = TestHarness::new(StyleSheet::new());
        assert_eq!(
            eval(
                &ios,
                select(vec![pair("android", "green".into()), pair("ios", "blue".into())])
            ),
            Some(Value::from("blue"))
        );
        assert_eq!(
            eval(
                &ios,
                select(vec![pair("native", "gray".into()), pair("default", "black".into())])
            ),
            Some(Value::from("gray"))
        );

        let web = TestHarness::with_environment(
            StyleSheet::new(),
            EnvironmentConfig {
                os: PlatformOs::Web,
                ..Default::default()
            },
        );
        assert_eq!(
            eval(
                &web,
                select(vec![pair("native", "gray".into()), pair("default", "black".into())])
            ),
            Some(Value::from("black"))
        );
    }

    #[test]
    fn malformed_platform_select_is_dropped() {
        let harness = TestHarness::new(StyleSheet::new());
        let bad = Descriptor::function("platformSelect", [Descriptor::from("ios")]);
        assert_eq!(eval(&harness, bad), None);
    }

    #[test]
    fn platform_color_names_are_kept_in_order() {
        let harness = TestHarness::new(StyleSheet::new());
        let color = Descriptor::function("platformColor", ["systemRed".into(), "red".into()]);
        assert_eq!(
            eval(&harness, color),
            Some(Value::entry(
                "semantic",
                Value::from(vec![Value::from("systemRed"), Value::from("red")])
            ))
        );
    }

    #[test]
    fn pixel_scale_select_matches_the_current_ratio() {
        let harness = TestHarness::new(StyleSheet::new());
        let select = Descriptor::function(
            "pixelScaleSelect",
            [
                Descriptor::Array(vec![3.into(), 1.into()]),
                Descriptor::Array(vec![2.into(), 0.5.into()]),
                pair("default", 2.into()),
            ],
        );
        assert_eq!(eval(&harness, select), Some(Value::from(0.5)));
    }

    #[test]
    fn scale_helpers_multiply() {
        let harness = TestHarness::new(StyleSheet::new());
        assert_eq!(
            eval(&harness, Descriptor::function("pixelScale", [4.into()])),
            Some(Value::from(8))
        );
        assert_eq!(
            eval(&harness, Descriptor::function("hairlineWidth", Vec::new())),
            Some(Value::from(0.5))
        );
    }
}
