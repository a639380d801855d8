use ncss::{FunctionCall, Value, units};

use super::Resolver;
use crate::error::ResolveError;

/// Appends `value` to `out`, flattening nested arrays.
fn flatten_into(out: &mut Vec<Value>, value: Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten_into(out, item);
            }
        }
        other => out.push(other),
    }
}

/// Picks the function name for an argument count and prints the call.
fn format_color(args: &[Value], names: &[(usize, &str)]) -> Option<String> {
    let (_, name) = names.iter().find(|(arity, _)| *arity == args.len())?;
    let args: Vec<String> = args.iter().map(Value::to_string).collect();
    Some(format!("{}({})", name, args.join(", ")))
}

impl Resolver<'_> {
    /// Reassembles `rgb()`/`hsl()`/`hwb()` from resolved arguments.
    ///
    /// When the argument count does not match any arity, string arguments
    /// are split on commas, slashes and whitespace and the match retried, so
    /// `rgb(var(--channels) / 0.5)` works with `--channels: 255 0 0`.
    pub(crate) fn color(
        &mut self,
        call: &FunctionCall,
        names: &[(usize, &str)],
    ) -> Result<Option<Value>, ResolveError> {
        let mut args = Vec::with_capacity(call.args().len());
        for arg in call.args() {
            if let Some(value) = self.arg(Some(arg))? {
                flatten_into(&mut args, value);
            }
        }

        if let Some(color) = format_color(&args, names) {
            return Ok(Some(Value::String(color)));
        }

        let split: Vec<Value> = args
            .into_iter()
            .flat_map(|arg| match arg {
                Value::String(s) => units::split_list_tokens(&s)
                    .into_iter()
                    .map(Value::from)
                    .collect(),
                other => vec![other],
            })
            .collect();

        Ok(format_color(&split, names).map(Value::String))
    }
}

#[cfg(test)]
mod tests {
    use ncss::{Descriptor, Map, StyleSheet, Value};

    use crate::resolve::resolve_value;
    use crate::testing::TestHarness;

    fn eval(harness: &TestHarness, descriptor: Descriptor) -> Option<Value> {
        let (state, refs, mut tracking) = harness.pass_inputs(Map::new());
        resolve_value(&state, &refs, &mut tracking, Some(&descriptor), None, false)
    }

    #[test]
    fn arity_picks_the_function_name() {
        let harness = TestHarness::new(StyleSheet::new());
        let rgb = Descriptor::function("rgb", [255.into(), 0.into(), 0.into()]);
        assert_eq!(eval(&harness, rgb), Some(Value::from("rgb(255, 0, 0)")));

        let rgba = Descriptor::function("rgb", [255.into(), 0.into(), 0.into(), 0.5.into()]);
        assert_eq!(eval(&harness, rgba), Some(Value::from("rgba(255, 0, 0, 0.5)")));
    }

    #[test]
    fn space_separated_arguments_are_split() {
        let harness = TestHarness::new(StyleSheet::new());
        let spaced = Descriptor::function("rgb", ["255 0 0 / 1".into()]);
        let commas = Descriptor::function("rgba", [255.into(), 0.into(), 0.into(), 1.into()]);
        assert_eq!(eval(&harness, spaced), eval(&harness, commas));
    }

    #[test]
    fn variables_expand_before_splitting() {
        let mut sheet = StyleSheet::new();
        sheet.set_universal_variable("--channels", "120 40 200");
        let harness = TestHarness::new(sheet);

        let color = Descriptor::function(
            "rgb",
            [Descriptor::var("--channels", None), Descriptor::from(0.25)],
        );
        assert_eq!(eval(&harness, color), Some(Value::from("rgba(120, 40, 200, 0.25)")));
    }

    #[test]
    fn unmatched_arity_is_dropped() {
        let harness = TestHarness::new(StyleSheet::new());
        let hwb = Descriptor::function("hwb", [1.into(), 2.into()]);
        assert_eq!(eval(&harness, hwb), None);
    }
}
