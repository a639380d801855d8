//! Property defaults and style-object plumbing shared by the style pass
//! and the animation builder.

use ncss::{Map, Value, is_transform_key};
use phf::phf_map;

use crate::environment::{ColorScheme, Environment};
use crate::observable::Effect;

#[derive(Debug, Clone, Copy)]
enum DefaultValue {
    Number(f64),
    Text(&'static str),
    /// Black or white, against the system color scheme.
    ContrastColor,
}

static DEFAULT_VALUES: phf::Map<&'static str, DefaultValue> = phf_map! {
    "backgroundColor" => DefaultValue::Text("transparent"),
    "borderBottomColor" => DefaultValue::Text("transparent"),
    "borderBottomLeftRadius" => DefaultValue::Number(0.0),
    "borderBottomRightRadius" => DefaultValue::Number(0.0),
    "borderBottomWidth" => DefaultValue::Number(0.0),
    "borderColor" => DefaultValue::Text("transparent"),
    "borderLeftColor" => DefaultValue::Text("transparent"),
    "borderLeftWidth" => DefaultValue::Number(0.0),
    "borderRadius" => DefaultValue::Number(0.0),
    "borderRightColor" => DefaultValue::Text("transparent"),
    "borderRightWidth" => DefaultValue::Number(0.0),
    "borderTopColor" => DefaultValue::Text("transparent"),
    "borderTopWidth" => DefaultValue::Number(0.0),
    "borderWidth" => DefaultValue::Number(0.0),
    "bottom" => DefaultValue::Number(0.0),
    "color" => DefaultValue::ContrastColor,
    "flex" => DefaultValue::Number(1.0),
    "flexBasis" => DefaultValue::Number(1.0),
    "flexGrow" => DefaultValue::Number(1.0),
    "flexShrink" => DefaultValue::Number(0.0),
    "fontSize" => DefaultValue::Number(14.0),
    "fontWeight" => DefaultValue::Text("400"),
    "gap" => DefaultValue::Number(0.0),
    "left" => DefaultValue::Number(0.0),
    "lineHeight" => DefaultValue::Number(14.0),
    "margin" => DefaultValue::Number(0.0),
    "marginBottom" => DefaultValue::Number(0.0),
    "marginLeft" => DefaultValue::Number(0.0),
    "marginRight" => DefaultValue::Number(0.0),
    "marginTop" => DefaultValue::Number(0.0),
    "maxHeight" => DefaultValue::Number(99999.0),
    "maxWidth" => DefaultValue::Number(99999.0),
    "minHeight" => DefaultValue::Number(0.0),
    "minWidth" => DefaultValue::Number(0.0),
    "opacity" => DefaultValue::Number(1.0),
    "padding" => DefaultValue::Number(0.0),
    "paddingBottom" => DefaultValue::Number(0.0),
    "paddingLeft" => DefaultValue::Number(0.0),
    "paddingRight" => DefaultValue::Number(0.0),
    "paddingTop" => DefaultValue::Number(0.0),
    "perspective" => DefaultValue::Number(1.0),
    "right" => DefaultValue::Number(0.0),
    "rotate" => DefaultValue::Text("0deg"),
    "rotateX" => DefaultValue::Text("0deg"),
    "rotateY" => DefaultValue::Text("0deg"),
    "rotateZ" => DefaultValue::Text("0deg"),
    "scale" => DefaultValue::Number(1.0),
    "scaleX" => DefaultValue::Number(1.0),
    "scaleY" => DefaultValue::Number(1.0),
    "skewX" => DefaultValue::Text("0deg"),
    "skewY" => DefaultValue::Text("0deg"),
    "textShadowRadius" => DefaultValue::Number(0.0),
    "top" => DefaultValue::Number(0.0),
    "translateX" => DefaultValue::Number(0.0),
    "translateY" => DefaultValue::Number(0.0),
    "zIndex" => DefaultValue::Number(0.0),
};

/// The value a property animates from when nothing sets it.
pub fn default_value(
    property: &str,
    environment: &Environment,
    effect: Option<&Effect>,
) -> Option<Value> {
    Some(match DEFAULT_VALUES.get(property)? {
        DefaultValue::Number(n) => Value::Number(*n),
        DefaultValue::Text(s) => Value::from(*s),
        DefaultValue::ContrastColor => match environment.system_color_scheme.get(effect) {
            ColorScheme::Dark => Value::from("white"),
            ColorScheme::Light => Value::from("black"),
        },
    })
}

fn transform_entry<'a>(style: &'a Map, property: &str) -> Option<&'a Value> {
    style
        .get("transform")?
        .as_array()?
        .iter()
        .find_map(|entry| entry.get(property))
}

/// Reads `target + path` out of props, looking inside the `transform` array
/// for transform keys.
///
/// ```
/// use ncss::{Map, Value};
/// use interop::defaults::get_base_value;
///
/// let mut props = Map::new();
/// props.insert(
///     "style".to_string(),
///     Value::object([("transform", Value::from(vec![Value::entry("rotate", "45deg".into())]))]),
/// );
///
/// let target = vec!["style".to_string()];
/// let rotate = get_base_value(&props, &target, &["rotate".to_string()]);
/// assert_eq!(rotate, Some(Value::from("45deg")));
/// ```
pub fn get_base_value(props: &Map, target: &[String], path: &[String]) -> Option<Value> {
    let segments: Vec<&str> = target.iter().chain(path).map(String::as_str).collect();
    let (last, parents) = segments.split_last()?;

    let mut current = props;
    for segment in parents {
        current = current.get(*segment)?.as_object()?;
    }

    match current.get(*last) {
        Some(value) => Some(value.clone()),
        None if is_transform_key(last) => transform_entry(current, last).cloned(),
        None => None,
    }
}

/// Writes `value` at `path`, creating intermediate objects. Transform keys
/// replace or append their entry in the `transform` array.
pub fn set_deep(target: &mut Map, path: &[String], value: Value) {
    let Some((property, parents)) = path.split_last() else {
        return;
    };

    let mut current = target;
    for segment in parents {
        let slot = current
            .entry(segment.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !matches!(slot, Value::Object(_)) {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return;
        };
        current = next;
    }

    if !is_transform_key(property) {
        current.insert(property.clone(), value);
        return;
    }

    let transform = current
        .entry("transform".to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !matches!(transform, Value::Array(_)) {
        *transform = Value::Array(Vec::new());
    }
    let Value::Array(entries) = transform else {
        return;
    };

    if let Some(entry) = entries
        .iter_mut()
        .filter_map(Value::as_object_mut)
        .find(|entry| entry.contains_key(property))
    {
        entry.insert(property.clone(), value);
        return;
    }
    entries.push(Value::entry(property.clone(), value));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(p: &str) -> Vec<String> {
        p.split('.').map(str::to_string).collect()
    }

    #[test]
    fn transform_keys_share_one_array() {
        let mut style = Map::new();
        set_deep(&mut style, &path("rotate"), "10deg".into());
        set_deep(&mut style, &path("scale"), 2.into());
        set_deep(&mut style, &path("rotate"), "20deg".into());

        assert_eq!(
            Value::Object(style).to_string(),
            "{transform: [{rotate: 20deg}, {scale: 2}]}"
        );
    }

    #[test]
    fn nested_paths_create_objects() {
        let mut style = Map::new();
        set_deep(&mut style, &path("textShadowOffset.width"), 2.into());
        set_deep(&mut style, &path("textShadowOffset.height"), 1.into());
        assert_eq!(
            Value::Object(style).to_string(),
            "{textShadowOffset: {height: 1, width: 2}}"
        );
    }

    #[test]
    fn color_default_follows_the_system_scheme() {
        let env = Environment::default();
        assert_eq!(default_value("color", &env, None), Some("black".into()));
        env.set_system_color_scheme(ColorScheme::Dark);
        assert_eq!(default_value("color", &env, None), Some("white".into()));
        assert_eq!(default_value("unknownProperty", &env, None), None);
    }

    #[test]
    fn base_values_are_read_below_the_target() {
        let mut props = Map::new();
        props.insert("style".into(), Value::object([("opacity", Value::from(0.5))]));
        let target = path("style");
        assert_eq!(
            get_base_value(&props, &target, &path("opacity")),
            Some(Value::from(0.5))
        );
        assert_eq!(get_base_value(&props, &target, &path("scale")), None);
    }
}
