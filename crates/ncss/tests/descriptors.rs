use ncss::units::{parse_percentage, split_list_tokens, strip_px};
use ncss::{
    Descriptor, FunctionKind, Length, LengthUnit, NcssError, StyleRule, StyleSheet, TransformKey,
    Value, format_number, is_transform_key,
};

// ============================================================================
// FUNCTION DESCRIPTORS
// ============================================================================

#[test]
fn test_function_kind_is_derived_from_the_name() {
    let calc = Descriptor::function("calc", [Descriptor::from(1)]);
    let call = calc.as_function().unwrap();
    assert_eq!(call.name(), "calc");
    assert_eq!(call.kind(), FunctionKind::Calc);
    assert_eq!(call.args().len(), 1);
}

#[test]
fn test_unknown_functions_keep_their_name() {
    let blur = Descriptor::function("blur", [Descriptor::from("4px")]);
    let call = blur.as_function().unwrap();
    assert_eq!(call.kind(), FunctionKind::Unknown);
    assert_eq!(call.name(), "blur");
}

#[test]
fn test_var_with_fallback() {
    let var = Descriptor::var("--gap", Some(Descriptor::from("8px")));
    let call = var.as_function().unwrap();
    assert_eq!(call.kind(), FunctionKind::Var);
    assert_eq!(call.arg(0), Some(&Descriptor::from("--gap")));
    assert_eq!(call.arg(1), Some(&Descriptor::from("8px")));
    assert_eq!(call.arg(2), None);
}

#[test]
fn test_transform_functions() {
    let rotate = Descriptor::function("rotate", [Descriptor::from("45deg")]);
    assert_eq!(
        rotate.as_function().unwrap().kind(),
        FunctionKind::Transform(TransformKey::Rotate)
    );
    assert_eq!(
        Descriptor::function("translate", Vec::new())
            .as_function()
            .unwrap()
            .kind(),
        FunctionKind::Translate
    );
    assert!(is_transform_key("scaleX"));
    assert!(!is_transform_key("opacity"));
    assert!(!is_transform_key("translate"));
}

// ============================================================================
// LITERALS
// ============================================================================

#[test]
fn test_length_units() {
    assert_eq!(Length::parse("10vw").unwrap().unit, LengthUnit::Vw);
    assert_eq!(Length::parse("25%").unwrap().unit, LengthUnit::Percent);
    assert_eq!(
        Length::parse("abc"),
        Err(NcssError::InvalidLength("abc".to_string()))
    );
}

#[test]
fn test_percentages_and_px() {
    assert_eq!(parse_percentage("12.5%"), Ok(12.5));
    assert!(matches!(
        parse_percentage("12px"),
        Err(NcssError::InvalidPercentage(_))
    ));
    assert_eq!(strip_px("10px"), Some(10.0));
    assert_eq!(strip_px("10"), None);
    assert_eq!(strip_px("10rem"), None);
}

#[test]
fn test_list_tokens() {
    assert_eq!(split_list_tokens("255 0 0 / 1"), vec!["255", "0", "0", "1"]);
    assert_eq!(split_list_tokens(" 1,2 ,, 3 "), vec!["1", "2", "3"]);
    assert!(split_list_tokens("   ").is_empty());
}

// ============================================================================
// VALUES
// ============================================================================

#[test]
fn test_number_formatting() {
    assert_eq!(format_number(14.0), "14");
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(0.25), "0.25");
}

#[test]
fn test_style_object_display() {
    let style = Value::object([
        ("color", Value::from("red")),
        (
            "transform",
            Value::from(vec![Value::entry("rotate", "45deg".into())]),
        ),
        ("opacity", Value::from(0.5)),
    ]);
    assert_eq!(
        style.to_string(),
        "{color: red, opacity: 0.5, transform: [{rotate: 45deg}]}"
    );
}

#[test]
fn test_truthiness() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::from("").is_truthy());
    assert!(!Value::from(0).is_truthy());
    assert!(Value::from("no").is_truthy());
}

// ============================================================================
// STYLESHEETS
// ============================================================================

#[test]
fn test_rules_keep_stylesheet_order() {
    let mut sheet = StyleSheet::new();
    sheet
        .add_rule("a", StyleRule::new().declare("color", "red"))
        .add_rule("b", StyleRule::new().declare("textShadowOffset.width", 2))
        .add_rule("a", StyleRule::new().declare("opacity", 1).important());

    let names: Vec<&str> = sheet.rules.iter().map(|r| r.class_name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "a"]);
    assert_eq!(
        sheet.rules[1].rule.declarations[0].path,
        vec!["textShadowOffset", "width"]
    );
    assert!(sheet.rules[2].rule.important);
}
