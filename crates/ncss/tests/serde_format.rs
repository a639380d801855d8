#![cfg(feature = "serde")]

use ncss::{Descriptor, FunctionKind, StyleSheet, Value};

// ============================================================================
// DESCRIPTORS
// ============================================================================

#[test]
fn test_function_descriptor_wire_shape() {
    let json = r#"{ "name": "var", "arguments": ["--gap", "8px"] }"#;
    let descriptor: Descriptor = serde_json::from_str(json).unwrap();

    let call = descriptor.as_function().unwrap();
    assert_eq!(call.kind(), FunctionKind::Var);
    assert_eq!(call.args(), &[Descriptor::from("--gap"), Descriptor::from("8px")]);
}

#[test]
fn test_nested_descriptors() {
    let json = r#"[12, true, { "name": "rem", "arguments": [1] }]"#;
    let descriptor: Descriptor = serde_json::from_str(json).unwrap();
    assert_eq!(
        descriptor,
        Descriptor::Array(vec![
            Descriptor::from(12),
            Descriptor::from(true),
            Descriptor::function("rem", [Descriptor::from(1)]),
        ])
    );
}

#[test]
fn test_missing_arguments_default_to_empty() {
    let descriptor: Descriptor = serde_json::from_str(r#"{ "name": "hairlineWidth" }"#).unwrap();
    let call = descriptor.as_function().unwrap();
    assert_eq!(call.kind(), FunctionKind::HairlineWidth);
    assert!(call.args().is_empty());
}

// ============================================================================
// VALUES AND STYLESHEETS
// ============================================================================

#[test]
fn test_props_are_untagged() {
    let props: Value =
        serde_json::from_str(r#"{ "className": "p-4", "disabled": null, "dataSet": { "a": 1 } }"#)
            .unwrap();
    assert_eq!(props.get("className"), Some(&Value::from("p-4")));
    assert_eq!(props.get("disabled"), Some(&Value::Null));
    assert_eq!(props.get("dataSet").and_then(|d| d.get("a")), Some(&Value::from(1)));
}

#[test]
fn test_stylesheet_survives_json() {
    let mut sheet = StyleSheet::new();
    sheet
        .set_root_variable("--brand", "royalblue")
        .add_rule(
            "text-brand",
            ncss::StyleRule::new()
                .declare("color", Descriptor::var("--brand", None))
                .with_pseudo_classes(ncss::PseudoClasses::HOVER),
        );

    let json = serde_json::to_string(&sheet).unwrap();
    let back: StyleSheet = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sheet);
}
