use insta::assert_snapshot;
use interop::ncss::{
    AttributeCondition, Condition, ContainerQuery, FeatureName, PseudoClasses, StyleRule,
    StyleSheet, Value,
};
use interop::testing::TestHarness;
use interop::{Guard, Scope};

fn card_sheet() -> StyleSheet {
    let mut sheet = StyleSheet::new();
    sheet
        .add_rule("@container", StyleRule::new().container(&["card"]))
        .add_rule(
            "@md/card:p-8",
            StyleRule::new().declare("padding", 32).with_container_query(
                ContainerQuery::named("card")
                    .with_condition(Condition::plain(FeatureName::MinWidth, 400)),
            ),
        )
        .add_rule(
            "@max-md/card:p-1",
            StyleRule::new().declare("padding", 1).with_container_query(
                ContainerQuery::named("card")
                    .with_condition(Condition::plain(FeatureName::MaxWidth, 400)),
            ),
        )
        .add_rule(
            "@md:p-4",
            StyleRule::new().declare("padding", 16).with_container_query(ContainerQuery {
                condition: Some(Condition::plain(FeatureName::MinWidth, 200)),
                ..Default::default()
            }),
        )
        .add_rule(
            "group-hover/card:text-red",
            StyleRule::new().declare("color", "red").with_container_query(
                ContainerQuery::named("card").with_pseudo_classes(PseudoClasses::HOVER),
            ),
        )
        .add_rule(
            "group-selected/card:font-bold",
            StyleRule::new().declare("fontWeight", "700").with_container_query(
                ContainerQuery::named("card").with_attr(AttributeCondition::attribute("selected")),
            ),
        );
    sheet
}

// ============================================================================
// LOOKUP
// ============================================================================

#[test]
fn test_missing_container_fails_the_rule() {
    let harness = TestHarness::new(card_sheet());
    let child = harness.render("@md/card:p-8").unwrap();
    assert_snapshot!(child.style().to_string(), @"{}");

    let guards = child.guards();
    assert!(matches!(
        guards.as_slice(),
        [Guard::Container { container: None, result: false, .. }]
    ));
}

#[test]
fn test_unnamed_queries_use_the_nearest_container() {
    let harness = TestHarness::new(card_sheet());
    let card = harness.render("@container").unwrap();
    card.set_layout(250.0, 100.0);

    let child = harness
        .render_props(harness.props("@md:p-4"), card.child_scope())
        .unwrap();
    assert_snapshot!(child.style().to_string(), @"{padding: 16}");
}

#[test]
fn test_unmeasured_container_matches_no_size_query() {
    let harness = TestHarness::new(card_sheet());
    let card = harness.render("@container").unwrap();
    let child = harness
        .render_props(harness.props("@max-md/card:p-1"), card.child_scope())
        .unwrap();
    assert_snapshot!(child.style().to_string(), @"{}");

    card.set_layout(300.0, 100.0);
    assert_snapshot!(child.style().to_string(), @"{padding: 1}");
}

// ============================================================================
// REACTIVITY
// ============================================================================

#[test]
fn test_container_layout_changes_rerender_children() {
    let harness = TestHarness::new(card_sheet());
    let card = harness.render("@container").unwrap();
    let child = harness
        .render_props(harness.props("@md/card:p-8"), card.child_scope())
        .unwrap();
    assert_snapshot!(child.style().to_string(), @"{}");

    card.set_layout(480.0, 200.0);
    assert_snapshot!(child.style().to_string(), @"{padding: 32}");
    assert_eq!(child.render_count(), 2);
    assert_eq!(card.render_count(), 1);
}

#[test]
fn test_group_hover() {
    let harness = TestHarness::new(card_sheet());
    let card = harness.render("@container").unwrap();
    let child = harness
        .render_props(harness.props("group-hover/card:text-red"), card.child_scope())
        .unwrap();

    card.set_hover(true);
    assert_snapshot!(child.style().to_string(), @"{color: red}");
}

#[test]
fn test_group_attributes_read_container_props() {
    let harness = TestHarness::new(card_sheet());
    let mut props = harness.props("@container");
    props.insert("selected".to_string(), Value::from(true));
    let card = harness.render_props(props, harness.scope()).unwrap();

    let child = harness
        .render_props(
            harness.props("group-selected/card:font-bold"),
            card.child_scope(),
        )
        .unwrap();
    assert_snapshot!(child.style().to_string(), @"{fontWeight: 700}");
}

// ============================================================================
// GUARDS
// ============================================================================

#[test]
fn test_gaining_a_container_invalidates_the_output() {
    let harness = TestHarness::new(card_sheet());
    let child = harness.render("@md/card:p-8").unwrap();

    let rendered = child
        .update(harness.props("@md/card:p-8"), harness.scope())
        .unwrap();
    assert!(!rendered);

    let card = harness.render("@container").unwrap();
    card.set_layout(500.0, 100.0);
    let rendered = child
        .update(harness.props("@md/card:p-8"), card.child_scope())
        .unwrap();
    assert!(rendered);
    assert_snapshot!(child.style().to_string(), @"{padding: 32}");
}

#[test]
fn test_same_container_keeps_the_output() {
    let harness = TestHarness::new(card_sheet());
    let card = harness.render("@container").unwrap();
    let scope: Scope = card.child_scope();
    let child = harness
        .render_props(harness.props("@md/card:p-8"), scope.clone())
        .unwrap();

    let rendered = child.update(harness.props("@md/card:p-8"), scope).unwrap();
    assert!(!rendered);
    assert_eq!(child.render_count(), 1);
}
