use insta::assert_snapshot;
use interop::ncss::{PseudoClasses, StyleRule, StyleSheet};
use interop::testing::TestHarness;
use interop::UpgradeState;

fn button_sheet() -> StyleSheet {
    let mut sheet = StyleSheet::new();
    sheet
        .add_rule("text-blue", StyleRule::new().declare("color", "blue"))
        .add_rule(
            "hover:text-red",
            StyleRule::new()
                .declare("color", "red")
                .with_pseudo_classes(PseudoClasses::HOVER),
        )
        .add_rule(
            "active:opacity-50",
            StyleRule::new()
                .declare("opacity", 0.5)
                .with_pseudo_classes(PseudoClasses::ACTIVE),
        )
        .add_rule(
            "focus-hover:underline",
            StyleRule::new()
                .declare("textDecorationLine", "underline")
                .with_pseudo_classes(PseudoClasses::FOCUS | PseudoClasses::HOVER),
        );
    sheet
}

// ============================================================================
// HOVER
// ============================================================================

#[test]
fn test_hover_toggles_style() {
    let harness = TestHarness::new(button_sheet());
    let component = harness.render("text-blue hover:text-red").unwrap();
    assert_snapshot!(component.style().to_string(), @"{color: blue}");
    assert_eq!(component.render_count(), 1);

    component.set_hover(true);
    assert_snapshot!(component.style().to_string(), @"{color: red}");
    assert_eq!(component.render_count(), 2);

    component.set_hover(false);
    assert_snapshot!(component.style().to_string(), @"{color: blue}");
    assert_eq!(component.render_count(), 3);
}

#[test]
fn test_setting_the_same_hover_state_does_not_render() {
    let harness = TestHarness::new(button_sheet());
    let component = harness.render("text-blue hover:text-red").unwrap();

    component.set_hover(false);
    assert_eq!(component.render_count(), 1);

    component.set_hover(true);
    component.set_hover(true);
    assert_eq!(component.render_count(), 2);
}

#[test]
fn test_unrelated_components_do_not_render() {
    let harness = TestHarness::new(button_sheet());
    let hovered = harness.render("hover:text-red").unwrap();
    let other = harness.render("hover:text-red").unwrap();

    hovered.set_hover(true);
    assert_eq!(hovered.render_count(), 2);
    assert_eq!(other.render_count(), 1);
    assert_snapshot!(other.style().to_string(), @"{}");
}

// ============================================================================
// ACTIVE AND FOCUS
// ============================================================================

#[test]
fn test_active_state() {
    let harness = TestHarness::new(button_sheet());
    let component = harness.render("active:opacity-50").unwrap();

    component.set_active(true);
    assert_snapshot!(component.style().to_string(), @"{opacity: 0.5}");
    component.set_active(false);
    assert_snapshot!(component.style().to_string(), @"{}");
}

#[test]
fn test_combined_pseudo_classes_need_every_flag() {
    let harness = TestHarness::new(button_sheet());
    let component = harness.render("focus-hover:underline").unwrap();

    component.set_focus(true);
    assert_snapshot!(component.style().to_string(), @"{}");

    component.set_hover(true);
    assert_snapshot!(component.style().to_string(), @"{textDecorationLine: underline}");
}

// ============================================================================
// UPGRADES
// ============================================================================

#[test]
fn test_pseudo_classes_on_first_render_upgrade_immediately() {
    let harness = TestHarness::new(button_sheet());
    let component = harness.render("hover:text-red").unwrap();
    assert_eq!(
        component.shared_state().upgrade_state().pressable,
        UpgradeState::Upgraded
    );
}

#[test]
fn test_pseudo_classes_added_later_are_flagged() {
    let harness = TestHarness::new(button_sheet());
    let component = harness.render("text-blue").unwrap();
    component.shared_state().set_can_upgrade_warn(false);

    component
        .update(harness.props("text-blue hover:text-red"), harness.scope())
        .unwrap();
    assert_eq!(
        component.shared_state().upgrade_state().pressable,
        UpgradeState::ShouldUpgrade
    );
}
