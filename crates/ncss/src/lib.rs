//! # NCSS - Compiled stylesheet model
//!
//! The data a CSS compiler hands to the native style runtime. Nothing here
//! parses stylesheet source; every type describes an already-compiled rule set:
//!
//! - **Rules**: [`StyleRule`] with ordered [`Declaration`]s and optional
//!   pseudo-class, media, container and attribute conditions
//! - **Descriptors**: [`Descriptor`], the unresolved value language (`var()`,
//!   `calc()`, colors, platform helpers, transform shorthands)
//! - **Queries**: [`MediaQuery`] and [`Condition`] trees
//! - **Keyframes**: precomputed interpolation tables per animation
//! - **Values**: the dynamic [`Value`] used for props and resolved styles
//!
//! ## Quick Start
//!
//! ```rust
//! use ncss::{Condition, Descriptor, FeatureName, MediaQuery, StyleRule, StyleSheet};
//!
//! let mut sheet = StyleSheet::new();
//! sheet.add_rule(
//!     "md:p-4",
//!     StyleRule::new()
//!         .declare("padding", Descriptor::function("rem", [Descriptor::from(1)]))
//!         .with_media(MediaQuery::new(Condition::plain(FeatureName::MinWidth, 768))),
//! );
//!
//! assert_eq!(sheet.rules[0].class_name, "md:p-4");
//! ```
//!
//! ## Modules
//!
//! - [`descriptor`]: value descriptors and function kinds
//! - [`media`]: media/container condition trees
//! - [`rule`]: rules, declarations, attribute and container conditions
//! - [`keyframes`]: animation interpolation tables
//! - [`stylesheet`]: the compiled unit
//! - [`units`]: length, percentage and list literal readers
//! - [`value`]: dynamic values
//! - [`error`]: error types

pub mod descriptor;
pub mod error;
pub mod keyframes;
pub mod media;
pub mod rule;
pub mod stylesheet;
pub mod units;
pub mod value;

pub use descriptor::{Descriptor, FunctionCall, FunctionKind, TransformKey, is_transform_key};
pub use error::NcssError;
pub use keyframes::{INHERIT_VALUE, KeyframeInterpolation, Keyframes};
pub use media::{
    Comparison, Condition, FeatureName, FeatureValue, MediaQuery, MediaType, Operator,
    Qualifier, QueryFeature,
};
pub use rule::{
    AnimationDeclaration, AnimationName, AttributeCondition, AttributeKind, AttributeOperation,
    AttributeOperator, ContainerQuery, Declaration, EasingFunction, PseudoClasses, StyleRule,
    Time, TransitionDeclaration,
};
pub use stylesheet::{ClassRule, StyleSheet};
pub use units::{Length, LengthUnit};
pub use value::{Map, Value, format_number};
