//! # css-interop
//!
//! Native style resolution for components driven by compiled CSS.
//!
//! - [`ncss`]: the compiled stylesheet model (rules, descriptors, queries)
//! - [`interop`]: the reactive runtime that turns rules into style objects
//!
//! ## Quick Start
//!
//! ```rust
//! use css_interop::ncss::{Condition, FeatureName, MediaQuery, StyleRule, StyleSheet};
//! use css_interop::testing::TestHarness;
//!
//! let mut sheet = StyleSheet::new();
//! sheet
//!     .add_rule("p-2", StyleRule::new().declare("padding", 8))
//!     .add_rule(
//!         "sm:p-4",
//!         StyleRule::new()
//!             .declare("padding", 16)
//!             .with_media(MediaQuery::new(Condition::plain(FeatureName::MinWidth, 400))),
//!     );
//!
//! let harness = TestHarness::new(sheet);
//! let component = harness.render("p-2 sm:p-4").unwrap();
//! assert_eq!(component.style().to_string(), "{padding: 8}");
//!
//! harness.environment.set_window_size(500.0, 900.0);
//! assert_eq!(component.style().to_string(), "{padding: 16}");
//! ```

pub use interop::*;
