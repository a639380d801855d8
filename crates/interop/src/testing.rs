//! Fixtures for exercising the runtime without a host.
//!
//! ```
//! use interop::ncss::{StyleRule, StyleSheet};
//! use interop::testing::TestHarness;
//!
//! let mut sheet = StyleSheet::new();
//! sheet.add_rule("text-red", StyleRule::new().declare("color", "red"));
//!
//! let harness = TestHarness::new(sheet);
//! let component = harness.render("text-red").unwrap();
//! assert_eq!(component.style().to_string(), "{color: red}");
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use ncss::{Map, StyleSheet, Value};

use crate::component::{InteropComponent, Scope};
use crate::config::InteropConfig;
use crate::environment::{Environment, EnvironmentConfig};
use crate::error::Result;
use crate::observable::Effect;
use crate::registry::StyleRegistry;
use crate::state::{ReducerState, ReducerTracking, Refs, SharedState};

/// A registry, an environment and a component config wired together.
pub struct TestHarness {
    pub registry: Rc<StyleRegistry>,
    pub environment: Rc<Environment>,
    pub config: Rc<InteropConfig>,
}

impl TestHarness {
    pub fn new(sheet: StyleSheet) -> Self {
        Self::with_environment(sheet, EnvironmentConfig::default())
    }

    pub fn with_environment(sheet: StyleSheet, config: EnvironmentConfig) -> Self {
        Self {
            registry: Rc::new(StyleRegistry::new(sheet)),
            environment: Rc::new(Environment::new(config)),
            config: Rc::new(InteropConfig::default()),
        }
    }

    pub fn with_config(mut self, config: InteropConfig) -> Self {
        self.config = Rc::new(config);
        self
    }

    /// The scope a top-level component sees.
    pub fn scope(&self) -> Scope {
        Scope::root(&self.registry)
    }

    /// Inputs for a single detached pass: a fresh shared state, the root
    /// variable scope, no containers, and an effect that never re-runs.
    pub fn pass_inputs(&self, props: Map) -> (ReducerState, Refs, ReducerTracking) {
        let state = ReducerState::new(Rc::clone(&self.config), Rc::clone(&self.registry));
        let refs = Refs {
            shared_state: Rc::new(SharedState::new()),
            variables: self.registry.root_scope(),
            containers: Rc::new(HashMap::new()),
            props: Rc::new(props),
            environment: Rc::clone(&self.environment),
        };
        (state, refs, ReducerTracking::new(Effect::noop()))
    }

    /// Props carrying `class_name` under the configured source prop.
    pub fn props(&self, class_name: &str) -> Map {
        let mut props = Map::new();
        props.insert(self.config.source.clone(), Value::from(class_name));
        props
    }

    /// Mounts a top-level component with only a class name.
    pub fn render(&self, class_name: &str) -> Result<InteropComponent> {
        self.render_props(self.props(class_name), self.scope())
    }

    pub fn render_props(&self, props: Map, scope: Scope) -> Result<InteropComponent> {
        InteropComponent::new(
            Rc::clone(&self.config),
            Rc::clone(&self.registry),
            Rc::clone(&self.environment),
            props,
            scope,
        )
    }
}
