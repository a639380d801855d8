//! A styled component instance.
//!
//! [`InteropComponent`] owns the per-instance state, the effect its style
//! passes subscribe through, and the output of the last pass. Observable
//! changes re-render it through the effect; prop changes go through
//! [`InteropComponent::update`], which only re-renders when a recorded
//! guard says the previous output is stale.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use ncss::{AnimationName, Map, Value};

use crate::animation::{
    AnimationInterpolation, TimedAnimation, TransitionTarget, build_animation_interpolations,
    build_timed_animations, build_transition_targets, target_style,
};
use crate::config::{InteropConfig, RuntimeOptions};
use crate::defaults::set_deep;
use crate::environment::Environment;
use crate::error::{InteropError, Result};
use crate::guard::Guard;
use crate::observable::{Effect, Observable, observable};
use crate::reducer::{StyleOutput, StylePass, debug_dump};
use crate::registry::StyleRegistry;
use crate::state::{
    Containers, DEFAULT_CONTAINER_NAME, ReducerState, ReducerTracking, Refs, SharedState,
};
use crate::variables::VariableScope;

/// What a component inherits from its ancestors.
#[derive(Debug, Clone)]
pub struct Scope {
    pub variables: Rc<VariableScope>,
    pub containers: Rc<Containers>,
}

impl Scope {
    /// The scope above every component: root variables, no containers.
    pub fn root(registry: &StyleRegistry) -> Self {
        Self {
            variables: registry.root_scope(),
            containers: Rc::new(HashMap::new()),
        }
    }
}

struct ComponentInner {
    config: Rc<InteropConfig>,
    registry: Rc<StyleRegistry>,
    environment: Rc<Environment>,
    options: RuntimeOptions,
    shared_state: Rc<SharedState>,
    props: Rc<Map>,
    scope: Scope,
    class_name: String,
    guards: Vec<Guard>,
    output: StyleOutput,
    drivers: HashMap<String, Observable<f64>>,
    animations: Vec<(Observable<f64>, Vec<AnimationInterpolation>)>,
    timed: Vec<TimedAnimation>,
    transitions: Vec<TransitionTarget>,
    last_error: Option<InteropError>,
    renders: u64,
}

fn class_name_of(props: &Map, config: &InteropConfig) -> String {
    props
        .get(&config.source)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl ComponentInner {
    fn refs(&self) -> Refs {
        Refs {
            shared_state: Rc::clone(&self.shared_state),
            variables: Rc::clone(&self.scope.variables),
            containers: Rc::clone(&self.scope.containers),
            props: Rc::clone(&self.props),
            environment: Rc::clone(&self.environment),
        }
    }

    fn render(&mut self, effect: &Effect) {
        self.renders += 1;
        log::trace!(
            "{}: render #{} `{}`",
            self.config.component,
            self.renders,
            self.class_name
        );

        let refs = self.refs();
        let mut state = ReducerState::new(Rc::clone(&self.config), Rc::clone(&self.registry))
            .with_options(self.options);
        let mut tracking = ReducerTracking::new(effect.clone());
        let rules = self.registry.class_rules(&self.class_name);

        match StylePass::new(&mut state, &refs, &mut tracking).run(&rules) {
            Ok(output) => {
                debug_dump(&self.class_name, &self.props, &output);
                self.record_upgrades(&output);
                self.build_animations(&state, &refs, &mut tracking, &output);
                self.output = output;
                self.last_error = None;
            }
            Err(err) => {
                log::error!("{}: {}", self.config.component, err);
                self.last_error = Some(err);
            }
        }

        self.guards = tracking.guards;
        self.shared_state.finish_initial_render();
    }

    fn record_upgrades(&self, output: &StyleOutput) {
        let state = &self.shared_state;
        let component = self.config.component.as_str();

        if !output.pseudo_classes.is_empty() {
            state.request_upgrade(&state.pressable, component, "pseudo-classes");
        }
        if output.has_animation() || output.transition.is_some() {
            state.request_upgrade(&state.animated, component, "animations");
        }
        if !output.variables.is_empty() {
            state.request_upgrade(&state.variables, component, "CSS variables");
        }
        if output.is_container() {
            state.request_upgrade(&state.containers, component, "container queries");
        }
    }

    fn build_animations(
        &mut self,
        state: &ReducerState,
        refs: &Refs,
        tracking: &mut ReducerTracking,
        output: &StyleOutput,
    ) {
        self.animations.clear();
        self.timed.clear();
        self.transitions.clear();

        if let Some(animation) = &output.animation {
            for name in &animation.names {
                if let AnimationName::Named(name) = name {
                    self.drivers
                        .entry(name.clone())
                        .or_insert_with(|| observable(0.0));
                }
            }
            self.animations =
                build_animation_interpolations(state, refs, tracking, animation, &self.drivers);
            self.timed = build_timed_animations(state, refs, tracking, animation);
        }

        if let Some(transition) = &output.transition {
            let animated: Vec<AnimationInterpolation> = self
                .animations
                .iter()
                .flat_map(|(_, interpolations)| interpolations.iter().cloned())
                .collect();
            self.transitions =
                build_transition_targets(transition, &output.style, &animated, refs, tracking);
        }
    }

    /// Whether new inputs invalidate the last output.
    fn needs_render(&self, class_name: &str, next: &Refs) -> bool {
        if class_name != self.class_name {
            return true;
        }
        let state = ReducerState::new(Rc::clone(&self.config), Rc::clone(&self.registry));
        let current = self.refs();
        if target_style(&state, &current) != target_style(&state, next) {
            return true;
        }
        self.guards.iter().any(|guard| guard.is_stale(next))
    }
}

/// A mounted component and its latest resolved style.
///
/// ```
/// use interop::ncss::{PseudoClasses, StyleRule, StyleSheet};
/// use interop::testing::TestHarness;
///
/// let mut sheet = StyleSheet::new();
/// sheet.add_rule(
///     "hover:text-red",
///     StyleRule::new()
///         .declare("color", "red")
///         .with_pseudo_classes(PseudoClasses::HOVER),
/// );
///
/// let harness = TestHarness::new(sheet);
/// let component = harness.render("hover:text-red").unwrap();
/// assert_eq!(component.style().to_string(), "{}");
///
/// component.set_hover(true);
/// assert_eq!(component.style().to_string(), "{color: red}");
/// ```
pub struct InteropComponent {
    inner: Rc<RefCell<ComponentInner>>,
    effect: Effect,
}

impl InteropComponent {
    pub fn new(
        config: Rc<InteropConfig>,
        registry: Rc<StyleRegistry>,
        environment: Rc<Environment>,
        props: Map,
        scope: Scope,
    ) -> Result<Self> {
        Self::with_options(
            config,
            registry,
            environment,
            props,
            scope,
            RuntimeOptions::default(),
        )
    }

    pub fn with_options(
        config: Rc<InteropConfig>,
        registry: Rc<StyleRegistry>,
        environment: Rc<Environment>,
        props: Map,
        scope: Scope,
        options: RuntimeOptions,
    ) -> Result<Self> {
        let shared_state = Rc::new(SharedState::new());
        shared_state.set_original_props(props.clone());

        let inner = Rc::new(RefCell::new(ComponentInner {
            class_name: class_name_of(&props, &config),
            config,
            registry,
            environment,
            options,
            shared_state,
            props: Rc::new(props),
            scope,
            guards: Vec::new(),
            output: StyleOutput::default(),
            drivers: HashMap::new(),
            animations: Vec::new(),
            timed: Vec::new(),
            transitions: Vec::new(),
            last_error: None,
            renders: 0,
        }));

        let weak: Weak<RefCell<ComponentInner>> = Rc::downgrade(&inner);
        let effect = Effect::new(move |effect| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            match inner.try_borrow_mut() {
                Ok(mut inner) => inner.render(effect),
                Err(_) => log::debug!("component: skipped render while borrowed"),
            };
        });

        let component = Self { inner, effect };
        component.effect.run();
        component.take_error()?;
        Ok(component)
    }

    fn take_error(&self) -> Result<()> {
        match self.inner.borrow_mut().last_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Hands the component new props and a new inherited scope.
    ///
    /// Returns whether a new style pass ran.
    pub fn update(&self, props: Map, scope: Scope) -> Result<bool> {
        let rerender = {
            let mut inner = self.inner.borrow_mut();
            let class_name = class_name_of(&props, &inner.config);
            let next = Refs {
                shared_state: Rc::clone(&inner.shared_state),
                variables: Rc::clone(&scope.variables),
                containers: Rc::clone(&scope.containers),
                props: Rc::new(props),
                environment: Rc::clone(&inner.environment),
            };
            let rerender = inner.needs_render(&class_name, &next);

            inner.shared_state.set_original_props((*next.props).clone());
            inner.class_name = class_name;
            inner.props = next.props;
            inner.scope = scope;
            rerender
        };

        if rerender {
            self.effect.run();
            self.take_error()?;
        }
        Ok(rerender)
    }

    /// Re-runs the style pass unconditionally.
    pub fn rerender(&self) -> Result<()> {
        self.effect.run();
        self.take_error()
    }

    pub fn style(&self) -> Value {
        Value::Object(self.inner.borrow().output.style.clone())
    }

    pub fn output(&self) -> StyleOutput {
        self.inner.borrow().output.clone()
    }

    /// The original props with the resolved style written to the target
    /// prop.
    pub fn resolved_props(&self) -> Map {
        let inner = self.inner.borrow();
        let mut props = (*inner.props).clone();
        props.remove(&inner.config.source);
        set_deep(
            &mut props,
            &inner.config.target,
            Value::Object(inner.output.style.clone()),
        );
        props
    }

    /// Number of style passes run so far.
    pub fn render_count(&self) -> u64 {
        self.inner.borrow().renders
    }

    pub fn guards(&self) -> Vec<Guard> {
        self.inner.borrow().guards.clone()
    }

    pub fn shared_state(&self) -> Rc<SharedState> {
        Rc::clone(&self.inner.borrow().shared_state)
    }

    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    pub fn set_hover(&self, hover: bool) {
        self.shared_state().hover().set(hover);
    }

    pub fn set_active(&self, active: bool) {
        self.shared_state().active().set(active);
    }

    pub fn set_focus(&self, focus: bool) {
        self.shared_state().focus().set(focus);
    }

    pub fn set_layout(&self, width: f64, height: f64) {
        self.shared_state().set_layout(width, height);
    }

    /// Progress driver for a named animation, created on first render.
    pub fn driver(&self, name: &str) -> Option<Observable<f64>> {
        self.inner.borrow().drivers.get(name).cloned()
    }

    pub fn animations(&self) -> Vec<(Observable<f64>, Vec<AnimationInterpolation>)> {
        self.inner.borrow().animations.clone()
    }

    pub fn timed_animations(&self) -> Vec<TimedAnimation> {
        self.inner.borrow().timed.clone()
    }

    pub fn transitions(&self) -> Vec<TransitionTarget> {
        self.inner.borrow().transitions.clone()
    }

    /// The scope this component provides to its children.
    ///
    /// Variables declared by its rules shadow inherited ones. A container
    /// registers itself under each of its names and the default name.
    pub fn child_scope(&self) -> Scope {
        let inner = self.inner.borrow();

        let variables = if inner.output.variables.is_empty() {
            Rc::clone(&inner.scope.variables)
        } else {
            Rc::new(VariableScope::child(
                Rc::clone(&inner.scope.variables),
                inner.output.variables.clone(),
            ))
        };

        let containers = match &inner.output.container_names {
            None => Rc::clone(&inner.scope.containers),
            Some(names) => {
                let mut containers = (*inner.scope.containers).clone();
                for name in names
                    .iter()
                    .map(String::as_str)
                    .chain([DEFAULT_CONTAINER_NAME])
                {
                    containers.insert(name.to_string(), Rc::clone(&inner.shared_state));
                }
                Rc::new(containers)
            }
        };

        Scope {
            variables,
            containers,
        }
    }
}

impl Drop for InteropComponent {
    fn drop(&mut self) {
        self.effect.dispose();
    }
}
