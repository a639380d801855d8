//! State shared between a component, its style passes and its descendants.

use std::cell::{Cell, Ref, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use ncss::{Descriptor, Map, PseudoClasses};
use once_cell::unsync::OnceCell;

use crate::config::{InteropConfig, RuntimeOptions};
use crate::environment::Environment;
use crate::guard::Guard;
use crate::observable::{Effect, Observable, observable};
use crate::registry::StyleRegistry;
use crate::variables::VariableScope;

/// Name every container is also registered under, for unnamed queries.
pub const DEFAULT_CONTAINER_NAME: &str = "@__";

/// Containers visible to a subtree, by name.
pub type Containers = HashMap<String, Rc<SharedState>>;

/// Progress of a capability that must be wired into the host component.
///
/// A capability found on the first render is wired immediately. One that
/// only shows up later needs the host to remount the component; the
/// runtime logs that once and then stops asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpgradeState {
    #[default]
    None,
    ShouldUpgrade,
    Upgraded,
    Warned,
}

impl UpgradeState {
    pub fn is_upgraded(self) -> bool {
        self == UpgradeState::Upgraded
    }
}

/// Per-component state that outlives a single style pass.
///
/// Interaction and layout observables are created on first use: a component
/// nobody queries for `:hover` never allocates one.
#[derive(Debug)]
pub struct SharedState {
    initial_render: Cell<bool>,
    original_props: RefCell<Map>,
    pub(crate) pressable: Cell<UpgradeState>,
    pub(crate) animated: Cell<UpgradeState>,
    pub(crate) variables: Cell<UpgradeState>,
    pub(crate) containers: Cell<UpgradeState>,
    can_upgrade_warn: Cell<bool>,
    hover: OnceCell<Observable<bool>>,
    active: OnceCell<Observable<bool>>,
    focus: OnceCell<Observable<bool>>,
    layout: OnceCell<Observable<Option<(f64, f64)>>>,
}

impl Default for SharedState {
    fn default() -> Self {
        Self {
            initial_render: Cell::new(true),
            original_props: RefCell::new(Map::new()),
            pressable: Cell::new(UpgradeState::None),
            animated: Cell::new(UpgradeState::None),
            variables: Cell::new(UpgradeState::None),
            containers: Cell::new(UpgradeState::None),
            can_upgrade_warn: Cell::new(true),
            hover: OnceCell::new(),
            active: OnceCell::new(),
            focus: OnceCell::new(),
            layout: OnceCell::new(),
        }
    }
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initial_render(&self) -> bool {
        self.initial_render.get()
    }

    pub(crate) fn finish_initial_render(&self) {
        self.initial_render.set(false);
    }

    /// Props as the host passed them, before any style was applied.
    pub fn original_props(&self) -> Ref<'_, Map> {
        self.original_props.borrow()
    }

    pub fn set_original_props(&self, props: Map) {
        *self.original_props.borrow_mut() = props;
    }

    pub fn hover(&self) -> &Observable<bool> {
        self.hover.get_or_init(|| observable(false))
    }

    pub fn active(&self) -> &Observable<bool> {
        self.active.get_or_init(|| observable(false))
    }

    pub fn focus(&self) -> &Observable<bool> {
        self.focus.get_or_init(|| observable(false))
    }

    /// The observable behind a single pseudo-class flag.
    pub fn pseudo_class(&self, flag: PseudoClasses) -> Option<&Observable<bool>> {
        if flag == PseudoClasses::HOVER {
            Some(self.hover())
        } else if flag == PseudoClasses::ACTIVE {
            Some(self.active())
        } else if flag == PseudoClasses::FOCUS {
            Some(self.focus())
        } else {
            None
        }
    }

    /// Laid-out `(width, height)`, `None` until the host reports one.
    pub fn layout(&self) -> &Observable<Option<(f64, f64)>> {
        self.layout.get_or_init(|| observable(None))
    }

    /// The reported layout, or `(0, 0)` before the first measurement.
    pub fn layout_or_zero(&self, effect: Option<&Effect>) -> (f64, f64) {
        self.layout().get(effect).unwrap_or((0.0, 0.0))
    }

    pub fn set_layout(&self, width: f64, height: f64) {
        self.layout().set(Some((width, height)));
    }

    pub fn upgrade_state(&self) -> Upgrades {
        Upgrades {
            pressable: self.pressable.get(),
            animated: self.animated.get(),
            variables: self.variables.get(),
            containers: self.containers.get(),
        }
    }

    /// Moves one capability forward after a pass discovered it is needed.
    pub(crate) fn request_upgrade(&self, cell: &Cell<UpgradeState>, component: &str, what: &str) {
        match cell.get() {
            UpgradeState::None if self.is_initial_render() => cell.set(UpgradeState::Upgraded),
            UpgradeState::None | UpgradeState::ShouldUpgrade => {
                if self.can_upgrade_warn.get() {
                    log::warn!(
                        "{component} started using {what} after its first render; \
                         remount it to apply the change"
                    );
                    cell.set(UpgradeState::Warned);
                } else {
                    cell.set(UpgradeState::ShouldUpgrade);
                }
            }
            UpgradeState::Upgraded | UpgradeState::Warned => {}
        }
    }

    pub fn set_can_upgrade_warn(&self, warn: bool) {
        self.can_upgrade_warn.set(warn);
    }
}

/// Snapshot of all upgrade flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Upgrades {
    pub pressable: UpgradeState,
    pub animated: UpgradeState,
    pub variables: UpgradeState,
    pub containers: UpgradeState,
}

/// Inputs of one style pass that come from outside the component.
#[derive(Debug, Clone)]
pub struct Refs {
    pub shared_state: Rc<SharedState>,
    pub variables: Rc<VariableScope>,
    pub containers: Rc<Containers>,
    pub props: Rc<Map>,
    pub environment: Rc<Environment>,
}

/// What one style pass depended on.
///
/// Reactive reads subscribe [`Self::effect`]; non-reactive reads leave a
/// [`Guard`] to be re-checked when the inputs change.
#[derive(Debug)]
pub struct ReducerTracking {
    pub effect: Effect,
    pub guards: Vec<Guard>,
}

impl ReducerTracking {
    pub fn new(effect: Effect) -> Self {
        Self {
            effect,
            guards: Vec::new(),
        }
    }

    pub fn push_guard(&mut self, guard: Guard) {
        self.guards.push(guard);
    }

    /// True if any recorded guard no longer holds against `next`.
    pub fn is_stale(&self, next: &Refs) -> bool {
        self.guards.iter().any(|guard| guard.is_stale(next))
    }
}

/// Component-owned inputs to a style pass.
#[derive(Debug, Clone)]
pub struct ReducerState {
    pub config: Rc<InteropConfig>,
    pub registry: Rc<StyleRegistry>,
    pub options: RuntimeOptions,
    /// Variables set by this component's own matching rules.
    pub variables: HashMap<String, Descriptor>,
}

impl ReducerState {
    pub fn new(config: Rc<InteropConfig>, registry: Rc<StyleRegistry>) -> Self {
        Self {
            config,
            registry,
            options: RuntimeOptions::default(),
            variables: HashMap::new(),
        }
    }

    pub fn with_options(mut self, options: RuntimeOptions) -> Self {
        self.options = options;
        self
    }
}
