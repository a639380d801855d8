pub mod animation;
pub mod component;
pub mod conditions;
pub mod config;
pub mod defaults;
pub mod environment;
pub mod error;
pub mod guard;
mod log_init;
pub mod observable;
pub mod reducer;
pub mod registry;
pub mod resolve;
pub mod state;
pub mod testing;
pub mod variables;

pub use animation::{
    AnimatableValue, AnimationInterpolation, Easing, TimedAnimation, TransitionTarget,
    build_animation_interpolations, build_timed_animations, build_transition_targets,
    resolve_animation_frames, resolve_animation_value, time_to_ms,
};
pub use component::{InteropComponent, Scope};
pub use conditions::{
    ConditionReference, test_attribute, test_attributes, test_condition, test_container_query,
    test_media_queries, test_media_query, test_pseudo_classes, test_rule,
};
pub use config::{InteropConfig, RuntimeOptions};
pub use environment::{ColorScheme, Environment, EnvironmentConfig, PlatformOs};
pub use error::{InteropError, ResolveError, Result};
pub use guard::Guard;
pub use log_init::init_logger;
pub use observable::{Batch, Effect, Observable, batch, observable};
pub use reducer::{StyleOutput, StylePass};
pub use registry::StyleRegistry;
pub use resolve::{CalcMode, CalcResult, resolve_value, round};
pub use state::{
    Containers, DEFAULT_CONTAINER_NAME, ReducerState, ReducerTracking, Refs, SharedState,
    UpgradeState, Upgrades,
};
pub use variables::{VariableScope, VariableValue};

// Re-export the log crate so hosts can use interop::log::info!, etc.
pub use log;
pub use ncss;
