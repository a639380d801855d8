//! Per-component and per-runtime configuration.

/// How one component type maps a class-name prop onto a style prop.
///
/// ```
/// use interop::InteropConfig;
///
/// let config = InteropConfig::new("Text");
/// assert_eq!(config.source, "className");
/// assert_eq!(config.target, vec!["style"]);
/// assert!(config.animatable);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InteropConfig {
    /// Component name used in warnings and errors.
    pub component: String,
    /// Prop holding the class list.
    pub source: String,
    /// Path of the prop the resolved style is written to.
    pub target: Vec<String>,
    /// Whether the component can be driven by animated values.
    pub animatable: bool,
}

impl Default for InteropConfig {
    fn default() -> Self {
        Self {
            component: "View".to_string(),
            source: "className".to_string(),
            target: vec!["style".to_string()],
            animatable: true,
        }
    }
}

impl InteropConfig {
    pub fn new(component: &str) -> Self {
        Self {
            component: component.to_string(),
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    /// Sets the target path, dot separated (`"contentContainerStyle"`).
    pub fn with_target(mut self, target: &str) -> Self {
        self.target = target.split('.').map(str::to_string).collect();
        self
    }

    pub fn not_animatable(mut self) -> Self {
        self.animatable = false;
        self
    }
}

/// Runtime-wide switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RuntimeOptions {
    /// Suppresses resolution error logging.
    pub trusted: bool,
}
