use thiserror::Error;

/// Errors surfaced to the host.
#[derive(Error, Debug)]
pub enum InteropError {
    #[error(
        "Component `{component}` cannot animate `{property}`: transform animations need an animatable component"
    )]
    UnsupportedAnimation { component: String, property: String },

    #[error("Logger error: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InteropError>;

/// Failures inside descriptor resolution.
///
/// These never reach the host: [`crate::resolve::resolve_value`] turns them
/// into an absent value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("descriptor nesting exceeds {0} levels")]
    DepthExceeded(usize),

    #[error("malformed arguments to {function}(): {reason}")]
    MalformedArguments { function: String, reason: String },
}
