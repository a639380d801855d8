//! Error types for the compiled stylesheet model.
//!
//! The model never parses stylesheet source; these errors only come from the
//! small literal parsers in [`crate::units`] that read lengths and
//! percentages embedded in compiled values.

use thiserror::Error;

/// Errors that can occur while reading literals out of compiled values.
///
/// # Examples
///
/// ```rust
/// use ncss::units::Length;
/// use ncss::NcssError;
///
/// let result = Length::parse("12 apples");
/// assert!(matches!(result, Err(NcssError::InvalidLength(_))));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NcssError {
    /// A length literal (e.g. `12px`, `1.5rem`) could not be read.
    #[error("Invalid length: {0}")]
    InvalidLength(String),

    /// A percentage literal (e.g. `50%`) could not be read.
    #[error("Invalid percentage: {0}")]
    InvalidPercentage(String),
}
