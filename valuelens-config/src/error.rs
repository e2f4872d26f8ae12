//! Typed error variants for the valuelens-config crate.
//!
//! Returned by every helper that reads or writes a settings file so callers
//! can match on the failure mode instead of inspecting strings.

use std::fmt;

/// Errors that can occur when loading or saving settings.
///
/// # Example
///
/// ```rust,no_run
/// use valuelens_config::ConfigError;
///
/// fn describe(e: &ConfigError) -> String {
///     match e {
///         ConfigError::Io(io) => format!("I/O error: {io}"),
///         ConfigError::Parse(p) => format!("YAML parse error: {p}"),
///         ConfigError::Validation(msg) => format!("Validation: {msg}"),
///     }
/// }
/// ```
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing a settings file.
    Io(std::io::Error),

    /// A settings file contained YAML that could not be parsed or produced.
    Parse(serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error reading settings: {e}"),
            ConfigError::Parse(e) => write!(f, "YAML parse error in settings: {e}"),
            ConfigError::Validation(msg) => write!(f, "Settings validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml_ng::Error> for ConfigError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        ConfigError::Parse(e)
    }
}
