use std::{fmt, io};

/// Crate-wide `Result` type using [`LoupeError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, LoupeError>;

/// Top-level error type for loupe operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum LoupeError {
    /// A completion provider callback failed.
    Provider(ProviderError),

    /// Configuration errors.
    Config(ConfigError),

    /// Schema catalog errors.
    Catalog(CatalogError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Failures raised by completion providers.
///
/// The engine never catches these; they reach the caller unchanged.
#[derive(Debug)]
pub enum ProviderError {
    /// The provider could not produce candidates.
    Failed(String),

    /// The provider's backing source is unavailable.
    Unavailable(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },

    /// Generic configuration error.
    Generic(String),
}

/// Schema catalog errors.
#[derive(Debug)]
pub enum CatalogError {
    /// Catalog file not found.
    FileNotFound(String),

    /// Catalog file could not be parsed.
    InvalidFormat(String),

    /// An association points at a schema the catalog does not define.
    UnknownSchema { field: String, schema: String },
}

impl fmt::Display for LoupeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoupeError::Provider(e) => write!(f, "Provider error: {e}"),
            LoupeError::Config(e) => write!(f, "Configuration error: {e}"),
            LoupeError::Catalog(e) => write!(f, "Catalog error: {e}"),
            LoupeError::Io(e) => write!(f, "I/O error: {e}"),
            LoupeError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Failed(msg) => write!(f, "Provider failed: {msg}"),
            ProviderError::Unavailable(msg) => write!(f, "Provider unavailable: {msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
            ConfigError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::FileNotFound(path) => write!(f, "Catalog file not found: {path}"),
            CatalogError::InvalidFormat(msg) => write!(f, "Invalid catalog format: {msg}"),
            CatalogError::UnknownSchema { field, schema } => {
                write!(f, "Association '{field}' refers to unknown schema '{schema}'")
            }
        }
    }
}

impl std::error::Error for LoupeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoupeError::Io(e) => Some(e),
            _ => None,
        }
    }
}
impl std::error::Error for ProviderError {}
impl std::error::Error for ConfigError {}
impl std::error::Error for CatalogError {}

/* ========================= Conversions to LoupeError ========================= */

impl From<io::Error> for LoupeError {
    fn from(err: io::Error) -> Self {
        LoupeError::Io(err)
    }
}

impl From<ProviderError> for LoupeError {
    fn from(err: ProviderError) -> Self {
        LoupeError::Provider(err)
    }
}

impl From<ConfigError> for LoupeError {
    fn from(err: ConfigError) -> Self {
        LoupeError::Config(err)
    }
}

impl From<CatalogError> for LoupeError {
    fn from(err: CatalogError) -> Self {
        LoupeError::Catalog(err)
    }
}

impl From<String> for LoupeError {
    fn from(msg: String) -> Self {
        LoupeError::Generic(msg)
    }
}

impl From<&str> for LoupeError {
    fn from(msg: &str) -> Self {
        LoupeError::Generic(msg.to_owned())
    }
}

impl From<reedline::ReedlineError> for LoupeError {
    fn from(err: reedline::ReedlineError) -> Self {
        LoupeError::Generic(format!("Line editor error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err: LoupeError = ProviderError::Failed("timeout".into()).into();
        assert_eq!(err.to_string(), "Provider error: Provider failed: timeout");
    }

    #[test]
    fn test_config_invalid_value_display() {
        let err = ConfigError::InvalidValue {
            field: "history.max_size".into(),
            value: "0".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value '0' for field 'history.max_size'"
        );
    }

    #[test]
    fn test_catalog_unknown_schema_display() {
        let err = CatalogError::UnknownSchema {
            field: "author".into(),
            schema: "Person".into(),
        };
        assert!(err.to_string().contains("'Person'"));
    }

    #[test]
    fn test_io_error_has_source() {
        use std::error::Error;

        let err: LoupeError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
        assert!(LoupeError::from("plain").source().is_none());
    }
}
