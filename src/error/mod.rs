//! Error handling module for loupe.
//!
//! Every fallible operation in the crate returns [`Result`], whose error
//! type [`LoupeError`] wraps the more specific kinds below:
//! - Provider failures raised by host-supplied completion callbacks
//! - Configuration loading and validation problems
//! - Schema catalog loading problems
//!
//! Note that "the user has not typed enough yet" is not an error. The
//! completion engine reports it as `Ok(None)`.
//!
//! # Example
//!
//! ```rust
//! use loupe::error::{LoupeError, ProviderError, Result};
//!
//! fn lookup_fields(schema: &str) -> Result<Vec<String>> {
//!     if schema.is_empty() {
//!         return Err(ProviderError::Failed("no schema".into()).into());
//!     }
//!     Ok(vec!["id".to_string()])
//! }
//!
//! assert!(matches!(lookup_fields(""), Err(LoupeError::Provider(_))));
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{CatalogError, ConfigError, LoupeError, ProviderError, Result};
