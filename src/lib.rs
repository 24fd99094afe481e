//! Loupe Library
//!
//! Context-sensitive completion for the Loupe query language, plus the
//! pieces of an interactive editor around it.
//!
//! # Modules
//!
//! - `completion`: Rule engine that decides what to complete at a cursor
//! - `catalog`: Static schema catalog implementing the completion provider
//! - `grammar`: Token vocabulary and error-tolerant lexer
//! - `formatter`: JSON and table output
//! - `repl`: Interactive reedline editor
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `error`: Error types and handling
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use loupe::{Catalog, CompletionConfig, CompletionEngine};
//!
//! #[tokio::main]
//! async fn main() -> loupe::Result<()> {
//!     let engine = CompletionEngine::new(Arc::new(Catalog::demo()), CompletionConfig::default());
//!
//!     let text = "get User where ";
//!     if let Some(result) = engine.complete_text(text, text.len()).await? {
//!         for option in &result.options {
//!             println!("{} ({})", option.label, option.kind.as_str());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod formatter;
pub mod grammar;
pub mod repl;

// Re-export commonly used types
pub use catalog::Catalog;
pub use completion::{
    CompletionConfig, CompletionContext, CompletionEngine, CompletionOption, CompletionProvider,
    CompletionResult,
};
pub use config::Config;
pub use error::{LoupeError, Result};
pub use formatter::Formatter;
pub use repl::ReplEngine;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}
