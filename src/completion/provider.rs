//! Candidate provider contract
//!
//! Hosts implement [`CompletionProvider`] to feed commands, schemas and
//! fields to the engine. Calls may be slow (a network round trip, a schema
//! introspection query); the engine awaits at most one of them per request.

use async_trait::async_trait;

use super::context::CompletionContext;
use super::option::CompletionOption;
use crate::error::Result;

/// Trait for providing completion candidates
///
/// Implementations must be safe to call repeatedly, from any number of
/// independent requests. An `Err` is returned to the caller of the engine
/// unchanged.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Get the available query commands
    async fn commands(&self) -> Result<Vec<CompletionOption>>;

    /// Get the schemas a command can query
    ///
    /// # Arguments
    /// * `command` - Command typed at the start of the query
    async fn schemas(&self, command: &str) -> Result<Vec<CompletionOption>>;

    /// Get the fields reachable from a schema through a field path
    ///
    /// # Arguments
    /// * `context` - Command, schema and association path
    async fn fields(&self, context: &CompletionContext) -> Result<Vec<CompletionOption>>;
}
