//! Context-sensitive completion for the Loupe query language
//!
//! The engine infers from partial, usually invalid, query text what kind of
//! token the user is about to type and asks the host for candidates. It never
//! parses or validates the query: at worst it offers nothing.
//!
//! # Architecture
//!
//! - **MatchState**: text windows around the cursor for one request
//! - **Rules**: ordered predicates, first match wins
//! - **Provider**: host callbacks for commands, schemas and fields
//! - **Engine**: runs the rules and awaits the one provider call needed
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use loupe::catalog::Catalog;
//! use loupe::completion::{CompletionConfig, CompletionEngine};
//!
//! # async fn demo() -> loupe::Result<()> {
//! let engine = CompletionEngine::new(Arc::new(Catalog::demo()), CompletionConfig::default());
//!
//! // Fields of the `author` association of `Post`
//! let text = "get Post where author.";
//! if let Some(result) = engine.complete_text(text, text.len()).await? {
//!     println!("replace from {}: {:?}", result.from, result.labels());
//! }
//! # Ok(())
//! # }
//! ```

mod context;
mod engine;
mod option;
mod provider;
mod result;
mod rules;
mod state;
pub mod vocabulary;

pub use context::{CompletionContext, CompletionKind};
pub use engine::{CompletionConfig, CompletionEngine, EnabledFn};
pub use option::{CompletionOption, OptionKind};
pub use provider::CompletionProvider;
pub use result::{CompletionResult, Position, ValidFor};
pub use state::{Line, LineLookup, TextLines};
