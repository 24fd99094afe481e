//! End-to-end completion behavior against the demo catalog

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use loupe::catalog::Catalog;
use loupe::completion::{
    CompletionConfig, CompletionContext, CompletionEngine, CompletionKind, CompletionOption,
    CompletionProvider, CompletionResult, Line, Position, ValidFor,
};
use loupe::error::{LoupeError, ProviderError, Result};

/// Demo catalog that remembers every field request
struct RecordingCatalog {
    inner: Catalog,
    field_calls: Mutex<Vec<CompletionContext>>,
}

impl RecordingCatalog {
    fn demo() -> Self {
        Self {
            inner: Catalog::demo(),
            field_calls: Mutex::new(Vec::new()),
        }
    }

    fn last_field_call(&self) -> Option<CompletionContext> {
        self.field_calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionProvider for RecordingCatalog {
    async fn commands(&self) -> Result<Vec<CompletionOption>> {
        self.inner.commands().await
    }

    async fn schemas(&self, command: &str) -> Result<Vec<CompletionOption>> {
        self.inner.schemas(command).await
    }

    async fn fields(&self, context: &CompletionContext) -> Result<Vec<CompletionOption>> {
        self.field_calls.lock().unwrap().push(context.clone());
        self.inner.fields(context).await
    }
}

/// Provider whose backing store is down
struct OfflineProvider;

#[async_trait]
impl CompletionProvider for OfflineProvider {
    async fn commands(&self) -> Result<Vec<CompletionOption>> {
        Err(ProviderError::Unavailable("catalog service".into()).into())
    }

    async fn schemas(&self, _command: &str) -> Result<Vec<CompletionOption>> {
        Err(ProviderError::Unavailable("catalog service".into()).into())
    }

    async fn fields(&self, _context: &CompletionContext) -> Result<Vec<CompletionOption>> {
        Err(ProviderError::Unavailable("catalog service".into()).into())
    }
}

fn demo_engine() -> CompletionEngine {
    CompletionEngine::new(Arc::new(Catalog::demo()), CompletionConfig::default())
}

async fn complete_at_end(engine: &CompletionEngine, text: &str) -> Option<CompletionResult> {
    engine.complete_text(text, text.len()).await.unwrap()
}

#[tokio::test]
async fn command_position_at_start_or_after_whitespace() {
    let engine = demo_engine();

    for (text, cursor) in [
        ("", 0),
        ("   ", 3),
        ("get User", 0),
        ("get User\n", 9),
        ("get User\n  ", 11),
    ] {
        let result = engine.complete_text(text, cursor).await.unwrap().unwrap();
        assert_eq!(result.position, Position::Command, "text {:?}", text);
        assert_eq!(result.from, cursor, "text {:?}", text);
        assert!(result.contains("get"));
        assert!(result.contains("search"));
    }
}

#[tokio::test]
async fn command_position_replaces_partial_word() {
    let result = complete_at_end(&demo_engine(), "fe").await.unwrap();
    assert_eq!(result.position, Position::Command);
    assert_eq!(result.from, 0);
    // Prefix filtering is left to the editor
    assert_eq!(result.options.len(), 5);
    assert_eq!(result.valid_for, ValidFor::Word);
}

#[tokio::test]
async fn schema_position_after_command() {
    let result = complete_at_end(&demo_engine(), "get ").await.unwrap();
    assert_eq!(result.position, Position::Schema);
    assert_eq!(result.from, 4);
    assert_eq!(result.labels(), vec!["Post", "Role", "Transaction", "User"]);
}

#[tokio::test]
async fn quantifiers_are_consumed_before_schema() {
    let engine = demo_engine();

    for text in ["get 10 ", "get 5..20 ", "get 3k ", "get 2m ", "get all "] {
        let result = complete_at_end(&engine, text).await.unwrap();
        assert_eq!(result.position, Position::Schema, "text {:?}", text);
        assert_eq!(result.from, text.len(), "text {:?}", text);
    }

    let result = complete_at_end(&engine, "get 5..20 Us").await.unwrap();
    assert_eq!(result.position, Position::Schema);
    assert_eq!(result.from, 10);
}

#[tokio::test]
async fn fields_after_where() {
    let provider = Arc::new(RecordingCatalog::demo());
    let engine = CompletionEngine::new(provider.clone(), CompletionConfig::default());

    let result = complete_at_end(&engine, "get User where ").await.unwrap();
    assert_eq!(result.position, Position::Field);
    assert!(result.contains("email"));
    assert!(!result.contains("where"));

    let context = provider.last_field_call().unwrap();
    assert_eq!(context.command, "get");
    assert_eq!(context.schema, "User");
    assert!(context.field_path.is_empty());
    assert_eq!(context.kind, CompletionKind::Field);
}

#[tokio::test]
async fn fields_after_where_win_over_keywords() {
    let result = complete_at_end(&demo_engine(), "get User where em").await.unwrap();
    assert_eq!(result.position, Position::Field);
    assert_eq!(result.from, 15);
    assert!(!result.contains("and"));
}

#[tokio::test]
async fn nested_association_path() {
    let provider = Arc::new(RecordingCatalog::demo());
    let engine = CompletionEngine::new(provider.clone(), CompletionConfig::default());

    let text = "get Post where author.";
    let result = complete_at_end(&engine, text).await.unwrap();
    assert_eq!(result.position, Position::NestedField);
    assert_eq!(result.from, text.len());
    assert!(result.contains("email"));
    assert!(result.contains("role"));

    let context = provider.last_field_call().unwrap();
    assert_eq!(context.schema, "Post");
    assert_eq!(context.field_path, vec!["author".to_string()]);
}

#[tokio::test]
async fn two_level_association_path() {
    let text = "get Transaction where user.role.le";
    let result = complete_at_end(&demo_engine(), text).await.unwrap();

    assert_eq!(result.position, Position::NestedField);
    assert_eq!(result.from, text.len() - 2);
    assert_eq!(result.labels(), vec!["name", "permissions", "level"]);
}

#[tokio::test]
async fn not_offered_after_logical_operators() {
    let engine = demo_engine();

    let result = complete_at_end(&engine, "get User where id = 1 and ")
        .await
        .unwrap();
    assert_eq!(result.position, Position::AfterLogical);
    assert_eq!(result.options.last().map(|o| o.label.as_str()), Some("not"));
    assert!(result.contains("email"));

    let result = complete_at_end(&engine, "get User where ( ").await.unwrap();
    assert_eq!(result.position, Position::AfterLogical);
    assert!(result.contains("not"));
}

#[tokio::test]
async fn operator_after_field_only() {
    let engine = demo_engine();

    let result = complete_at_end(&engine, "get User where role.name ")
        .await
        .unwrap();
    assert_eq!(result.position, Position::Operator);
    assert_eq!(result.valid_for, ValidFor::Operator);
    assert_eq!(
        result.labels(),
        vec!["=", "!=", ">", "<", ">=", "<=", "in", "like"]
    );

    // Past the operator the filter continues with keywords
    let result = complete_at_end(&engine, "get User where role.name = ")
        .await
        .unwrap();
    assert_eq!(result.position, Position::Keyword);
    assert!(!result.contains("all"));
}

#[tokio::test]
async fn missing_scope_gives_nothing() {
    let engine = demo_engine();

    assert!(complete_at_end(&engine, " get User where id ").await.is_none());
    assert!(complete_at_end(&engine, "x = 1 ").await.is_none());
}

#[tokio::test]
async fn multi_line_query_resolves_schema() {
    let text = "get Transaction\nwhere\n  amount > 5 and st";
    let result = complete_at_end(&demo_engine(), text).await.unwrap();

    assert_eq!(result.position, Position::AfterLogical);
    assert_eq!(result.from, text.len() - 2);
    assert!(result.contains("status"));
}

#[tokio::test]
async fn identical_requests_are_identical() {
    let engine = demo_engine();
    let text = "get Post where author.na";

    let first = complete_at_end(&engine, text).await;
    let second = complete_at_end(&engine, text).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn sentinel_vetoes_other_documents() {
    let engine = CompletionEngine::new(
        Arc::new(Catalog::demo()),
        CompletionConfig::new().with_sentinel("?"),
    );

    assert!(complete_at_end(&engine, "get ").await.is_none());
    assert!(complete_at_end(&engine, "?").await.is_none());
}

#[tokio::test]
async fn start_at_skips_a_prefix() {
    let text = "query: get ";

    assert!(complete_at_end(&demo_engine(), text).await.is_none());

    let engine = CompletionEngine::new(
        Arc::new(Catalog::demo()),
        CompletionConfig::new().with_start_at(7),
    );
    let result = complete_at_end(&engine, text).await.unwrap();
    assert_eq!(result.position, Position::Schema);
    assert_eq!(result.from, text.len());
}

#[tokio::test]
async fn host_line_lookup_is_used() {
    let engine = demo_engine();
    let text = "get Us";
    let lookup = |_offset: usize| Line {
        from: 0,
        text: "get Us".to_string(),
    };

    let result = engine.complete(text, 6, &lookup).await.unwrap().unwrap();
    assert_eq!(result.position, Position::Schema);
    assert_eq!(result.from, 4);
}

#[tokio::test]
async fn provider_failures_reach_the_caller() {
    let engine = CompletionEngine::new(Arc::new(OfflineProvider), CompletionConfig::default());

    let err = engine.complete_text("", 0).await.unwrap_err();
    assert!(matches!(
        err,
        LoupeError::Provider(ProviderError::Unavailable(_))
    ));

    // Operator candidates are fixed and never reach the provider
    let text = "get User where id ";
    let result = engine.complete_text(text, text.len()).await.unwrap();
    assert_eq!(result.unwrap().position, Position::Operator);
}

#[test]
fn engine_can_be_driven_synchronously() {
    let engine = demo_engine();
    let result = tokio_test::block_on(engine.complete_text("get Role where ", 15))
        .unwrap()
        .unwrap();
    assert_eq!(result.labels(), vec!["name", "permissions", "level"]);
}
