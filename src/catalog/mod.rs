//! Static schema catalog
//!
//! A [`Catalog`] is an in-memory description of the commands, schemas and
//! fields a host exposes. It implements [`CompletionProvider`], so it can
//! drive the completion engine without a live backend. Catalogs are loaded
//! from TOML:
//!
//! ```toml
//! [[commands]]
//! name = "get"
//! info = "Get records"
//!
//! [schemas.User]
//! info = "User accounts"
//! fields = [
//!   { name = "email", detail = "string" },
//!   { name = "role", detail = "Role", info = "User role (association)" },
//! ]
//!
//! [schemas.Role]
//! fields = [{ name = "name", detail = "string" }]
//!
//! [associations]
//! role = "Role"
//! ```
//!
//! Nested field paths are walked one segment at a time. A segment resolves
//! to a schema when the current schema has a field of that name whose detail
//! names a schema. Failing that, the `associations` table is consulted.

use std::collections::BTreeMap;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::completion::{CompletionContext, CompletionOption, CompletionProvider, OptionKind};
use crate::error::{CatalogError, Result};

/// A query command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDef {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,

    /// Schemas the command may query; all schemas when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Vec<String>>,
}

/// A field of a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,

    /// Field type; the name of another schema for associations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

/// A record type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,

    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// Commands, schemas and associations known to the host
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub commands: Vec<CommandDef>,

    #[serde(default)]
    pub schemas: BTreeMap<String, SchemaDef>,

    /// Field name to schema name, used when a field's detail is not a schema
    #[serde(default)]
    pub associations: BTreeMap<String, String>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the catalog file
    ///
    /// # Returns
    /// * `Result<Catalog>` - Validated catalog or error
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CatalogError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml(&content)?;
        debug!(
            path = %path.display(),
            schemas = catalog.schemas.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let catalog: Catalog =
            toml::from_str(content).map_err(|e| CatalogError::InvalidFormat(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check that every association points at a known schema
    pub fn validate(&self) -> Result<()> {
        for (field, schema) in &self.associations {
            if !self.schemas.contains_key(schema) {
                return Err(CatalogError::UnknownSchema {
                    field: field.clone(),
                    schema: schema.clone(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Catalog with the sample blog/accounting data
    pub fn demo() -> Self {
        fn field(name: &str, detail: &str, info: &str) -> FieldDef {
            FieldDef {
                name: name.to_string(),
                detail: Some(detail.to_string()),
                info: Some(info.to_string()),
            }
        }

        fn schema(info: &str, fields: Vec<FieldDef>) -> SchemaDef {
            SchemaDef {
                info: Some(info.to_string()),
                fields,
            }
        }

        let commands = [
            ("get", "Get records"),
            ("find", "Find records"),
            ("fetch", "Fetch records"),
            ("list", "List records"),
            ("search", "Search records"),
        ]
        .into_iter()
        .map(|(name, info)| CommandDef {
            name: name.to_string(),
            info: Some(info.to_string()),
            schemas: None,
        })
        .collect();

        let mut schemas = BTreeMap::new();
        schemas.insert(
            "User".to_string(),
            schema(
                "User accounts",
                vec![
                    field("id", "integer", "User ID"),
                    field("email", "string", "User email address"),
                    field("name", "string", "User full name"),
                    field("role", "Role", "User role (association)"),
                    field("status", "string", "Account status"),
                    field("created_at", "datetime", "Account creation date"),
                ],
            ),
        );
        schemas.insert(
            "Role".to_string(),
            schema(
                "User access role",
                vec![
                    field("name", "string", "Role name"),
                    field("permissions", "array", "Role permissions"),
                    field("level", "integer", "Permission level"),
                ],
            ),
        );
        schemas.insert(
            "Post".to_string(),
            schema(
                "Blog post or article",
                vec![
                    field("id", "integer", "Post ID"),
                    field("title", "string", "Post title"),
                    field("content", "text", "Post content"),
                    field("author", "User", "Post author (belongs to User)"),
                    field("published_at", "datetime", "Publication date"),
                ],
            ),
        );
        schemas.insert(
            "Transaction".to_string(),
            schema(
                "Financial transaction",
                vec![
                    field("id", "integer", "Transaction ID"),
                    field("amount", "decimal", "Transaction amount"),
                    field("status", "string", "Transaction status"),
                    field("user", "User", "Transaction user (belongs to User)"),
                ],
            ),
        );

        let associations = [("author", "User"), ("user", "User"), ("role", "Role")]
            .into_iter()
            .map(|(field, schema)| (field.to_string(), schema.to_string()))
            .collect();

        Self {
            commands,
            schemas,
            associations,
        }
    }

    /// Schema reached from `schema` through `segment`
    fn follow(&self, schema: &str, segment: &str) -> Option<&str> {
        let via_field = self
            .schemas
            .get(schema)
            .and_then(|def| def.fields.iter().find(|f| f.name == segment))
            .and_then(|f| f.detail.as_deref())
            .filter(|detail| self.schemas.contains_key(*detail));

        via_field.or_else(|| {
            self.associations
                .get(segment)
                .map(String::as_str)
                .filter(|target| self.schemas.contains_key(*target))
        })
    }

    /// Schema at the end of a field path, if every segment resolves
    pub fn resolve_path<'a>(&'a self, schema: &'a str, path: &[String]) -> Option<&'a str> {
        path.iter()
            .try_fold(schema, |current, segment| self.follow(current, segment))
    }

    /// Field candidates of a schema
    fn field_options(&self, schema: &str) -> Vec<CompletionOption> {
        self.schemas
            .get(schema)
            .map(|def| {
                def.fields
                    .iter()
                    .map(|f| CompletionOption {
                        label: f.name.clone(),
                        kind: OptionKind::Property,
                        detail: f.detail.clone(),
                        info: f.info.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for Catalog {
    async fn commands(&self) -> Result<Vec<CompletionOption>> {
        Ok(self
            .commands
            .iter()
            .map(|c| CompletionOption {
                label: c.name.clone(),
                kind: OptionKind::Command,
                detail: None,
                info: c.info.clone(),
            })
            .collect())
    }

    async fn schemas(&self, command: &str) -> Result<Vec<CompletionOption>> {
        let allowed = self
            .commands
            .iter()
            .find(|c| c.name == command)
            .and_then(|c| c.schemas.as_ref());

        Ok(self
            .schemas
            .iter()
            .filter(|(name, _)| allowed.is_none_or(|list| list.contains(name)))
            .map(|(name, def)| CompletionOption {
                label: name.clone(),
                kind: OptionKind::Type,
                detail: None,
                info: def.info.clone(),
            })
            .collect())
    }

    async fn fields(&self, context: &CompletionContext) -> Result<Vec<CompletionOption>> {
        match self.resolve_path(&context.schema, &context.field_path) {
            Some(schema) => Ok(self.field_options(schema)),
            None => {
                debug!(
                    schema = %context.schema,
                    path = ?context.field_path,
                    "field path does not resolve"
                );
                Ok(Vec::new())
            }
        }
    }
}
