//! Command-line interface for loupe
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Catalog selection
//! - One-shot subcommands (`complete`, `tokens`, `config`, `completion`, `version`)

pub mod completion;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::catalog::Catalog;
use crate::completion::CompletionEngine;
use crate::config::{Config, LogLevel, OutputFormat};
use crate::error::Result;
use crate::formatter::Formatter;
use crate::grammar::Lexer;

/// Loupe - query editor with context-aware completion
#[derive(Parser, Debug)]
#[command(
    name = "loupe",
    version,
    about = "Interactive editor for the Loupe query language",
    long_about = "Interactive editor for the Loupe query language with context-aware
completion of commands, schemas, fields, operators and keywords."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Schema catalog file (TOML); overrides the config file
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Output format (json, json-pretty, table)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (detailed logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for loupe
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Complete a query at a cursor position
    Complete {
        /// Query text
        #[arg(long, value_name = "TEXT")]
        query: String,

        /// Cursor byte offset (defaults to the end of the query)
        #[arg(long, value_name = "N")]
        cursor: Option<usize>,
    },

    /// Show how the lexer classifies a query
    Tokens {
        /// Query text
        #[arg(long, value_name = "TEXT")]
        query: String,
    },

    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        let args = CliArgs::parse();
        Self::from_args(args)
    }

    /// Create a CLI interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    ///
    /// # Arguments
    /// * `args` - Command-line arguments
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args);

        Ok(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        if let Some(format_str) = &args.format {
            match OutputFormat::parse(format_str) {
                Some(format) => config.display.format = format,
                None => eprintln!("Warning: Unknown format '{}', using default", format_str),
            }
        }

        if args.no_color {
            config.display.color_output = false;
        }

        if let Some(path) = &args.catalog {
            config.catalog.path = Some(path.clone());
        }

        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Load the configured catalog, or the built-in demo catalog
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.config.catalog.path {
            Some(path) => Catalog::load(path),
            None => {
                debug!("No catalog configured, using the demo catalog");
                Ok(Catalog::demo())
            }
        }
    }

    /// Label for the active catalog, shown in the REPL prompt
    pub fn catalog_label(&self) -> String {
        self.config
            .catalog
            .path
            .as_deref()
            .and_then(Path::file_stem)
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "demo".to_string())
    }

    /// Build a completion engine over the active catalog
    pub fn completion_engine(&self) -> Result<CompletionEngine> {
        let catalog = self.load_catalog()?;
        Ok(CompletionEngine::new(
            Arc::new(catalog),
            self.config.completion_config(),
        ))
    }

    /// Formatter for subcommand output
    pub fn formatter(&self) -> Formatter {
        Formatter::from_config(&self.config.display)
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if subcommand was handled, false to continue
    pub async fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Complete { query, cursor }) => {
                let output = self.run_complete(query, cursor.unwrap_or(query.len())).await?;
                println!("{}", output);
                Ok(true)
            }
            Some(Commands::Tokens { query }) => {
                println!("{}", self.run_tokens(query)?);
                Ok(true)
            }
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                completion::generate_completion(shell)?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Complete `query` at `cursor` and format the result
    async fn run_complete(&self, query: &str, cursor: usize) -> Result<String> {
        let engine = self.completion_engine()?;
        let result = engine.complete_text(query, cursor).await?;
        self.formatter().format_completion(result.as_ref())
    }

    /// Tokenize `query` and format the tokens
    fn run_tokens(&self, query: &str) -> Result<String> {
        let tokens = Lexer::tokenize(query);
        self.formatter().format_tokens(query, &tokens)
    }

    /// Show version information
    fn show_version(&self) {
        println!("loupe version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    /// Handle config subcommand
    ///
    /// # Arguments
    /// * `show` - Whether to show configuration
    /// * `validate` - Whether to validate configuration
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file();
        }

        if show {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("❌ Configuration file does not exist");
            return;
        }

        match Config::load_from_file(Some(&path)) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("✅ Configuration is valid"),
                Err(e) => println!("❌ Configuration validation failed: {}", e),
            },
            Err(e) => println!("❌ Failed to load configuration: {}", e),
        }

        if let Some(catalog) = &self.config.catalog.path {
            match Catalog::load(catalog) {
                Ok(_) => println!("✅ Catalog {} is valid", catalog.display()),
                Err(e) => println!("❌ Catalog {}: {}", catalog.display(), e),
            }
        }
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Configuration file: {}", path.display());
        println!();
        println!("=== Effective Configuration ===");
        println!();
        println!("{}", self.config.to_toml()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }

    /// Print banner with version and catalog info
    pub fn print_banner(&self) {
        if !self.args.quiet {
            println!("Loupe {}", env!("CARGO_PKG_VERSION"));
            println!("Catalog: {}", self.catalog_label());
            println!("Press Tab to complete, type exit or quit to leave.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(argv: &[&str]) -> CliInterface {
        let args = CliArgs::try_parse_from(argv).unwrap();
        let mut config = Config::default();
        CliInterface::apply_args_to_config(&mut config, &args);
        CliInterface { args, config }
    }

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(["loupe"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.catalog.is_none());
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args = CliArgs::try_parse_from(["loupe", "--no-color", "--quiet"]).unwrap();
        assert!(args.no_color);
        assert!(args.quiet);
    }

    #[test]
    fn test_complete_subcommand() {
        let args =
            CliArgs::try_parse_from(["loupe", "complete", "--query", "get Us", "--cursor", "5"])
                .unwrap();
        match args.command {
            Some(Commands::Complete { query, cursor }) => {
                assert_eq!(query, "get Us");
                assert_eq!(cursor, Some(5));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_args_override_config() {
        let cli = cli(&[
            "loupe",
            "--format",
            "table",
            "--no-color",
            "-v",
            "--catalog",
            "/tmp/shop.toml",
        ]);
        let config = cli.config();

        assert_eq!(config.display.format, OutputFormat::Table);
        assert!(!config.display.color_output);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(cli.catalog_label(), "shop");
    }

    #[test]
    fn test_unknown_format_keeps_default() {
        let cli = cli(&["loupe", "--format", "yaml"]);
        assert_eq!(cli.config().display.format, OutputFormat::JsonPretty);
    }

    #[test]
    fn test_demo_catalog_by_default() {
        let cli = cli(&["loupe"]);
        assert_eq!(cli.catalog_label(), "demo");
        assert!(cli.load_catalog().is_ok());
    }

    #[tokio::test]
    async fn test_run_complete_json() {
        let cli = cli(&["loupe", "--format", "json", "--no-color"]);
        let output = cli.run_complete("get Post where author.", 22).await.unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["from"], 22);
        assert_eq!(value["position"], "nested-field");
        assert!(
            value["options"]
                .as_array()
                .unwrap()
                .iter()
                .any(|o| o["label"] == "email")
        );
    }

    #[tokio::test]
    async fn test_run_complete_nothing() {
        let cli = cli(&["loupe", "--format", "json"]);
        let query = "get User {name, email} ";
        let output = cli.run_complete(query, query.len()).await.unwrap();
        assert_eq!(output, "null");
    }

    #[test]
    fn test_run_tokens_table() {
        let cli = cli(&["loupe", "--format", "table", "--no-color"]);
        let output = cli.run_tokens("get User").unwrap();
        assert!(output.contains("command"));
        assert!(output.contains("schema"));
    }
}
