//! Loupe - interactive query editor
//!
//! Edits queries in the Loupe query language with context-aware completion
//! of commands, schemas, fields, operators and keywords.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode with the demo catalog
//! loupe
//!
//! # One-shot completion
//! loupe complete --query "get Post where author."
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;

use loupe::Result;
use loupe::cli::CliInterface;
use loupe::formatter::Formatter;
use loupe::repl::{ReplEngine, ReplInput};

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands or start the REPL
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand().await? {
        return Ok(());
    }

    cli.print_banner();

    run_interactive_mode(&cli)
}

/// Run application in interactive REPL mode
fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let engine = cli.completion_engine()?;
    let mut repl = ReplEngine::new(
        engine,
        &cli.config().history,
        cli.config().display.syntax_highlighting,
        &cli.catalog_label(),
    )?;
    let formatter = cli.formatter();

    run_repl_loop(&mut repl, &formatter)?;

    println!("Goodbye!");
    Ok(())
}

/// Main REPL loop
fn run_repl_loop(repl: &mut ReplEngine, formatter: &Formatter) -> Result<()> {
    while repl.is_running() {
        let Some(input) = repl.read_line()? else {
            break;
        };

        match repl.process_input(&input) {
            ReplInput::Empty => continue,
            ReplInput::Exit => break,
            ReplInput::Query(tokens) => match formatter.format_tokens(input.trim(), &tokens) {
                Ok(output) => println!("{}", output),
                Err(e) => eprintln!("Format error: {}", e),
            },
        }
    }

    Ok(())
}

/// Initialize logging system based on verbosity level
///
/// `RUST_LOG`, when set, takes precedence over the configured level.
fn initialize_logging(cli: &CliInterface) {
    let level: Level = cli.config().logging.level.to_tracing_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_module_structure() {
        assert!(!loupe::version().is_empty());
    }
}
