//! Shell completion generation for the loupe binary

use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::CliArgs;
use crate::error::{ConfigError, Result};

/// Binary name the scripts register completions for
const BIN_NAME: &str = "loupe";

/// Print a shell completion script to stdout
///
/// # Arguments
/// * `shell_name` - Shell type (bash, zsh, fish, powershell)
///
/// # Returns
/// * `Result<()>` - Success or error
pub fn generate_completion(shell_name: &str) -> Result<()> {
    print!("{}", render_completion(shell_name)?);
    Ok(())
}

/// Build the completion script for a shell
pub fn render_completion(shell_name: &str) -> Result<String> {
    let shell = parse_shell(shell_name)?;
    let mut cmd = CliArgs::command();
    let mut buffer = Vec::new();
    generate(shell, &mut cmd, BIN_NAME, &mut buffer);
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Parse shell name string to Shell enum
fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        "powershell" | "pwsh" => Ok(Shell::PowerShell),
        _ => Err(ConfigError::Generic(format!(
            "Unsupported shell: {}. Supported shells: bash, zsh, fish, powershell",
            shell_name
        ))
        .into()),
    }
}
