//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use clap::Parser;
use zeroize::Zeroizing;

use crate::errors::{DataVaultError, Result};

/// DataVault CLI: single-tenant encrypted note vault.
#[derive(Parser)]
#[command(
    name = "datavault",
    about = "Encrypted note vault with passkey-gated retrieval",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Vault directory (default: .datavault)
    #[arg(long, default_value = ".datavault", global = true)]
    pub vault_dir: String,
}

/// All available subcommands.  Running with no subcommand starts an
/// interactive session — the cipher key lives only as long as the
/// process, so store and retrieve must share one run.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Start an interactive vault session (the default)
    Session,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Prompt for a passkey without echoing it.
///
/// `DATAVAULT_PASSKEY` is honored first for scripted use.
/// Returns `Zeroizing<String>` so the passkey is wiped from memory on drop.
pub fn prompt_passkey(prompt: &str) -> Result<Zeroizing<String>> {
    if let Ok(pk) = std::env::var("DATAVAULT_PASSKEY") {
        if !pk.is_empty() {
            return Ok(Zeroizing::new(pk));
        }
    }

    let pk = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| DataVaultError::CommandFailed(format!("passkey prompt: {e}")))?;
    Ok(Zeroizing::new(pk))
}

/// Prompt for a hidden value with no env-var fallback (admin secret).
pub fn prompt_hidden(prompt: &str) -> Result<Zeroizing<String>> {
    let value = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()
        .map_err(|e| DataVaultError::CommandFailed(format!("hidden prompt: {e}")))?;
    Ok(Zeroizing::new(value))
}

/// Prompt for a free-text field (owner name, token, secret data).
pub fn prompt_text(prompt: &str) -> Result<String> {
    dialoguer::Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| DataVaultError::CommandFailed(format!("input prompt: {e}")))
}
