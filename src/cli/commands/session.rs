//! `datavault session` — the interactive vault session.
//!
//! The cipher key is generated at session start and dies with the
//! process, so storing and retrieving must happen within one session.
//! The menu mirrors the vault's operations; each choice calls into the
//! core and renders the returned outcome.

use crate::cli::{output, Cli};
use crate::config::Settings;
use crate::errors::{DataVaultError, Result};
use crate::vault::VaultService;

use super::{entries, retrieve, store, unlock};

const MENU: &[&str] = &[
    "Store a secret",
    "Retrieve a secret",
    "View entries",
    "Admin unlock",
    "Quit",
];

/// Execute the interactive session.
pub fn execute(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let mut settings = Settings::load(&cwd)?;

    // The --vault-dir flag overrides the config file.
    if cli.vault_dir != ".datavault" {
        settings.vault_dir = cli.vault_dir.clone();
    }

    let mut service = VaultService::open(&settings, &cwd);

    output::info("Welcome to your encrypted vault.");
    output::tip("Secrets are encrypted under a key that lives only for this session.");
    if service.entry_count() > 0 {
        output::info(&format!(
            "{} entries loaded from a previous session (not decryptable under this session's key).",
            service.entry_count()
        ));
    }

    loop {
        println!();
        let choice = dialoguer::Select::new()
            .with_prompt("Navigation")
            .items(MENU)
            .default(0)
            .interact()
            .map_err(|e| DataVaultError::CommandFailed(format!("menu prompt: {e}")))?;

        let result = match choice {
            0 => store::execute(&mut service),
            1 => retrieve::execute(&mut service),
            2 => entries::execute(&service),
            3 => unlock::execute(&mut service),
            _ => break,
        };

        // Validation problems are user messages, not session enders.
        match result {
            Ok(()) => {}
            Err(DataVaultError::Validation(msg)) => output::error(&msg),
            Err(e) => return Err(e),
        }
    }

    Ok(())
}
