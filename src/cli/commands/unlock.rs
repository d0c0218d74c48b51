//! "Admin unlock" — reauthorize with the admin secret to clear lockouts.

use crate::cli::{output, prompt_hidden, prompt_text};
use crate::errors::Result;
use crate::vault::{UnlockOutcome, VaultService};

/// Execute the admin unlock operation interactively.
pub fn execute(service: &mut VaultService) -> Result<()> {
    let admin_secret = prompt_hidden("Admin secret")?;
    let token = prompt_text("Token to unlock (leave empty to only reset the counter)")?;
    let token = if token.is_empty() {
        None
    } else {
        Some(token.as_str())
    };

    match service.admin_unlock(&admin_secret, token)? {
        UnlockOutcome::Reauthorized { token_cleared } => {
            if token_cleared {
                output::success("Token unlocked and attempt counter reset.");
            } else {
                output::success("Reauthorized. Attempt counter reset.");
            }
        }
        UnlockOutcome::Denied => {
            output::error("Incorrect admin secret.");
        }
    }

    Ok(())
}
