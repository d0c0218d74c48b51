//! "Retrieve a secret" — verify a passkey and decrypt a token.

use crate::cli::{output, prompt_passkey, prompt_text};
use crate::errors::Result;
use crate::vault::{RetrieveOutcome, VaultService};

/// Execute the retrieve operation interactively.
pub fn execute(service: &mut VaultService) -> Result<()> {
    let token = prompt_text("Ciphertext token")?;
    let passkey = prompt_passkey("Enter passkey")?;

    match service.retrieve(&token, &passkey)? {
        RetrieveOutcome::Success {
            plaintext,
            lock_expired,
        } => {
            if lock_expired {
                output::info("The lock on this token had expired.");
            }
            output::success("Decrypted data:");
            println!("{plaintext}");
        }

        RetrieveOutcome::Failure {
            attempts_remaining,
            locked_now,
            lock_expired,
        } => {
            if lock_expired {
                output::info("The lock on this token had expired.");
            }
            if locked_now {
                output::warning(
                    "Too many failed attempts — this token is locked for 5 minutes or until admin unlock.",
                );
            } else {
                output::error(&format!(
                    "Incorrect passkey. Attempts left: {attempts_remaining}"
                ));
            }
        }

        RetrieveOutcome::Locked { remaining_seconds } => {
            output::warning(&format!(
                "This token is temporarily locked. {remaining_seconds} seconds remaining."
            ));
            output::tip("An admin unlock clears the lock early.");
        }
    }

    Ok(())
}
