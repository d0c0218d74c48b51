//! "Store a secret" — encrypt data under a passkey and print the token.

use crate::cli::{output, prompt_passkey, prompt_text};
use crate::errors::Result;
use crate::vault::VaultService;

/// Execute the store operation interactively.
pub fn execute(service: &mut VaultService) -> Result<()> {
    let owner = prompt_text("Your name")?;
    let secret = prompt_text("Secret data")?;
    let passkey = prompt_passkey("Create passkey")?;

    let token = service.store(&owner, &secret, &passkey)?;

    output::success("Data encrypted and saved.");
    output::info("Ciphertext token (needed to retrieve this secret):");
    println!("{token}");

    Ok(())
}
