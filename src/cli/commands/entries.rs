//! "View entries" — list stored entries without touching any plaintext.

use crate::cli::output;
use crate::errors::Result;
use crate::vault::VaultService;

/// Execute the entries listing.
pub fn execute(service: &VaultService) -> Result<()> {
    output::print_entries_table(service.entries());
    Ok(())
}
