use thiserror::Error;

/// All errors that can occur in DataVault.
///
/// Verification failures, lockouts, and admin denials are *not* errors —
/// they are ordinary outcomes of the vault protocol and are modeled as
/// result enums in `vault::service`. Nothing in this enum is fatal to
/// the process; the CLI reports the message and keeps running.
#[derive(Debug, Error)]
pub enum DataVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Ciphertext token failed integrity verification")]
    Integrity,

    // --- Input validation ---
    #[error("Invalid input: {0}")]
    Validation(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for DataVault results.
pub type Result<T> = std::result::Result<T, DataVaultError>;
