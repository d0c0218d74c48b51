use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{DataVaultError, Result};

/// Project-level configuration, loaded from `.datavault.toml`.
///
/// Every field has a sensible default so DataVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory (relative to the working directory) where the record
    /// and lock tables are stored.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// File name for the persisted entry table.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// File name for the persisted lock table.
    #[serde(default = "default_lock_file")]
    pub lock_file: String,

    /// The out-of-band admin credential that can clear lockouts.
    /// Kept entirely separate from the passkey digest pipeline.
    /// Overridable via the `DATAVAULT_ADMIN_SECRET` env var.
    #[serde(default = "default_admin_secret")]
    pub admin_secret: String,

    /// Failed verifications before a lockout triggers (default: 3).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// How long a lockout lasts, in seconds (default: 300).
    #[serde(default = "default_lockout_seconds")]
    pub lockout_seconds: u64,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    ".datavault".to_string()
}

fn default_data_file() -> String {
    "data.json".to_string()
}

fn default_lock_file() -> String {
    "locks.json".to_string()
}

fn default_admin_secret() -> String {
    "admin123".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_lockout_seconds() -> u64 {
    300
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            data_file: default_data_file(),
            lock_file: default_lock_file(),
            admin_secret: default_admin_secret(),
            max_attempts: default_max_attempts(),
            lockout_seconds: default_lockout_seconds(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".datavault.toml";

    /// Load settings from `<project_dir>/.datavault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    /// `DATAVAULT_ADMIN_SECRET` overrides the admin secret either way.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        let mut settings = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            toml::from_str(&contents).map_err(|e| {
                DataVaultError::ConfigError(format!(
                    "Failed to parse {}: {e}",
                    config_path.display()
                ))
            })?
        } else {
            Self::default()
        };

        if let Ok(secret) = std::env::var("DATAVAULT_ADMIN_SECRET") {
            if !secret.is_empty() {
                settings.admin_secret = secret;
            }
        }

        Ok(settings)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
