//! Configuration loaded from `.datavault.toml`.

pub mod settings;

pub use settings::Settings;
