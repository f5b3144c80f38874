//! guestview configuration.
//!
//! TOML-based configuration for the guest event router: the outbound
//! channel tags, the relay source event, and logging. Every section uses
//! serde defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use guestview_config::load_config;
//!
//! let config = load_config().expect("failed to load config");
//! println!("{}", config.channels.dispatch_event);
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{ChannelsConfig, GuestViewConfig, LogLevel, LoggingConfig, RelayConfig};
pub use toml_loader::{default_config_path, load_from_path};

use guestview_common::ConfigError;

/// Load config from the platform default path, creating a default file if
/// none exists.
pub fn load_config() -> Result<GuestViewConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &GuestViewConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
