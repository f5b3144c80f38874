//! TOML config file loading and creation.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use guestview_common::ConfigError;
use tracing::{info, warn};

use crate::schema::GuestViewConfig;
use crate::validation;

/// Load config from a specific TOML file path.
///
/// Missing fields take serde defaults. A config that parses but fails
/// validation is replaced by the defaults, with a warning.
pub fn load_from_path(path: &Path) -> Result<GuestViewConfig, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ConfigError::FileNotFound(path.to_path_buf()))
        }
        Err(e) => return Err(io_error("read", path, e)),
    };

    let config: GuestViewConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    match validation::validate(&config) {
        Ok(()) => {
            info!(path = %path.display(), "config loaded");
            Ok(config)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Ok(GuestViewConfig::default())
        }
    }
}

/// Load `~/.config/guestview/config.toml` (or the platform equivalent),
/// writing a commented default file on first run.
pub fn load_default() -> Result<GuestViewConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            create_default_config(&path)?;
            Ok(GuestViewConfig::default())
        }
        loaded => loaded,
    }
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("guestview").join("config.toml"))
}

/// Write the commented default config, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_error("create", parent, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| io_error("write", path, e))?;
    info!(path = %path.display(), "default config created");
    Ok(())
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> ConfigError {
    ConfigError::ParseError(format!("failed to {action} {}: {e}", path.display()))
}

fn default_config_toml() -> String {
    r#"# guestview configuration
# Only override what you want to change -- missing fields use defaults.

[channels]
# Channel tag for forwarded guest events.
# dispatch_event = "ELECTRON_GUEST_VIEW_INTERNAL_DISPATCH_EVENT"
# Channel tag for relayed guest messages.
# ipc_message = "ELECTRON_GUEST_VIEW_INTERNAL_IPC_MESSAGE"

[relay]
# Guest event carrying application messages (first argument is the sub-channel).
# source_event = "ipc-message-host"

[logging]
# level = "info"           # trace | debug | info | warning | error
"#
    .to_string()
}
