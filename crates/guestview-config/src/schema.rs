//! Configuration schema types.
//!
//! All structs use `serde(default)` so partial configs work correctly.

use serde::{Deserialize, Serialize};

/// Default channel tag for forwarded guest events.
pub const DEFAULT_DISPATCH_EVENT_CHANNEL: &str = "ELECTRON_GUEST_VIEW_INTERNAL_DISPATCH_EVENT";
/// Default channel tag for relayed guest messages.
pub const DEFAULT_IPC_MESSAGE_CHANNEL: &str = "ELECTRON_GUEST_VIEW_INTERNAL_IPC_MESSAGE";
/// Default guest event that carries application messages.
pub const DEFAULT_RELAY_SOURCE_EVENT: &str = "ipc-message-host";

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GuestViewConfig {
    pub channels: ChannelsConfig,
    pub relay: RelayConfig,
    pub logging: LoggingConfig,
}

/// Outbound channel tags used when sending to an embedder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChannelsConfig {
    /// Tag for forwarded catalog events.
    pub dispatch_event: String,
    /// Tag for relayed application messages.
    pub ipc_message: String,
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        Self {
            dispatch_event: DEFAULT_DISPATCH_EVENT_CHANNEL.to_string(),
            ipc_message: DEFAULT_IPC_MESSAGE_CHANNEL.to_string(),
        }
    }
}

/// Message relay settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RelayConfig {
    /// Guest event whose first argument is the sub-channel name.
    pub source_event: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            source_event: DEFAULT_RELAY_SOURCE_EVENT.to_string(),
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// The level as an `EnvFilter` directive.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_channels() {
        let config = GuestViewConfig::default();
        assert_eq!(
            config.channels.dispatch_event,
            "ELECTRON_GUEST_VIEW_INTERNAL_DISPATCH_EVENT"
        );
        assert_eq!(
            config.channels.ipc_message,
            "ELECTRON_GUEST_VIEW_INTERNAL_IPC_MESSAGE"
        );
        assert_eq!(config.relay.source_event, "ipc-message-host");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: GuestViewConfig = toml::from_str(
            r#"
[channels]
ipc_message = "CUSTOM_IPC"
"#,
        )
        .unwrap();
        assert_eq!(config.channels.ipc_message, "CUSTOM_IPC");
        assert_eq!(
            config.channels.dispatch_event,
            DEFAULT_DISPATCH_EVENT_CHANNEL
        );
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn log_level_parses_lowercase() {
        let config: GuestViewConfig = toml::from_str("[logging]\nlevel = \"warning\"\n").unwrap();
        assert_eq!(config.logging.level, LogLevel::Warning);
        assert_eq!(config.logging.level.as_directive(), "warn");
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let result: Result<GuestViewConfig, _> = toml::from_str("[logging]\nlevel = \"loud\"\n");
        assert!(result.is_err());
    }
}
