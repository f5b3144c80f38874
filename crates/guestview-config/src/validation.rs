//! Configuration validation.
//!
//! Checks that channel tags are usable and that the relay source event
//! does not shadow a forwarded catalog event.

use crate::schema::GuestViewConfig;
use guestview_common::{ConfigError, GuestEvent};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &GuestViewConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_non_empty(&mut errors, "channels.dispatch_event", &config.channels.dispatch_event);
    validate_non_empty(&mut errors, "channels.ipc_message", &config.channels.ipc_message);
    validate_non_empty(&mut errors, "relay.source_event", &config.relay.source_event);

    if !config.channels.dispatch_event.is_empty()
        && config.channels.dispatch_event == config.channels.ipc_message
    {
        errors.push(format!(
            "channels.dispatch_event and channels.ipc_message must differ (both '{}')",
            config.channels.dispatch_event
        ));
    }

    if let Some(event) = GuestEvent::from_name(&config.relay.source_event) {
        errors.push(format!(
            "relay.source_event '{event}' collides with a forwarded guest event"
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_non_empty(errors: &mut Vec<String>, name: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{name} must not be empty"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&GuestViewConfig::default()).is_ok());
    }

    #[test]
    fn empty_channel_is_rejected() {
        let mut config = GuestViewConfig::default();
        config.channels.ipc_message = "  ".into();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("channels.ipc_message must not be empty"));
    }

    #[test]
    fn identical_channels_are_rejected() {
        let mut config = GuestViewConfig::default();
        config.channels.ipc_message = config.channels.dispatch_event.clone();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn relay_event_colliding_with_catalog_is_rejected() {
        let mut config = GuestViewConfig::default();
        config.relay.source_event = "dom-ready".into();
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("collides"));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = GuestViewConfig::default();
        config.channels.dispatch_event = String::new();
        config.relay.source_event = "close".into();
        let msg = validate(&config).unwrap_err().to_string();
        assert!(msg.contains("channels.dispatch_event must not be empty"));
        assert!(msg.contains("collides"));
        assert_eq!(msg.matches("; ").count(), 1);
    }
}
