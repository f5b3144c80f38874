//! Messages delivered from the router to an embedder.
//!
//! Two kinds of message share one shape:
//! - **Guest events**: `dispatch_event` tag, guest id, catalog event name, args.
//! - **Relayed messages**: `ipc_message` tag, guest id, sub-channel, args.

use guestview_common::{GuestEvent, GuestId};
use guestview_config::schema::{
    GuestViewConfig, DEFAULT_DISPATCH_EVENT_CHANNEL, DEFAULT_IPC_MESSAGE_CHANNEL,
    DEFAULT_RELAY_SOURCE_EVENT,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Channel tags and the relay source event used by a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channels {
    /// Outbound tag for forwarded catalog events.
    pub dispatch_event: String,
    /// Outbound tag for relayed application messages.
    pub ipc_message: String,
    /// Guest event carrying application messages.
    pub relay_event: String,
}

impl Default for Channels {
    fn default() -> Self {
        Self {
            dispatch_event: DEFAULT_DISPATCH_EVENT_CHANNEL.to_string(),
            ipc_message: DEFAULT_IPC_MESSAGE_CHANNEL.to_string(),
            relay_event: DEFAULT_RELAY_SOURCE_EVENT.to_string(),
        }
    }
}

impl From<&GuestViewConfig> for Channels {
    fn from(config: &GuestViewConfig) -> Self {
        Self {
            dispatch_event: config.channels.dispatch_event.clone(),
            ipc_message: config.channels.ipc_message.clone(),
            relay_event: config.relay.source_event.clone(),
        }
    }
}

/// A single outbound message for an embedder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Channel tag.
    pub channel: String,
    /// The guest the message originated from.
    pub guest_id: GuestId,
    /// Event name for guest events, sub-channel for relayed messages.
    pub name: String,
    /// Remaining positional arguments.
    pub args: Vec<Value>,
}

impl OutboundMessage {
    /// A forwarded catalog event.
    pub fn guest_event(channels: &Channels, guest_id: GuestId, event: GuestEvent, args: &[Value]) -> Self {
        Self {
            channel: channels.dispatch_event.clone(),
            guest_id,
            name: event.as_str().to_string(),
            args: args.to_vec(),
        }
    }

    /// A relayed application message.
    pub fn ipc_message(channels: &Channels, guest_id: GuestId, sub_channel: &str, args: &[Value]) -> Self {
        Self {
            channel: channels.ipc_message.clone(),
            guest_id,
            name: sub_channel.to_string(),
            args: args.to_vec(),
        }
    }

    /// The payload following the channel tag, flattened in send order:
    /// guest id, name, then every argument.
    pub fn positional_args(&self) -> Vec<Value> {
        let mut out = Vec::with_capacity(self.args.len() + 2);
        out.push(self.guest_id.into());
        out.push(Value::String(self.name.clone()));
        out.extend(self.args.iter().cloned());
        out
    }
}
