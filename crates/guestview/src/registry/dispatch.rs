use std::rc::{Rc, Weak};

use guestview_common::GuestId;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::host::{Guest, GuestListener};
use crate::message::OutboundMessage;

use super::subscriptions::EventKind;
use super::Shared;

/// Listener installed on a guest for one event kind. It captures no
/// embedder; the destination is looked up when the event fires.
pub(crate) struct ForwardingListener {
    shared: Weak<Shared>,
    kind: EventKind,
}

impl ForwardingListener {
    pub(crate) fn new(shared: &Rc<Shared>, kind: EventKind) -> Self {
        Self {
            shared: Rc::downgrade(shared),
            kind,
        }
    }
}

impl GuestListener for ForwardingListener {
    fn on_event(&self, guest: &dyn Guest, args: &[Value]) {
        if let Some(shared) = self.shared.upgrade() {
            shared.dispatch(guest, self.kind, args);
        }
    }
}

impl Shared {
    /// Forward one guest event to the guest's current embedder.
    pub(crate) fn dispatch(&self, guest: &dyn Guest, kind: EventKind, args: &[Value]) {
        let guest_id = guest.id();
        let Some(embedder) = self.current_embedder(guest_id) else {
            trace!(guest_id = guest_id.0, ?kind, "dropped: no embedder");
            return;
        };
        if embedder.is_destroyed() {
            trace!(guest_id = guest_id.0, ?kind, "dropped: embedder destroyed");
            return;
        }

        let message = match kind {
            EventKind::Forwarded(event) if event.is_terminal() => {
                // Delivered even though the guest is already destroyed.
                self.clear_destroyed_guest(guest_id);
                OutboundMessage::guest_event(&self.channels, guest_id, event, args)
            }
            EventKind::Forwarded(event) => {
                if guest.is_destroyed() {
                    trace!(guest_id = guest_id.0, %event, "dropped: guest destroyed");
                    return;
                }
                OutboundMessage::guest_event(&self.channels, guest_id, event, args)
            }
            EventKind::Relay => {
                if guest.is_destroyed() {
                    trace!(guest_id = guest_id.0, "relay dropped: guest destroyed");
                    return;
                }
                let Some((sub_channel, rest)) = split_sub_channel(args) else {
                    warn!(
                        guest_id = guest_id.0,
                        event = %self.channels.relay_event,
                        "relay dropped: first argument is not a channel name"
                    );
                    return;
                };
                OutboundMessage::ipc_message(&self.channels, guest_id, sub_channel, rest)
            }
        };

        trace!(
            guest_id = guest_id.0,
            embedder_id = embedder.id().0,
            channel = %message.channel,
            name = %message.name,
            "forwarding"
        );
        embedder.send(&message);
    }

    /// The guest signalled its own teardown: drop its binding before the
    /// final forward so a repeated signal finds nothing to deliver to.
    fn clear_destroyed_guest(&self, guest_id: GuestId) {
        let Some(record) = self.take_bound(guest_id) else {
            return;
        };
        let embedder_id = record.embedder.id();
        if !record.embedder.is_destroyed() {
            record.embedder.remove_destroyed_listener(record.teardown);
        }
        if !record.guest.is_destroyed() {
            record.subscriptions.unwire(&*record.guest);
        }
        debug!(guest_id = guest_id.0, embedder_id = embedder_id.0, "guest destroyed, binding cleared");
    }
}

fn split_sub_channel(args: &[Value]) -> Option<(&str, &[Value])> {
    match args.split_first() {
        Some((Value::String(channel), rest)) => Some((channel.as_str(), rest)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn split_sub_channel_takes_leading_string() {
        let args = [json!("chan"), json!(1), json!(2)];
        let (channel, rest) = split_sub_channel(&args).unwrap();
        assert_eq!(channel, "chan");
        assert_eq!(rest, &[json!(1), json!(2)]);
    }

    #[test]
    fn split_sub_channel_rejects_missing_or_non_string() {
        assert!(split_sub_channel(&[]).is_none());
        assert!(split_sub_channel(&[json!(42), json!("x")]).is_none());
    }
}
