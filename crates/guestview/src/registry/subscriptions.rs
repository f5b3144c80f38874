use std::rc::Rc;

use guestview_common::{GuestEvent, ListenerId};

use crate::host::{Guest, GuestListener};

use super::dispatch::ForwardingListener;
use super::Shared;

/// What a guest-side subscription forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum EventKind {
    /// A catalog event, sent on the dispatch-event channel.
    Forwarded(GuestEvent),
    /// The relay source event, sent on the ipc-message channel.
    Relay,
}

struct Subscription {
    event: String,
    listener: ListenerId,
}

/// Handles for every listener installed on one guest. Always the full
/// catalog plus the relay event; built and dropped as a unit.
pub(crate) struct Subscriptions {
    handles: Vec<Subscription>,
}

impl Subscriptions {
    pub(crate) fn wire(shared: &Rc<Shared>, guest: &dyn Guest) -> Self {
        let mut handles = Vec::with_capacity(GuestEvent::ALL.len() + 1);
        for event in GuestEvent::ALL {
            handles.push(subscribe(shared, guest, EventKind::Forwarded(event), event.as_str()));
        }
        handles.push(subscribe(
            shared,
            guest,
            EventKind::Relay,
            &shared.channels.relay_event,
        ));
        Self { handles }
    }

    pub(crate) fn unwire(self, guest: &dyn Guest) {
        for sub in self.handles {
            guest.unsubscribe(&sub.event, sub.listener);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.handles.len()
    }
}

fn subscribe(shared: &Rc<Shared>, guest: &dyn Guest, kind: EventKind, event: &str) -> Subscription {
    let listener: Rc<dyn GuestListener> = Rc::new(ForwardingListener::new(shared, kind));
    Subscription {
        event: event.to_string(),
        listener: guest.subscribe(event, listener),
    }
}
