//! In-process host runtime.
//!
//! `MemoryGuest` and `MemoryEmbedder` implement the host traits with plain
//! listener tables. They back the test suite and the scenario driver.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use guestview_common::{EmbedderId, GuestId, ListenerId};
use serde_json::Value;
use tracing::trace;

use crate::host::{Embedder, Guest, GuestListener, TeardownListener};
use crate::message::OutboundMessage;

/// Name of the event a guest emits when it is destroyed.
pub const DESTROYED_EVENT: &str = "destroyed";

struct GuestSlot {
    event: String,
    id: ListenerId,
    listener: Rc<dyn GuestListener>,
}

/// A guest whose events are emitted by hand.
pub struct MemoryGuest {
    id: GuestId,
    destroyed: Cell<bool>,
    next_listener: Cell<u64>,
    listeners: RefCell<Vec<GuestSlot>>,
}

impl MemoryGuest {
    pub fn new(id: GuestId) -> Rc<Self> {
        Rc::new(Self {
            id,
            destroyed: Cell::new(false),
            next_listener: Cell::new(1),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Emit `event` to every listener attached when the emit starts.
    /// Listeners may subscribe or unsubscribe while handling it.
    /// Returns how many listeners were invoked.
    pub fn emit(&self, event: &str, args: &[Value]) -> usize {
        let snapshot: Vec<Rc<dyn GuestListener>> = self
            .listeners
            .borrow()
            .iter()
            .filter(|slot| slot.event == event)
            .map(|slot| Rc::clone(&slot.listener))
            .collect();

        trace!(guest_id = self.id.0, event, listeners = snapshot.len(), "emit");
        for listener in &snapshot {
            listener.on_event(self, args);
        }
        snapshot.len()
    }

    /// Mark the guest destroyed, then emit `destroyed`. Repeated calls do nothing.
    pub fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        self.emit(DESTROYED_EVENT, &[]);
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|slot| slot.event == event)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl Guest for MemoryGuest {
    fn id(&self) -> GuestId {
        self.id
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    fn subscribe(&self, event: &str, listener: Rc<dyn GuestListener>) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push(GuestSlot {
            event: event.to_string(),
            id,
            listener,
        });
        id
    }

    fn unsubscribe(&self, event: &str, listener: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|slot| !(slot.id == listener && slot.event == event));
    }
}

/// An embedder that records everything sent to it.
pub struct MemoryEmbedder {
    id: EmbedderId,
    destroyed: Cell<bool>,
    next_listener: Cell<u64>,
    teardown: RefCell<Vec<(ListenerId, Rc<dyn TeardownListener>)>>,
    outbox: RefCell<Vec<OutboundMessage>>,
}

impl MemoryEmbedder {
    pub fn new(id: EmbedderId) -> Rc<Self> {
        Rc::new(Self {
            id,
            destroyed: Cell::new(false),
            next_listener: Cell::new(1),
            teardown: RefCell::new(Vec::new()),
            outbox: RefCell::new(Vec::new()),
        })
    }

    /// Mark the embedder destroyed and fire each teardown listener once.
    /// Repeated calls do nothing.
    pub fn destroy(&self) {
        if self.destroyed.replace(true) {
            return;
        }
        let listeners = std::mem::take(&mut *self.teardown.borrow_mut());
        for (_, listener) in listeners {
            listener.on_teardown();
        }
    }

    /// Messages received so far.
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.outbox.borrow().clone()
    }

    /// Drain received messages.
    pub fn take_sent(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut *self.outbox.borrow_mut())
    }

    pub fn teardown_listener_count(&self) -> usize {
        self.teardown.borrow().len()
    }
}

impl Embedder for MemoryEmbedder {
    fn id(&self) -> EmbedderId {
        self.id
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    fn once_destroyed(&self, listener: Rc<dyn TeardownListener>) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.teardown.borrow_mut().push((id, listener));
        id
    }

    fn remove_destroyed_listener(&self, listener: ListenerId) {
        self.teardown.borrow_mut().retain(|(id, _)| *id != listener);
    }

    fn send(&self, message: &OutboundMessage) {
        self.outbox.borrow_mut().push(message.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Counter(Cell<usize>);

    impl GuestListener for Counter {
        fn on_event(&self, _guest: &dyn Guest, _args: &[Value]) {
            self.0.set(self.0.get() + 1);
        }
    }

    impl TeardownListener for Counter {
        fn on_teardown(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn guest_emit_reaches_matching_listeners_only() {
        let guest = MemoryGuest::new(GuestId(1));
        let counter = Rc::new(Counter(Cell::new(0)));
        guest.subscribe("dom-ready", counter.clone());
        guest.subscribe("close", counter.clone());

        assert_eq!(guest.emit("dom-ready", &[json!(1)]), 1);
        assert_eq!(counter.0.get(), 1);
        assert_eq!(guest.emit("load-start", &[]), 0);
        assert_eq!(counter.0.get(), 1);
    }

    #[test]
    fn guest_unsubscribe_removes_by_handle() {
        let guest = MemoryGuest::new(GuestId(1));
        let counter = Rc::new(Counter(Cell::new(0)));
        let a = guest.subscribe("close", counter.clone());
        guest.subscribe("close", counter.clone());
        assert_eq!(guest.listener_count("close"), 2);

        guest.unsubscribe("close", a);
        assert_eq!(guest.listener_count("close"), 1);
        // Wrong event name for the handle is ignored
        guest.unsubscribe("dom-ready", ListenerId(2));
        assert_eq!(guest.total_listeners(), 1);
    }

    #[test]
    fn guest_destroy_emits_once_and_flags() {
        let guest = MemoryGuest::new(GuestId(1));
        let counter = Rc::new(Counter(Cell::new(0)));
        guest.subscribe(DESTROYED_EVENT, counter.clone());

        guest.destroy();
        guest.destroy();
        assert!(guest.is_destroyed());
        assert_eq!(counter.0.get(), 1);
    }

    #[test]
    fn embedder_teardown_listeners_fire_once() {
        let embedder = MemoryEmbedder::new(EmbedderId(1));
        let counter = Rc::new(Counter(Cell::new(0)));
        embedder.once_destroyed(counter.clone());
        let removed = embedder.once_destroyed(counter.clone());
        embedder.remove_destroyed_listener(removed);
        assert_eq!(embedder.teardown_listener_count(), 1);

        embedder.destroy();
        embedder.destroy();
        assert!(embedder.is_destroyed());
        assert_eq!(counter.0.get(), 1);
        assert_eq!(embedder.teardown_listener_count(), 0);
    }

    #[test]
    fn embedder_records_sent_messages() {
        let embedder = MemoryEmbedder::new(EmbedderId(1));
        let msg = OutboundMessage {
            channel: "CH".into(),
            guest_id: GuestId(2),
            name: "close".into(),
            args: vec![],
        };
        embedder.send(&msg);
        assert_eq!(embedder.sent(), vec![msg.clone()]);
        assert_eq!(embedder.take_sent(), vec![msg]);
        assert!(embedder.sent().is_empty());
    }
}
