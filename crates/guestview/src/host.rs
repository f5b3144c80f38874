//! Capabilities the host runtime provides to the router.
//!
//! Everything runs on the host's single control thread, so the traits are
//! neither `Send` nor `Sync` and listeners are shared through `Rc`.

use std::rc::Rc;

use guestview_common::{EmbedderId, GuestId, ListenerId};
use serde_json::Value;

use crate::message::OutboundMessage;

/// Receives a named event emitted by a guest.
pub trait GuestListener {
    /// `guest` is the emitter; `args` are the event's positional arguments.
    fn on_event(&self, guest: &dyn Guest, args: &[Value]);
}

/// Receives an embedder's one-shot teardown signal.
pub trait TeardownListener {
    fn on_teardown(&self);
}

/// An embedded content view that emits named events.
///
/// Event arguments are delivered flattened. For the relay source event the
/// first positional argument is the sub-channel name and must be a JSON
/// string; hosts whose wire format packs `[channel, ...args]` into a single
/// array should spread it before emitting. A relay event whose first
/// argument is not a string is dropped.
pub trait Guest {
    fn id(&self) -> GuestId;
    fn is_destroyed(&self) -> bool;
    /// Attach `listener` to `event`. The returned handle detaches it again.
    fn subscribe(&self, event: &str, listener: Rc<dyn GuestListener>) -> ListenerId;
    /// Detach a listener. Unknown handles are ignored.
    fn unsubscribe(&self, event: &str, listener: ListenerId);
}

/// The window or document currently hosting a guest.
pub trait Embedder {
    /// Identity used for the "same embedder" check in `register`. Must be
    /// unique among live embedders: two embedders reporting the same id are
    /// treated as one, and registering with the second is a no-op.
    fn id(&self) -> EmbedderId;
    fn is_destroyed(&self) -> bool;
    /// Attach a listener that fires at most once, when the embedder is destroyed.
    fn once_destroyed(&self, listener: Rc<dyn TeardownListener>) -> ListenerId;
    /// Detach a teardown listener. Unknown or already-fired handles are ignored.
    fn remove_destroyed_listener(&self, listener: ListenerId);
    /// Fire-and-forget delivery.
    fn send(&self, message: &OutboundMessage);
}
