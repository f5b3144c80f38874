use std::rc::Rc;

use guestview_common::{EmbedderId, ListenerId};

use crate::host::{Embedder, Guest};

use super::subscriptions::Subscriptions;

/// Observable binding state of a single guest id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    /// No embedder. The next `register` subscribes to the guest afresh.
    Unbound,
    /// Events route to this embedder.
    Bound(EmbedderId),
    /// Subscriptions are being removed; nothing is dispatched.
    TearingDown,
}

pub(crate) enum Binding {
    Bound(BindingRecord),
    TearingDown,
}

/// The current guest -> embedder association.
pub(crate) struct BindingRecord {
    /// Held strongly while bound so teardown can always detach the
    /// guest-side listeners, whichever handle the host registered with.
    pub(crate) guest: Rc<dyn Guest>,
    pub(crate) embedder: Rc<dyn Embedder>,
    /// Teardown hook registered on `embedder`.
    pub(crate) teardown: ListenerId,
    pub(crate) subscriptions: Subscriptions,
}
