//! Guest -> embedder binding registry.
//!
//! `GuestRegistry` owns one binding record per guest id. Guest-side
//! subscriptions never capture an embedder: each dispatch resolves the
//! current embedder through the record, so reparenting only swaps the
//! record's embedder and teardown hook.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use guestview_common::{EmbedderId, GuestId};
use guestview_config::GuestViewConfig;
use tracing::{debug, trace};

use crate::host::{Embedder, Guest};
use crate::message::Channels;

mod binding;
mod dispatch;
mod subscriptions;
mod teardown;

pub use binding::BindingState;

use binding::{Binding, BindingRecord};
use subscriptions::Subscriptions;

/// State shared between the registry and the listeners it installs.
/// Listeners hold it weakly, so dropping the registry disables dispatch.
pub(crate) struct Shared {
    pub(crate) channels: Channels,
    bindings: RefCell<HashMap<GuestId, Binding>>,
}

/// Routes guest events to each guest's current embedder.
pub struct GuestRegistry {
    shared: Rc<Shared>,
}

impl GuestRegistry {
    pub fn new(channels: Channels) -> Self {
        Self {
            shared: Rc::new(Shared {
                channels,
                bindings: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn from_config(config: &GuestViewConfig) -> Self {
        Self::new(Channels::from(config))
    }

    pub fn channels(&self) -> &Channels {
        &self.shared.channels
    }

    // -----------------------------------------------------------------------
    // Binding
    // -----------------------------------------------------------------------

    /// Bind `guest` to `embedder`.
    ///
    /// Registering the same pair again is a no-op. Registering with a new
    /// embedder moves the binding without touching the guest's subscriptions.
    /// A destroyed guest is ignored.
    ///
    /// The registry keeps `guest` alive until the binding ends, so the host
    /// may register through a temporary handle.
    pub fn register(&self, guest: Rc<dyn Guest>, embedder: Rc<dyn Embedder>) {
        if guest.is_destroyed() {
            debug!(guest_id = guest.id().0, "register ignored: guest destroyed");
            return;
        }

        let guest_id = guest.id();
        match self.shared.current_embedder(guest_id) {
            Some(current) if current.id() == embedder.id() => {
                trace!(
                    guest_id = guest_id.0,
                    embedder_id = current.id().0,
                    "already bound"
                );
            }
            Some(_) => self.reparent(guest_id, embedder),
            None => self.bind(&guest, embedder),
        }
    }

    /// Detach `guest` from its embedder and drop all of its subscriptions.
    /// Unbound or destroyed guests are ignored.
    pub fn deregister(&self, guest: &dyn Guest) {
        if guest.is_destroyed() {
            trace!(guest_id = guest.id().0, "deregister ignored: guest destroyed");
            return;
        }

        let guest_id = guest.id();
        let Some(record) = self.shared.begin_teardown(guest_id, |_| true) else {
            trace!(guest_id = guest_id.0, "deregister ignored: not bound");
            return;
        };
        let embedder_id = record.embedder.id();
        self.shared.release(guest_id, record);
        debug!(guest_id = guest_id.0, embedder_id = embedder_id.0, "guest deregistered");
    }

    /// Deregister every bound guest. Used during host shutdown.
    pub fn deregister_all(&self) {
        for guest_id in self.bound_guests() {
            let Some(record) = self.shared.begin_teardown(guest_id, |_| true) else {
                continue;
            };
            self.shared.release(guest_id, record);
        }
        debug!("all guests deregistered");
    }

    fn bind(&self, guest: &Rc<dyn Guest>, embedder: Rc<dyn Embedder>) {
        let guest_id = guest.id();
        let embedder_id = embedder.id();
        let teardown = self.shared.arm_teardown(guest_id, &*embedder);
        let subscriptions = Subscriptions::wire(&self.shared, &**guest);

        let record = BindingRecord {
            guest: Rc::clone(guest),
            embedder,
            teardown,
            subscriptions,
        };
        self.shared
            .bindings
            .borrow_mut()
            .insert(guest_id, Binding::Bound(record));

        debug!(guest_id = guest_id.0, embedder_id = embedder_id.0, "guest bound");
    }

    fn reparent(&self, guest_id: GuestId, embedder: Rc<dyn Embedder>) {
        let embedder_id = embedder.id();
        let teardown = self.shared.arm_teardown(guest_id, &*embedder);

        let previous = {
            let mut bindings = self.shared.bindings.borrow_mut();
            match bindings.get_mut(&guest_id) {
                Some(Binding::Bound(record)) => Some((
                    std::mem::replace(&mut record.embedder, Rc::clone(&embedder)),
                    std::mem::replace(&mut record.teardown, teardown),
                )),
                _ => None,
            }
        };

        match previous {
            Some((old, old_teardown)) => {
                if !old.is_destroyed() {
                    old.remove_destroyed_listener(old_teardown);
                }
                debug!(
                    guest_id = guest_id.0,
                    from = old.id().0,
                    to = embedder_id.0,
                    "guest reparented"
                );
            }
            // The binding was torn down while the new hook was being armed.
            None => embedder.remove_destroyed_listener(teardown),
        }
    }

    // -----------------------------------------------------------------------
    // Diagnostics
    // -----------------------------------------------------------------------

    pub fn state(&self, guest_id: GuestId) -> BindingState {
        match self.shared.bindings.borrow().get(&guest_id) {
            Some(Binding::Bound(record)) => BindingState::Bound(record.embedder.id()),
            Some(Binding::TearingDown) => BindingState::TearingDown,
            None => BindingState::Unbound,
        }
    }

    pub fn embedder_of(&self, guest_id: GuestId) -> Option<EmbedderId> {
        self.shared.current_embedder(guest_id).map(|e| e.id())
    }

    /// Number of guest-side subscriptions held for `guest_id`: zero when
    /// unbound, otherwise the full catalog plus the relay event.
    pub fn subscription_count(&self, guest_id: GuestId) -> usize {
        match self.shared.bindings.borrow().get(&guest_id) {
            Some(Binding::Bound(record)) => record.subscriptions.len(),
            _ => 0,
        }
    }

    /// Guests with a live binding, in id order.
    pub fn bound_guests(&self) -> Vec<GuestId> {
        let mut ids: Vec<GuestId> = self
            .shared
            .bindings
            .borrow()
            .iter()
            .filter(|(_, b)| matches!(b, Binding::Bound(_)))
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// How many guests are bound.
    pub fn len(&self) -> usize {
        self.shared
            .bindings
            .borrow()
            .values()
            .filter(|b| matches!(b, Binding::Bound(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for GuestRegistry {
    fn default() -> Self {
        Self::new(Channels::default())
    }
}

impl Shared {
    /// The embedder currently bound to `guest_id`. The table borrow is
    /// released before returning.
    pub(crate) fn current_embedder(&self, guest_id: GuestId) -> Option<Rc<dyn Embedder>> {
        match self.bindings.borrow().get(&guest_id) {
            Some(Binding::Bound(record)) => Some(Rc::clone(&record.embedder)),
            _ => None,
        }
    }

    /// Move a bound record matching `pred` into the tearing-down state and
    /// hand it to the caller.
    pub(crate) fn begin_teardown(
        &self,
        guest_id: GuestId,
        pred: impl FnOnce(&BindingRecord) -> bool,
    ) -> Option<BindingRecord> {
        let mut bindings = self.bindings.borrow_mut();
        let matched = match bindings.get(&guest_id) {
            Some(Binding::Bound(record)) => pred(record),
            _ => false,
        };
        if !matched {
            return None;
        }
        match bindings.insert(guest_id, Binding::TearingDown) {
            Some(Binding::Bound(record)) => Some(record),
            _ => None,
        }
    }

    /// Remove the record if it is still tearing down. A binding created by a
    /// re-entrant `register` in the meantime is kept.
    pub(crate) fn finish_teardown(&self, guest_id: GuestId) {
        let mut bindings = self.bindings.borrow_mut();
        if matches!(bindings.get(&guest_id), Some(Binding::TearingDown)) {
            bindings.remove(&guest_id);
        }
    }

    /// Remove a bound record outright.
    pub(crate) fn take_bound(&self, guest_id: GuestId) -> Option<BindingRecord> {
        let mut bindings = self.bindings.borrow_mut();
        match bindings.remove(&guest_id)? {
            Binding::Bound(record) => Some(record),
            other => {
                bindings.insert(guest_id, other);
                None
            }
        }
    }

    /// Unsubscribe from the guest, detach the embedder's teardown hook and
    /// drop the record. A destroyed guest is not unsubscribed from.
    pub(crate) fn release(&self, guest_id: GuestId, record: BindingRecord) {
        let BindingRecord {
            guest,
            embedder,
            teardown,
            subscriptions,
        } = record;

        if !guest.is_destroyed() {
            subscriptions.unwire(&*guest);
        }
        if !embedder.is_destroyed() {
            embedder.remove_destroyed_listener(teardown);
        }
        self.finish_teardown(guest_id);
    }
}
