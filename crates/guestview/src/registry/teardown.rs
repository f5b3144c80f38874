use std::rc::{Rc, Weak};

use guestview_common::{EmbedderId, GuestId, ListenerId};
use tracing::debug;

use crate::host::{Embedder, TeardownListener};

use super::Shared;

/// One-shot hook armed on an embedder for one guest binding.
struct TeardownHook {
    shared: Weak<Shared>,
    guest_id: GuestId,
    embedder_id: EmbedderId,
}

impl TeardownListener for TeardownHook {
    fn on_teardown(&self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.on_embedder_teardown(self.guest_id, self.embedder_id);
        }
    }
}

impl Shared {
    pub(crate) fn arm_teardown(self: &Rc<Self>, guest_id: GuestId, embedder: &dyn Embedder) -> ListenerId {
        let hook: Rc<dyn TeardownListener> = Rc::new(TeardownHook {
            shared: Rc::downgrade(self),
            guest_id,
            embedder_id: embedder.id(),
        });
        embedder.once_destroyed(hook)
    }

    /// Clear the binding only if `embedder_id` still owns it. A late signal
    /// from an embedder the guest has since moved away from is ignored.
    fn on_embedder_teardown(&self, guest_id: GuestId, embedder_id: EmbedderId) {
        let Some(record) = self.begin_teardown(guest_id, |r| r.embedder.id() == embedder_id) else {
            debug!(
                guest_id = guest_id.0,
                embedder_id = embedder_id.0,
                "stale teardown signal ignored"
            );
            return;
        };

        // The hook has already fired, so only the guest side needs unwinding.
        if !record.guest.is_destroyed() {
            record.subscriptions.unwire(&*record.guest);
        }
        self.finish_teardown(guest_id);
        debug!(guest_id = guest_id.0, embedder_id = embedder_id.0, "embedder destroyed, guest unbound");
    }
}
