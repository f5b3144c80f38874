//! Guest view event routing.
//!
//! Binds each embedded guest content view to exactly one current embedder
//! and forwards the guest's lifecycle events and application messages to it:
//! - A fixed catalog of forwarded events (see [`GuestEvent`])
//! - Message relay on a configurable source event
//! - Reparenting without re-subscribing to the guest
//! - Listener cleanup when the embedder or guest is torn down
//!
//! The host runtime is reached only through the [`Guest`] and [`Embedder`]
//! traits. [`memory`] provides an in-process implementation.

pub mod host;
pub mod memory;
pub mod message;
pub mod registry;

pub use guestview_common::{EmbedderId, GuestEvent, GuestId, ListenerId};
pub use host::{Embedder, Guest, GuestListener, TeardownListener};
pub use message::{Channels, OutboundMessage};
pub use registry::{BindingState, GuestRegistry};
