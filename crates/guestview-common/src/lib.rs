pub mod catalog;
pub mod errors;
pub mod types;

pub use catalog::{GuestEvent, UnknownEvent};
pub use errors::{ConfigError, GuestViewError};
pub use types::{EmbedderId, GuestId, ListenerId};

pub type Result<T> = std::result::Result<T, GuestViewError>;
