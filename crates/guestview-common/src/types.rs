use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a guest content view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(pub u64);

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "guest-{}", self.0)
    }
}

impl From<GuestId> for serde_json::Value {
    fn from(id: GuestId) -> Self {
        serde_json::Value::from(id.0)
    }
}

/// Stable identifier of an embedder (the window or document hosting guests).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmbedderId(pub u64);

impl fmt::Display for EmbedderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "embedder-{}", self.0)
    }
}

/// Handle returned by a host when a listener is attached. Only meaningful to
/// the object that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);
