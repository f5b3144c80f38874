//! Scenario steps and the runner that applies them to an in-memory host.

use std::collections::HashMap;
use std::rc::Rc;

use guestview::memory::{MemoryEmbedder, MemoryGuest};
use guestview::{EmbedderId, GuestId, GuestRegistry};
use guestview_common::{GuestViewError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// One scripted host action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    /// Create a guest with the given id.
    Guest { id: u64 },
    /// Create a named embedder.
    Embedder { name: String },
    Register { guest: u64, embedder: String },
    Deregister { guest: u64 },
    /// Emit an event on a guest.
    Emit {
        guest: u64,
        event: String,
        #[serde(default)]
        args: Vec<Value>,
    },
    DestroyGuest { guest: u64 },
    DestroyEmbedder { embedder: String },
}

/// A message observed on an embedder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delivery {
    pub embedder: String,
    pub channel: String,
    pub args: Vec<Value>,
}

pub fn parse_scenario(json: &str) -> Result<Vec<Step>> {
    serde_json::from_str(json).map_err(|e| GuestViewError::Scenario(format!("invalid scenario: {e}")))
}

/// Owns the in-memory host objects named by a scenario.
pub struct ScenarioRunner {
    registry: GuestRegistry,
    guests: HashMap<u64, Rc<MemoryGuest>>,
    /// Creation order is kept so deliveries are reported deterministically.
    embedders: Vec<(String, Rc<MemoryEmbedder>)>,
}

impl ScenarioRunner {
    pub fn new(registry: GuestRegistry) -> Self {
        Self {
            registry,
            guests: HashMap::new(),
            embedders: Vec::new(),
        }
    }

    pub fn registry(&self) -> &GuestRegistry {
        &self.registry
    }

    /// Apply every step, collecting deliveries in order.
    pub fn run(&mut self, steps: &[Step]) -> Result<Vec<Delivery>> {
        let mut out = Vec::new();
        for (index, step) in steps.iter().enumerate() {
            let delivered = self.apply(step).map_err(|e| match e {
                GuestViewError::Scenario(msg) => {
                    GuestViewError::Scenario(format!("step {}: {msg}", index + 1))
                }
                other => other,
            })?;
            out.extend(delivered);
        }
        Ok(out)
    }

    /// Apply one step and return what it delivered.
    pub fn apply(&mut self, step: &Step) -> Result<Vec<Delivery>> {
        debug!(?step, "apply");
        match step {
            Step::Guest { id } => {
                if self.guests.contains_key(id) {
                    return Err(GuestViewError::Scenario(format!("duplicate guest {id}")));
                }
                self.guests.insert(*id, MemoryGuest::new(GuestId(*id)));
            }
            Step::Embedder { name } => {
                if self.find_embedder(name).is_some() {
                    return Err(GuestViewError::Scenario(format!("duplicate embedder '{name}'")));
                }
                let id = EmbedderId(self.embedders.len() as u64 + 1);
                self.embedders.push((name.clone(), MemoryEmbedder::new(id)));
            }
            Step::Register { guest, embedder } => {
                let guest = self.guest(*guest)?;
                let embedder = self.embedder(embedder)?;
                self.registry.register(guest, embedder);
            }
            Step::Deregister { guest } => {
                let guest = self.guest(*guest)?;
                self.registry.deregister(&*guest);
            }
            Step::Emit { guest, event, args } => {
                self.guest(*guest)?.emit(event, args);
            }
            Step::DestroyGuest { guest } => self.guest(*guest)?.destroy(),
            Step::DestroyEmbedder { embedder } => self.embedder(embedder)?.destroy(),
        }
        Ok(self.drain())
    }

    fn drain(&self) -> Vec<Delivery> {
        let mut out = Vec::new();
        for (name, embedder) in &self.embedders {
            for message in embedder.take_sent() {
                out.push(Delivery {
                    embedder: name.clone(),
                    args: message.positional_args(),
                    channel: message.channel,
                });
            }
        }
        out
    }

    fn guest(&self, id: u64) -> Result<Rc<MemoryGuest>> {
        self.guests
            .get(&id)
            .cloned()
            .ok_or_else(|| GuestViewError::Scenario(format!("unknown guest {id}")))
    }

    fn embedder(&self, name: &str) -> Result<Rc<MemoryEmbedder>> {
        self.find_embedder(name)
            .ok_or_else(|| GuestViewError::Scenario(format!("unknown embedder '{name}'")))
    }

    fn find_embedder(&self, name: &str) -> Option<Rc<MemoryEmbedder>> {
        self.embedders
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, e)| Rc::clone(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DISPATCH: &str = "ELECTRON_GUEST_VIEW_INTERNAL_DISPATCH_EVENT";

    fn run(json: &str) -> Result<Vec<Delivery>> {
        let steps = parse_scenario(json)?;
        ScenarioRunner::new(GuestRegistry::default()).run(&steps)
    }

    #[test]
    fn parses_all_step_kinds() {
        let steps = parse_scenario(
            r#"[
                {"op": "guest", "id": 7},
                {"op": "embedder", "name": "windowA"},
                {"op": "register", "guest": 7, "embedder": "windowA"},
                {"op": "emit", "guest": 7, "event": "dom-ready"},
                {"op": "deregister", "guest": 7},
                {"op": "destroy_guest", "guest": 7},
                {"op": "destroy_embedder", "embedder": "windowA"}
            ]"#,
        )
        .unwrap();
        assert_eq!(steps.len(), 7);
        assert_eq!(
            steps[3],
            Step::Emit {
                guest: 7,
                event: "dom-ready".into(),
                args: vec![]
            }
        );
    }

    #[test]
    fn rejects_unknown_op() {
        let err = parse_scenario(r#"[{"op": "explode"}]"#).unwrap_err();
        assert!(matches!(err, GuestViewError::Scenario(_)));
    }

    #[test]
    fn reparent_scenario_deliveries() {
        let deliveries = run(r#"[
            {"op": "guest", "id": 7},
            {"op": "embedder", "name": "windowA"},
            {"op": "embedder", "name": "windowB"},
            {"op": "register", "guest": 7, "embedder": "windowA"},
            {"op": "emit", "guest": 7, "event": "load-start", "args": ["https://x"]},
            {"op": "register", "guest": 7, "embedder": "windowB"},
            {"op": "emit", "guest": 7, "event": "dom-ready"},
            {"op": "destroy_embedder", "embedder": "windowB"},
            {"op": "emit", "guest": 7, "event": "close"}
        ]"#)
        .unwrap();

        assert_eq!(
            deliveries,
            vec![
                Delivery {
                    embedder: "windowA".into(),
                    channel: DISPATCH.into(),
                    args: vec![json!(7), json!("load-start"), json!("https://x")],
                },
                Delivery {
                    embedder: "windowB".into(),
                    channel: DISPATCH.into(),
                    args: vec![json!(7), json!("dom-ready")],
                },
            ]
        );
    }

    #[test]
    fn guest_destroy_delivers_once() {
        let deliveries = run(r#"[
            {"op": "guest", "id": 1},
            {"op": "embedder", "name": "main"},
            {"op": "register", "guest": 1, "embedder": "main"},
            {"op": "destroy_guest", "guest": 1},
            {"op": "emit", "guest": 1, "event": "destroyed"}
        ]"#)
        .unwrap();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(deliveries[0].args, vec![json!(1), json!("destroyed")]);
    }

    #[test]
    fn unknown_names_are_errors() {
        let err = run(r#"[{"op": "register", "guest": 1, "embedder": "nope"}]"#).unwrap_err();
        assert_eq!(err.to_string(), "scenario error: step 1: unknown guest 1");

        let err = run(r#"[
            {"op": "guest", "id": 1},
            {"op": "destroy_embedder", "embedder": "nope"}
        ]"#)
        .unwrap_err();
        assert!(err.to_string().contains("unknown embedder 'nope'"));
    }

    #[test]
    fn duplicates_are_errors() {
        let err = run(r#"[{"op": "guest", "id": 1}, {"op": "guest", "id": 1}]"#).unwrap_err();
        assert!(err.to_string().contains("duplicate guest 1"));
    }

    #[test]
    fn deregister_leaves_registry_empty() {
        let steps = parse_scenario(
            r#"[
                {"op": "guest", "id": 2},
                {"op": "embedder", "name": "main"},
                {"op": "register", "guest": 2, "embedder": "main"},
                {"op": "deregister", "guest": 2},
                {"op": "emit", "guest": 2, "event": "dom-ready"}
            ]"#,
        )
        .unwrap();
        let mut runner = ScenarioRunner::new(GuestRegistry::default());
        assert!(runner.run(&steps).unwrap().is_empty());
        assert!(runner.registry().is_empty());
    }
}
