use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;

// HoldEntity places a patron in the queue of a checked-out item, position is 0-indexed.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HoldEntity {
    pub hold_id: String,
    pub item_id: String,
    pub patron_name: String,
    pub position: usize,
}

impl HoldEntity {
    pub fn new(item_id: &str, patron_name: &str, position: usize) -> Self {
        Self {
            hold_id: hold_key(item_id, patron_name),
            item_id: item_id.to_string(),
            patron_name: patron_name.to_string(),
            position,
        }
    }

    // one record per queue entry, positions 0..n-1 in queue order
    pub fn from_queue(item_id: &str, queue: &[String]) -> Vec<HoldEntity> {
        queue.iter().enumerate()
            .map(|(position, name)| HoldEntity::new(item_id, name, position))
            .collect()
    }
}

pub fn hold_key(item_id: &str, patron_name: &str) -> String {
    format!("{}#{}", item_id, patron_name)
}

impl Identifiable for HoldEntity {
    fn id(&self) -> String {
        self.hold_id.to_string()
    }

    fn version(&self) -> i64 {
        0
    }
}
