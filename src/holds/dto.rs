use serde::{Deserialize, Serialize};
use crate::catalogue::domain::model::ItemEntity;
use crate::core::library::{Describe, ItemStatus};
use crate::holds::domain::model::hold_key;

// HoldDto reports a placed or canceled hold. Position is 1-indexed and absent once the
// patron left the queue.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct HoldDto {
    pub hold_id: String,
    pub patron_name: String,
    pub item_id: String,
    pub title: String,
    pub position: Option<usize>,
    pub queue_length: usize,
    pub item_status: ItemStatus,
}

impl HoldDto {
    pub fn new(patron_name: &str, item: &ItemEntity, position: Option<usize>) -> Self {
        Self {
            hold_id: hold_key(item.item_id.as_str(), patron_name),
            patron_name: patron_name.to_string(),
            item_id: item.item_id.to_string(),
            title: item.title.to_string(),
            position,
            queue_length: item.hold_queue.len(),
            item_status: item.status,
        }
    }
}

impl Describe for HoldDto {
    fn describe(&self) -> String {
        match self.position {
            Some(position) => format!("Hold placed successfully. You are #{} in the queue.", position),
            None => "Hold canceled successfully.".to_string(),
        }
    }
}
