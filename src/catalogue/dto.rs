use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::catalogue::domain::model::{ItemEntity, ItemKind};
use crate::catalogue::view::effective_status;
use crate::core::library::{ItemCondition, ItemStatus};

// ItemDto is the catalogue entry shown to callers. When it is built for a patron the status
// is the one that patron sees.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ItemDto {
    pub item_id: String,
    pub kind: String,
    pub title: String,
    pub creator: String,
    pub publication_year: i32,
    pub format: String,
    pub condition: ItemCondition,
    pub status: ItemStatus,
    pub due_date: Option<NaiveDate>,
    pub holds: usize,
    pub details: ItemKind,
}

impl ItemDto {
    pub fn for_patron(item: &ItemEntity, patron_name: &str) -> Self {
        Self {
            status: effective_status(item, patron_name),
            ..ItemDto::from(item)
        }
    }
}

impl From<&ItemEntity> for ItemDto {
    fn from(other: &ItemEntity) -> Self {
        ItemDto {
            item_id: other.item_id.to_string(),
            kind: other.kind_name().to_string(),
            title: other.title.to_string(),
            creator: other.creator.to_string(),
            publication_year: other.publication_year,
            format: other.format.to_string(),
            condition: other.condition,
            status: other.status,
            due_date: other.due_date,
            holds: other.hold_queue.len(),
            details: other.kind.clone(),
        }
    }
}
