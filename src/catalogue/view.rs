use crate::catalogue::domain::model::ItemEntity;
use crate::core::library::ItemStatus;

// The status a specific patron sees: an item on hold shows as available to the head of its
// queue. Nothing is written back, borrow validates the head independently.
pub fn effective_status(item: &ItemEntity, patron_name: &str) -> ItemStatus {
    if item.status == ItemStatus::OnHold && item.queue_head() == Some(patron_name) {
        return ItemStatus::Available;
    }
    item.status
}
