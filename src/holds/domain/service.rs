use std::sync::Arc;
use async_trait::async_trait;
use crate::catalogue::domain::model::ItemEntity;
use crate::core::domain::Configuration;
use crate::core::library::{ItemStatus, LibraryError, LibraryResult};
use crate::holds::domain::HoldService;
use crate::holds::domain::model::HoldEntity;
use crate::holds::dto::HoldDto;
use crate::library::LibraryState;
use crate::store::{LibraryStore, StoreChange};

pub(crate) struct HoldServiceImpl {
    store: Arc<dyn LibraryStore>,
}

impl HoldServiceImpl {
    pub(crate) fn new(_config: &Configuration, store: Arc<dyn LibraryStore>) -> Self {
        Self {
            store,
        }
    }
}

#[async_trait]
impl HoldService for HoldServiceImpl {
    async fn place_hold(&self, state: &mut LibraryState, patron_name: &str, item_id: &str) -> LibraryResult<HoldDto> {
        let patron = state.patrons.get_patron(patron_name)?;
        let item = state.catalogue.get_item(item_id)?;
        if item.status != ItemStatus::CheckedOut {
            return Err(LibraryError::not_eligible_for_hold("You can only place holds on checked-out items."));
        }
        if patron.has_loan(item_id) {
            return Err(LibraryError::cannot_hold_own_loan("You cannot place a hold on an item you are currently borrowing."));
        }
        if patron.has_hold(item_id) || item.queue_index(patron_name).is_some() {
            return Err(LibraryError::duplicate_hold("You already have a hold on this item."));
        }

        let mut patron = patron.clone();
        let mut item = item.clone();
        item.touch();
        item.hold_queue.push(patron_name.to_string());
        patron.active_holds.push(item_id.to_string());
        let position = item.hold_queue.len() - 1;

        self.store.commit(&[
            StoreChange::SaveHold(HoldEntity::new(item_id, patron_name, position)),
            StoreChange::UpdateItem(item.clone()),
        ]).await?;

        item.mark_committed();
        let hold = HoldDto::new(patron_name, &item, Some(position + 1));
        state.catalogue.replace(item);
        state.patrons.replace(patron);
        Ok(hold)
    }

    async fn cancel_hold(&self, state: &mut LibraryState, patron_name: &str, item_id: &str) -> LibraryResult<HoldDto> {
        let patron = state.patrons.get_patron(patron_name)?;
        let item = state.catalogue.get_item(item_id)?;
        if !patron.has_hold(item_id) {
            return Err(LibraryError::no_hold_to_cancel("You do not have a hold on this item."));
        }

        let mut patron = patron.clone();
        let mut item = item.clone();
        item.touch();
        patron.active_holds.retain(|id| id != item_id);
        if let Some(index) = item.queue_index(patron_name) {
            item.hold_queue.remove(index);
        }
        // nobody is waiting any more and nobody has it on loan
        if item.status == ItemStatus::OnHold && !item.is_held() {
            item.status = ItemStatus::Available;
            item.due_date = None;
        }

        self.store.commit(&[
            StoreChange::DeleteHold {
                patron_name: patron_name.to_string(),
                item_id: item_id.to_string(),
            },
            StoreChange::RenumberHolds {
                item_id: item_id.to_string(),
                queue: item.hold_queue.clone(),
            },
            StoreChange::UpdateItem(item.clone()),
        ]).await?;

        item.mark_committed();
        let hold = HoldDto::new(patron_name, &item, None);
        state.catalogue.replace(item);
        state.patrons.replace(patron);
        Ok(hold)
    }

    fn queue_position(&self, patron_name: &str, item: &ItemEntity) -> Option<usize> {
        item.queue_index(patron_name).map(|index| index + 1)
    }
}
