use std::sync::Arc;
use crate::catalogue::domain::model::ItemEntity;
use crate::catalogue::dto::ItemDto;
use crate::core::library::{ItemStatus, LibraryError, LibraryResult};
use crate::store::LibraryStore;

// Catalogue owns the items of a branch. Writes go to the store first and reach the in-memory
// list only when the store accepted them.
pub struct Catalogue {
    store: Arc<dyn LibraryStore>,
    items: Vec<ItemEntity>,
}

impl Catalogue {
    pub fn new(store: Arc<dyn LibraryStore>, items: Vec<ItemEntity>) -> Self {
        Self {
            store,
            items,
        }
    }

    pub fn find_item_by_id(&self, id: &str) -> Option<&ItemEntity> {
        self.items.iter().find(|item| item.item_id == id)
    }

    pub fn get_item(&self, id: &str) -> LibraryResult<&ItemEntity> {
        self.find_item_by_id(id).ok_or_else(|| LibraryError::item_not_found("Item not found."))
    }

    pub fn all_items(&self) -> &[ItemEntity] {
        &self.items
    }

    pub fn items_by_kind(&self, kind_name: &str) -> Vec<&ItemEntity> {
        self.items.iter().filter(|item| item.kind_name() == kind_name).collect()
    }

    pub async fn add_item(&mut self, item: ItemEntity) -> LibraryResult<ItemDto> {
        if item.title.trim().is_empty() {
            return Err(LibraryError::validation("Item title is required.", Some("400".to_string())));
        }
        if self.find_item_by_id(item.item_id.as_str()).is_some() {
            return Err(LibraryError::validation(
                format!("item {} already exists", item.item_id).as_str(), Some("400".to_string())));
        }
        // a new item starts on the shelf
        let item = ItemEntity {
            status: ItemStatus::Available,
            due_date: None,
            hold_queue: vec![],
            version: 0,
            ..item
        };
        self.store.save_item(&item).await?;
        let dto = ItemDto::from(&item);
        self.items.push(item);
        Ok(dto)
    }

    pub async fn remove_item(&mut self, id: &str) -> LibraryResult<ItemDto> {
        let item = self.get_item(id)?;
        if item.status == ItemStatus::CheckedOut || item.is_held() {
            return Err(LibraryError::validation(
                "Item is on loan or has holds and cannot be removed.", Some("ItemInUse".to_string())));
        }
        let dto = ItemDto::from(item);
        self.store.delete_item(id).await?;
        self.items.retain(|other| other.item_id != id);
        Ok(dto)
    }

    pub async fn reload(&mut self) -> LibraryResult<usize> {
        self.items = self.store.all_items().await?;
        Ok(self.items.len())
    }

    // write-back of an item whose change set was committed
    pub(crate) fn replace(&mut self, item: ItemEntity) {
        if let Some(existing) = self.items.iter_mut().find(|other| other.item_id == item.item_id) {
            *existing = item;
        }
    }
}
