use async_trait::async_trait;
use crate::catalogue::domain::model::ItemEntity;
use crate::core::library::LibraryResult;
use crate::holds::dto::HoldDto;
use crate::library::LibraryState;

pub mod model;
pub mod service;

// HoldService keeps the first-come-first-served queues of checked-out items.
#[async_trait]
pub trait HoldService: Sync + Send {
    async fn place_hold(&self, state: &mut LibraryState, patron_name: &str, item_id: &str) -> LibraryResult<HoldDto>;
    async fn cancel_hold(&self, state: &mut LibraryState, patron_name: &str, item_id: &str) -> LibraryResult<HoldDto>;
    // 1-indexed, None when the patron is not queued
    fn queue_position(&self, patron_name: &str, item: &ItemEntity) -> Option<usize>;
}
