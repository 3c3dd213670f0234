use async_trait::async_trait;
use crate::catalogue::domain::model::ItemEntity;
use crate::core::library::LibraryResult;
use crate::library::LibraryState;
use crate::loans::dto::LoanDto;
use crate::patrons::domain::model::PatronEntity;

pub mod model;
pub mod service;

// LoanService enforces the borrowing rules and performs checkout and return.
#[async_trait]
pub trait LoanService: Sync + Send {
    async fn borrow(&self, state: &mut LibraryState, patron_name: &str, item_id: &str) -> LibraryResult<LoanDto>;
    async fn return_item(&self, state: &mut LibraryState, patron_name: &str, item_id: &str) -> LibraryResult<LoanDto>;
    // true exactly when borrow would accept the pair
    fn can_borrow(&self, patron: &PatronEntity, item: &ItemEntity) -> bool;
}
