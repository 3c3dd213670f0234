use async_trait::async_trait;
use crate::catalogue::domain::model::ItemEntity;
use crate::core::library::LibraryResult;
use crate::holds::domain::model::HoldEntity;
use crate::loans::domain::model::LoanEntity;
use crate::patrons::domain::model::{PatronEntity, StaffEntity};

pub mod ddb_store;
pub mod factory;
pub mod memory_store;
pub mod seed;

// StoreChange is a single write of a change set, see LibraryStore::commit.
#[derive(Debug, PartialEq, Clone)]
pub enum StoreChange {
    SaveItem(ItemEntity),
    // status, due date and version only; fails when the stored version differs
    UpdateItem(ItemEntity),
    DeleteItem(String),
    SaveLoan(LoanEntity),
    DeleteLoan {
        patron_name: String,
        item_id: String,
    },
    SaveHold(HoldEntity),
    DeleteHold {
        patron_name: String,
        item_id: String,
    },
    // replaces every hold of the item with the queue, positions 0..n-1
    RenumberHolds {
        item_id: String,
        queue: Vec<String>,
    },
    SavePatron(PatronEntity),
    UpdatePatron(PatronEntity),
    SaveStaff(StaffEntity),
}

// LibraryStore persists the catalogue, patrons, staff, loans and holds. A commit applies all
// of its changes or none of them.
#[async_trait]
pub trait LibraryStore: Sync + Send {
    async fn find_item(&self, id: &str) -> LibraryResult<Option<ItemEntity>>;

    // hold queues are populated in position order
    async fn all_items(&self) -> LibraryResult<Vec<ItemEntity>>;

    // active loans and holds are populated
    async fn all_patrons(&self) -> LibraryResult<Vec<PatronEntity>>;

    async fn all_staff(&self) -> LibraryResult<Vec<StaffEntity>>;

    async fn is_empty(&self) -> LibraryResult<bool>;

    async fn commit(&self, changes: &[StoreChange]) -> LibraryResult<()>;

    async fn save_item(&self, item: &ItemEntity) -> LibraryResult<()> {
        self.commit(&[StoreChange::SaveItem(item.clone())]).await
    }

    async fn update_item(&self, item: &ItemEntity) -> LibraryResult<()> {
        self.commit(&[StoreChange::UpdateItem(item.clone())]).await
    }

    async fn delete_item(&self, id: &str) -> LibraryResult<()> {
        self.commit(&[StoreChange::DeleteItem(id.to_string())]).await
    }

    async fn save_loan(&self, loan: &LoanEntity) -> LibraryResult<()> {
        self.commit(&[StoreChange::SaveLoan(loan.clone())]).await
    }

    async fn delete_loan(&self, patron_name: &str, item_id: &str) -> LibraryResult<()> {
        self.commit(&[StoreChange::DeleteLoan {
            patron_name: patron_name.to_string(),
            item_id: item_id.to_string(),
        }]).await
    }

    async fn save_hold(&self, hold: &HoldEntity) -> LibraryResult<()> {
        self.commit(&[StoreChange::SaveHold(hold.clone())]).await
    }

    async fn delete_hold(&self, patron_name: &str, item_id: &str) -> LibraryResult<()> {
        self.commit(&[StoreChange::DeleteHold {
            patron_name: patron_name.to_string(),
            item_id: item_id.to_string(),
        }]).await
    }

    async fn renumber_holds(&self, item_id: &str, queue: &[String]) -> LibraryResult<()> {
        self.commit(&[StoreChange::RenumberHolds {
            item_id: item_id.to_string(),
            queue: queue.to_vec(),
        }]).await
    }

    async fn save_patron(&self, patron: &PatronEntity) -> LibraryResult<()> {
        self.commit(&[StoreChange::SavePatron(patron.clone())]).await
    }

    async fn update_patron(&self, patron: &PatronEntity) -> LibraryResult<()> {
        self.commit(&[StoreChange::UpdatePatron(patron.clone())]).await
    }

    async fn save_staff(&self, staff: &StaffEntity) -> LibraryResult<()> {
        self.commit(&[StoreChange::SaveStaff(staff.clone())]).await
    }
}
