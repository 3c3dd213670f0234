use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;
use crate::catalogue::domain::model::ItemEntity;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::holds::domain::model::{hold_key, HoldEntity};
use crate::loans::domain::model::{loan_key, LoanEntity};
use crate::patrons::domain::model::{PatronEntity, StaffEntity};
use crate::store::{LibraryStore, StoreChange};

#[derive(Debug, Default, Clone)]
struct Tables {
    items: Vec<ItemEntity>,
    patrons: Vec<PatronEntity>,
    staff: Vec<StaffEntity>,
    loans: Vec<LoanEntity>,
    holds: Vec<HoldEntity>,
}

impl Tables {
    fn apply(&mut self, change: &StoreChange) -> LibraryResult<()> {
        match change {
            StoreChange::SaveItem(item) => {
                if self.items.iter().any(|other| other.id() == item.id()) {
                    return Err(LibraryError::persistence(
                        format!("item {} already exists", item.id()).as_str(), Some("ConditionalCheckFailed".to_string()), false));
                }
                // queues live in the holds table
                self.items.push(ItemEntity { hold_queue: vec![], ..item.clone() });
            }
            StoreChange::UpdateItem(item) => {
                let existing = self.items.iter_mut().find(|other| other.id() == item.id())
                    .ok_or_else(|| LibraryError::persistence(
                        format!("item {} not stored", item.id()).as_str(), Some("ConditionalCheckFailed".to_string()), false))?;
                if existing.version() != item.version() {
                    return Err(LibraryError::persistence(
                        format!("item {} was modified concurrently, version {} != {}",
                                item.id(), existing.version(), item.version()).as_str(),
                        Some("ConditionalCheckFailed".to_string()), true));
                }
                existing.status = item.status;
                existing.due_date = item.due_date;
                existing.version = item.version() + 1;
                existing.updated_at = item.updated_at;
            }
            StoreChange::DeleteItem(id) => {
                self.items.retain(|other| &other.item_id != id);
            }
            StoreChange::SaveLoan(loan) => {
                self.loans.retain(|other| other.id() != loan.id());
                self.loans.push(loan.clone());
            }
            StoreChange::DeleteLoan { patron_name, item_id } => {
                let key = loan_key(patron_name, item_id);
                self.loans.retain(|other| other.loan_id != key);
            }
            StoreChange::SaveHold(hold) => {
                self.holds.retain(|other| other.id() != hold.id());
                self.holds.push(hold.clone());
            }
            StoreChange::DeleteHold { patron_name, item_id } => {
                let key = hold_key(item_id, patron_name);
                self.holds.retain(|other| other.hold_id != key);
            }
            StoreChange::RenumberHolds { item_id, queue } => {
                self.holds.retain(|other| &other.item_id != item_id);
                self.holds.extend(HoldEntity::from_queue(item_id, queue));
            }
            StoreChange::SavePatron(patron) => {
                self.patrons.retain(|other| other.id() != patron.id());
                self.patrons.push(PatronEntity::new(patron.name.as_str()));
                self.update_fines(patron)?;
            }
            StoreChange::UpdatePatron(patron) => {
                self.update_fines(patron)?;
            }
            StoreChange::SaveStaff(staff) => {
                self.staff.retain(|other| other.id() != staff.id());
                self.staff.push(staff.clone());
            }
        }
        Ok(())
    }

    fn update_fines(&mut self, patron: &PatronEntity) -> LibraryResult<()> {
        let existing = self.patrons.iter_mut().find(|other| other.id() == patron.id())
            .ok_or_else(|| LibraryError::persistence(
                format!("patron {} not stored", patron.name).as_str(), None, false))?;
        existing.outstanding_fines = patron.outstanding_fines;
        Ok(())
    }

    fn with_queue(&self, item: &ItemEntity) -> ItemEntity {
        let mut holds: Vec<&HoldEntity> = self.holds.iter()
            .filter(|hold| hold.item_id == item.item_id).collect();
        holds.sort_by_key(|hold| hold.position);
        ItemEntity {
            hold_queue: holds.iter().map(|hold| hold.patron_name.to_string()).collect(),
            ..item.clone()
        }
    }
}

// MemoryStore keeps every table in process. A commit applies the changes to a copy of the
// tables and swaps it in only when all of them succeed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // makes every following commit fail with a persistence error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    #[cfg(test)]
    pub(crate) async fn holds_of(&self, item_id: &str) -> Vec<HoldEntity> {
        let mut holds: Vec<HoldEntity> = self.tables.lock().await.holds.iter()
            .filter(|hold| hold.item_id == item_id).cloned().collect();
        holds.sort_by_key(|hold| hold.position);
        holds
    }
}

#[async_trait]
impl LibraryStore for MemoryStore {
    async fn find_item(&self, id: &str) -> LibraryResult<Option<ItemEntity>> {
        let tables = self.tables.lock().await;
        Ok(tables.items.iter().find(|item| item.item_id == id).map(|item| tables.with_queue(item)))
    }

    async fn all_items(&self) -> LibraryResult<Vec<ItemEntity>> {
        let tables = self.tables.lock().await;
        Ok(tables.items.iter().map(|item| tables.with_queue(item)).collect())
    }

    async fn all_patrons(&self) -> LibraryResult<Vec<PatronEntity>> {
        let tables = self.tables.lock().await;
        Ok(tables.patrons.iter().map(|patron| {
            PatronEntity {
                active_loans: tables.loans.iter()
                    .filter(|loan| loan.patron_name == patron.name)
                    .map(|loan| loan.item_id.to_string()).collect(),
                active_holds: tables.holds.iter()
                    .filter(|hold| hold.patron_name == patron.name)
                    .map(|hold| hold.item_id.to_string()).collect(),
                ..patron.clone()
            }
        }).collect())
    }

    async fn all_staff(&self) -> LibraryResult<Vec<StaffEntity>> {
        Ok(self.tables.lock().await.staff.clone())
    }

    async fn is_empty(&self) -> LibraryResult<bool> {
        let tables = self.tables.lock().await;
        Ok(tables.items.is_empty() && tables.patrons.is_empty() && tables.staff.is_empty())
    }

    async fn commit(&self, changes: &[StoreChange]) -> LibraryResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LibraryError::persistence("store rejected the write", Some("WriteFailed".to_string()), false));
        }
        let mut tables = self.tables.lock().await;
        let mut staged = tables.clone();
        for change in changes {
            staged.apply(change)?;
        }
        *tables = staged;
        debug!(changes = changes.len(), "committed change set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::catalogue::domain::model::{ItemEntity, ItemKind};
    use crate::core::library::{ItemCondition, ItemStatus, Role};
    use crate::holds::domain::model::HoldEntity;
    use crate::loans::domain::model::LoanEntity;
    use crate::patrons::domain::model::{PatronEntity, StaffEntity};
    use crate::store::memory_store::MemoryStore;
    use crate::store::{LibraryStore, StoreChange};
    use crate::utils::date::days_from_today;

    fn new_item() -> ItemEntity {
        ItemEntity::new(ItemKind::Movie { genre: "Sci-fi".to_string(), rating: 8 },
                        "Inception", "Christopher Nolan", 2010, "Blu-ray", ItemCondition::Standard)
    }

    #[tokio::test]
    async fn test_should_save_and_find_item() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await.expect("should check"));
        let item = new_item();
        store.save_item(&item).await.expect("should save item");
        assert!(!store.is_empty().await.expect("should check"));
        let loaded = store.find_item(item.item_id.as_str()).await.expect("should find").expect("should exist");
        assert_eq!(item, loaded);
        assert!(store.save_item(&item).await.is_err());
        assert_eq!(None, store.find_item("unknown").await.expect("should find"));
    }

    #[tokio::test]
    async fn test_should_check_item_version() {
        let store = MemoryStore::new();
        let mut item = new_item();
        store.save_item(&item).await.expect("should save item");
        item.status = ItemStatus::CheckedOut;
        item.due_date = Some(days_from_today(14));
        store.update_item(&item).await.expect("should update item");
        let res = store.update_item(&item).await;
        assert!(res.expect_err("should reject stale version").retryable());
        let loaded = store.find_item(item.item_id.as_str()).await.expect("should find").expect("should exist");
        assert_eq!(1, loaded.version);
        assert_eq!(ItemStatus::CheckedOut, loaded.status);
        assert_eq!(item.due_date, loaded.due_date);
    }

    #[tokio::test]
    async fn test_should_populate_queues_and_patrons() {
        let store = MemoryStore::new();
        let item = new_item();
        let id = item.item_id.as_str();
        store.save_item(&item).await.expect("should save item");
        store.save_patron(&PatronEntity::new("michel")).await.expect("should save patron");
        store.save_patron(&PatronEntity::new("eddie")).await.expect("should save patron");
        store.save_patron(&PatronEntity::new("bob")).await.expect("should save patron");
        store.save_loan(&LoanEntity::new("michel", id, days_from_today(14))).await.expect("should save loan");
        store.save_hold(&HoldEntity::new(id, "bob", 1)).await.expect("should save hold");
        store.save_hold(&HoldEntity::new(id, "eddie", 0)).await.expect("should save hold");

        let items = store.all_items().await.expect("should load items");
        assert_eq!(vec!["eddie".to_string(), "bob".to_string()], items[0].hold_queue);

        let patrons = store.all_patrons().await.expect("should load patrons");
        assert_eq!(vec![id.to_string()], patrons[0].active_loans);
        assert_eq!(vec![id.to_string()], patrons[1].active_holds);
        assert_eq!(vec![id.to_string()], patrons[2].active_holds);

        store.delete_hold("eddie", id).await.expect("should delete hold");
        store.renumber_holds(id, &["bob".to_string()]).await.expect("should renumber");
        let items = store.all_items().await.expect("should load items");
        assert_eq!(vec!["bob".to_string()], items[0].hold_queue);
        store.delete_loan("michel", id).await.expect("should delete loan");
        let patrons = store.all_patrons().await.expect("should load patrons");
        assert!(patrons[0].active_loans.is_empty());
    }

    #[tokio::test]
    async fn test_should_commit_all_or_nothing() {
        let store = MemoryStore::new();
        let item = new_item();
        store.save_item(&item).await.expect("should save item");
        store.save_patron(&PatronEntity::new("michel")).await.expect("should save patron");
        let res = store.commit(&[
            StoreChange::SaveLoan(LoanEntity::new("michel", item.item_id.as_str(), days_from_today(14))),
            StoreChange::UpdatePatron(PatronEntity::new("nobody")),
        ]).await;
        assert!(res.is_err());
        let patrons = store.all_patrons().await.expect("should load");
        assert!(patrons[0].active_loans.is_empty());

        store.set_fail_writes(true);
        let res = store.save_staff(&StaffEntity::new("lauren", Role::Librarian)).await;
        assert_eq!("PersistenceError", res.expect_err("should fail").reason_code());
        store.set_fail_writes(false);
        store.save_staff(&StaffEntity::new("lauren", Role::Librarian)).await.expect("should save staff");
        assert_eq!(1, store.all_staff().await.expect("should load").len());
    }

    #[tokio::test]
    async fn test_should_replace_records_by_id() {
        let store = MemoryStore::new();
        let item = new_item();
        store.save_item(&item).await.expect("should save item");
        store.save_patron(&PatronEntity::new("eddie")).await.expect("should save patron");
        let due = days_from_today(14);
        store.save_loan(&LoanEntity::new("eddie", item.item_id.as_str(), due)).await.expect("should save loan");
        store.save_loan(&LoanEntity::new("eddie", item.item_id.as_str(), due)).await.expect("should save loan");
        store.save_staff(&StaffEntity::new("lauren", Role::Librarian)).await.expect("should save staff");
        store.save_staff(&StaffEntity::new("lauren", Role::Admin)).await.expect("should save staff");

        let patrons = store.all_patrons().await.expect("should load");
        assert_eq!(vec![item.item_id.to_string()], patrons[0].active_loans);
        let staff = store.all_staff().await.expect("should load");
        assert_eq!(1, staff.len());
        assert_eq!(Role::Admin, staff[0].role);
    }

    #[tokio::test]
    async fn test_should_update_fines() {
        let store = MemoryStore::new();
        let mut patron = PatronEntity::new("joseph");
        store.save_patron(&patron).await.expect("should save patron");
        patron.outstanding_fines = 1.5;
        store.update_patron(&patron).await.expect("should update patron");
        let patrons = store.all_patrons().await.expect("should load");
        assert_eq!(1.5, patrons[0].outstanding_fines);
    }
}
