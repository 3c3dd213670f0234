use std::sync::Arc;
use async_trait::async_trait;
use crate::catalogue::domain::model::ItemEntity;
use crate::core::domain::Configuration;
use crate::core::library::{ItemStatus, LibraryError, LibraryResult};
use crate::library::LibraryState;
use crate::loans::domain::LoanService;
use crate::loans::domain::model::LoanEntity;
use crate::loans::dto::LoanDto;
use crate::patrons::domain::model::PatronEntity;
use crate::store::{LibraryStore, StoreChange};
use crate::utils::date::days_from_today;

pub(crate) struct LoanServiceImpl {
    max_loans: usize,
    loan_days: i64,
    store: Arc<dyn LibraryStore>,
}

impl LoanServiceImpl {
    pub(crate) fn new(config: &Configuration, store: Arc<dyn LibraryStore>) -> Self {
        Self {
            max_loans: config.max_loans,
            loan_days: config.loan_days,
            store,
        }
    }

    // borrow preconditions after patron and item were resolved, first failure wins
    fn check_borrow(&self, patron: &PatronEntity, item: &ItemEntity) -> LibraryResult<()> {
        if patron.has_loan(item.item_id.as_str()) {
            return Err(LibraryError::already_borrowed("You already borrowed this item."));
        }
        if patron.active_loans.len() >= self.max_loans {
            return Err(LibraryError::loan_limit_reached(
                format!("Max {} active loans reached.", self.max_loans).as_str()));
        }
        match item.status {
            ItemStatus::Available => Ok(()),
            ItemStatus::CheckedOut => {
                Err(LibraryError::already_checked_out("Item is already checked out."))
            }
            ItemStatus::OnHold => {
                if item.queue_head() == Some(patron.name.as_str()) {
                    Ok(())
                } else {
                    Err(LibraryError::held_by_another("Item is on hold for another patron."))
                }
            }
        }
    }
}

#[async_trait]
impl LoanService for LoanServiceImpl {
    async fn borrow(&self, state: &mut LibraryState, patron_name: &str, item_id: &str) -> LibraryResult<LoanDto> {
        let patron = state.patrons.get_patron(patron_name)?;
        let item = state.catalogue.get_item(item_id)?;
        self.check_borrow(patron, item)?;

        let mut patron = patron.clone();
        let mut item = item.clone();
        item.touch();
        let due_date = days_from_today(self.loan_days);
        item.status = ItemStatus::CheckedOut;
        item.due_date = Some(due_date);
        patron.active_loans.push(item_id.to_string());

        let mut changes = vec![
            StoreChange::UpdateItem(item.clone()),
            StoreChange::SaveLoan(LoanEntity::new(patron_name, item_id, due_date)),
        ];
        // the head of the queue consumes its own hold
        if let Some(index) = item.queue_index(patron_name) {
            item.hold_queue.remove(index);
            patron.active_holds.retain(|id| id != item_id);
            changes.push(StoreChange::DeleteHold {
                patron_name: patron_name.to_string(),
                item_id: item_id.to_string(),
            });
            changes.push(StoreChange::RenumberHolds {
                item_id: item_id.to_string(),
                queue: item.hold_queue.clone(),
            });
        }
        self.store.commit(&changes).await?;

        item.mark_committed();
        let loan = LoanDto::borrowed(patron_name, &item);
        state.catalogue.replace(item);
        state.patrons.replace(patron);
        Ok(loan)
    }

    async fn return_item(&self, state: &mut LibraryState, patron_name: &str, item_id: &str) -> LibraryResult<LoanDto> {
        let patron = state.patrons.get_patron(patron_name)?;
        let item = state.catalogue.get_item(item_id)?;
        if item.status != ItemStatus::CheckedOut || !patron.has_loan(item_id) {
            return Err(LibraryError::not_on_loan_by_you("You don't have this item on loan."));
        }

        let mut patron = patron.clone();
        let mut item = item.clone();
        item.touch();
        patron.active_loans.retain(|id| id != item_id);
        let due_date = item.due_date.take();
        item.status = if item.is_held() { ItemStatus::OnHold } else { ItemStatus::Available };

        self.store.commit(&[
            StoreChange::UpdateItem(item.clone()),
            StoreChange::DeleteLoan {
                patron_name: patron_name.to_string(),
                item_id: item_id.to_string(),
            },
        ]).await?;

        item.mark_committed();
        let loan = LoanDto::returned(patron_name, &item, due_date);
        state.catalogue.replace(item);
        state.patrons.replace(patron);
        Ok(loan)
    }

    fn can_borrow(&self, patron: &PatronEntity, item: &ItemEntity) -> bool {
        self.check_borrow(patron, item).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::core::domain::Configuration;
    use crate::core::library::{ItemStatus, LibraryError};
    use crate::library::factory::load_state;
    use crate::library::LibraryState;
    use crate::loans::domain::LoanService;
    use crate::loans::factory::create_loan_service;
    use crate::store::memory_store::MemoryStore;
    use crate::store::seed::seed_store;
    use crate::utils::date::days_from_today;

    async fn fixture() -> (Arc<MemoryStore>, LibraryState, Box<dyn LoanService>) {
        let store = Arc::new(MemoryStore::new());
        seed_store(store.as_ref()).await.expect("should seed");
        let state = load_state(store.clone()).await.expect("should load state");
        let svc = create_loan_service(&Configuration::new("test"), store.clone());
        (store, state, svc)
    }

    fn item_id(state: &LibraryState, index: usize) -> String {
        state.catalogue.all_items()[index].item_id.to_string()
    }

    #[tokio::test]
    async fn test_should_borrow_and_return() {
        let (_store, mut state, svc) = fixture().await;
        let id = item_id(&state, 0);

        let loan = svc.borrow(&mut state, "michel", id.as_str()).await.expect("should borrow");
        assert_eq!(Some(days_from_today(14)), loan.due_date);
        let item = state.catalogue.find_item_by_id(id.as_str()).expect("should find");
        assert_eq!(ItemStatus::CheckedOut, item.status);
        assert_eq!(1, item.version);
        assert!(state.patrons.find_patron("michel").expect("should find").has_loan(id.as_str()));

        let loan = svc.return_item(&mut state, "michel", id.as_str()).await.expect("should return");
        assert!(loan.returned);
        let item = state.catalogue.find_item_by_id(id.as_str()).expect("should find");
        assert_eq!(ItemStatus::Available, item.status);
        assert_eq!(None, item.due_date);
        assert!(state.patrons.find_patron("michel").expect("should find").active_loans.is_empty());
    }

    #[tokio::test]
    async fn test_should_check_borrow_rules_in_order() {
        let (_store, mut state, svc) = fixture().await;
        let id = item_id(&state, 0);
        let res = svc.borrow(&mut state, "nobody", "unknown").await;
        assert!(matches!(res, Err(LibraryError::NoPatron { .. })));
        let res = svc.borrow(&mut state, "michel", "unknown").await;
        assert!(matches!(res, Err(LibraryError::ItemNotFound { .. })));

        svc.borrow(&mut state, "michel", id.as_str()).await.expect("should borrow");
        let res = svc.borrow(&mut state, "michel", id.as_str()).await;
        assert!(matches!(res, Err(LibraryError::AlreadyBorrowed { .. })));
        let res = svc.borrow(&mut state, "eddie", id.as_str()).await;
        assert!(matches!(res, Err(LibraryError::AlreadyCheckedOut { .. })));

        for index in 1..3 {
            let id = item_id(&state, index);
            svc.borrow(&mut state, "michel", id.as_str()).await.expect("should borrow");
        }
        let fourth = item_id(&state, 3);
        let patron = state.patrons.find_patron("michel").expect("should find");
        let item = state.catalogue.find_item_by_id(fourth.as_str()).expect("should find");
        assert!(!svc.can_borrow(patron, item));
        let res = svc.borrow(&mut state, "michel", fourth.as_str()).await;
        let err = res.expect_err("should reach limit");
        assert!(matches!(err, LibraryError::LoanLimitReached { .. }));
        assert_eq!("Max 3 active loans reached.", err.message());
        assert_eq!(3, state.patrons.find_patron("michel").expect("should find").active_loans.len());
    }

    #[tokio::test]
    async fn test_should_not_return_foreign_loan() {
        let (_store, mut state, svc) = fixture().await;
        let id = item_id(&state, 0);
        let res = svc.return_item(&mut state, "michel", id.as_str()).await;
        assert!(matches!(res, Err(LibraryError::NotOnLoanByYou { .. })));
        svc.borrow(&mut state, "michel", id.as_str()).await.expect("should borrow");
        let res = svc.return_item(&mut state, "eddie", id.as_str()).await;
        assert!(matches!(res, Err(LibraryError::NotOnLoanByYou { .. })));
    }

    #[tokio::test]
    async fn test_should_leave_state_when_store_fails() {
        let (store, mut state, svc) = fixture().await;
        let id = item_id(&state, 0);
        store.set_fail_writes(true);
        let res = svc.borrow(&mut state, "michel", id.as_str()).await;
        assert_eq!("PersistenceError", res.expect_err("should fail").reason_code());
        let item = state.catalogue.find_item_by_id(id.as_str()).expect("should find");
        assert_eq!(ItemStatus::Available, item.status);
        assert_eq!(None, item.due_date);
        assert!(state.patrons.find_patron("michel").expect("should find").active_loans.is_empty());
    }
}
