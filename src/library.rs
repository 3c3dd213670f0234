use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use crate::catalogue::domain::model::ItemEntity;
use crate::catalogue::domain::service::Catalogue;
use crate::catalogue::dto::ItemDto;
use crate::catalogue::view;
use crate::core::domain::Configuration;
use crate::core::library::{ActionResult, ItemStatus, LibraryResult, Role};
use crate::holds::domain::HoldService;
use crate::holds::dto::HoldDto;
use crate::loans::domain::LoanService;
use crate::loans::dto::LoanDto;
use crate::patrons::domain::service::PatronRegistry;
use crate::patrons::dto::{AccountDto, PatronDto};

pub mod factory;

// LibraryState is everything the lending rules read and write.
pub struct LibraryState {
    pub catalogue: Catalogue,
    pub patrons: PatronRegistry,
}

// Library resolves patrons and items for its callers, runs the loan and hold rules and turns
// their outcome into an ActionResult. Every action either commits to the store and updates the
// state or leaves both untouched.
pub struct Library {
    branch_id: String,
    state: LibraryState,
    loan_service: Box<dyn LoanService>,
    hold_service: Box<dyn HoldService>,
}

pub type SharedLibrary = Arc<Mutex<Library>>;

fn log_outcome<T>(branch: &str, action: &str, patron_name: &str, item_id: &str, res: &LibraryResult<T>) {
    match res {
        Ok(_) => {
            info!(branch, action, patron = patron_name, item = item_id, "lending action succeeded");
        }
        Err(err) if err.is_rule_violation() => {
            warn!(branch, action, patron = patron_name, item = item_id, reason = err.reason_code(), "lending action rejected");
        }
        Err(err) => {
            error!(branch, action, patron = patron_name, item = item_id, error = %err, "lending action failed");
        }
    }
}

impl Library {
    pub fn new(config: &Configuration, state: LibraryState,
               loan_service: Box<dyn LoanService>, hold_service: Box<dyn HoldService>) -> Self {
        Self {
            branch_id: config.branch_id.to_string(),
            state,
            loan_service,
            hold_service,
        }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.state.catalogue
    }

    pub fn patrons(&self) -> &PatronRegistry {
        &self.state.patrons
    }

    pub async fn try_borrow(&mut self, patron_name: &str, item_id: &str) -> LibraryResult<LoanDto> {
        let res = self.loan_service.borrow(&mut self.state, patron_name, item_id).await;
        log_outcome(self.branch_id.as_str(), "borrow", patron_name, item_id, &res);
        res
    }

    pub async fn try_return(&mut self, patron_name: &str, item_id: &str) -> LibraryResult<LoanDto> {
        let res = self.loan_service.return_item(&mut self.state, patron_name, item_id).await;
        log_outcome(self.branch_id.as_str(), "return", patron_name, item_id, &res);
        res
    }

    pub async fn try_place_hold(&mut self, patron_name: &str, item_id: &str) -> LibraryResult<HoldDto> {
        let res = self.hold_service.place_hold(&mut self.state, patron_name, item_id).await;
        log_outcome(self.branch_id.as_str(), "place_hold", patron_name, item_id, &res);
        res
    }

    pub async fn try_cancel_hold(&mut self, patron_name: &str, item_id: &str) -> LibraryResult<HoldDto> {
        let res = self.hold_service.cancel_hold(&mut self.state, patron_name, item_id).await;
        log_outcome(self.branch_id.as_str(), "cancel_hold", patron_name, item_id, &res);
        res
    }

    pub async fn borrow(&mut self, patron_name: &str, item_id: &str) -> ActionResult {
        ActionResult::from(self.try_borrow(patron_name, item_id).await)
    }

    pub async fn return_item(&mut self, patron_name: &str, item_id: &str) -> ActionResult {
        ActionResult::from(self.try_return(patron_name, item_id).await)
    }

    pub async fn place_hold(&mut self, patron_name: &str, item_id: &str) -> ActionResult {
        ActionResult::from(self.try_place_hold(patron_name, item_id).await)
    }

    pub async fn cancel_hold(&mut self, patron_name: &str, item_id: &str) -> ActionResult {
        ActionResult::from(self.try_cancel_hold(patron_name, item_id).await)
    }

    pub fn can_borrow(&self, patron_name: &str, item_id: &str) -> bool {
        match (self.state.patrons.find_patron(patron_name), self.state.catalogue.find_item_by_id(item_id)) {
            (Some(patron), Some(item)) => self.loan_service.can_borrow(patron, item),
            _ => false,
        }
    }

    pub fn effective_status(&self, item_id: &str, patron_name: &str) -> Option<ItemStatus> {
        self.state.catalogue.find_item_by_id(item_id)
            .map(|item| view::effective_status(item, patron_name))
    }

    pub fn queue_position(&self, patron_name: &str, item_id: &str) -> Option<usize> {
        self.state.catalogue.find_item_by_id(item_id)
            .and_then(|item| self.hold_service.queue_position(patron_name, item))
    }

    pub fn authenticate(&self, user_name: &str) -> Role {
        self.state.patrons.authenticate(user_name)
    }

    pub fn account(&self, patron_name: &str) -> LibraryResult<AccountDto> {
        self.state.patrons.account(patron_name, &self.state.catalogue)
    }

    pub fn list_items(&self, kind_name: Option<&str>, patron_name: Option<&str>) -> Vec<ItemDto> {
        let items: Vec<&ItemEntity> = match kind_name {
            Some(kind_name) => self.state.catalogue.items_by_kind(kind_name),
            None => self.state.catalogue.all_items().iter().collect(),
        };
        items.into_iter().map(|item| match patron_name {
            Some(patron_name) => ItemDto::for_patron(item, patron_name),
            None => ItemDto::from(item),
        }).collect()
    }

    pub fn get_item(&self, item_id: &str, patron_name: Option<&str>) -> LibraryResult<ItemDto> {
        let item = self.state.catalogue.get_item(item_id)?;
        Ok(match patron_name {
            Some(patron_name) => ItemDto::for_patron(item, patron_name),
            None => ItemDto::from(item),
        })
    }

    pub async fn add_item(&mut self, item: ItemEntity) -> LibraryResult<ItemDto> {
        let res = self.state.catalogue.add_item(item).await;
        if let Ok(item) = &res {
            info!(item = item.item_id.as_str(), kind = item.kind.as_str(), "item added");
        }
        res
    }

    pub async fn remove_item(&mut self, item_id: &str) -> LibraryResult<ItemDto> {
        let res = self.state.catalogue.remove_item(item_id).await;
        if res.is_ok() {
            info!(item = item_id, "item removed");
        }
        res
    }

    pub async fn update_fines(&mut self, patron_name: &str, amount: f64) -> LibraryResult<PatronDto> {
        self.state.patrons.update_fines(patron_name, amount).await
    }

    // replaces catalogue and registry with what the store holds
    pub async fn reload(&mut self) -> LibraryResult<()> {
        let items = self.state.catalogue.reload().await?;
        let patrons = self.state.patrons.reload().await?;
        info!(items, patrons, "library reloaded");
        Ok(())
    }
}
