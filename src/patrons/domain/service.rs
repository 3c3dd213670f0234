use std::sync::Arc;
use crate::catalogue::domain::service::Catalogue;
use crate::catalogue::view::effective_status;
use crate::core::library::{LibraryError, LibraryResult, Role};
use crate::patrons::domain::model::{PatronEntity, StaffEntity};
use crate::patrons::dto::{AccountDto, AccountHoldDto, AccountLoanDto, PatronDto};
use crate::patrons::Member;
use crate::store::LibraryStore;

// PatronRegistry owns patron and staff records of a branch.
pub struct PatronRegistry {
    store: Arc<dyn LibraryStore>,
    patrons: Vec<PatronEntity>,
    staff: Vec<StaffEntity>,
}

impl PatronRegistry {
    pub fn new(store: Arc<dyn LibraryStore>, patrons: Vec<PatronEntity>, staff: Vec<StaffEntity>) -> Self {
        Self {
            store,
            patrons,
            staff,
        }
    }

    fn find_staff(&self, name: &str, role: Role) -> Option<&StaffEntity> {
        self.staff.iter().find(|s| s.name == name && s.is_role(role))
    }

    // staff never resolve as patrons
    pub fn find_patron(&self, name: &str) -> Option<&PatronEntity> {
        if self.staff.iter().any(|s| s.name == name) {
            return None;
        }
        self.patrons.iter().find(|p| p.name == name)
    }

    pub fn get_patron(&self, name: &str) -> LibraryResult<&PatronEntity> {
        self.find_patron(name).ok_or_else(|| LibraryError::no_patron("No patron logged in."))
    }

    pub fn all_patrons(&self) -> &[PatronEntity] {
        &self.patrons
    }

    pub fn authenticate(&self, user_name: &str) -> Role {
        if let Some(librarian) = self.find_staff(user_name, Role::Librarian) {
            return librarian.role();
        }
        if let Some(admin) = self.find_staff(user_name, Role::Admin) {
            return admin.role();
        }
        if let Some(patron) = self.find_patron(user_name) {
            return patron.role();
        }
        Role::Invalid
    }

    pub fn account(&self, name: &str, catalogue: &Catalogue) -> LibraryResult<AccountDto> {
        let patron = self.get_patron(name)?;
        let loans = patron.active_loans.iter()
            .filter_map(|id| catalogue.find_item_by_id(id))
            .map(|item| AccountLoanDto {
                item_id: item.item_id.to_string(),
                title: item.title.to_string(),
                kind: item.kind_name().to_string(),
                status: item.status,
                condition: item.condition,
                due_date: item.due_date,
            }).collect();
        let holds = patron.active_holds.iter()
            .filter_map(|id| catalogue.find_item_by_id(id))
            .filter_map(|item| item.queue_index(name).map(|index| AccountHoldDto {
                item_id: item.item_id.to_string(),
                title: item.title.to_string(),
                kind: item.kind_name().to_string(),
                status: effective_status(item, name),
                position: index + 1,
            })).collect();
        Ok(AccountDto {
            name: patron.name.to_string(),
            role: patron.role(),
            outstanding_fines: patron.outstanding_fines,
            loans,
            holds,
        })
    }

    // adds to the fines accumulator, negative amounts record a payment
    pub async fn update_fines(&mut self, name: &str, amount: f64) -> LibraryResult<PatronDto> {
        let mut patron = self.get_patron(name)?.clone();
        patron.outstanding_fines += amount;
        self.store.update_patron(&patron).await?;
        let dto = PatronDto::from(&patron);
        self.replace(patron);
        Ok(dto)
    }

    pub async fn reload(&mut self) -> LibraryResult<usize> {
        self.patrons = self.store.all_patrons().await?;
        self.staff = self.store.all_staff().await?;
        Ok(self.patrons.len())
    }

    // write-back of a patron whose change set was committed
    pub(crate) fn replace(&mut self, patron: PatronEntity) {
        if let Some(existing) = self.patrons.iter_mut().find(|other| other.name == patron.name) {
            *existing = patron;
        }
    }
}
