use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::core::library::{ItemCondition, ItemStatus, Role};
use crate::patrons::domain::model::PatronEntity;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PatronDto {
    pub name: String,
    pub active_loans: Vec<String>,
    pub active_holds: Vec<String>,
    pub outstanding_fines: f64,
}

impl From<&PatronEntity> for PatronDto {
    fn from(other: &PatronEntity) -> Self {
        PatronDto {
            name: other.name.to_string(),
            active_loans: other.active_loans.clone(),
            active_holds: other.active_holds.clone(),
            outstanding_fines: other.outstanding_fines,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AccountLoanDto {
    pub item_id: String,
    pub title: String,
    pub kind: String,
    pub status: ItemStatus,
    pub condition: ItemCondition,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AccountHoldDto {
    pub item_id: String,
    pub title: String,
    pub kind: String,
    pub status: ItemStatus,
    // 1-indexed
    pub position: usize,
}

// AccountDto is the account status page of a patron.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct AccountDto {
    pub name: String,
    pub role: Role,
    pub outstanding_fines: f64,
    pub loans: Vec<AccountLoanDto>,
    pub holds: Vec<AccountHoldDto>,
}
