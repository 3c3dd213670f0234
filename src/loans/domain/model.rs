use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;

// LoanEntity records an item checked out by a patron until its due date.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LoanEntity {
    pub loan_id: String,
    pub patron_name: String,
    pub item_id: String,
    pub due_date: NaiveDate,
}

impl LoanEntity {
    pub fn new(patron_name: &str, item_id: &str, due_date: NaiveDate) -> Self {
        Self {
            loan_id: loan_key(patron_name, item_id),
            patron_name: patron_name.to_string(),
            item_id: item_id.to_string(),
            due_date,
        }
    }
}

pub fn loan_key(patron_name: &str, item_id: &str) -> String {
    format!("{}#{}", patron_name, item_id)
}

impl Identifiable for LoanEntity {
    fn id(&self) -> String {
        self.loan_id.to_string()
    }

    fn version(&self) -> i64 {
        0
    }
}
