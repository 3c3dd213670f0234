use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::catalogue::domain::model::ItemEntity;
use crate::core::library::{Describe, ItemStatus};
use crate::loans::domain::model::loan_key;
use crate::utils::date::format_day;

// LoanDto reports a checkout or a return.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LoanDto {
    pub loan_id: String,
    pub patron_name: String,
    pub item_id: String,
    pub title: String,
    pub due_date: Option<NaiveDate>,
    pub item_status: ItemStatus,
    pub returned: bool,
}

impl LoanDto {
    pub fn borrowed(patron_name: &str, item: &ItemEntity) -> Self {
        Self::build(patron_name, item, item.due_date, false)
    }

    pub fn returned(patron_name: &str, item: &ItemEntity, due_date: Option<NaiveDate>) -> Self {
        Self::build(patron_name, item, due_date, true)
    }

    fn build(patron_name: &str, item: &ItemEntity, due_date: Option<NaiveDate>, returned: bool) -> Self {
        Self {
            loan_id: loan_key(patron_name, item.item_id.as_str()),
            patron_name: patron_name.to_string(),
            item_id: item.item_id.to_string(),
            title: item.title.to_string(),
            due_date,
            item_status: item.status,
            returned,
        }
    }
}

impl Describe for LoanDto {
    fn describe(&self) -> String {
        if self.returned {
            return "Returned successfully.".to_string();
        }
        match self.due_date {
            Some(day) => format!("Borrowed successfully. Due {}.", format_day(day)),
            None => "Borrowed successfully.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::catalogue::domain::model::{ItemEntity, ItemKind};
    use crate::core::library::{Describe, ItemCondition};
    use crate::loans::dto::LoanDto;

    #[tokio::test]
    async fn test_should_describe_loans() {
        let mut item = ItemEntity::new(ItemKind::Fiction { isbn: "978-0-14-243724-7".to_string() },
                                       "Moby Dick", "Herman Melville", 1851, "Paperback", ItemCondition::Worn);
        item.due_date = NaiveDate::from_ymd_opt(2023, 5, 15);
        let borrowed = LoanDto::borrowed("michel", &item);
        assert_eq!("Borrowed successfully. Due 2023-05-15.", borrowed.describe().as_str());
        let returned = LoanDto::returned("michel", &item, item.due_date);
        assert_eq!("Returned successfully.", returned.describe().as_str());
    }
}
