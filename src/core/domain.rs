use serde::{Deserialize, Serialize};

// Identifiable defines common traits that can be shared by persistent objects
pub trait Identifiable: Sync + Send {
    fn id(&self) -> String;
    fn version(&self) -> i64;
}

pub const MAX_ACTIVE_LOANS: usize = 3;
pub const LOAN_PERIOD_DAYS: i64 = 14;

// Configuration abstracts lending policy for a library branch
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Configuration {
    pub branch_id: String,
    pub max_loans: usize,
    pub loan_days: i64,
}

impl Configuration {
    pub fn new(branch_id: &str) -> Self {
        Configuration {
            branch_id: branch_id.to_string(),
            max_loans: MAX_ACTIVE_LOANS,
            loan_days: LOAN_PERIOD_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Configuration;

    #[tokio::test]
    async fn test_should_build_config() {
        let config = Configuration::new("test");
        assert_eq!("test", config.branch_id.as_str());
        assert_eq!(3, config.max_loans);
        assert_eq!(14, config.loan_days);
    }
}
