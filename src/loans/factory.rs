use std::sync::Arc;
use crate::core::domain::Configuration;
use crate::loans::domain::LoanService;
use crate::loans::domain::service::LoanServiceImpl;
use crate::store::LibraryStore;

pub fn create_loan_service(config: &Configuration, store: Arc<dyn LibraryStore>) -> Box<dyn LoanService> {
    Box::new(LoanServiceImpl::new(config, store))
}
