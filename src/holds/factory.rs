use std::sync::Arc;
use crate::core::domain::Configuration;
use crate::holds::domain::HoldService;
use crate::holds::domain::service::HoldServiceImpl;
use crate::store::LibraryStore;

pub fn create_hold_service(config: &Configuration, store: Arc<dyn LibraryStore>) -> Box<dyn HoldService> {
    Box::new(HoldServiceImpl::new(config, store))
}
