use std::sync::Arc;
use crate::catalogue::factory::create_catalogue;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::holds::factory::create_hold_service;
use crate::library::{Library, LibraryState};
use crate::loans::factory::create_loan_service;
use crate::patrons::factory::create_patron_registry;
use crate::store::seed::seed_store;
use crate::store::LibraryStore;

pub async fn load_state(store: Arc<dyn LibraryStore>) -> LibraryResult<LibraryState> {
    Ok(LibraryState {
        catalogue: create_catalogue(store.clone()).await?,
        patrons: create_patron_registry(store).await?,
    })
}

// seed fills an empty store with the default branch contents before loading it
pub async fn create_library(config: &Configuration, store: Arc<dyn LibraryStore>, seed: bool) -> LibraryResult<Library> {
    if seed && store.is_empty().await? {
        seed_store(store.as_ref()).await?;
    }
    let state = load_state(store.clone()).await?;
    let loan_service = create_loan_service(config, store.clone());
    let hold_service = create_hold_service(config, store);
    Ok(Library::new(config, state, loan_service, hold_service))
}
