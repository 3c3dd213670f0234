use std::sync::Arc;
use crate::core::library::LibraryResult;
use crate::patrons::domain::service::PatronRegistry;
use crate::store::LibraryStore;

pub async fn create_patron_registry(store: Arc<dyn LibraryStore>) -> LibraryResult<PatronRegistry> {
    let patrons = store.all_patrons().await?;
    let staff = store.all_staff().await?;
    Ok(PatronRegistry::new(store, patrons, staff))
}
