use std::sync::Arc;
use crate::catalogue::domain::service::Catalogue;
use crate::core::library::LibraryResult;
use crate::store::LibraryStore;

pub async fn create_catalogue(store: Arc<dyn LibraryStore>) -> LibraryResult<Catalogue> {
    let items = store.all_items().await?;
    Ok(Catalogue::new(store, items))
}
