use std::sync::Arc;
use crate::core::repository::RepositoryStore;
use crate::store::ddb_store::DDBStore;
use crate::store::memory_store::MemoryStore;
use crate::store::LibraryStore;
use crate::utils::ddb::build_db_client;

pub async fn create_store(store: RepositoryStore) -> Arc<dyn LibraryStore> {
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Arc::new(DDBStore::new(client))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let ddb_store = DDBStore::new(client);
            ddb_store.create_tables().await;
            Arc::new(ddb_store)
        }
        RepositoryStore::Memory => {
            Arc::new(MemoryStore::new())
        }
    }
}
