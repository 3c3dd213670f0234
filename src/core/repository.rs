use serde::{Deserialize, Serialize};

// RepositoryStore selects the backing store for catalogue, patrons, loans and holds
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    DynamoDB,
    LocalDynamoDB,
    Memory,
}

impl RepositoryStore {
    // a fresh store gets the default catalogue and members
    pub fn seed_when_empty(&self) -> bool {
        match self {
            RepositoryStore::DynamoDB => { false }
            RepositoryStore::LocalDynamoDB => { true }
            RepositoryStore::Memory => { true }
        }
    }
}
