use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::core::library::ItemStatus;
use crate::library::SharedLibrary;

pub struct QueuePositionCommand {
    library: SharedLibrary,
}

impl QueuePositionCommand {
    pub fn new(library: SharedLibrary) -> Self {
        Self {
            library,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QueuePositionCommandRequest {
    patron_name: String,
    item_id: String,
}

impl QueuePositionCommandRequest {
    pub fn new(patron_name: &str, item_id: &str) -> Self {
        Self {
            patron_name: patron_name.to_string(),
            item_id: item_id.to_string(),
        }
    }
}

// position is 1-indexed, absent when the patron is not queued
#[derive(Debug, Serialize)]
pub struct QueuePositionCommandResponse {
    pub item_id: String,
    pub patron_name: String,
    pub position: Option<usize>,
    pub status: ItemStatus,
    pub can_borrow: bool,
}

#[async_trait]
impl Command<QueuePositionCommandRequest, QueuePositionCommandResponse> for QueuePositionCommand {
    async fn execute(&self, req: QueuePositionCommandRequest) -> Result<QueuePositionCommandResponse, CommandError> {
        let library = self.library.lock().await;
        let item_id = req.item_id.as_str();
        let patron_name = req.patron_name.as_str();
        let status = library.effective_status(item_id, patron_name)
            .ok_or_else(|| CommandError::NotFound { message: "Item not found.".to_string() })?;
        Ok(QueuePositionCommandResponse {
            item_id: req.item_id.to_string(),
            patron_name: req.patron_name.to_string(),
            position: library.queue_position(patron_name, item_id),
            status,
            can_borrow: library.can_borrow(patron_name, item_id),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::core::command::{Command, CommandError};
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;
    use crate::core::library::ItemStatus;
    use crate::holds::command::queue_position_cmd::{QueuePositionCommand, QueuePositionCommandRequest};
    use crate::store::memory_store::MemoryStore;
    use crate::store::seed::seed_store;

    #[tokio::test]
    async fn test_should_run_queue_position() {
        let store = Arc::new(MemoryStore::new());
        seed_store(store.as_ref()).await.expect("should seed");
        let library = AppState::with_store(Configuration::new("test"), store).load_library().await.expect("should load library");
        let id = library.lock().await.catalogue().all_items()[0].item_id.to_string();
        {
            let mut library = library.lock().await;
            library.try_borrow("michel", id.as_str()).await.expect("should borrow");
            library.try_place_hold("eddie", id.as_str()).await.expect("should hold");
            library.try_place_hold("joseph", id.as_str()).await.expect("should hold");
            library.try_return("michel", id.as_str()).await.expect("should return");
        }

        let cmd = QueuePositionCommand::new(library);
        let res = cmd.execute(QueuePositionCommandRequest::new("eddie", id.as_str())).await.expect("should query");
        assert_eq!(Some(1), res.position);
        assert_eq!(ItemStatus::Available, res.status);
        assert!(res.can_borrow);
        let res = cmd.execute(QueuePositionCommandRequest::new("joseph", id.as_str())).await.expect("should query");
        assert_eq!(Some(2), res.position);
        assert_eq!(ItemStatus::OnHold, res.status);
        assert!(!res.can_borrow);
        let res = cmd.execute(QueuePositionCommandRequest::new("bob", id.as_str())).await.expect("should query");
        assert_eq!(None, res.position);

        let res = cmd.execute(QueuePositionCommandRequest::new("bob", "unknown")).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
