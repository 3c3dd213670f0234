use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalogue::dto::ItemDto;
use crate::core::command::{Command, CommandError};
use crate::library::SharedLibrary;

pub struct GetItemCommand {
    library: SharedLibrary,
}

impl GetItemCommand {
    pub fn new(library: SharedLibrary) -> Self {
        Self {
            library,
        }
    }
}

// patron_name selects the status that patron sees
#[derive(Debug, Deserialize)]
pub struct GetItemCommandRequest {
    item_id: String,
    patron_name: Option<String>,
}

impl GetItemCommandRequest {
    pub fn new(item_id: &str, patron_name: Option<&str>) -> Self {
        Self {
            item_id: item_id.to_string(),
            patron_name: patron_name.map(|name| name.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GetItemCommandResponse {
    pub item: ItemDto,
}

impl GetItemCommandResponse {
    pub fn new(item: ItemDto) -> Self {
        Self {
            item,
        }
    }
}

#[async_trait]
impl Command<GetItemCommandRequest, GetItemCommandResponse> for GetItemCommand {
    async fn execute(&self, req: GetItemCommandRequest) -> Result<GetItemCommandResponse, CommandError> {
        let library = self.library.lock().await;
        library.get_item(req.item_id.as_str(), req.patron_name.as_deref())
            .map_err(CommandError::from).map(GetItemCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::catalogue::command::get_item_cmd::{GetItemCommand, GetItemCommandRequest};
    use crate::core::command::{Command, CommandError};
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;
    use crate::core::library::ItemStatus;
    use crate::library::SharedLibrary;
    use crate::store::memory_store::MemoryStore;
    use crate::store::seed::seed_store;

    async fn library() -> SharedLibrary {
        let store = Arc::new(MemoryStore::new());
        seed_store(store.as_ref()).await.expect("should seed");
        AppState::with_store(Configuration::new("test"), store).load_library().await.expect("should load library")
    }

    #[tokio::test]
    async fn test_should_run_get_item() {
        let library = library().await;
        let id = library.lock().await.catalogue().all_items()[0].item_id.to_string();
        library.lock().await.try_borrow("michel", id.as_str()).await.expect("should borrow");
        library.lock().await.try_place_hold("eddie", id.as_str()).await.expect("should hold");
        library.lock().await.try_return("michel", id.as_str()).await.expect("should return");

        let cmd = GetItemCommand::new(library.clone());
        let res = cmd.execute(GetItemCommandRequest::new(id.as_str(), None)).await.expect("should get item");
        assert_eq!(ItemStatus::OnHold, res.item.status);
        assert_eq!(1, res.item.holds);
        let res = cmd.execute(GetItemCommandRequest::new(id.as_str(), Some("eddie"))).await.expect("should get item");
        assert_eq!(ItemStatus::Available, res.item.status);
    }

    #[tokio::test]
    async fn test_should_not_find_unknown_item() {
        let cmd = GetItemCommand::new(library().await);
        let res = cmd.execute(GetItemCommandRequest::new("unknown", None)).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
