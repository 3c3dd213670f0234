use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalogue::dto::ItemDto;
use crate::core::command::{Command, CommandError};
use crate::library::SharedLibrary;

pub struct RemoveItemCommand {
    library: SharedLibrary,
}

impl RemoveItemCommand {
    pub fn new(library: SharedLibrary) -> Self {
        Self {
            library,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RemoveItemCommandRequest {
    item_id: String,
}

impl RemoveItemCommandRequest {
    pub fn new(item_id: &str) -> Self {
        Self {
            item_id: item_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RemoveItemCommandResponse {
    pub item: ItemDto,
}

impl RemoveItemCommandResponse {
    pub fn new(item: ItemDto) -> Self {
        Self {
            item,
        }
    }
}

#[async_trait]
impl Command<RemoveItemCommandRequest, RemoveItemCommandResponse> for RemoveItemCommand {
    async fn execute(&self, req: RemoveItemCommandRequest) -> Result<RemoveItemCommandResponse, CommandError> {
        let mut library = self.library.lock().await;
        library.remove_item(req.item_id.as_str()).await
            .map_err(CommandError::from).map(RemoveItemCommandResponse::new)
    }
}
