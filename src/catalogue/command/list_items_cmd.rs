use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalogue::dto::ItemDto;
use crate::core::command::{Command, CommandError};
use crate::library::SharedLibrary;

pub struct ListItemsCommand {
    library: SharedLibrary,
}

impl ListItemsCommand {
    pub fn new(library: SharedLibrary) -> Self {
        Self {
            library,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListItemsCommandRequest {
    kind: Option<String>,
    patron: Option<String>,
}

impl ListItemsCommandRequest {
    pub fn new(kind: Option<&str>, patron: Option<&str>) -> Self {
        Self {
            kind: kind.map(|kind| kind.to_string()),
            patron: patron.map(|patron| patron.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListItemsCommandResponse {
    pub items: Vec<ItemDto>,
}

impl ListItemsCommandResponse {
    pub fn new(items: Vec<ItemDto>) -> Self {
        Self {
            items,
        }
    }
}

#[async_trait]
impl Command<ListItemsCommandRequest, ListItemsCommandResponse> for ListItemsCommand {
    async fn execute(&self, req: ListItemsCommandRequest) -> Result<ListItemsCommandResponse, CommandError> {
        let library = self.library.lock().await;
        let items = library.list_items(req.kind.as_deref(), req.patron.as_deref());
        Ok(ListItemsCommandResponse::new(items))
    }
}
