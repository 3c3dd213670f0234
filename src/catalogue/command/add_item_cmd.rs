use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalogue::domain::model::{ItemEntity, ItemKind};
use crate::catalogue::dto::ItemDto;
use crate::core::command::{Command, CommandError};
use crate::core::library::ItemCondition;
use crate::library::SharedLibrary;

pub struct AddItemCommand {
    library: SharedLibrary,
}

impl AddItemCommand {
    pub fn new(library: SharedLibrary) -> Self {
        Self {
            library,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddItemCommandRequest {
    #[serde(flatten)]
    details: ItemKind,
    title: String,
    creator: String,
    publication_year: i32,
    format: String,
    condition: ItemCondition,
}

impl AddItemCommandRequest {
    pub fn new(details: ItemKind, title: &str, creator: &str, publication_year: i32,
               format: &str, condition: ItemCondition) -> Self {
        Self {
            details,
            title: title.to_string(),
            creator: creator.to_string(),
            publication_year,
            format: format.to_string(),
            condition,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddItemCommandResponse {
    pub item: ItemDto,
}

impl AddItemCommandResponse {
    pub fn new(item: ItemDto) -> Self {
        Self {
            item,
        }
    }
}

#[async_trait]
impl Command<AddItemCommandRequest, AddItemCommandResponse> for AddItemCommand {
    async fn execute(&self, req: AddItemCommandRequest) -> Result<AddItemCommandResponse, CommandError> {
        let item = ItemEntity::new(req.details, req.title.as_str(), req.creator.as_str(),
                                   req.publication_year, req.format.as_str(), req.condition);
        let mut library = self.library.lock().await;
        library.add_item(item).await.map_err(CommandError::from).map(AddItemCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use serde_json::json;
    use crate::catalogue::command::add_item_cmd::{AddItemCommand, AddItemCommandRequest};
    use crate::catalogue::domain::model::ItemKind;
    use crate::core::command::{Command, CommandError};
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;
    use crate::core::library::{ItemCondition, ItemStatus};
    use crate::library::SharedLibrary;
    use crate::store::memory_store::MemoryStore;

    async fn library() -> SharedLibrary {
        let state = AppState::with_store(Configuration::new("test"), Arc::new(MemoryStore::new()));
        state.load_library().await.expect("should load library")
    }

    #[tokio::test]
    async fn test_should_run_add_item() {
        let library = library().await;
        let cmd = AddItemCommand::new(library.clone());
        let req = AddItemCommandRequest::new(
            ItemKind::Magazine { issue_number: 202, publication_date: chrono::NaiveDate::from_ymd_opt(2023, 5, 1).expect("should build date") },
            "Wired", "Condé Nast", 2023, "Print", ItemCondition::New);
        let res = cmd.execute(req).await.expect("should add item");
        assert_eq!("Magazine", res.item.kind.as_str());
        assert_eq!(ItemStatus::Available, res.item.status);
        assert_eq!(1, library.lock().await.catalogue().all_items().len());
    }

    #[tokio::test]
    async fn test_should_parse_flattened_kind() {
        let req: AddItemCommandRequest = serde_json::from_value(json!({
            "kind": "Movie", "genre": "Drama", "rating": 9,
            "title": "Forrest Gump", "creator": "Robert Zemeckis", "publication_year": 1994,
            "format": "DVD", "condition": "Worn"
        })).expect("should parse request");
        assert_eq!(ItemKind::Movie { genre: "Drama".to_string(), rating: 9 }, req.details);
        assert_eq!(ItemCondition::Worn, req.condition);
    }

    #[tokio::test]
    async fn test_should_reject_blank_title() {
        let cmd = AddItemCommand::new(library().await);
        let req = AddItemCommandRequest::new(ItemKind::Fiction { isbn: "isbn".to_string() },
                                             " ", "anon", 2000, "Paperback", ItemCondition::Standard);
        let res = cmd.execute(req).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
    }
}
