use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::core::library::Describe;
use crate::library::SharedLibrary;
use crate::loans::dto::LoanDto;

pub struct ReturnItemCommand {
    library: SharedLibrary,
}

impl ReturnItemCommand {
    pub fn new(library: SharedLibrary) -> Self {
        Self {
            library,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReturnItemCommandRequest {
    patron_name: String,
    item_id: String,
}

impl ReturnItemCommandRequest {
    pub fn new(patron_name: &str, item_id: &str) -> Self {
        Self {
            patron_name: patron_name.to_string(),
            item_id: item_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReturnItemCommandResponse {
    pub message: String,
    pub loan: LoanDto,
}

impl ReturnItemCommandResponse {
    pub fn new(loan: LoanDto) -> Self {
        Self {
            message: loan.describe(),
            loan,
        }
    }
}

#[async_trait]
impl Command<ReturnItemCommandRequest, ReturnItemCommandResponse> for ReturnItemCommand {
    async fn execute(&self, req: ReturnItemCommandRequest) -> Result<ReturnItemCommandResponse, CommandError> {
        let mut library = self.library.lock().await;
        library.try_return(req.patron_name.as_str(), req.item_id.as_str()).await
            .map_err(CommandError::from).map(ReturnItemCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::core::command::{Command, CommandError};
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;
    use crate::core::library::ItemStatus;
    use crate::loans::command::borrow_item_cmd::{BorrowItemCommand, BorrowItemCommandRequest};
    use crate::loans::command::return_item_cmd::{ReturnItemCommand, ReturnItemCommandRequest};
    use crate::store::memory_store::MemoryStore;
    use crate::store::seed::seed_store;

    #[tokio::test]
    async fn test_should_run_return_item() {
        let store = Arc::new(MemoryStore::new());
        seed_store(store.as_ref()).await.expect("should seed");
        let library = AppState::with_store(Configuration::new("test"), store).load_library().await.expect("should load library");
        let id = library.lock().await.catalogue().all_items()[0].item_id.to_string();

        let cmd = ReturnItemCommand::new(library.clone());
        let res = cmd.execute(ReturnItemCommandRequest::new("eddie", id.as_str())).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));

        let borrowed = BorrowItemCommand::new(library.clone()).execute(BorrowItemCommandRequest::new("eddie", id.as_str()))
            .await.expect("should borrow");
        let res = cmd.execute(ReturnItemCommandRequest::new("eddie", id.as_str())).await.expect("should return");
        assert_eq!("Returned successfully.", res.message.as_str());
        assert!(res.loan.returned);
        assert_eq!(ItemStatus::Available, res.loan.item_status);
        assert_eq!(borrowed.loan.due_date, res.loan.due_date);
        let item = library.lock().await.get_item(id.as_str(), None).expect("should find item");
        assert_eq!(None, item.due_date);
    }
}
