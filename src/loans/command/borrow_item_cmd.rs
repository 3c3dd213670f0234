use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::core::library::Describe;
use crate::library::SharedLibrary;
use crate::loans::dto::LoanDto;

pub struct BorrowItemCommand {
    library: SharedLibrary,
}

impl BorrowItemCommand {
    pub fn new(library: SharedLibrary) -> Self {
        Self {
            library,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BorrowItemCommandRequest {
    patron_name: String,
    item_id: String,
}

impl BorrowItemCommandRequest {
    pub fn new(patron_name: &str, item_id: &str) -> Self {
        Self {
            patron_name: patron_name.to_string(),
            item_id: item_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BorrowItemCommandResponse {
    pub message: String,
    pub loan: LoanDto,
}

impl BorrowItemCommandResponse {
    pub fn new(loan: LoanDto) -> Self {
        Self {
            message: loan.describe(),
            loan,
        }
    }
}

#[async_trait]
impl Command<BorrowItemCommandRequest, BorrowItemCommandResponse> for BorrowItemCommand {
    async fn execute(&self, req: BorrowItemCommandRequest) -> Result<BorrowItemCommandResponse, CommandError> {
        let mut library = self.library.lock().await;
        library.try_borrow(req.patron_name.as_str(), req.item_id.as_str()).await
            .map_err(CommandError::from).map(BorrowItemCommandResponse::new)
    }
}
