use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::core::library::Describe;
use crate::holds::dto::HoldDto;
use crate::library::SharedLibrary;

pub struct CancelHoldCommand {
    library: SharedLibrary,
}

impl CancelHoldCommand {
    pub fn new(library: SharedLibrary) -> Self {
        Self {
            library,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CancelHoldCommandRequest {
    patron_name: String,
    item_id: String,
}

impl CancelHoldCommandRequest {
    pub fn new(patron_name: &str, item_id: &str) -> Self {
        Self {
            patron_name: patron_name.to_string(),
            item_id: item_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CancelHoldCommandResponse {
    pub message: String,
    pub hold: HoldDto,
}

impl CancelHoldCommandResponse {
    pub fn new(hold: HoldDto) -> Self {
        Self {
            message: hold.describe(),
            hold,
        }
    }
}

#[async_trait]
impl Command<CancelHoldCommandRequest, CancelHoldCommandResponse> for CancelHoldCommand {
    async fn execute(&self, req: CancelHoldCommandRequest) -> Result<CancelHoldCommandResponse, CommandError> {
        let mut library = self.library.lock().await;
        library.try_cancel_hold(req.patron_name.as_str(), req.item_id.as_str()).await
            .map_err(CommandError::from).map(CancelHoldCommandResponse::new)
    }
}
