use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::core::library::Describe;
use crate::holds::dto::HoldDto;
use crate::library::SharedLibrary;

pub struct PlaceHoldCommand {
    library: SharedLibrary,
}

impl PlaceHoldCommand {
    pub fn new(library: SharedLibrary) -> Self {
        Self {
            library,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlaceHoldCommandRequest {
    patron_name: String,
    item_id: String,
}

impl PlaceHoldCommandRequest {
    pub fn new(patron_name: &str, item_id: &str) -> Self {
        Self {
            patron_name: patron_name.to_string(),
            item_id: item_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlaceHoldCommandResponse {
    pub message: String,
    pub hold: HoldDto,
}

impl PlaceHoldCommandResponse {
    pub fn new(hold: HoldDto) -> Self {
        Self {
            message: hold.describe(),
            hold,
        }
    }
}

#[async_trait]
impl Command<PlaceHoldCommandRequest, PlaceHoldCommandResponse> for PlaceHoldCommand {
    async fn execute(&self, req: PlaceHoldCommandRequest) -> Result<PlaceHoldCommandResponse, CommandError> {
        let mut library = self.library.lock().await;
        library.try_place_hold(req.patron_name.as_str(), req.item_id.as_str()).await
            .map_err(CommandError::from).map(PlaceHoldCommandResponse::new)
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::core::command::{Command, CommandError};
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;
    use crate::holds::command::place_hold_cmd::{PlaceHoldCommand, PlaceHoldCommandRequest};
    use crate::store::memory_store::MemoryStore;
    use crate::store::seed::seed_store;

    #[tokio::test]
    async fn test_should_run_place_hold() {
        let store = Arc::new(MemoryStore::new());
        seed_store(store.as_ref()).await.expect("should seed");
        let library = AppState::with_store(Configuration::new("test"), store).load_library().await.expect("should load library");
        let id = library.lock().await.catalogue().all_items()[0].item_id.to_string();

        let cmd = PlaceHoldCommand::new(library.clone());
        let res = cmd.execute(PlaceHoldCommandRequest::new("eddie", id.as_str())).await;
        match res {
            Err(CommandError::Validation { message, reason_code }) => {
                assert_eq!("You can only place holds on checked-out items.", message.as_str());
                assert_eq!(Some("NotEligibleForHold".to_string()), reason_code);
            }
            other => panic!("unexpected {:?}", other),
        }

        library.lock().await.try_borrow("michel", id.as_str()).await.expect("should borrow");
        let res = cmd.execute(PlaceHoldCommandRequest::new("eddie", id.as_str())).await.expect("should hold");
        assert_eq!("Hold placed successfully. You are #1 in the queue.", res.message.as_str());
        let res = cmd.execute(PlaceHoldCommandRequest::new("joseph", id.as_str())).await.expect("should hold");
        assert_eq!(Some(2), res.hold.position);
        assert_eq!(2, res.hold.queue_length);
        let res = cmd.execute(PlaceHoldCommandRequest::new("joseph", id.as_str())).await;
        assert!(matches!(res, Err(CommandError::Conflict { .. })));
    }
}
