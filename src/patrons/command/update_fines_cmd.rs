use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::library::SharedLibrary;
use crate::patrons::dto::PatronDto;

pub struct UpdateFinesCommand {
    library: SharedLibrary,
}

impl UpdateFinesCommand {
    pub fn new(library: SharedLibrary) -> Self {
        Self {
            library,
        }
    }
}

// a negative amount records a payment
#[derive(Debug, Deserialize)]
pub struct UpdateFinesCommandRequest {
    name: String,
    amount: f64,
}

impl UpdateFinesCommandRequest {
    pub fn new(name: &str, amount: f64) -> Self {
        Self {
            name: name.to_string(),
            amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateFinesCommandResponse {
    pub patron: PatronDto,
}

impl UpdateFinesCommandResponse {
    pub fn new(patron: PatronDto) -> Self {
        Self {
            patron,
        }
    }
}

#[async_trait]
impl Command<UpdateFinesCommandRequest, UpdateFinesCommandResponse> for UpdateFinesCommand {
    async fn execute(&self, req: UpdateFinesCommandRequest) -> Result<UpdateFinesCommandResponse, CommandError> {
        if !req.amount.is_finite() {
            return Err(CommandError::Validation {
                message: "Fine amount must be a number.".to_string(),
                reason_code: Some("400".to_string()),
            });
        }
        let mut library = self.library.lock().await;
        library.update_fines(req.name.as_str(), req.amount).await
            .map_err(CommandError::from).map(UpdateFinesCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::core::command::{Command, CommandError};
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;
    use crate::patrons::command::update_fines_cmd::{UpdateFinesCommand, UpdateFinesCommandRequest};
    use crate::store::memory_store::MemoryStore;
    use crate::store::seed::seed_store;
    use crate::store::LibraryStore;

    #[tokio::test]
    async fn test_should_run_update_fines() {
        let store = Arc::new(MemoryStore::new());
        seed_store(store.as_ref()).await.expect("should seed");
        let library = AppState::with_store(Configuration::new("test"), store.clone()).load_library().await.expect("should load library");
        let cmd = UpdateFinesCommand::new(library);

        cmd.execute(UpdateFinesCommandRequest::new("bob", 2.5)).await.expect("should add fine");
        let res = cmd.execute(UpdateFinesCommandRequest::new("bob", -1.0)).await.expect("should record payment");
        assert_eq!(1.5, res.patron.outstanding_fines);
        let patrons = store.all_patrons().await.expect("should load patrons");
        let bob = patrons.iter().find(|patron| patron.name == "bob").expect("should find bob");
        assert_eq!(1.5, bob.outstanding_fines);

        let res = cmd.execute(UpdateFinesCommandRequest::new("nobody", 1.0)).await;
        assert!(matches!(res, Err(CommandError::Access { .. })));
    }
}
