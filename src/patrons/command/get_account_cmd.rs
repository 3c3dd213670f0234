use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::library::SharedLibrary;
use crate::patrons::dto::AccountDto;

pub struct GetAccountCommand {
    library: SharedLibrary,
}

impl GetAccountCommand {
    pub fn new(library: SharedLibrary) -> Self {
        Self {
            library,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GetAccountCommandRequest {
    name: String,
}

impl GetAccountCommandRequest {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GetAccountCommandResponse {
    pub account: AccountDto,
}

impl GetAccountCommandResponse {
    pub fn new(account: AccountDto) -> Self {
        Self {
            account,
        }
    }
}

#[async_trait]
impl Command<GetAccountCommandRequest, GetAccountCommandResponse> for GetAccountCommand {
    async fn execute(&self, req: GetAccountCommandRequest) -> Result<GetAccountCommandResponse, CommandError> {
        self.library.lock().await.account(req.name.as_str())
            .map_err(CommandError::from).map(GetAccountCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::core::command::{Command, CommandError};
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;
    use crate::core::library::ItemStatus;
    use crate::patrons::command::get_account_cmd::{GetAccountCommand, GetAccountCommandRequest};
    use crate::store::memory_store::MemoryStore;
    use crate::store::seed::seed_store;
    use crate::utils::date::days_from_today;

    #[tokio::test]
    async fn test_should_run_get_account() {
        let store = Arc::new(MemoryStore::new());
        seed_store(store.as_ref()).await.expect("should seed");
        let library = AppState::with_store(Configuration::new("test"), store).load_library().await.expect("should load library");
        let (first, second) = {
            let library = library.lock().await;
            let items = library.catalogue().all_items();
            (items[0].item_id.to_string(), items[1].item_id.to_string())
        };
        {
            let mut library = library.lock().await;
            library.try_borrow("andrey", first.as_str()).await.expect("should borrow");
            library.try_borrow("michel", second.as_str()).await.expect("should borrow");
            library.try_place_hold("andrey", second.as_str()).await.expect("should hold");
        }

        let cmd = GetAccountCommand::new(library);
        let res = cmd.execute(GetAccountCommandRequest::new("andrey")).await.expect("should get account");
        assert_eq!(1, res.account.loans.len());
        assert_eq!(Some(days_from_today(14)), res.account.loans[0].due_date);
        assert_eq!(1, res.account.holds.len());
        assert_eq!(1, res.account.holds[0].position);
        assert_eq!(ItemStatus::CheckedOut, res.account.holds[0].status);

        let res = cmd.execute(GetAccountCommandRequest::new("lauren")).await;
        assert!(matches!(res, Err(CommandError::Access { .. })));
    }
}
