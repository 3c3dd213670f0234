use std::sync::Arc;
use axum::http::StatusCode;
use tokio::sync::{Mutex, MutexGuard};
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::library::LibraryError;
use crate::core::repository::RepositoryStore;
use crate::library::{factory, SharedLibrary};
use crate::store::factory::create_store;
use crate::store::LibraryStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Configuration,
    pub store: Arc<dyn LibraryStore>,
    seed: bool,
    // serialises the read-validate-mutate-persist sequence of every request in this process
    lending_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub async fn new(branch: &str, store: RepositoryStore) -> AppState {
        AppState {
            config: Configuration::new(branch),
            store: create_store(store).await,
            seed: store.seed_when_empty(),
            lending_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn with_store(config: Configuration, store: Arc<dyn LibraryStore>) -> AppState {
        AppState {
            config,
            store,
            seed: false,
            lending_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn exclusive(&self) -> MutexGuard<'_, ()> {
        self.lending_lock.lock().await
    }

    pub async fn load_library(&self) -> Result<SharedLibrary, ServerError> {
        let library = factory::create_library(&self.config, self.store.clone(), self.seed).await?;
        Ok(Arc::new(Mutex::new(library)))
    }
}

pub type ServerError = (StatusCode, String);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, format!("{}", err))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        let message = err.message().to_string();
        match err {
            CommandError::Access { .. } => {
                (StatusCode::UNAUTHORIZED, message)
            }
            CommandError::Conflict { .. } => {
                (StatusCode::CONFLICT, message)
            }
            CommandError::Database { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            CommandError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, message)
            }
            CommandError::Runtime { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            CommandError::Serialization { .. } => {
                (StatusCode::BAD_REQUEST, message)
            }
            CommandError::Validation { .. } => {
                (StatusCode::BAD_REQUEST, message)
            }
        }
    }
}

impl From<LibraryError> for ServerError {
    fn from(err: LibraryError) -> Self {
        ServerError::from(CommandError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use crate::core::command::CommandError;
    use crate::core::controller::ServerError;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_map_status_codes() {
        assert_eq!(StatusCode::UNAUTHORIZED, ServerError::from(LibraryError::no_patron("test")).0);
        assert_eq!(StatusCode::NOT_FOUND, ServerError::from(LibraryError::item_not_found("test")).0);
        assert_eq!(StatusCode::CONFLICT, ServerError::from(LibraryError::already_checked_out("test")).0);
        assert_eq!(StatusCode::BAD_REQUEST, ServerError::from(LibraryError::not_eligible_for_hold("test")).0);
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, ServerError::from(LibraryError::persistence("test", None, false)).0);
        let (_, message) = ServerError::from(CommandError::NotFound { message: "Item not found.".to_string() });
        assert_eq!("Item not found.", message.as_str());
    }
}
