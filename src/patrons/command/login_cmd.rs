use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::core::library::Role;
use crate::library::SharedLibrary;

pub struct LoginCommand {
    library: SharedLibrary,
}

impl LoginCommand {
    pub fn new(library: SharedLibrary) -> Self {
        Self {
            library,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginCommandRequest {
    user_name: String,
}

impl LoginCommandRequest {
    pub fn new(user_name: &str) -> Self {
        Self {
            user_name: user_name.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginCommandResponse {
    pub user_name: String,
    pub role: Role,
}

impl LoginCommandResponse {
    pub fn new(user_name: &str, role: Role) -> Self {
        Self {
            user_name: user_name.to_string(),
            role,
        }
    }
}

// Unknown names are reported as Access errors rather than an Invalid role.
#[async_trait]
impl Command<LoginCommandRequest, LoginCommandResponse> for LoginCommand {
    async fn execute(&self, req: LoginCommandRequest) -> Result<LoginCommandResponse, CommandError> {
        let role = self.library.lock().await.authenticate(req.user_name.as_str());
        if role == Role::Invalid {
            return Err(CommandError::Access {
                message: "Invalid user.".to_string(),
                reason_code: Some("InvalidUser".to_string()),
            });
        }
        Ok(LoginCommandResponse::new(req.user_name.as_str(), role))
    }
}
