use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
    Access {
        message: String,
        reason_code: Option<String>,
    },
    Conflict {
        message: String,
        reason_code: Option<String>,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

impl CommandError {
    pub fn message(&self) -> &str {
        match self {
            CommandError::Access { message, .. } => { message.as_str() }
            CommandError::Conflict { message, .. } => { message.as_str() }
            CommandError::Database { message, .. } => { message.as_str() }
            CommandError::NotFound { message } => { message.as_str() }
            CommandError::Runtime { message, .. } => { message.as_str() }
            CommandError::Serialization { message } => { message.as_str() }
            CommandError::Validation { message, .. } => { message.as_str() }
        }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        let reason_code = Some(other.reason_code().to_string());
        match other {
            LibraryError::NoPatron { message } => {
                CommandError::Access { message, reason_code }
            }
            LibraryError::ItemNotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::AlreadyBorrowed { message }
            | LibraryError::AlreadyCheckedOut { message }
            | LibraryError::HeldByAnother { message }
            | LibraryError::DuplicateHold { message } => {
                CommandError::Conflict { message, reason_code }
            }
            LibraryError::LoanLimitReached { message }
            | LibraryError::NotOnLoanByYou { message }
            | LibraryError::NotEligibleForHold { message }
            | LibraryError::CannotHoldOwnLoan { message }
            | LibraryError::NoHoldToCancel { message } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Persistence { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: true }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_map_rule_errors() {
        assert!(matches!(CommandError::from(LibraryError::no_patron("test")), CommandError::Access { .. }));
        assert!(matches!(CommandError::from(LibraryError::item_not_found("test")), CommandError::NotFound { .. }));
        assert!(matches!(CommandError::from(LibraryError::held_by_another("test")), CommandError::Conflict { .. }));
        assert!(matches!(CommandError::from(LibraryError::duplicate_hold("test")), CommandError::Conflict { .. }));
        assert!(matches!(CommandError::from(LibraryError::loan_limit_reached("test")), CommandError::Validation { .. }));
        assert!(matches!(CommandError::from(LibraryError::no_hold_to_cancel("test")), CommandError::Validation { .. }));
        assert!(matches!(CommandError::from(LibraryError::persistence("test", None, true)), CommandError::Database { retryable: true, .. }));
    }

    #[tokio::test]
    async fn test_should_keep_reason_code() {
        let err = CommandError::from(LibraryError::already_checked_out("Item is already checked out."));
        match err {
            CommandError::Conflict { message, reason_code } => {
                assert_eq!("Item is already checked out.", message.as_str());
                assert_eq!(Some("AlreadyCheckedOut".to_string()), reason_code);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
