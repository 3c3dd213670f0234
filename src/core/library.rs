use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    NoPatron {
        message: String,
    },
    ItemNotFound {
        message: String,
    },
    AlreadyBorrowed {
        message: String,
    },
    LoanLimitReached {
        message: String,
    },
    AlreadyCheckedOut {
        message: String,
    },
    HeldByAnother {
        message: String,
    },
    NotOnLoanByYou {
        message: String,
    },
    NotEligibleForHold {
        message: String,
    },
    CannotHoldOwnLoan {
        message: String,
    },
    DuplicateHold {
        message: String,
    },
    NoHoldToCancel {
        message: String,
    },
    // The store rejected a write or read. A retryable error usually means a concurrent writer
    // bumped the item version first or the endpoint was throttled; the in-memory state has not
    // been touched and the caller can repeat the whole action.
    Persistence {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn no_patron(message: &str) -> LibraryError {
        LibraryError::NoPatron { message: message.to_string() }
    }

    pub fn item_not_found(message: &str) -> LibraryError {
        LibraryError::ItemNotFound { message: message.to_string() }
    }

    pub fn already_borrowed(message: &str) -> LibraryError {
        LibraryError::AlreadyBorrowed { message: message.to_string() }
    }

    pub fn loan_limit_reached(message: &str) -> LibraryError {
        LibraryError::LoanLimitReached { message: message.to_string() }
    }

    pub fn already_checked_out(message: &str) -> LibraryError {
        LibraryError::AlreadyCheckedOut { message: message.to_string() }
    }

    pub fn held_by_another(message: &str) -> LibraryError {
        LibraryError::HeldByAnother { message: message.to_string() }
    }

    pub fn not_on_loan_by_you(message: &str) -> LibraryError {
        LibraryError::NotOnLoanByYou { message: message.to_string() }
    }

    pub fn not_eligible_for_hold(message: &str) -> LibraryError {
        LibraryError::NotEligibleForHold { message: message.to_string() }
    }

    pub fn cannot_hold_own_loan(message: &str) -> LibraryError {
        LibraryError::CannotHoldOwnLoan { message: message.to_string() }
    }

    pub fn duplicate_hold(message: &str) -> LibraryError {
        LibraryError::DuplicateHold { message: message.to_string() }
    }

    pub fn no_hold_to_cancel(message: &str) -> LibraryError {
        LibraryError::NoHoldToCancel { message: message.to_string() }
    }

    pub fn persistence(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Persistence { message: message.to_string(), reason_code, retryable }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn message(&self) -> &str {
        match self {
            LibraryError::NoPatron { message } => { message.as_str() }
            LibraryError::ItemNotFound { message } => { message.as_str() }
            LibraryError::AlreadyBorrowed { message } => { message.as_str() }
            LibraryError::LoanLimitReached { message } => { message.as_str() }
            LibraryError::AlreadyCheckedOut { message } => { message.as_str() }
            LibraryError::HeldByAnother { message } => { message.as_str() }
            LibraryError::NotOnLoanByYou { message } => { message.as_str() }
            LibraryError::NotEligibleForHold { message } => { message.as_str() }
            LibraryError::CannotHoldOwnLoan { message } => { message.as_str() }
            LibraryError::DuplicateHold { message } => { message.as_str() }
            LibraryError::NoHoldToCancel { message } => { message.as_str() }
            LibraryError::Persistence { message, .. } => { message.as_str() }
            LibraryError::Validation { message, .. } => { message.as_str() }
            LibraryError::Serialization { message } => { message.as_str() }
            LibraryError::Runtime { message, .. } => { message.as_str() }
        }
    }

    // stable code reported to callers next to the human readable message
    pub fn reason_code(&self) -> &'static str {
        match self {
            LibraryError::NoPatron { .. } => { "NoPatron" }
            LibraryError::ItemNotFound { .. } => { "ItemNotFound" }
            LibraryError::AlreadyBorrowed { .. } => { "AlreadyBorrowed" }
            LibraryError::LoanLimitReached { .. } => { "LoanLimitReached" }
            LibraryError::AlreadyCheckedOut { .. } => { "AlreadyCheckedOut" }
            LibraryError::HeldByAnother { .. } => { "HeldByAnother" }
            LibraryError::NotOnLoanByYou { .. } => { "NotOnLoanByYou" }
            LibraryError::NotEligibleForHold { .. } => { "NotEligibleForHold" }
            LibraryError::CannotHoldOwnLoan { .. } => { "CannotHoldOwnLoan" }
            LibraryError::DuplicateHold { .. } => { "DuplicateHold" }
            LibraryError::NoHoldToCancel { .. } => { "NoHoldToCancel" }
            LibraryError::Persistence { .. } => { "PersistenceError" }
            LibraryError::Validation { .. } => { "Validation" }
            LibraryError::Serialization { .. } => { "Serialization" }
            LibraryError::Runtime { .. } => { "Runtime" }
        }
    }

    pub fn is_rule_violation(&self) -> bool {
        !matches!(self, LibraryError::Persistence { .. } | LibraryError::Validation { .. }
            | LibraryError::Serialization { .. } | LibraryError::Runtime { .. })
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Persistence { retryable, .. } => { *retryable }
            _ => { false }
        }
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Persistence { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            other => {
                write!(f, "{}", other.message())
            }
        }
    }
}

/// A specialized Result type for lending operations and the store.
pub type LibraryResult<T> = Result<T, LibraryError>;

// ActionResult is the uniform outcome handed to front ends: a success flag, a message that is
// safe to show to a patron and, for failures, the reason code of the rejected rule.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub ok: bool,
    pub message: String,
    pub reason_code: Option<String>,
}

impl ActionResult {
    pub fn ok(message: &str) -> Self {
        Self {
            ok: true,
            message: message.to_string(),
            reason_code: None,
        }
    }

    pub fn failed(err: &LibraryError) -> Self {
        Self {
            ok: false,
            message: err.message().to_string(),
            reason_code: Some(err.reason_code().to_string()),
        }
    }
}

// Describe yields the informational message of a successful action.
pub trait Describe {
    fn describe(&self) -> String;
}

impl<T: Describe> From<LibraryResult<T>> for ActionResult {
    fn from(res: LibraryResult<T>) -> Self {
        match res {
            Ok(val) => ActionResult::ok(val.describe().as_str()),
            Err(err) => ActionResult::failed(&err),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum ItemStatus {
    Available,
    CheckedOut,
    OnHold,
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ItemStatus::Available => write!(f, "Available"),
            ItemStatus::CheckedOut => write!(f, "CheckedOut"),
            ItemStatus::OnHold => write!(f, "OnHold"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum ItemCondition {
    New,
    Standard,
    Worn,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Role {
    Patron,
    Librarian,
    Admin,
    Invalid,
}
