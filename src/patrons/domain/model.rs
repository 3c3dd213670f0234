use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::Role;
use crate::patrons::Member;

// PatronEntity abstracts a library member that borrows and holds items. Loans and holds
// reference catalogue items by identifier.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct PatronEntity {
    pub name: String,
    #[serde(default)]
    pub active_loans: Vec<String>,
    #[serde(default)]
    pub active_holds: Vec<String>,
    pub outstanding_fines: f64,
}

impl PatronEntity {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            active_loans: vec![],
            active_holds: vec![],
            outstanding_fines: 0.0,
        }
    }

    pub fn has_loan(&self, item_id: &str) -> bool {
        self.active_loans.iter().any(|id| id == item_id)
    }

    pub fn has_hold(&self, item_id: &str) -> bool {
        self.active_holds.iter().any(|id| id == item_id)
    }
}

impl Identifiable for PatronEntity {
    fn id(&self) -> String {
        self.name.to_string()
    }

    fn version(&self) -> i64 {
        0
    }
}

impl Member for PatronEntity {
    fn role(&self) -> Role {
        Role::Patron
    }
}

// StaffEntity is a librarian or an administrator, staff never borrow.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct StaffEntity {
    pub name: String,
    pub role: Role,
}

impl StaffEntity {
    pub fn new(name: &str, role: Role) -> Self {
        Self {
            name: name.to_string(),
            role,
        }
    }
}

impl Identifiable for StaffEntity {
    fn id(&self) -> String {
        self.name.to_string()
    }

    fn version(&self) -> i64 {
        0
    }
}

impl Member for StaffEntity {
    fn role(&self) -> Role {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use crate::core::library::Role;
    use crate::patrons::domain::model::{PatronEntity, StaffEntity};
    use crate::patrons::Member;

    #[tokio::test]
    async fn test_should_build_patron() {
        let mut patron = PatronEntity::new("michel");
        assert_eq!(Role::Patron, patron.role());
        assert_eq!(0.0, patron.outstanding_fines);
        patron.active_loans.push("item1".to_string());
        assert!(patron.has_loan("item1"));
        assert!(!patron.has_hold("item1"));
    }

    #[tokio::test]
    async fn test_should_build_staff() {
        let staff = StaffEntity::new("lauren", Role::Librarian);
        assert!(staff.is_role(Role::Librarian));
        assert!(!staff.is_role(Role::Patron));
    }
}
