use crate::core::domain::Identifiable;
use crate::core::library::Role;

pub mod command;
pub mod controller;
pub mod domain;
pub mod dto;
pub mod factory;

// Member is anyone known to the branch, patrons as well as staff.
pub trait Member: Identifiable {
    fn role(&self) -> Role;

    fn is_role(&self, match_role: Role) -> bool {
        self.role() == match_role
    }
}
