pub mod catalogue;
pub mod core;
pub mod holds;
pub mod library;
pub mod loans;
pub mod patrons;
pub mod store;
pub mod utils;
