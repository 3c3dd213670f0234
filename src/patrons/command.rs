pub mod get_account_cmd;
pub mod login_cmd;
pub mod update_fines_cmd;
