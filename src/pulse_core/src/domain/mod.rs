pub mod address;
pub mod credential;
pub mod password;
pub mod role;
pub mod tax_id;
pub mod user_account;
pub mod validation;
