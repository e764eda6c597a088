pub mod authenticate;
pub mod change_password;
pub mod credential_queries;
pub mod delete_account;
pub mod get_account;
pub mod register;
pub mod unlock;
pub mod update_account;

#[cfg(test)]
pub(crate) mod test_support;
