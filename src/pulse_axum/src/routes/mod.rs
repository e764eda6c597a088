pub mod accounts;
pub mod credentials;
pub mod login;
pub mod register;

pub use accounts::{delete_account, get_account, list_accounts, update_account};
pub use credentials::{change_password, get_credential, get_credential_by_tax_id, unlock};
pub use login::login;
pub use register::register;
