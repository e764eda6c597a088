mod helpers;

mod accounts;
mod authentication;
mod credentials;
mod registration;
