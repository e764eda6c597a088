pub mod use_cases;

pub use use_cases::{
    authenticate::{
        AuthenticateUseCase, AuthenticatedAccount, AuthenticationError, MAX_CONFLICT_RETRIES,
    },
    change_password::{ChangePasswordError, ChangePasswordUseCase},
    credential_queries::{CredentialQueryError, CredentialQueryUseCase, CredentialSummary},
    delete_account::{DeleteAccountError, DeleteAccountUseCase},
    get_account::{AccountQueryError, GetAccountUseCase},
    register::{NewAccount, NewAddress, RegisterError, RegisterUseCase},
    unlock::{UnlockError, UnlockUseCase},
    update_account::{AccountUpdateRequest, UpdateAccountError, UpdateAccountUseCase},
};
