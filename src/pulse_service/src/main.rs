use pulse_adapters::{
    Argon2PasswordHasher, InMemoryAccountStore, InMemoryCredentialStore, PostgresAccountStore,
    PostgresCredentialStore, Settings, SystemClock, TokenIssuer,
};
use pulse_axum::AppState;
use pulse_service::{RegistrationService, configure_postgres, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let settings = Settings::load()?;
    let tokens = TokenIssuer::new(settings.jwt.jwt_config());
    let lockout = settings.lockout.policy();

    let listener = tokio::net::TcpListener::bind(&settings.listen.address).await?;

    // Without a database section the service runs on volatile in-memory
    // stores, which is enough for local exploration.
    match &settings.database {
        Some(database) => {
            let pool = configure_postgres(database).await?;
            let state = AppState {
                accounts: PostgresAccountStore::new(pool.clone()),
                credentials: PostgresCredentialStore::new(pool),
                hasher: Argon2PasswordHasher::new(),
                clock: SystemClock,
                tokens,
                lockout,
            };
            RegistrationService::new(state)
                .run_standalone(listener, None)
                .await?;
        }
        None => {
            tracing::warn!("no database configured, using in-memory stores");
            let state = AppState {
                accounts: InMemoryAccountStore::new(),
                credentials: InMemoryCredentialStore::new(),
                hasher: Argon2PasswordHasher::new(),
                clock: SystemClock,
                tokens,
                lockout,
            };
            RegistrationService::new(state)
                .run_standalone(listener, None)
                .await?;
        }
    }

    Ok(())
}
