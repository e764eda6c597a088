use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use pulse_axum::{
    routes::{
        change_password, delete_account, get_account, get_credential, get_credential_by_tax_id,
        list_accounts, login, register, unlock, update_account,
    },
    state::AppState,
};
use pulse_core::{AccountStore, Clock, CredentialStore, PasswordHasher};

use crate::AllowedOrigins;
use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// The registration service router, ready to be mounted or run standalone.
pub struct RegistrationService {
    router: Router,
}

impl RegistrationService {
    pub fn new<A, C, H, K>(state: AppState<A, C, H, K>) -> Self
    where
        A: AccountStore + Clone + 'static,
        C: CredentialStore + Clone + 'static,
        H: PasswordHasher + Clone + 'static,
        K: Clock + Clone + 'static,
    {
        let router = Router::new()
            .route(
                "/accounts",
                post(register::<A, C, H, K>).get(list_accounts::<A, C, H, K>),
            )
            .route(
                "/accounts/{id}",
                get(get_account::<A, C, H, K>)
                    .put(update_account::<A, C, H, K>)
                    .delete(delete_account::<A, C, H, K>),
            )
            .route("/login", post(login::<A, C, H, K>))
            .route("/credentials/{id}", get(get_credential::<A, C, H, K>))
            .route(
                "/credentials/by-tax-id/{tax_id}",
                get(get_credential_by_tax_id::<A, C, H, K>),
            )
            .route(
                "/credentials/{id}/password",
                put(change_password::<A, C, H, K>),
            )
            .route("/credentials/{id}/unlock", post(unlock::<A, C, H, K>))
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert into a router that can be nested into a larger application.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server on the given listener.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Registration service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
