use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use warden_core::health::{healthz, readiness};
use warden_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    account::{login, logout, register},
    admin::{create_account, delete_account, get_account, list_accounts, update_account},
    external::{external_login, external_login_callback},
    user::get_profile,
};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    readiness(state.db.ping().await)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Account workflow
        .route("/account/register", post(register))
        .route("/account/login", post(login))
        .route("/account/logout", post(logout))
        .route("/account/external-login", post(external_login))
        .route(
            "/account/external-login/callback",
            get(external_login_callback),
        )
        // User area
        .route("/user", get(get_profile))
        // Admin area
        .route("/admin/users", get(list_accounts).post(create_account))
        .route("/admin/users/{id}", get(get_account).post(update_account))
        .route("/admin/users/{id}/delete", post(delete_account))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
        .with_state(state)
}
