use std::sync::Arc;

use anyhow::Context as _;
use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use warden_accounts::config::AccountsConfig;
use warden_accounts::infra::oidc::GoogleOidcProvider;
use warden_accounts::infra::password::BcryptHasher;
use warden_accounts::router::build_router;
use warden_accounts::state::AppState;
use warden_accounts::usecase::seed::{SeedInput, SeedUseCase};
use warden_accounts_migration::Migrator;
use warden_core::config::Config;
use warden_core::tracing::init_tracing;
use warden_domain::password::PasswordPolicy;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("warden_accounts=info,tower_http=info,info");

    let config = AccountsConfig::from_env().context("load configuration")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    Migrator::up(&db, None).await.context("apply migrations")?;

    let google = match config.google() {
        Some(settings) => {
            let provider = GoogleOidcProvider::discover(&settings)
                .await
                .context("discover Google OIDC provider")?;
            info!(issuer = %settings.issuer_url, "Google sign-in enabled");
            Some(Arc::new(provider))
        }
        None => {
            info!("Google sign-in disabled");
            None
        }
    };

    let hasher = BcryptHasher::new(config.bcrypt_cost)
        .await
        .context("prepare password hasher")?;

    let state = AppState {
        db,
        session: config.session_config(),
        google,
        hasher,
        password_policy: PasswordPolicy::default(),
    };

    SeedUseCase {
        accounts: state.account_store(),
        roles: state.role_registry(),
    }
    .execute(SeedInput {
        admin_username: config.seed_admin_username.clone(),
        admin_email: config.seed_admin_email.clone(),
        admin_password: config.seed_admin_password(),
    })
    .await
    .context("seed roles and admin account")?;

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.accounts_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    info!("accounts service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
