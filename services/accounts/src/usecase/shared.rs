use anyhow::Context as _;
use tracing::info;

use warden_domain::role::RedirectTarget;
use warden_session::SessionConfig;
use warden_session::token::issue_session_token;

use crate::domain::repository::{AccountStore, RoleRegistry};
use crate::domain::types::{Account, AccountFields};
use crate::error::AccountsError;

/// Outcome of a successful sign-in: the session token to set and where to
/// send the browser.
#[derive(Debug)]
pub struct SignedIn {
    pub account: Account,
    pub roles: Vec<String>,
    pub token: String,
    pub expires_at: u64,
    /// Persistent sessions survive a browser restart.
    pub persistent: bool,
    pub target: RedirectTarget,
}

pub(crate) fn sign_in(
    account: Account,
    roles: Vec<String>,
    persistent: bool,
    session: &SessionConfig,
) -> Result<SignedIn, AccountsError> {
    let (token, expires_at) = issue_session_token(
        account.id,
        &account.username,
        &roles,
        session.lifetime_secs,
        &session.secret,
    )
    .context("issue session token")?;
    let target = RedirectTarget::for_roles(&roles);
    Ok(SignedIn {
        account,
        roles,
        token,
        expires_at,
        persistent,
        target,
    })
}

pub(crate) async fn ensure_role<R: RoleRegistry>(
    registry: &R,
    name: &str,
) -> Result<(), AccountsError> {
    if !registry.role_exists(name).await? {
        registry.create_role(name).await?;
        info!(role = name, "created role");
    }
    Ok(())
}

/// Create a password account holding `role`. Shared by self-registration and
/// admin creation.
pub(crate) async fn create_with_role<A, R>(
    accounts: &A,
    registry: &R,
    fields: AccountFields,
    password: &str,
    role: &str,
) -> Result<Account, AccountsError>
where
    A: AccountStore,
    R: RoleRegistry,
{
    if accounts.find_by_email(&fields.email).await?.is_some() {
        return Err(AccountsError::DuplicateEmail);
    }
    if accounts.find_by_username(&fields.username).await?.is_some() {
        return Err(AccountsError::DuplicateUsername);
    }

    ensure_role(registry, role).await?;

    let account = Account::new(fields);
    accounts.create(&account, Some(password)).await?;
    accounts.add_to_role(account.id, role).await?;
    Ok(account)
}
