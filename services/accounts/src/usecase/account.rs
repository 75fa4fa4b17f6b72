use tracing::info;

use warden_session::SessionConfig;

use crate::domain::repository::{AccountStore, RoleRegistry};
use crate::domain::types::AccountFields;
use crate::error::AccountsError;
use crate::usecase::shared::{SignedIn, create_with_role, sign_in};

// ── Register ──────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub fields: AccountFields,
    pub password: String,
    pub role: String,
}

pub struct RegisterUseCase<A, R>
where
    A: AccountStore,
    R: RoleRegistry,
{
    pub accounts: A,
    pub roles: R,
    pub session: SessionConfig,
}

impl<A, R> RegisterUseCase<A, R>
where
    A: AccountStore,
    R: RoleRegistry,
{
    pub async fn execute(&self, input: RegisterInput) -> Result<SignedIn, AccountsError> {
        let account = create_with_role(
            &self.accounts,
            &self.roles,
            input.fields,
            &input.password,
            &input.role,
        )
        .await?;
        info!(account_id = %account.id, role = %input.role, "account registered");

        let roles = self.accounts.roles_of(account.id).await?;
        sign_in(account, roles, false, &self.session)
    }
}

// ── Login ─────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
    pub remember_me: bool,
}

pub struct LoginUseCase<A>
where
    A: AccountStore,
{
    pub accounts: A,
    pub session: SessionConfig,
}

impl<A> LoginUseCase<A>
where
    A: AccountStore,
{
    pub async fn execute(&self, input: LoginInput) -> Result<SignedIn, AccountsError> {
        // Unknown usernames and wrong passwords fail identically, and both
        // go through a password check.
        let account = self.accounts.find_by_username(&input.username).await?;
        let verified = self
            .accounts
            .verify_password(account.as_ref(), &input.password)
            .await?;
        let account = match account {
            Some(account) if verified => account,
            _ => return Err(AccountsError::InvalidCredentials),
        };

        let roles = self.accounts.roles_of(account.id).await?;
        sign_in(account, roles, input.remember_me, &self.session)
    }
}
