use tracing::{info, warn};

use warden_domain::account::split_display_name;
use warden_domain::role::USER_ROLE;
use warden_session::SessionConfig;

use crate::domain::repository::{AccountStore, IdentityProvider, RoleRegistry};
use crate::domain::types::{
    Account, AccountFields, CallbackParams, ExternalIdentity, ExternalLogin, PendingHandshake,
};
use crate::error::AccountsError;
use crate::usecase::shared::{SignedIn, ensure_role, sign_in};

// ── Start ─────────────────────────────────────────────────────────────────────

pub struct ExternalLoginStartUseCase<P>
where
    P: IdentityProvider,
{
    /// `None` when no provider is configured.
    pub provider: Option<P>,
}

impl<P> ExternalLoginStartUseCase<P>
where
    P: IdentityProvider,
{
    /// Returns the provider URL to redirect to and the handshake to keep.
    pub fn execute(&self, provider_name: &str) -> Result<(String, PendingHandshake), AccountsError> {
        let provider = self
            .provider
            .as_ref()
            .filter(|p| p.name().eq_ignore_ascii_case(provider_name))
            .ok_or_else(|| {
                warn!(provider = provider_name, "unknown external login provider");
                AccountsError::ExternalAuthFailed
            })?;
        provider.authorization_redirect()
    }
}

// ── Callback ──────────────────────────────────────────────────────────────────

pub struct ExternalCallbackInput {
    pub params: CallbackParams,
    /// Handshake recovered from the browser; `None` if missing or tampered.
    pub pending: Option<PendingHandshake>,
}

pub struct ExternalLoginCallbackUseCase<A, R, P>
where
    A: AccountStore,
    R: RoleRegistry,
    P: IdentityProvider,
{
    pub accounts: A,
    pub roles: R,
    pub provider: Option<P>,
    pub session: SessionConfig,
}

impl<A, R, P> ExternalLoginCallbackUseCase<A, R, P>
where
    A: AccountStore,
    R: RoleRegistry,
    P: IdentityProvider,
{
    pub async fn execute(&self, input: ExternalCallbackInput) -> Result<SignedIn, AccountsError> {
        let pending = input.pending.ok_or(AccountsError::ExternalAuthFailed)?;
        let provider = self
            .provider
            .as_ref()
            .filter(|p| p.name() == pending.provider)
            .ok_or(AccountsError::ExternalAuthFailed)?;
        let identity = provider
            .complete_callback(&input.params, &pending)
            .await
            .ok_or(AccountsError::ExternalAuthFailed)?;

        let linked = self
            .accounts
            .find_by_external_login(&identity.provider, &identity.provider_key)
            .await?;
        let account = match linked {
            Some(account) => account,
            None => self.link_by_email(&identity).await?,
        };

        let roles = self.accounts.roles_of(account.id).await?;
        sign_in(account, roles, false, &self.session)
    }

    /// Resolve an identity without a link through its email, creating the
    /// account on first sign-in, then record the link.
    async fn link_by_email(&self, identity: &ExternalIdentity) -> Result<Account, AccountsError> {
        let email = identity
            .email
            .as_deref()
            .filter(|e| !e.is_empty())
            .ok_or_else(|| {
                warn!(provider = %identity.provider, "external identity has no email claim");
                AccountsError::ExternalAuthFailed
            })?;

        let account = match self.accounts.find_by_email(email).await? {
            Some(account) => account,
            None => self.create_account(identity, email).await?,
        };

        let already_linked = self
            .accounts
            .external_logins(account.id)
            .await?
            .iter()
            .any(|l| l.provider == identity.provider && l.provider_key == identity.provider_key);
        if !already_linked {
            self.accounts
                .add_external_login(&ExternalLogin {
                    provider: identity.provider.clone(),
                    provider_key: identity.provider_key.clone(),
                    account_id: account.id,
                    provider_display_name: Some(identity.provider.clone()),
                })
                .await?;
            info!(account_id = %account.id, provider = %identity.provider, "external login linked");
        }
        Ok(account)
    }

    async fn create_account(
        &self,
        identity: &ExternalIdentity,
        email: &str,
    ) -> Result<Account, AccountsError> {
        let (first_name, last_name) =
            split_display_name(identity.display_name.as_deref().unwrap_or_default());
        let account = Account::new(AccountFields {
            username: email.to_owned(),
            email: email.to_owned(),
            first_name,
            last_name,
            phone_number: None,
        });

        match self.accounts.create(&account, None).await {
            Ok(()) => {}
            Err(
                e @ (AccountsError::Validation(_)
                | AccountsError::DuplicateEmail
                | AccountsError::DuplicateUsername),
            ) => {
                warn!(kind = e.kind(), "external account creation rejected");
                return Err(AccountsError::AccountCreationFailed);
            }
            Err(e) => return Err(e),
        }

        ensure_role(&self.roles, USER_ROLE).await?;
        self.accounts.add_to_role(account.id, USER_ROLE).await?;
        info!(account_id = %account.id, provider = %identity.provider, "account created from external login");
        Ok(account)
    }
}
