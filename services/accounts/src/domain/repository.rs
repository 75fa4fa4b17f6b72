#![allow(async_fn_in_trait)]

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::types::{
    Account, CallbackParams, ExternalIdentity, ExternalLogin, PendingHandshake,
};
use crate::error::AccountsError;

/// Credential store: accounts, role memberships and external-login links.
///
/// Username and email uniqueness is enforced here. `create` and `update`
/// report a collision as `DuplicateUsername` / `DuplicateEmail` even when a
/// prior lookup found nothing.
pub trait AccountStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountsError>;

    /// Case-insensitive.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountsError>;

    /// Case-insensitive.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountsError>;

    /// All accounts, oldest first.
    async fn list(&self) -> Result<Vec<Account>, AccountsError>;

    /// Persist a new account. With `Some(password)` the password is checked
    /// against the policy and hashed; `None` creates an account that can only
    /// sign in through an external provider.
    async fn create(&self, account: &Account, password: Option<&str>)
    -> Result<(), AccountsError>;

    /// Overwrite the profile of an existing account. `NotFound` if it is gone.
    async fn update(&self, account: &Account) -> Result<(), AccountsError>;

    /// Delete an account with its roles and links. Returns `false` if no
    /// account had this id.
    async fn delete(&self, id: Uuid) -> Result<bool, AccountsError>;

    /// `false` for a wrong password and for accounts without a password.
    /// With `None` (no such account) a check of the same cost still runs and
    /// the answer is `false`, so response time does not reveal which
    /// usernames exist.
    async fn verify_password(
        &self,
        account: Option<&Account>,
        password: &str,
    ) -> Result<bool, AccountsError>;

    /// Role names of an account, sorted by name.
    async fn roles_of(&self, account_id: Uuid) -> Result<Vec<String>, AccountsError>;

    /// Idempotent. The role must already exist.
    async fn add_to_role(&self, account_id: Uuid, role: &str) -> Result<(), AccountsError>;

    async fn remove_from_roles(
        &self,
        account_id: Uuid,
        roles: &[String],
    ) -> Result<(), AccountsError>;

    async fn find_by_external_login(
        &self,
        provider: &str,
        provider_key: &str,
    ) -> Result<Option<Account>, AccountsError>;

    async fn add_external_login(&self, login: &ExternalLogin) -> Result<(), AccountsError>;

    async fn external_logins(&self, account_id: Uuid)
    -> Result<Vec<ExternalLogin>, AccountsError>;
}

/// Named roles.
pub trait RoleRegistry: Send + Sync {
    async fn role_exists(&self, name: &str) -> Result<bool, AccountsError>;

    /// Insert-or-ignore.
    async fn create_role(&self, name: &str) -> Result<(), AccountsError>;
}

/// Client side of an external OAuth/OIDC sign-in.
pub trait IdentityProvider: Send + Sync {
    /// Provider name as submitted by the login form, e.g. `"Google"`.
    fn name(&self) -> &str;

    /// URL to send the browser to, and the secrets to keep until the callback.
    fn authorization_redirect(&self) -> Result<(String, PendingHandshake), AccountsError>;

    /// Verify the callback against the pending handshake. `None` when the
    /// handshake did not complete: consent denied, state mismatch, or a failed
    /// token exchange or ID token check.
    async fn complete_callback(
        &self,
        params: &CallbackParams,
        pending: &PendingHandshake,
    ) -> Option<ExternalIdentity>;
}

impl<T: IdentityProvider> IdentityProvider for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn authorization_redirect(&self) -> Result<(String, PendingHandshake), AccountsError> {
        (**self).authorization_redirect()
    }

    async fn complete_callback(
        &self,
        params: &CallbackParams,
        pending: &PendingHandshake,
    ) -> Option<ExternalIdentity> {
        (**self).complete_callback(params, pending).await
    }
}
