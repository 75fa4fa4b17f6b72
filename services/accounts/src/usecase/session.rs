use tracing::info;

use warden_session::identity::SessionIdentity;

use crate::domain::repository::AccountStore;
use crate::error::AccountsError;

/// Re-checks a session against the store on every guarded request. Role
/// changes and deletions take effect at once instead of when the token
/// expires.
pub struct AuthorizeSessionUseCase<A>
where
    A: AccountStore,
{
    pub accounts: A,
}

impl<A> AuthorizeSessionUseCase<A>
where
    A: AccountStore,
{
    /// Returns the identity with the account's current username and roles.
    /// `Unauthorized` if the account is gone, `Forbidden` if it holds none of
    /// `allowed`.
    pub async fn execute(
        &self,
        identity: SessionIdentity,
        allowed: &[&str],
    ) -> Result<SessionIdentity, AccountsError> {
        let Some(account) = self.accounts.find_by_id(identity.account_id).await? else {
            info!(account_id = %identity.account_id, "session for deleted account");
            return Err(AccountsError::Unauthorized);
        };
        let current = SessionIdentity {
            account_id: account.id,
            username: account.username,
            roles: self.accounts.roles_of(account.id).await?,
        };
        current.require_any_role(allowed)?;
        Ok(current)
    }
}
