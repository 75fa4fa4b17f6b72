use tracing::{info, warn};

use warden_domain::role::{ADMIN_ROLE, BUILTIN_ROLES};

use crate::domain::repository::{AccountStore, RoleRegistry};
use crate::domain::types::{Account, AccountFields};
use crate::error::AccountsError;
use crate::usecase::shared::ensure_role;

pub struct SeedInput {
    pub admin_username: String,
    pub admin_email: String,
    /// No admin account is created without one.
    pub admin_password: Option<String>,
}

/// Startup seeding: built-in roles and the initial admin account.
pub struct SeedUseCase<A, R>
where
    A: AccountStore,
    R: RoleRegistry,
{
    pub accounts: A,
    pub roles: R,
}

impl<A, R> SeedUseCase<A, R>
where
    A: AccountStore,
    R: RoleRegistry,
{
    /// Returns the admin account if one was created by this run.
    pub async fn execute(&self, input: SeedInput) -> Result<Option<Account>, AccountsError> {
        for role in BUILTIN_ROLES {
            ensure_role(&self.roles, role).await?;
        }

        let Some(password) = input.admin_password else {
            info!("SEED_ADMIN_PASSWORD not set, admin account not seeded");
            return Ok(None);
        };
        if self
            .accounts
            .find_by_email(&input.admin_email)
            .await?
            .is_some()
        {
            return Ok(None);
        }

        let mut admin = Account::new(AccountFields {
            username: input.admin_username,
            email: input.admin_email,
            first_name: String::new(),
            last_name: String::new(),
            phone_number: None,
        });
        admin.email_confirmed = true;

        match self.accounts.create(&admin, Some(&password)).await {
            Ok(()) => {}
            Err(AccountsError::Validation(errors)) => {
                warn!(?errors, "seed admin account rejected");
                return Ok(None);
            }
            // Another instance seeded first.
            Err(AccountsError::DuplicateEmail | AccountsError::DuplicateUsername) => {
                return Ok(None);
            }
            Err(e) => return Err(e),
        }
        self.accounts.add_to_role(admin.id, ADMIN_ROLE).await?;
        info!(account_id = %admin.id, "admin account seeded");
        Ok(Some(admin))
    }
}
