use tracing::info;
use uuid::Uuid;

use warden_domain::role::primary_role;

use crate::domain::repository::{AccountStore, RoleRegistry};
use crate::domain::types::{Account, AccountFields, AccountWithRoles};
use crate::error::AccountsError;
use crate::usecase::shared::{create_with_role, ensure_role};

// ── List ──────────────────────────────────────────────────────────────────────

pub struct ListAccountsUseCase<A>
where
    A: AccountStore,
{
    pub accounts: A,
}

impl<A> ListAccountsUseCase<A>
where
    A: AccountStore,
{
    pub async fn execute(&self) -> Result<Vec<AccountWithRoles>, AccountsError> {
        let accounts = self.accounts.list().await?;
        let mut out = Vec::with_capacity(accounts.len());
        for account in accounts {
            let roles = self.accounts.roles_of(account.id).await?;
            out.push(AccountWithRoles { account, roles });
        }
        Ok(out)
    }
}

// ── Create ────────────────────────────────────────────────────────────────────

pub struct CreateAccountInput {
    pub fields: AccountFields,
    pub password: String,
    pub role: String,
}

pub struct CreateAccountUseCase<A, R>
where
    A: AccountStore,
    R: RoleRegistry,
{
    pub accounts: A,
    pub roles: R,
}

impl<A, R> CreateAccountUseCase<A, R>
where
    A: AccountStore,
    R: RoleRegistry,
{
    pub async fn execute(&self, input: CreateAccountInput) -> Result<Account, AccountsError> {
        let account = create_with_role(
            &self.accounts,
            &self.roles,
            input.fields,
            &input.password,
            &input.role,
        )
        .await?;
        info!(account_id = %account.id, role = %input.role, "account created by admin");
        Ok(account)
    }
}

// ── Get for edit ──────────────────────────────────────────────────────────────

/// Current profile and the single role shown on the edit form.
#[derive(Debug, Clone)]
pub struct AccountForEdit {
    pub account: Account,
    pub role: String,
}

pub struct GetAccountForEditUseCase<A>
where
    A: AccountStore,
{
    pub accounts: A,
}

impl<A> GetAccountForEditUseCase<A>
where
    A: AccountStore,
{
    pub async fn execute(&self, id: Uuid) -> Result<AccountForEdit, AccountsError> {
        let account = self
            .accounts
            .find_by_id(id)
            .await?
            .ok_or(AccountsError::NotFound)?;
        let roles = self.accounts.roles_of(id).await?;
        Ok(AccountForEdit {
            account,
            role: primary_role(&roles).to_owned(),
        })
    }
}

// ── Update ────────────────────────────────────────────────────────────────────

pub struct UpdateAccountInput {
    pub id: Uuid,
    pub fields: AccountFields,
    pub role: String,
}

pub struct UpdateAccountUseCase<A, R>
where
    A: AccountStore,
    R: RoleRegistry,
{
    pub accounts: A,
    pub roles: R,
}

impl<A, R> UpdateAccountUseCase<A, R>
where
    A: AccountStore,
    R: RoleRegistry,
{
    pub async fn execute(&self, input: UpdateAccountInput) -> Result<AccountWithRoles, AccountsError> {
        let mut account = self
            .accounts
            .find_by_id(input.id)
            .await?
            .ok_or(AccountsError::NotFound)?;

        // Email and username stay unique across accounts.
        if let Some(other) = self.accounts.find_by_email(&input.fields.email).await? {
            if other.id != account.id {
                return Err(AccountsError::DuplicateEmail);
            }
        }
        if let Some(other) = self.accounts.find_by_username(&input.fields.username).await? {
            if other.id != account.id {
                return Err(AccountsError::DuplicateUsername);
            }
        }

        account.apply(input.fields);
        self.accounts.update(&account).await?;

        // One role per account: clear, then assign. The role exists before
        // the old ones are dropped.
        ensure_role(&self.roles, &input.role).await?;
        let current = self.accounts.roles_of(account.id).await?;
        self.accounts.remove_from_roles(account.id, &current).await?;
        self.accounts.add_to_role(account.id, &input.role).await?;

        let roles = self.accounts.roles_of(account.id).await?;
        info!(account_id = %account.id, role = %input.role, "account updated");
        Ok(AccountWithRoles { account, roles })
    }
}

// ── Delete ────────────────────────────────────────────────────────────────────

pub struct DeleteAccountUseCase<A>
where
    A: AccountStore,
{
    pub accounts: A,
}

impl<A> DeleteAccountUseCase<A>
where
    A: AccountStore,
{
    pub async fn execute(&self, id: Uuid) -> Result<(), AccountsError> {
        self.accounts
            .find_by_id(id)
            .await?
            .ok_or(AccountsError::NotFound)?;
        // A concurrent delete may win between the lookup and here.
        if !self.accounts.delete(id).await? {
            return Err(AccountsError::NotFound);
        }
        info!(account_id = %id, "account deleted");
        Ok(())
    }
}
