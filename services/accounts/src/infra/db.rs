use anyhow::Context as _;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use warden_accounts_schema::{account_roles, accounts, external_logins, roles};
use warden_domain::account::{normalize_key, validate_username};
use warden_domain::password::PasswordPolicy;
use warden_domain::validation::FieldError;

use crate::domain::repository::{AccountStore, RoleRegistry};
use crate::domain::types::{Account, ExternalLogin};
use crate::error::AccountsError;
use crate::infra::password::BcryptHasher;

// ── Account store ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountStore {
    pub db: DatabaseConnection,
    pub hasher: BcryptHasher,
    pub policy: PasswordPolicy,
}

impl DbAccountStore {
    async fn find_model(&self, id: Uuid) -> Result<Option<accounts::Model>, AccountsError> {
        let model = accounts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find account by id")?;
        Ok(model)
    }
}

impl AccountStore for DbAccountStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountsError> {
        Ok(self.find_model(id).await?.map(account_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountsError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::NormalizedEmail.eq(normalize_key(email)))
            .one(&self.db)
            .await
            .context("find account by email")?;
        Ok(model.map(account_from_model))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountsError> {
        let model = accounts::Entity::find()
            .filter(accounts::Column::NormalizedUsername.eq(normalize_key(username)))
            .one(&self.db)
            .await
            .context("find account by username")?;
        Ok(model.map(account_from_model))
    }

    async fn list(&self) -> Result<Vec<Account>, AccountsError> {
        let models = accounts::Entity::find()
            .order_by_asc(accounts::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list accounts")?;
        Ok(models.into_iter().map(account_from_model).collect())
    }

    async fn create(
        &self,
        account: &Account,
        password: Option<&str>,
    ) -> Result<(), AccountsError> {
        let mut errors = Vec::new();
        if !validate_username(&account.username) {
            errors.push(FieldError::new(
                "username",
                format!(
                    "Username '{}' is invalid, can only contain letters or digits.",
                    account.username
                ),
            ));
        }
        if let Some(password) = password {
            errors.extend(self.policy.check(password));
        }
        if !errors.is_empty() {
            return Err(AccountsError::Validation(errors));
        }

        let password_hash = match password {
            Some(password) => Some(self.hasher.hash(password).await?),
            None => None,
        };

        accounts::ActiveModel {
            id: Set(account.id),
            username: Set(account.username.clone()),
            normalized_username: Set(normalize_key(&account.username)),
            email: Set(account.email.clone()),
            normalized_email: Set(normalize_key(&account.email)),
            first_name: Set(account.first_name.clone()),
            last_name: Set(account.last_name.clone()),
            phone_number: Set(account.phone_number.clone()),
            password_hash: Set(password_hash),
            email_confirmed: Set(account.email_confirmed),
            created_at: Set(account.created_at),
            updated_at: Set(account.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| write_error(e, "create account"))?;
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), AccountsError> {
        if !validate_username(&account.username) {
            return Err(AccountsError::validation(
                "username",
                &format!(
                    "Username '{}' is invalid, can only contain letters or digits.",
                    account.username
                ),
            ));
        }

        accounts::ActiveModel {
            id: Set(account.id),
            username: Set(account.username.clone()),
            normalized_username: Set(normalize_key(&account.username)),
            email: Set(account.email.clone()),
            normalized_email: Set(normalize_key(&account.email)),
            first_name: Set(account.first_name.clone()),
            last_name: Set(account.last_name.clone()),
            phone_number: Set(account.phone_number.clone()),
            updated_at: Set(account.updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => AccountsError::NotFound,
            e => write_error(e, "update account"),
        })?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AccountsError> {
        let deleted = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    external_logins::Entity::delete_many()
                        .filter(external_logins::Column::AccountId.eq(id))
                        .exec(txn)
                        .await?;
                    account_roles::Entity::delete_many()
                        .filter(account_roles::Column::AccountId.eq(id))
                        .exec(txn)
                        .await?;
                    let result = accounts::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .context("delete account")?;
        Ok(deleted)
    }

    async fn verify_password(
        &self,
        account: Option<&Account>,
        password: &str,
    ) -> Result<bool, AccountsError> {
        let hash = match account {
            Some(account) => self
                .find_model(account.id)
                .await?
                .and_then(|model| model.password_hash),
            None => None,
        };
        // Accounts without a password pay for a check like any other miss.
        let verified = match hash {
            Some(hash) => self.hasher.verify(password, &hash).await?,
            None => self.hasher.verify_decoy(password).await?,
        };
        Ok(verified)
    }

    async fn roles_of(&self, account_id: Uuid) -> Result<Vec<String>, AccountsError> {
        let models = account_roles::Entity::find()
            .filter(account_roles::Column::AccountId.eq(account_id))
            .order_by_asc(account_roles::Column::RoleName)
            .all(&self.db)
            .await
            .context("list account roles")?;
        Ok(models.into_iter().map(|m| m.role_name).collect())
    }

    async fn add_to_role(&self, account_id: Uuid, role: &str) -> Result<(), AccountsError> {
        let model = account_roles::ActiveModel {
            account_id: Set(account_id),
            role_name: Set(role.to_owned()),
        };
        let result = account_roles::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    account_roles::Column::AccountId,
                    account_roles::Column::RoleName,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await;
        match result {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(anyhow::Error::new(e).context("add account to role").into()),
        }
    }

    async fn remove_from_roles(
        &self,
        account_id: Uuid,
        roles: &[String],
    ) -> Result<(), AccountsError> {
        if roles.is_empty() {
            return Ok(());
        }
        account_roles::Entity::delete_many()
            .filter(account_roles::Column::AccountId.eq(account_id))
            .filter(account_roles::Column::RoleName.is_in(roles.iter().cloned()))
            .exec(&self.db)
            .await
            .context("remove account from roles")?;
        Ok(())
    }

    async fn find_by_external_login(
        &self,
        provider: &str,
        provider_key: &str,
    ) -> Result<Option<Account>, AccountsError> {
        let link = external_logins::Entity::find_by_id((provider.to_owned(), provider_key.to_owned()))
            .one(&self.db)
            .await
            .context("find external login")?;
        match link {
            Some(link) => self.find_by_id(link.account_id).await,
            None => Ok(None),
        }
    }

    async fn add_external_login(&self, login: &ExternalLogin) -> Result<(), AccountsError> {
        let model = external_logins::ActiveModel {
            provider: Set(login.provider.clone()),
            provider_key: Set(login.provider_key.clone()),
            account_id: Set(login.account_id),
            provider_display_name: Set(login.provider_display_name.clone()),
            created_at: Set(Utc::now()),
        };
        // A concurrent callback for the same identity may have linked first;
        // the primary key keeps the pair bound to a single account.
        let result = external_logins::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([
                    external_logins::Column::Provider,
                    external_logins::Column::ProviderKey,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await;
        match result {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(anyhow::Error::new(e).context("add external login").into()),
        }
    }

    async fn external_logins(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<ExternalLogin>, AccountsError> {
        let models = external_logins::Entity::find()
            .filter(external_logins::Column::AccountId.eq(account_id))
            .order_by_asc(external_logins::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list external logins")?;
        Ok(models.into_iter().map(external_login_from_model).collect())
    }
}

/// Map an insert/update failure, turning unique-index violations into the
/// matching duplicate error.
fn write_error(err: DbErr, context: &'static str) -> AccountsError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        if detail.contains("normalized_username") {
            return AccountsError::DuplicateUsername;
        }
        if detail.contains("normalized_email") {
            return AccountsError::DuplicateEmail;
        }
    }
    AccountsError::Internal(anyhow::Error::new(err).context(context))
}

fn account_from_model(model: accounts::Model) -> Account {
    Account {
        id: model.id,
        username: model.username,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        phone_number: model.phone_number,
        email_confirmed: model.email_confirmed,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn external_login_from_model(model: external_logins::Model) -> ExternalLogin {
    ExternalLogin {
        provider: model.provider,
        provider_key: model.provider_key,
        account_id: model.account_id,
        provider_display_name: model.provider_display_name,
    }
}

// ── Role registry ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRoleRegistry {
    pub db: DatabaseConnection,
}

impl RoleRegistry for DbRoleRegistry {
    async fn role_exists(&self, name: &str) -> Result<bool, AccountsError> {
        let model = roles::Entity::find_by_id(name.to_owned())
            .one(&self.db)
            .await
            .context("find role")?;
        Ok(model.is_some())
    }

    async fn create_role(&self, name: &str) -> Result<(), AccountsError> {
        let model = roles::ActiveModel {
            name: Set(name.to_owned()),
            created_at: Set(Utc::now()),
        };
        let result = roles::Entity::insert(model)
            .on_conflict(
                OnConflict::column(roles::Column::Name)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await;
        match result {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(anyhow::Error::new(e).context("create role").into()),
        }
    }
}
