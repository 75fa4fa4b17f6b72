use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use warden_accounts::domain::repository::{AccountStore, IdentityProvider, RoleRegistry};
use warden_accounts::domain::types::{
    Account, AccountFields, CallbackParams, ExternalIdentity, ExternalLogin, PendingHandshake,
};
use warden_accounts::error::AccountsError;
use warden_domain::account::{normalize_key, validate_username};
use warden_domain::password::PasswordPolicy;
use warden_domain::validation::FieldError;

pub fn fields(username: &str, email: &str) -> AccountFields {
    AccountFields {
        username: username.to_owned(),
        email: email.to_owned(),
        first_name: "Test".to_owned(),
        last_name: "User".to_owned(),
        phone_number: None,
    }
}

// ── MockAccountStore ─────────────────────────────────────────────────────────

struct StoredAccount {
    account: Account,
    password: Option<String>,
}

#[derive(Default)]
struct StoreData {
    accounts: Vec<StoredAccount>,
    memberships: Vec<(Uuid, String)>,
    links: Vec<ExternalLogin>,
    password_checks: usize,
}

/// In-memory store. Clones share data so tests can inspect it after handing
/// a clone to a use case. Uniqueness is checked under the lock, like the
/// unique indexes of the real store.
#[derive(Clone, Default)]
pub struct MockAccountStore {
    data: Arc<Mutex<StoreData>>,
}

impl MockAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account directly, bypassing the workflow.
    pub fn with_account(self, account: &Account, password: Option<&str>, roles: &[&str]) -> Self {
        {
            let mut data = self.data.lock().unwrap();
            data.accounts.push(StoredAccount {
                account: account.clone(),
                password: password.map(str::to_owned),
            });
            for role in roles {
                data.memberships.push((account.id, role.to_string()));
            }
        }
        self
    }

    pub fn with_link(self, login: ExternalLogin) -> Self {
        self.data.lock().unwrap().links.push(login);
        self
    }

    pub fn account_count(&self) -> usize {
        self.data.lock().unwrap().accounts.len()
    }

    pub fn roles_for(&self, id: Uuid) -> Vec<String> {
        let mut roles: Vec<String> = self
            .data
            .lock()
            .unwrap()
            .memberships
            .iter()
            .filter(|(account_id, _)| *account_id == id)
            .map(|(_, role)| role.clone())
            .collect();
        roles.sort();
        roles
    }

    /// Number of `verify_password` calls so far.
    pub fn password_checks(&self) -> usize {
        self.data.lock().unwrap().password_checks
    }

    pub fn links(&self) -> Vec<ExternalLogin> {
        self.data.lock().unwrap().links.clone()
    }

    pub fn account_by_email(&self, email: &str) -> Option<Account> {
        self.data
            .lock()
            .unwrap()
            .accounts
            .iter()
            .find(|s| normalize_key(&s.account.email) == normalize_key(email))
            .map(|s| s.account.clone())
    }
}

impl AccountStore for MockAccountStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountsError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .accounts
            .iter()
            .find(|s| s.account.id == id)
            .map(|s| s.account.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountsError> {
        Ok(self.account_by_email(email))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountsError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .accounts
            .iter()
            .find(|s| normalize_key(&s.account.username) == normalize_key(username))
            .map(|s| s.account.clone()))
    }

    async fn list(&self) -> Result<Vec<Account>, AccountsError> {
        let data = self.data.lock().unwrap();
        Ok(data.accounts.iter().map(|s| s.account.clone()).collect())
    }

    async fn create(
        &self,
        account: &Account,
        password: Option<&str>,
    ) -> Result<(), AccountsError> {
        // Give concurrent callers a chance to interleave between their
        // lookups and this insert.
        tokio::task::yield_now().await;

        let mut errors = Vec::new();
        if !validate_username(&account.username) {
            errors.push(FieldError::new("username", "invalid username"));
        }
        if let Some(password) = password {
            errors.extend(PasswordPolicy::default().check(password));
        }
        if !errors.is_empty() {
            return Err(AccountsError::Validation(errors));
        }

        let mut data = self.data.lock().unwrap();
        if data
            .accounts
            .iter()
            .any(|s| normalize_key(&s.account.username) == normalize_key(&account.username))
        {
            return Err(AccountsError::DuplicateUsername);
        }
        if data
            .accounts
            .iter()
            .any(|s| normalize_key(&s.account.email) == normalize_key(&account.email))
        {
            return Err(AccountsError::DuplicateEmail);
        }
        data.accounts.push(StoredAccount {
            account: account.clone(),
            password: password.map(str::to_owned),
        });
        Ok(())
    }

    async fn update(&self, account: &Account) -> Result<(), AccountsError> {
        let mut data = self.data.lock().unwrap();
        let stored = data
            .accounts
            .iter_mut()
            .find(|s| s.account.id == account.id)
            .ok_or(AccountsError::NotFound)?;
        stored.account = account.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AccountsError> {
        let mut data = self.data.lock().unwrap();
        let before = data.accounts.len();
        data.accounts.retain(|s| s.account.id != id);
        data.memberships.retain(|(account_id, _)| *account_id != id);
        data.links.retain(|l| l.account_id != id);
        Ok(data.accounts.len() < before)
    }

    async fn verify_password(
        &self,
        account: Option<&Account>,
        password: &str,
    ) -> Result<bool, AccountsError> {
        let mut data = self.data.lock().unwrap();
        data.password_checks += 1;
        let Some(account) = account else {
            return Ok(false);
        };
        Ok(data
            .accounts
            .iter()
            .find(|s| s.account.id == account.id)
            .and_then(|s| s.password.as_deref())
            .is_some_and(|stored| stored == password))
    }

    async fn roles_of(&self, account_id: Uuid) -> Result<Vec<String>, AccountsError> {
        Ok(self.roles_for(account_id))
    }

    async fn add_to_role(&self, account_id: Uuid, role: &str) -> Result<(), AccountsError> {
        let mut data = self.data.lock().unwrap();
        if !data
            .memberships
            .iter()
            .any(|(id, r)| *id == account_id && r == role)
        {
            data.memberships.push((account_id, role.to_owned()));
        }
        Ok(())
    }

    async fn remove_from_roles(
        &self,
        account_id: Uuid,
        roles: &[String],
    ) -> Result<(), AccountsError> {
        let mut data = self.data.lock().unwrap();
        data.memberships
            .retain(|(id, role)| !(*id == account_id && roles.contains(role)));
        Ok(())
    }

    async fn find_by_external_login(
        &self,
        provider: &str,
        provider_key: &str,
    ) -> Result<Option<Account>, AccountsError> {
        let data = self.data.lock().unwrap();
        let Some(link) = data
            .links
            .iter()
            .find(|l| l.provider == provider && l.provider_key == provider_key)
        else {
            return Ok(None);
        };
        Ok(data
            .accounts
            .iter()
            .find(|s| s.account.id == link.account_id)
            .map(|s| s.account.clone()))
    }

    async fn add_external_login(&self, login: &ExternalLogin) -> Result<(), AccountsError> {
        let mut data = self.data.lock().unwrap();
        if !data
            .links
            .iter()
            .any(|l| l.provider == login.provider && l.provider_key == login.provider_key)
        {
            data.links.push(login.clone());
        }
        Ok(())
    }

    async fn external_logins(
        &self,
        account_id: Uuid,
    ) -> Result<Vec<ExternalLogin>, AccountsError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .links
            .iter()
            .filter(|l| l.account_id == account_id)
            .cloned()
            .collect())
    }
}

// ── MockRoleRegistry ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockRoleRegistry {
    roles: Arc<Mutex<BTreeSet<String>>>,
    fail_creates: bool,
}

impl MockRoleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roles(roles: &[&str]) -> Self {
        let registry = Self::default();
        registry
            .roles
            .lock()
            .unwrap()
            .extend(roles.iter().map(|r| r.to_string()));
        registry
    }

    /// Registry whose `create_role` always fails, as on a lost connection.
    pub fn failing_creates(roles: &[&str]) -> Self {
        Self {
            fail_creates: true,
            ..Self::with_roles(roles)
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.roles.lock().unwrap().iter().cloned().collect()
    }
}

impl RoleRegistry for MockRoleRegistry {
    async fn role_exists(&self, name: &str) -> Result<bool, AccountsError> {
        Ok(self.roles.lock().unwrap().contains(name))
    }

    async fn create_role(&self, name: &str) -> Result<(), AccountsError> {
        if self.fail_creates {
            return Err(AccountsError::Internal(anyhow::anyhow!("role insert failed")));
        }
        self.roles.lock().unwrap().insert(name.to_owned());
        Ok(())
    }
}

// ── MockIdentityProvider ─────────────────────────────────────────────────────

pub const CSRF: &str = "csrf-token";

/// Provider named "Google" that completes the handshake with `identity`
/// whenever the callback state matches.
pub struct MockIdentityProvider {
    pub identity: Option<ExternalIdentity>,
}

impl MockIdentityProvider {
    pub fn returning(identity: ExternalIdentity) -> Self {
        Self {
            identity: Some(identity),
        }
    }

    pub fn failing() -> Self {
        Self { identity: None }
    }
}

impl IdentityProvider for MockIdentityProvider {
    fn name(&self) -> &str {
        "Google"
    }

    fn authorization_redirect(&self) -> Result<(String, PendingHandshake), AccountsError> {
        Ok((
            format!("https://accounts.example.test/auth?state={CSRF}"),
            pending(),
        ))
    }

    async fn complete_callback(
        &self,
        params: &CallbackParams,
        pending: &PendingHandshake,
    ) -> Option<ExternalIdentity> {
        if params.state.as_deref() != Some(pending.csrf_token.as_str()) {
            return None;
        }
        self.identity.clone()
    }
}

pub fn pending() -> PendingHandshake {
    PendingHandshake {
        provider: "Google".to_owned(),
        csrf_token: CSRF.to_owned(),
        pkce_verifier: "verifier".to_owned(),
        nonce: "nonce".to_owned(),
    }
}

pub fn callback_params() -> CallbackParams {
    CallbackParams {
        code: Some("auth-code".to_owned()),
        state: Some(CSRF.to_owned()),
        error: None,
    }
}

pub fn google_identity(key: &str, email: Option<&str>, name: Option<&str>) -> ExternalIdentity {
    ExternalIdentity {
        provider: "Google".to_owned(),
        provider_key: key.to_owned(),
        email: email.map(str::to_owned),
        display_name: name.map(str::to_owned),
    }
}
