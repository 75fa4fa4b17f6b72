use serde::Deserialize;

use warden_core::config::Config;
use warden_session::SessionConfig;
use warden_session::cookie::CookieSettings;

/// Accounts service configuration loaded from environment variables.
#[derive(Deserialize)]
pub struct AccountsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret signing session and handshake cookies.
    pub session_secret: String,
    /// TCP port to listen on. Env var: `ACCOUNTS_PORT`.
    #[serde(default = "default_port")]
    pub accounts_port: u16,
    /// Cookie domain attribute; host-only cookies when unset.
    #[serde(default)]
    pub cookie_domain: Option<String>,
    /// Mark cookies `Secure`. Turn off only for plain-http development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,
    #[serde(default = "default_session_lifetime")]
    pub session_lifetime_secs: u64,
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Google sign-in is enabled only when client id, secret and redirect
    /// URI are all set.
    #[serde(default)]
    pub google_client_id: Option<String>,
    #[serde(default)]
    pub google_client_secret: Option<String>,
    #[serde(default)]
    pub google_redirect_uri: Option<String>,
    #[serde(default = "default_google_issuer")]
    pub google_issuer_url: String,
    #[serde(default = "default_admin_username")]
    pub seed_admin_username: String,
    #[serde(default = "default_admin_email")]
    pub seed_admin_email: String,
    /// No admin account is seeded without a password.
    #[serde(default)]
    pub seed_admin_password: Option<String>,
}

impl Config for AccountsConfig {}

/// OIDC client settings for Google.
#[derive(Debug, Clone)]
pub struct GoogleSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub issuer_url: String,
}

fn default_port() -> u16 {
    3114
}

fn default_secure_cookies() -> bool {
    true
}

fn default_session_lifetime() -> u64 {
    // 14 days
    1_209_600
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_google_issuer() -> String {
    "https://accounts.google.com".to_owned()
}

fn default_admin_username() -> String {
    "admin".to_owned()
}

fn default_admin_email() -> String {
    "admin@example.com".to_owned()
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_owned)
}

impl AccountsConfig {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            secret: self.session_secret.clone(),
            lifetime_secs: self.session_lifetime_secs,
            cookie: CookieSettings {
                domain: non_empty(&self.cookie_domain),
                secure: self.secure_cookies,
            },
        }
    }

    pub fn google(&self) -> Option<GoogleSettings> {
        Some(GoogleSettings {
            client_id: non_empty(&self.google_client_id)?,
            client_secret: non_empty(&self.google_client_secret)?,
            redirect_uri: non_empty(&self.google_redirect_uri)?,
            issuer_url: self.google_issuer_url.clone(),
        })
    }

    pub fn seed_admin_password(&self) -> Option<String> {
        non_empty(&self.seed_admin_password)
    }
}
