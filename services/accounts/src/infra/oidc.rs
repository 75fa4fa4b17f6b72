//! Google sign-in over OpenID Connect: discovery, PKCE, nonce and CSRF state.

use anyhow::{Context as _, anyhow};
use openidconnect::core::{CoreAuthenticationFlow, CoreClient, CoreProviderMetadata};
use openidconnect::{
    AuthorizationCode, ClientId, ClientSecret, CsrfToken, IssuerUrl, Nonce, PkceCodeChallenge,
    PkceCodeVerifier, RedirectUrl, Scope, TokenResponse,
};
use tracing::warn;

use crate::config::GoogleSettings;
use crate::domain::repository::IdentityProvider;
use crate::domain::types::{CallbackParams, ExternalIdentity, PendingHandshake};
use crate::error::AccountsError;

pub const GOOGLE_PROVIDER: &str = "Google";

const SCOPES: [&str; 2] = ["email", "profile"];

pub struct GoogleOidcProvider {
    provider_metadata: CoreProviderMetadata,
    client_id: ClientId,
    client_secret: ClientSecret,
    redirect_url: RedirectUrl,
    http: reqwest::Client,
}

impl GoogleOidcProvider {
    /// Fetch the provider metadata from the issuer's discovery document.
    pub async fn discover(settings: &GoogleSettings) -> anyhow::Result<Self> {
        let issuer_url =
            IssuerUrl::new(settings.issuer_url.clone()).context("invalid Google issuer URL")?;
        let redirect_url = RedirectUrl::new(settings.redirect_uri.clone())
            .context("invalid Google redirect URI")?;

        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("build OIDC http client")?;

        let provider_metadata = CoreProviderMetadata::discover_async(issuer_url, &http)
            .await
            .map_err(|e| anyhow!("OIDC discovery failed: {e}"))?;

        Ok(Self {
            provider_metadata,
            client_id: ClientId::new(settings.client_id.clone()),
            client_secret: ClientSecret::new(settings.client_secret.clone()),
            redirect_url,
            http,
        })
    }

    async fn exchange(
        &self,
        code: &str,
        pending: &PendingHandshake,
    ) -> anyhow::Result<ExternalIdentity> {
        let client = CoreClient::from_provider_metadata(
            self.provider_metadata.clone(),
            self.client_id.clone(),
            Some(self.client_secret.clone()),
        )
        .set_redirect_uri(self.redirect_url.clone());

        let token_response = client
            .exchange_code(AuthorizationCode::new(code.to_owned()))
            .map_err(|e| anyhow!("token endpoint missing: {e}"))?
            .set_pkce_verifier(PkceCodeVerifier::new(pending.pkce_verifier.clone()))
            .request_async(&self.http)
            .await
            .map_err(|e| anyhow!("token exchange failed: {e}"))?;

        let id_token = token_response
            .id_token()
            .ok_or_else(|| anyhow!("no ID token in response"))?;
        let claims = id_token
            .claims(
                &client.id_token_verifier(),
                &Nonce::new(pending.nonce.clone()),
            )
            .map_err(|e| anyhow!("ID token validation failed: {e}"))?;

        Ok(ExternalIdentity {
            provider: GOOGLE_PROVIDER.to_owned(),
            provider_key: claims.subject().to_string(),
            email: claims.email().map(|e| e.as_str().to_owned()),
            display_name: claims
                .name()
                .and_then(|n| n.get(None))
                .map(|n| n.as_str().to_owned()),
        })
    }
}

impl IdentityProvider for GoogleOidcProvider {
    fn name(&self) -> &str {
        GOOGLE_PROVIDER
    }

    fn authorization_redirect(&self) -> Result<(String, PendingHandshake), AccountsError> {
        let client = CoreClient::from_provider_metadata(
            self.provider_metadata.clone(),
            self.client_id.clone(),
            Some(self.client_secret.clone()),
        )
        .set_redirect_uri(self.redirect_url.clone());

        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let mut request = client
            .authorize_url(
                CoreAuthenticationFlow::AuthorizationCode,
                CsrfToken::new_random,
                Nonce::new_random,
            )
            .set_pkce_challenge(pkce_challenge);
        for scope in SCOPES {
            request = request.add_scope(Scope::new(scope.to_owned()));
        }
        let (url, csrf_token, nonce) = request.url();

        let pending = PendingHandshake {
            provider: GOOGLE_PROVIDER.to_owned(),
            csrf_token: csrf_token.secret().clone(),
            pkce_verifier: pkce_verifier.secret().clone(),
            nonce: nonce.secret().clone(),
        };
        Ok((url.to_string(), pending))
    }

    async fn complete_callback(
        &self,
        params: &CallbackParams,
        pending: &PendingHandshake,
    ) -> Option<ExternalIdentity> {
        if let Some(error) = &params.error {
            warn!(provider = GOOGLE_PROVIDER, error = %error, "provider returned an error");
            return None;
        }
        let (Some(code), Some(state)) = (&params.code, &params.state) else {
            warn!(provider = GOOGLE_PROVIDER, "callback without code or state");
            return None;
        };
        if *state != pending.csrf_token {
            warn!(provider = GOOGLE_PROVIDER, "callback state mismatch");
            return None;
        }
        match self.exchange(code, pending).await {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!(provider = GOOGLE_PROVIDER, error = %e, "external sign-in failed");
                None
            }
        }
    }
}
