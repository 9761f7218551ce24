use std::time::{Duration, Instant};
use futures_util::future::BoxFuture;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::firebase::FirebaseSettings;
use crate::errors::AppError;

/// Identity asserted by a verified federated sign-in token.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedIdentity {
    pub uid: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Invalid Google token: {0}")]
    InvalidToken(String),

    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

impl From<IdentityError> for AppError {
    fn from(e: IdentityError) -> Self {
        match e {
            IdentityError::InvalidToken(detail) => {
                tracing::info!("Federated token rejected: {}", detail);
                AppError::Unauthorized("Invalid Google token".to_string())
            }
            IdentityError::Unavailable(detail) => AppError::Dependency(detail),
        }
    }
}

pub trait IdentityVerifier: Send + Sync {
    fn verify<'a>(&'a self, id_token: &'a str) -> BoxFuture<'a, Result<VerifiedIdentity, IdentityError>>;
}

#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    email: Option<String>,
    email_verified: Option<bool>,
    name: Option<String>,
    picture: Option<String>,
}

fn identity_from_claims(claims: FirebaseClaims) -> Result<VerifiedIdentity, IdentityError> {
    if claims.sub.is_empty() {
        return Err(IdentityError::InvalidToken("Token has an empty subject".to_string()));
    }
    if claims.email_verified == Some(false) {
        return Err(IdentityError::InvalidToken("Email address is not verified".to_string()));
    }

    Ok(VerifiedIdentity {
        uid: claims.sub,
        email: claims.email.map(|e| e.to_lowercase()),
        name: claims.name,
        picture: claims.picture,
    })
}

/// Reads `max-age` from a Cache-Control header value.
fn parse_max_age(cache_control: &str) -> Option<Duration> {
    cache_control
        .split(',')
        .filter_map(|directive| directive.trim().strip_prefix("max-age="))
        .find_map(|seconds| seconds.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

struct CachedKeys {
    keys: JwkSet,
    expires_at: Instant,
}

/// Checks Firebase ID tokens against Google's published signing keys.
/// The key set is kept for as long as Google's Cache-Control allows.
pub struct FirebaseIdentityVerifier {
    client: Client,
    jwks_url: String,
    project_id: String,
    issuer: String,
    cached_keys: RwLock<Option<CachedKeys>>,
}

impl FirebaseIdentityVerifier {
    pub fn new(settings: &FirebaseSettings) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| IdentityError::Unavailable(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            jwks_url: settings.jwks_url.clone(),
            project_id: settings.project_id.clone(),
            issuer: settings.issuer(),
            cached_keys: RwLock::new(None),
        })
    }

    /// Finds the key for `kid`, refetching when the cache is stale or
    /// does not know the key yet (Google rotates keys ahead of expiry).
    async fn signing_key(&self, kid: &str) -> Result<Jwk, IdentityError> {
        {
            let cached = self.cached_keys.read().await;
            if let Some(cached) = cached.as_ref().filter(|c| c.expires_at > Instant::now()) {
                if let Some(jwk) = cached.keys.find(kid) {
                    return Ok(jwk.clone());
                }
            }
        }

        let (keys, max_age) = self.fetch_keys().await?;
        let jwk = keys.find(kid).cloned();
        match max_age {
            Some(max_age) => {
                *self.cached_keys.write().await = Some(CachedKeys { keys, expires_at: Instant::now() + max_age });
            }
            None => tracing::debug!("Signing key response had no max-age, not caching"),
        }

        jwk.ok_or_else(|| IdentityError::InvalidToken(format!("Unknown signing key {}", kid)))
    }

    async fn fetch_keys(&self) -> Result<(JwkSet, Option<Duration>), IdentityError> {
        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("Failed to fetch signing keys: {}", e)))?;

        if !response.status().is_success() {
            return Err(IdentityError::Unavailable(format!(
                "Signing key endpoint answered HTTP {}",
                response.status()
            )));
        }

        let max_age = response
            .headers()
            .get(CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_max_age);

        let keys = response
            .json::<JwkSet>()
            .await
            .map_err(|e| IdentityError::Unavailable(format!("Malformed signing key set: {}", e)))?;
        Ok((keys, max_age))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[self.project_id.as_str()]);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation
    }
}

impl IdentityVerifier for FirebaseIdentityVerifier {
    fn verify<'a>(&'a self, id_token: &'a str) -> BoxFuture<'a, Result<VerifiedIdentity, IdentityError>> {
        Box::pin(async move {
            let header = decode_header(id_token)
                .map_err(|e| IdentityError::InvalidToken(format!("Unreadable header: {}", e)))?;
            let kid = header
                .kid
                .ok_or_else(|| IdentityError::InvalidToken("Token has no key id".to_string()))?;

            let jwk = self.signing_key(&kid).await?;
            let key = DecodingKey::from_jwk(&jwk)
                .map_err(|e| IdentityError::Unavailable(format!("Unusable signing key {}: {}", kid, e)))?;

            let data = decode::<FirebaseClaims>(id_token, &key, &self.validation())
                .map_err(|e| IdentityError::InvalidToken(e.to_string()))?;
            identity_from_claims(data.claims)
        })
    }
}
