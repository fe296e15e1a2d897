use crate::{CatalogError, Result};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;

/// The verified claims extracted from a caller's credential, valid for the
/// duration of one request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Identity {
    pub username: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    #[serde(rename = "iat", default)]
    pub issued_at: Option<i64>,
}

/// Per-request authorization state. A request starts `Anonymous` and moves
/// to `Authenticated` only through [`AccessGuard::authenticate`]; the gates
/// below decide but never transition.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Anonymous,
    Authenticated(Identity),
}

impl AuthState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthState::Authenticated(identity) => Some(identity),
            AuthState::Anonymous => None,
        }
    }
}

/// Verifies bearer credentials against a key injected at construction.
///
/// Verification failure is swallowed by design: public routes pass through
/// the same guard chain, so an absent or bad credential leaves the request
/// `Anonymous` instead of failing it. The hard accept/reject decisions
/// live in [`require_admin`] and [`require_owner_or_admin`].
pub struct AccessGuard {
    key: DecodingKey,
    validation: Validation,
}

impl AccessGuard {
    /// Build a guard around the process-wide verification secret. The
    /// issued tokens carry `iat` but no `exp`, so expiry is not required;
    /// a token that does carry an expired `exp` is still rejected.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        Self {
            key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Resolve an optional `Authorization` header into an [`AuthState`].
    ///
    /// Any failure, absent header, malformed scheme, bad signature,
    /// expired token, lands in `Anonymous` and is final for this request;
    /// there is no retry.
    pub fn authenticate(&self, header: Option<&str>) -> AuthState {
        let Some(header) = header else {
            return AuthState::Anonymous;
        };
        match self.verify(header) {
            Ok(identity) => AuthState::Authenticated(identity),
            Err(e) => {
                log::debug!("credential rejected, continuing as anonymous: {:#}", e);
                AuthState::Anonymous
            }
        }
    }

    fn verify(&self, header: &str) -> Result<Identity> {
        let token = bearer_token(header)
            .ok_or_else(|| crate::Error::msg("Authorization header is not a bearer credential"))?;
        let data = decode::<Identity>(token, &self.key, &self.validation)?;
        Ok(data.claims)
    }
}

/// Extract the token from a `Bearer <token>` header. The scheme token is
/// case-insensitive and the credential is trimmed.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Admit only an authenticated administrator.
pub fn require_admin(state: &AuthState) -> Result<&Identity> {
    match state.identity() {
        Some(identity) if identity.is_admin => Ok(identity),
        _ => {
            log::info!("admin gate rejected request");
            Err(CatalogError::Unauthorized.into())
        }
    }
}

/// Admit the resource owner or any administrator.
pub fn require_owner_or_admin<'a>(state: &'a AuthState, owner: &str) -> Result<&'a Identity> {
    match state.identity() {
        Some(identity) if identity.is_admin || identity.username == owner => Ok(identity),
        _ => {
            log::info!("owner-or-admin gate rejected request for owner `{owner}`");
            Err(CatalogError::Unauthorized.into())
        }
    }
}
