pub(crate) use crate::auth::dto::{Claims, JwtKeys, TokenKind};
use crate::auth::repo_types::Role;
use crate::config::JwtConfig;
use crate::state::AppState;
use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::{async_trait, extract::{FromRef, FromRequestParts}, http::{request::Parts, StatusCode}};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use std::time::Duration;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, error, warn};
use uuid::Uuid;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        JwtKeys::from_config(&state.config.jwt)
    }
}

impl JwtKeys {
    pub fn from_config(cfg: &JwtConfig) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
            ttl_minutes,
            refresh_ttl_minutes,
        } = cfg.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            access_ttl: Duration::from_secs((ttl_minutes.max(0) as u64) * 60),
            refresh_ttl: Duration::from_secs((refresh_ttl_minutes.max(0) as u64) * 60),
        }
    }

    fn sign_with_kind(&self, user_id: Uuid, role: Role, kind: TokenKind) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        };
        let exp = now + TimeDuration::seconds(ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            kind,
            role,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, kind = ?kind, "jwt signed");
        Ok(token)
    }

    pub fn sign_access(&self, user_id: Uuid, role: Role) -> anyhow::Result<String> {
        self.sign_with_kind(user_id, role, TokenKind::Access)
    }
    pub fn sign_refresh(&self, user_id: Uuid, role: Role) -> anyhow::Result<String> {
        self.sign_with_kind(user_id, role, TokenKind::Refresh)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, kind = ?data.claims.kind, "jwt verified");
        Ok(data.claims)
    }

    pub fn verify_refresh(&self, token: &str) -> anyhow::Result<Claims> {
        let claims = self.verify(token)?;
        if claims.kind != TokenKind::Refresh {
            anyhow::bail!("not a refresh token");
        }
        Ok(claims)
    }
}


/// Validated access token taken from the `Authorization: Bearer` header.
fn access_claims(parts: &Parts, keys: &JwtKeys) -> Result<Claims, (StatusCode, String)> {
    let auth_header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or((
            StatusCode::UNAUTHORIZED,
            "Missing Authorization header".to_string(),
        ))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
        .ok_or((
            StatusCode::UNAUTHORIZED,
            "Invalid Authorization header".to_string(),
        ))?;

    let claims = match keys.verify(token) {
        Ok(c) => c,
        Err(_) => {
            warn!("invalid or expired token");
            return Err((
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token".to_string(),
            ));
        }
    };

    if claims.kind != TokenKind::Access {
        return Err((
            StatusCode::UNAUTHORIZED,
            "Access token required".to_string(),
        ));
    }

    Ok(claims)
}

pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let claims = access_claims(parts, &keys)?;
        Ok(AuthUser(claims.sub))
    }
}

/// Like [`AuthUser`], but only for tokens carrying the admin role.
pub struct AdminUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);
        let claims = access_claims(parts, &keys)?;
        if claims.role != Role::Admin {
            warn!(user_id = %claims.sub, "admin route refused");
            return Err((
                StatusCode::FORBIDDEN,
                "Access denied. Admins only.".to_string(),
            ));
        }
        Ok(AdminUser(claims.sub))
    }
}
