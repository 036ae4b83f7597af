//! Login state: the bearer token lives in a file in the config directory.

use crate::api::Backend;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{Role, UserProfile};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// On-disk home of the bearer token.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.token_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when no token has been stored.
    pub fn read(&self) -> AppResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let token = raw.trim();
        Ok((!token.is_empty()).then(|| token.to_string()))
    }

    pub fn write(&self, token: &str) -> AppResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    /// Ok(true) if a token was removed.
    pub fn clear(&self) -> AppResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)?;
        Ok(true)
    }
}

#[derive(Deserialize)]
struct ExpClaim {
    exp: Option<i64>,
}

/// Reads the `exp` claim without checking the signature; only the server
/// can do that. An undecodable token counts as expired.
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    match decode::<ExpClaim>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => data.claims.exp.is_some_and(|exp| exp <= now.timestamp()),
        Err(e) => {
            debug!("stored token is not a readable JWT: {e}");
            true
        }
    }
}

/// Stored token if it is still usable. An expired one is deleted.
pub fn valid_token(store: &TokenStore) -> AppResult<Option<String>> {
    let Some(token) = store.read()? else {
        return Ok(None);
    };
    if is_expired(&token, Utc::now()) {
        info!(path = %store.path().display(), "stored token expired, removing it");
        store.clear()?;
        return Ok(None);
    }
    Ok(Some(token))
}

pub fn login(
    api: &dyn Backend,
    store: &TokenStore,
    email: &str,
    password: &str,
) -> AppResult<UserProfile> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::validation("email required"));
    }
    if password.is_empty() {
        return Err(AppError::validation("password required"));
    }

    let resp = api.login(email, password)?;
    store.write(&resp.token)?;
    info!(user = %resp.user.id, role = resp.user.role.as_str(), "logged in");
    Ok(resp.user)
}

/// Ok(true) if there was a session to end.
pub fn logout(store: &TokenStore) -> AppResult<bool> {
    store.clear()
}

/// Profile behind the stored token. `api` must carry that same token.
///
/// A token the server rejects is deleted as well.
pub fn current_user(api: &dyn Backend, store: &TokenStore) -> AppResult<UserProfile> {
    if valid_token(store)?.is_none() {
        return Err(AppError::Unauthorized);
    }

    match api.me() {
        Ok(user) => Ok(user),
        Err(AppError::Unauthorized) => {
            warn!("token rejected by the server, removing it");
            store.clear()?;
            Err(AppError::Unauthorized)
        }
        Err(e) => Err(e),
    }
}

pub fn require_role(user: &UserProfile, role: Role) -> AppResult<()> {
    if user.role == role {
        Ok(())
    } else {
        Err(AppError::Forbidden(role.as_str().to_string()))
    }
}
