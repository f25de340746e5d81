use crate::auth::config::SessionConfig;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, thiserror::Error)]
pub enum SessionTokenError {
    #[error("signing error: {0}")]
    Sign(String),
    #[error("verification error: {0}")]
    Verify(String),
}

#[derive(Serialize, Deserialize)]
struct SessionClaims {
    iss: String,
    aud: String,
    sub: String, // user_id
    iat: u64,
    exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub fn issue_session_token(user_id: i32, cfg: &SessionConfig) -> Result<String, SessionTokenError> {
    let now = now_secs();
    let claims = SessionClaims {
        iss: cfg.issuer.clone(),
        aud: cfg.audience.clone(),
        sub: user_id.to_string(),
        iat: now,
        exp: now + cfg.expiry_secs,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(cfg.secret.as_bytes()),
    )
    .map_err(|e| SessionTokenError::Sign(e.to_string()))
}

pub fn verify_session_token(token: &str, cfg: &SessionConfig) -> Result<i32, SessionTokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[cfg.issuer.as_str()]);
    validation.set_audience(&[cfg.audience.as_str()]);
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(cfg.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| SessionTokenError::Verify(e.to_string()))?;
    data.claims
        .sub
        .parse()
        .map_err(|e| SessionTokenError::Verify(format!("invalid sub: {e}")))
}
