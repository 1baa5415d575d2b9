use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Token claims: an arbitrary payload plus an optional expiry. The payload
/// serializes with sorted keys, so signing the same payload with the same
/// secret and no ttl always yields the same token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token secret is not configured")]
    MissingSecret,
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),
}

/// Signs `payload` with HS256, adding an `exp` claim when a ttl is given.
pub fn sign(
    payload: Map<String, Value>,
    secret: &str,
    ttl: Option<Duration>,
) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let exp = ttl.map(|ttl| (Utc::now() + ttl).timestamp());
    let claims = Claims { exp, payload };

    let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))?;
    Ok(token)
}

/// Decodes and validates a token: signature must match and, when present,
/// `exp` must not have passed. Tokens without an expiry are accepted.
pub fn verify(token: &str, secret: &str) -> Result<Map<String, Value>, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let mut validation = Validation::default();
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)?;
    Ok(data.claims.payload)
}
