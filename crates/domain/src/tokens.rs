use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use uuid::Uuid;

use crate::errors::StoreError;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_VERSION: &str = "v1";

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub admin: bool,
    pub exp: i64,
}

/// Issues and verifies bearer tokens of the form
/// `v1.<base64url claims>.<base64url signature>`, signed with
/// HMAC-SHA256 over the encoded claims part. Verification is
/// constant-time and rejects expired tokens.
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: impl Into<Vec<u8>>, ttl_days: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl: Duration::days(ttl_days),
        }
    }

    pub fn issue(&self, user_id: Uuid, admin: bool) -> Result<String, StoreError> {
        let claims = Claims {
            sub: user_id,
            admin,
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        let payload_bytes =
            serde_json::to_vec(&claims).map_err(|e| StoreError::Internal(e.to_string()))?;
        let payload_part = URL_SAFE_NO_PAD.encode(payload_bytes);
        let sig = self.sign(payload_part.as_bytes())?;
        let sig_part = URL_SAFE_NO_PAD.encode(sig);
        Ok(format!("{}.{}.{}", TOKEN_VERSION, payload_part, sig_part))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, StoreError> {
        let mut parts = token.split('.');
        let (version, payload_part, sig_part) = match (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) {
            (Some(version), Some(payload), Some(sig), None) => (version, payload, sig),
            _ => return Err(unauthorized()),
        };
        if version != TOKEN_VERSION {
            return Err(unauthorized());
        }

        let supplied = URL_SAFE_NO_PAD
            .decode(sig_part)
            .map_err(|_| unauthorized())?;
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        mac.update(payload_part.as_bytes());
        mac.verify_slice(&supplied).map_err(|_| unauthorized())?;

        let payload_bytes = URL_SAFE_NO_PAD
            .decode(payload_part)
            .map_err(|_| unauthorized())?;
        let claims: Claims =
            serde_json::from_slice(&payload_bytes).map_err(|_| unauthorized())?;

        if claims.exp < Utc::now().timestamp() {
            return Err(StoreError::Unauthorized(
                "Not authorized, token expired".to_string(),
            ));
        }
        Ok(claims)
    }

    fn sign(&self, payload: &[u8]) -> Result<Vec<u8>, StoreError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| StoreError::Internal(e.to_string()))?;
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

fn unauthorized() -> StoreError {
    StoreError::Unauthorized("Not authorized, token failed".to_string())
}
