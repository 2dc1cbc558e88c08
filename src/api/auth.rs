use actix_web::{dev::Payload, http::header::AUTHORIZATION, web, FromRequest, HttpRequest};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};

use crate::error::ApiError;

/// Payload of a signed bearer token. Token issuance lives elsewhere; this
/// service only verifies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    pub exp: i64,
}

/// Verification key shared across handlers via app data.
pub struct AuthKeys {
    decoding: DecodingKey,
}

impl AuthKeys {
    pub fn from_secret(secret: &str) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Verify a token's signature and expiry and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| ApiError::Unauthorized(format!("invalid token: {}", e)))
    }
}

/// Extractor for admin-only routes.
///
/// Public routes simply never use this extractor, so an absent or invalid
/// token on them is treated as anonymous rather than a failure.
pub struct AdminUser(pub Claims);

impl FromRequest for AdminUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, ApiError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(admin_from_request(req))
    }
}

fn admin_from_request(req: &HttpRequest) -> Result<AdminUser, ApiError> {
    let keys = req
        .app_data::<web::Data<AuthKeys>>()
        .ok_or_else(|| ApiError::Unauthorized("authentication is not configured".to_string()))?;

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

    let token = strip_bearer(header)
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

    let claims = keys.verify(token)?;
    if !claims.is_admin {
        return Err(ApiError::Unauthorized("admin privileges required".to_string()));
    }

    Ok(AdminUser(claims))
}

fn strip_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() {
        Some(token.trim())
    } else {
        None
    }
}

#[cfg(test)]
pub(crate) fn test_token(secret: &str, username: &str, is_admin: bool, ttl_secs: i64) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = Claims {
        username: username.to_string(),
        is_admin,
        exp: chrono::Utc::now().timestamp() + ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}
