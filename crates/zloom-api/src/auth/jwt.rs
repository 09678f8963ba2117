use jsonwebtoken::{decode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use zloom_core::{AppError, Identity, IdentityProfile};

/// Claims issued by the identity provider. Only `sub` and `exp` are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Opaque, stable identity id
    pub sub: String,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl IdentityClaims {
    pub fn identity(&self) -> Identity {
        Identity::new(self.sub.clone())
    }

    pub fn profile(&self) -> IdentityProfile {
        IdentityProfile {
            email: self.email.clone(),
            first_name: self.given_name.clone(),
            last_name: self.family_name.clone(),
            image: self.picture.clone(),
        }
    }
}

/// HS256 verifier for identity-provider tokens
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Validate and decode a bearer token
    pub fn verify(&self, token: &str) -> Result<IdentityClaims, AppError> {
        let token_data = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!("JWT validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        AppError::InvalidToken("Token has expired".to_string())
                    }
                    _ => AppError::InvalidToken("Invalid or expired token".to_string()),
                }
            })?;

        if token_data.claims.sub.trim().is_empty() {
            return Err(AppError::InvalidToken("Token has no subject".to_string()));
        }

        Ok(token_data.claims)
    }
}

/// Sign claims with an HS256 secret. Used by tooling and tests that stand in
/// for the identity provider.
pub fn issue_token(secret: &str, claims: &IdentityClaims) -> Result<String, AppError> {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
}
