use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::{
    config::{IdentityConfig, IdentityKey},
    error::{AppError, Result},
};

/// Session claims issued by the identity provider. `sub` is the external
/// identity id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Verifies bearer tokens issued by the identity provider. Built once at
/// startup from configuration.
#[derive(Clone)]
pub struct IdentityVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl IdentityVerifier {
    pub fn from_config(config: &IdentityConfig) -> Result<Self> {
        let (key, algorithm) = match &config.key {
            IdentityKey::PublicKeyPem(pem) => (
                DecodingKey::from_rsa_pem(pem.as_bytes()).map_err(|e| {
                    AppError::ConfigError(format!("Invalid IDENTITY_JWT_PUBLIC_KEY: {}", e))
                })?,
                Algorithm::RS256,
            ),
            IdentityKey::Secret(secret) => {
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
        };

        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self { key, validation })
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}
