use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::sea_orm_active_enums::RoleEnum;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: Uuid,
    pub name: String,
    pub role: RoleEnum,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 token issuer/verifier.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: i64,
}

impl JwtManager {
    pub fn new(secret: &str, expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in,
        }
    }

    pub fn expires_in(&self) -> i64 {
        self.expires_in
    }

    pub fn create_jwt(
        &self,
        user_id: Uuid,
        name: &str,
        role: RoleEnum,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: user_id,
            name: name.to_string(),
            role,
            iat: now,
            exp: now + self.expires_in,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let manager = JwtManager::new("test-secret", 3600);
        let user_id = Uuid::new_v4();
        let token = manager.create_jwt(user_id, "Asha Rao", RoleEnum::Teacher).unwrap();

        let claims = manager.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, RoleEnum::Teacher);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let issuer = JwtManager::new("secret-a", 3600);
        let verifier = JwtManager::new("secret-b", 3600);
        let token = issuer.create_jwt(Uuid::new_v4(), "x", RoleEnum::Admin).unwrap();

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        // Beyond the default 60s leeway
        let manager = JwtManager::new("secret", -3600);
        let token = manager.create_jwt(Uuid::new_v4(), "x", RoleEnum::Admin).unwrap();

        assert!(manager.verify(&token).is_err());
    }
}
