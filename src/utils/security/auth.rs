use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use chrono::{Utc, Duration};
use bcrypt::{hash as crypt_hash, DEFAULT_COST};

use crate::domain::UserRole;
use crate::utils::errors::ApiError;
use crate::utils::security::jwt::{AccessData, Claims};

pub struct AuthUtils;

impl AuthUtils {

    pub fn hash_password(input: &str) -> Result<String, bcrypt::BcryptError> {
        crypt_hash(input, DEFAULT_COST)
    }

    pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
        bcrypt::verify(password, hash)
    }

    pub fn generate_access_token(
        username: &str,
        roles: &[UserRole],
        secret_key: &str,
        minutes: i64,
    ) -> Result<String, ApiError> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(Duration::minutes(minutes))
            .ok_or_else(|| ApiError::InternalServerError("token expiry out of range".to_string()))?
            .timestamp() as u64;

        let claims = Claims {
            sub: username.to_owned(),
            exp: expiration,
            iat: now.timestamp() as u64,
            data: AccessData {
                username: username.to_string(),
                roles: roles.to_vec(),
            },
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret_key.as_ref()),
        ).map_err(|e| ApiError::InternalServerError(format!("failed to sign access token: {}", e)))
    }

    pub fn decode_access_token(token: &str, secret_key: &str) -> Result<Claims<AccessData>, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        decode::<Claims<AccessData>>(
            token,
            &DecodingKey::from_secret(secret_key.as_ref()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| ApiError::Unauthorized(e.to_string()))
    }
}

// ---------------------------------------- TESTS ----------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_for_jwt_signing_operations";

    #[test]
    fn test_hash_password() {
        let hash = AuthUtils::hash_password("my_secure_password").unwrap();

        assert!(hash.starts_with("$2b$") || hash.starts_with("$2a$") || hash.starts_with("$2y$"));

        let parts: Vec<&str> = hash.split('$').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[2].len(), 2);
    }

    #[test]
    fn test_verify_password_correct_and_incorrect() {
        let hash = AuthUtils::hash_password("correct_password").unwrap();

        assert!(AuthUtils::verify_password("correct_password", &hash).unwrap());
        assert!(!AuthUtils::verify_password("wrong_password", &hash).unwrap());
        assert!(!AuthUtils::verify_password("CORRECT_PASSWORD", &hash).unwrap());
    }

    #[test]
    fn test_same_password_produces_different_hashes() {
        let hash1 = AuthUtils::hash_password("same_password").unwrap();
        let hash2 = AuthUtils::hash_password("same_password").unwrap();

        assert_ne!(hash1, hash2, "Same password should have different hashes (salt)");
        assert!(AuthUtils::verify_password("same_password", &hash1).unwrap());
        assert!(AuthUtils::verify_password("same_password", &hash2).unwrap());
    }

    #[test]
    fn test_verify_with_invalid_hash() {
        let result = AuthUtils::verify_password("password", "not_a_valid_bcrypt_hash");
        assert!(result.is_err(), "Invalid hash should return error");
    }

    #[test]
    fn test_access_token_round_trip() {
        let token = AuthUtils::generate_access_token("vet", &[UserRole::Vet], SECRET, 15).unwrap();
        let claims = AuthUtils::decode_access_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, "vet");
        assert_eq!(claims.data.username, "vet");
        assert_eq!(claims.data.roles, vec![UserRole::Vet]);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_access_token_rejected_with_wrong_secret() {
        let token = AuthUtils::generate_access_token("vet", &[UserRole::Vet], SECRET, 15).unwrap();
        let result = AuthUtils::decode_access_token(&token, "another_secret_key_entirely");
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_access_token_rejected() {
        let token = AuthUtils::generate_access_token("vet", &[UserRole::Vet], SECRET, -60).unwrap();
        assert!(AuthUtils::decode_access_token(&token, SECRET).is_err());
    }
}
