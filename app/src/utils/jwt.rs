use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims of the bearer tokens issued by the identity service. `sub` is the
/// signed-in user's e-mail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

/// Checks the HS256 signature and expiry of a token minted by the identity
/// service.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    fn issue(sub: &str, secret: &str, valid_for: Duration) -> String {
        let now = Utc::now();
        let claims = Claims {
            sub: sub.to_string(),
            exp: (now + valid_for).timestamp(),
            iat: now.timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_valid_token() {
        let token = issue("alice@example.com", "secret", Duration::hours(1));
        let claims = verify_jwt(&token, "secret").unwrap();
        assert_eq!(claims.sub, "alice@example.com");
    }

    #[test]
    fn test_wrong_secret_fails() {
        let token = issue("alice@example.com", "secret", Duration::hours(1));
        assert!(verify_jwt(&token, "other").is_err());
    }

    #[test]
    fn test_expired_token_fails() {
        let token = issue("alice@example.com", "secret", Duration::hours(-2));
        assert!(verify_jwt(&token, "secret").is_err());
    }

    #[test]
    fn test_garbage_token_fails() {
        assert!(verify_jwt("not-a-token", "secret").is_err());
    }
}
