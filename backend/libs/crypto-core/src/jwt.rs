/// Session token issuing and validation shared by Forkline services.
///
/// Tokens are HS256 JWTs signed with a secret supplied by configuration at
/// startup. The service owning the secret constructs a [`TokenService`] once
/// and hands clones to whatever needs to mint or check tokens; there is no
/// process-global key state, so tests and multi-tenant setups can run several
/// instances side by side.
///
/// Claims carry the authenticated identity plus the two authorization inputs
/// every request needs: the user's role and home country. Both are closed
/// enumerations so a token can never smuggle an unknown role into a service.
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Signing algorithm for all Forkline session tokens.
const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

/// User role carried in token claims and persisted on the user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role")]
pub enum Role {
    Admin,
    Manager,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Manager => "Manager",
            Role::Member => "Member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Country a user (and therefore their data) is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "country")]
pub enum Country {
    India,
    America,
}

impl Country {
    pub fn as_str(&self) -> &'static str {
        match self {
            Country::India => "India",
            Country::America => "America",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims for a Forkline session token.
///
/// The role and country snapshot the user record at issue time; a user whose
/// role changes keeps acting under the old claims until their token is
/// reissued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Role at issue time
    pub role: Role,
    /// Country at issue time
    pub country: Country,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a user ID.
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|e| anyhow!("Invalid user ID in token: {e}"))
    }
}

/// Issues and verifies session tokens against a single signing secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl TokenService {
    /// Build a token service from the configured signing secret and token
    /// lifetime in seconds.
    pub fn from_secret(secret: &str, lifetime_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime: Duration::seconds(lifetime_secs as i64),
        }
    }

    /// Issue a signed token for the given user.
    pub fn issue(&self, user_id: Uuid, role: Role, country: Country) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            country,
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| anyhow!("Failed to sign token: {e}"))
    }

    /// Validate a token's signature and expiry and return its claims.
    ///
    /// Callers must not distinguish failure causes to clients; a bad
    /// signature, garbage input, and an expired token all come back as the
    /// same opaque error.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| anyhow!("Token validation failed: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-signing-secret-not-for-production";

    fn service() -> TokenService {
        TokenService::from_secret(TEST_SECRET, 3600)
    }

    #[test]
    fn test_issue_and_verify_round_trip() {
        let svc = service();
        let user_id = Uuid::new_v4();

        let token = svc
            .issue(user_id, Role::Manager, Country::America)
            .expect("should issue token");
        assert_eq!(token.matches('.').count(), 2);

        let claims = svc.verify(&token).expect("should verify token");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.country, Country::America);
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(service().verify("not.a.token").is_err());
        assert!(service().verify("").is_err());
    }

    #[test]
    fn test_verify_rejects_tampered_token() {
        let svc = service();
        let token = svc
            .issue(Uuid::new_v4(), Role::Member, Country::India)
            .unwrap();

        let tampered = token.replace('a', "b");
        assert!(svc.verify(&tampered).is_err());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = service()
            .issue(Uuid::new_v4(), Role::Admin, Country::India)
            .unwrap();

        let other = TokenService::from_secret("a-different-secret", 3600);
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let svc = service();
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: Role::Member,
            country: Country::India,
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let expired = encode(
            &Header::new(JWT_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(svc.verify(&expired).is_err());
    }

    #[test]
    fn test_role_and_country_display() {
        assert_eq!(Role::Admin.to_string(), "Admin");
        assert_eq!(Role::Member.as_str(), "Member");
        assert_eq!(Country::America.to_string(), "America");
    }
}
