use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenClass;
use super::errors::JwtError;
use super::secret::SigningSecret;
use crate::clock::Clock;
use crate::clock::SystemClock;

/// Identity carried by a token that passed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub subject_id: String,
    pub class: TokenClass,
}

/// Issues and verifies HS256-signed tokens.
///
/// The service holds no key material: the signing secret is passed into each
/// call. Time is read from the injected [`Clock`] when issuing and when
/// checking expiry.
#[derive(Debug, Clone, Default)]
pub struct TokenService<C = SystemClock> {
    clock: C,
}

impl TokenService<SystemClock> {
    /// Create a token service reading the system clock.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> TokenService<C> {
    /// Create a token service with a custom clock.
    ///
    /// # Arguments
    /// * `clock` - Source of the current Unix time
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Clock used for `iat` and expiry checks.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Issue a token of the given class for `subject_id`.
    ///
    /// # Arguments
    /// * `subject_id` - User identifier carried as `userId`
    /// * `secret` - HMAC signing key
    /// * `class` - Token class; selects the lifetime
    ///
    /// # Returns
    /// Compact `header.payload.signature` token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn issue(
        &self,
        subject_id: &str,
        secret: &SigningSecret,
        class: TokenClass,
    ) -> Result<String, JwtError> {
        let claims = Claims::new(subject_id, class, self.clock.now());
        self.sign(&claims, secret)
    }

    /// Issue an access token (24 hour lifetime).
    pub fn issue_access(
        &self,
        subject_id: &str,
        secret: &SigningSecret,
    ) -> Result<String, JwtError> {
        self.issue(subject_id, secret, TokenClass::Access)
    }

    /// Issue a refresh token (7 day lifetime).
    pub fn issue_refresh(
        &self,
        subject_id: &str,
        secret: &SigningSecret,
    ) -> Result<String, JwtError> {
        self.issue(subject_id, secret, TokenClass::Refresh)
    }

    /// Sign arbitrary claims as-is, without applying lifetime policy.
    ///
    /// # Arguments
    /// * `claims` - Payload to sign
    /// * `secret` - HMAC signing key
    ///
    /// # Returns
    /// Compact token string
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn sign(&self, claims: &Claims, secret: &SigningSecret) -> Result<String, JwtError> {
        let header = Header::new(Algorithm::HS256);

        encode(&header, claims, &EncodingKey::from_secret(secret.as_bytes()))
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token and return its subject and class.
    ///
    /// The signature is checked before the payload is decoded, so a tampered
    /// payload is rejected even when it is well-formed JSON. An `exp` claim
    /// older than the clock's current second fails verification. Other
    /// registered claims such as `aud` are not checked, and `iat` may be absent.
    ///
    /// # Arguments
    /// * `token` - Compact token string
    /// * `secret` - HMAC key the token must have been signed with
    ///
    /// # Returns
    /// Subject and class of the verified token
    ///
    /// # Errors
    /// * `InvalidOrExpired` - For every kind of failure
    pub fn verify(&self, token: &str, secret: &SigningSecret) -> Result<VerifiedToken, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Only the signature and expiry decide validity. Expiry is checked
        // below against the injected clock.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            JwtError::InvalidOrExpired
        })?;

        let claims = token_data.claims;
        if claims.is_expired(self.clock.now()) {
            tracing::debug!(exp = ?claims.exp, "Token rejected: expired");
            return Err(JwtError::InvalidOrExpired);
        }

        Ok(VerifiedToken {
            subject_id: claims.subject_id,
            class: claims.class,
        })
    }
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    use super::*;
    use crate::clock::FixedClock;

    const ISSUED_AT: i64 = 1_700_000_000;

    fn secret() -> SigningSecret {
        SigningSecret::new("test-jwt-secret-key").unwrap()
    }

    fn service_at(now: i64) -> TokenService<FixedClock> {
        TokenService::with_clock(FixedClock(now))
    }

    #[test]
    fn test_issue_and_verify_access() {
        let service = TokenService::new();

        let token = service
            .issue("test-user-id-123", &secret(), TokenClass::Access)
            .expect("Failed to issue token");
        assert_eq!(token.split('.').count(), 3);

        let verified = service.verify(&token, &secret()).expect("Failed to verify token");
        assert_eq!(
            verified,
            VerifiedToken {
                subject_id: "test-user-id-123".to_string(),
                class: TokenClass::Access,
            }
        );
    }

    #[test]
    fn test_issue_refresh() {
        let service = TokenService::new();

        let token = service.issue_refresh("u1", &secret()).unwrap();
        let verified = service.verify(&token, &secret()).unwrap();

        assert_eq!(verified.subject_id, "u1");
        assert_eq!(verified.class, TokenClass::Refresh);
    }

    #[test]
    fn test_tokens_differ_by_subject_and_class() {
        let service = service_at(ISSUED_AT);

        let access = service.issue_access("u1", &secret()).unwrap();
        let other_user = service.issue_access("u2", &secret()).unwrap();
        let refresh = service.issue_refresh("u1", &secret()).unwrap();

        assert_ne!(access, other_user);
        assert_ne!(access, refresh);
    }

    #[test]
    fn test_header_and_payload_layout() {
        let token = service_at(ISSUED_AT).issue_access("u1", &secret()).unwrap();
        let segments: Vec<&str> = token.split('.').collect();

        let header: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[0]).unwrap()).unwrap();
        assert_eq!(header["alg"], "HS256");
        assert_eq!(header["typ"], "JWT");

        let payload: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[1]).unwrap()).unwrap();
        assert_eq!(payload["userId"], "u1");
        assert_eq!(payload["type"], "access");
        assert_eq!(payload["iat"], ISSUED_AT);
        assert_eq!(payload["exp"], ISSUED_AT + 24 * 60 * 60);

        assert!(!token.contains('='));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let service = TokenService::new();
        let token = service.issue_access("u1", &secret()).unwrap();

        let wrong = SigningSecret::new("wrong-secret").unwrap();
        assert_eq!(service.verify(&token, &wrong), Err(JwtError::InvalidOrExpired));
    }

    #[test]
    fn test_verify_malformed_tokens() {
        let service = TokenService::new();

        for token in [
            "",
            "not-a-jwt-token",
            "invalid.token",
            "invalid.token.here",
            "a.b.c.d",
        ] {
            assert_eq!(
                service.verify(token, &secret()),
                Err(JwtError::InvalidOrExpired),
                "token {:?} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_expiry_follows_clock() {
        let token = service_at(ISSUED_AT).issue_access("u1", &secret()).unwrap();
        let exp = ISSUED_AT + 24 * 60 * 60;

        assert!(service_at(exp - 1).verify(&token, &secret()).is_ok());
        assert!(service_at(exp).verify(&token, &secret()).is_ok());
        assert_eq!(
            service_at(exp + 1).verify(&token, &secret()),
            Err(JwtError::InvalidOrExpired)
        );
    }

    #[test]
    fn test_refresh_outlives_access() {
        let issuer = service_at(ISSUED_AT);
        let access = issuer.issue_access("u1", &secret()).unwrap();
        let refresh = issuer.issue_refresh("u1", &secret()).unwrap();

        let two_days_later = service_at(ISSUED_AT + 2 * 24 * 60 * 60);
        assert!(two_days_later.verify(&access, &secret()).is_err());
        assert!(two_days_later.verify(&refresh, &secret()).is_ok());
    }

    #[test]
    fn test_past_expiry_with_valid_signature() {
        let service = service_at(ISSUED_AT);
        let claims =
            Claims::new("u1", TokenClass::Access, ISSUED_AT - 100).with_expiration(ISSUED_AT - 1);

        let token = service.sign(&claims, &secret()).unwrap();
        assert_eq!(service.verify(&token, &secret()), Err(JwtError::InvalidOrExpired));
    }

    #[test]
    fn test_token_without_exp_does_not_expire() {
        let mut claims = Claims::new("u1", TokenClass::Access, 0);
        claims.exp = None;

        let token = service_at(0).sign(&claims, &secret()).unwrap();
        assert!(service_at(i64::MAX).verify(&token, &secret()).is_ok());
    }

    fn sign_raw(payload: &[u8]) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let message = format!("{}.{}", header, URL_SAFE_NO_PAD.encode(payload));

        let signature = jsonwebtoken::crypto::sign(
            message.as_bytes(),
            &EncodingKey::from_secret(secret().as_bytes()),
            Algorithm::HS256,
        )
        .unwrap();
        format!("{}.{}", message, signature)
    }

    #[test]
    fn test_token_without_iat_is_accepted() {
        let token = sign_raw(br#"{"userId":"u1","type":"access","exp":200}"#);

        let verified = service_at(100).verify(&token, &secret()).expect("Token rejected");
        assert_eq!(verified.subject_id, "u1");
        assert_eq!(verified.class, TokenClass::Access);
    }

    #[test]
    fn test_audience_claim_is_ignored() {
        let token =
            sign_raw(br#"{"userId":"u1","type":"access","iat":0,"exp":200,"aud":"x"}"#);

        assert!(service_at(100).verify(&token, &secret()).is_ok());
        assert_eq!(
            service_at(201).verify(&token, &secret()),
            Err(JwtError::InvalidOrExpired)
        );
    }

    #[test]
    fn test_issue_near_end_of_time() {
        let service = service_at(i64::MAX - 10);

        let token = service.issue_access("u1", &secret()).expect("Failed to issue token");
        assert!(service.verify(&token, &secret()).is_ok());
    }

    #[test]
    fn test_tampered_signature() {
        let service = TokenService::new();
        let token = service.issue_access("u1", &secret()).unwrap();

        let (message, signature) = token.rsplit_once('.').unwrap();
        let mut bytes = URL_SAFE_NO_PAD.decode(signature).unwrap();
        bytes[0] ^= 0x01;
        let tampered = format!("{}.{}", message, URL_SAFE_NO_PAD.encode(&bytes));

        assert_eq!(service.verify(&tampered, &secret()), Err(JwtError::InvalidOrExpired));
    }

    #[test]
    fn test_tampered_payload() {
        let service = TokenService::new();
        let token = service.issue_access("u1", &secret()).unwrap();
        let segments: Vec<&str> = token.split('.').collect();

        let mut payload: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segments[1]).unwrap()).unwrap();
        payload["userId"] = serde_json::json!("admin");
        let forged_payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload).unwrap());

        let tampered = format!("{}.{}.{}", segments[0], forged_payload, segments[2]);
        assert_eq!(service.verify(&tampered, &secret()), Err(JwtError::InvalidOrExpired));
    }

    #[test]
    fn test_unknown_class_with_valid_signature() {
        let service = TokenService::new();
        let token = sign_raw(br#"{"userId":"u1","type":"admin","iat":0}"#);

        assert_eq!(service.verify(&token, &secret()), Err(JwtError::InvalidOrExpired));
    }

    #[test]
    fn test_leading_whitespace_is_rejected() {
        let service = TokenService::new();
        let token = service.issue_access("u1", &secret()).unwrap();

        let padded = format!(" {}", token);
        assert_eq!(service.verify(&padded, &secret()), Err(JwtError::InvalidOrExpired));
    }
}
