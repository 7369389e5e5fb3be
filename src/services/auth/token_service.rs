//! 액세스 토큰 검증 서비스
//!
//! 외부 인증 서비스가 HS256으로 서명한 JWT를 검증하고 클레임을 꺼냅니다.
//! 이 서비스는 토큰을 발급하지 않습니다.

use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use singleton_macro::service;
use crate::{
    config::JwtConfig,
    core::errors::AppError,
    domain::{auth::authenticated_user::AuthenticatedUser, token::token::TokenClaims},
};

/// 비밀키와 허용 오차를 받아 토큰을 검증합니다.
pub fn decode_claims(token: &str, secret: &str, leeway_seconds: u64) -> Result<TokenClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = leeway_seconds;

    decode::<TokenClaims>(token, &decoding_key, &validation)
        .map(|token_data| token_data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => {
                AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
            },
            ErrorKind::InvalidSignature
            | ErrorKind::InvalidToken
            | ErrorKind::InvalidAlgorithm
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => {
                AppError::AuthenticationError("유효하지 않은 토큰입니다".to_string())
            },
            _ => AppError::AuthenticationError(format!("토큰 검증 실패: {}", e)),
        })
}

#[service(name = "token")]
pub struct TokenService {
    // 외부 의존성 없음
}

impl TokenService {
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims, AppError> {
        decode_claims(token, &JwtConfig::secret(), JwtConfig::leeway_seconds())
    }

    /// 토큰을 검증하고 요청 주체로 바꿉니다.
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let claims = self.verify_token(token)?;

        if claims.sub.trim().is_empty() {
            return Err(AppError::AuthenticationError("토큰에 사용자 id가 없습니다".to_string()));
        }

        Ok(AuthenticatedUser {
            user_id: claims.sub,
            email: claims.email,
            roles: claims.roles,
        })
    }

    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> Result<&'a str, AppError> {
        extract_bearer_token(auth_header)
    }
}

pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    match auth_header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";

    fn token_with(exp_offset: Duration, secret: &str) -> String {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: "uid-42".to_string(),
            roles: vec!["user".to_string()],
            iat: now.timestamp(),
            exp: (now + exp_offset).timestamp(),
            email: Some("player@example.com".to_string()),
        };

        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_decode_valid_token() {
        let token = token_with(Duration::hours(1), SECRET);
        let claims = decode_claims(&token, SECRET, 0).unwrap();

        assert_eq!(claims.sub, "uid-42");
        assert_eq!(claims.roles, vec!["user".to_string()]);
        assert_eq!(claims.email.as_deref(), Some("player@example.com"));
    }

    #[test]
    fn test_decode_expired_token() {
        let token = token_with(Duration::hours(-2), SECRET);
        let result = decode_claims(&token, SECRET, 30);

        match result {
            Err(AppError::AuthenticationError(msg)) => assert!(msg.contains("만료")),
            other => panic!("expected expiry error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_wrong_secret() {
        let token = token_with(Duration::hours(1), "other-secret");
        assert!(matches!(
            decode_claims(&token, SECRET, 0),
            Err(AppError::AuthenticationError(_))
        ));
    }

    #[test]
    fn test_decode_garbage() {
        assert!(decode_claims("not.a.jwt", SECRET, 0).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def").unwrap(), "abc.def");
        assert!(extract_bearer_token("Basic abc").is_err());
        assert!(extract_bearer_token("Bearer   ").is_err());
    }
}
