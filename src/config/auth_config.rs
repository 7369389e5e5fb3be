//! # Authentication Configuration
//!
//! 이 서비스는 토큰을 발급하지 않습니다. 외부 인증 서비스가 HS256으로 서명한
//! 액세스 토큰을 같은 공유 비밀키로 검증만 합니다.
//!
//! ```bash
//! export JWT_SECRET="shared-secret-with-auth-service"
//! export JWT_LEEWAY_SECONDS="30"
//! ```

use std::env;

pub struct JwtConfig;

impl JwtConfig {
    /// 토큰 서명 검증용 공유 비밀키
    ///
    /// 설정되지 않으면 개발용 기본값을 쓰고 경고를 남깁니다.
    pub fn secret() -> String {
        env::var("JWT_SECRET")
            .unwrap_or_else(|_| {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                "your-secret-key".to_string()
            })
    }

    /// 만료 시간 검증 허용 오차 (초)
    pub fn leeway_seconds() -> u64 {
        env::var("JWT_LEEWAY_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30)
    }
}

/// 관리자 역할 이름
pub const ADMIN_ROLE: &str = "admin";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leeway_default() {
        if env::var("JWT_LEEWAY_SECONDS").is_err() {
            assert_eq!(JwtConfig::leeway_seconds(), 30);
        }
    }
}
