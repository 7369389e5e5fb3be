//! 서버, 가챠, 저장소 설정 관리 모듈
//!
//! 모든 값은 환경 변수에서 읽으며, 누락되거나 파싱할 수 없으면 기본값을 사용합니다.

use std::env;

/// 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경 변수 기준 현재 환경 (기본값: Production)
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 환경 변수를 파싱하고, 실패하면 기본값을 반환합니다.
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} 파싱 실패 ('{}'), 기본값 사용", key, raw);
            default
        }),
        Err(_) => default,
    }
}

pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env_or("PORT", 8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string())
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }

    pub fn workers() -> usize {
        env_or("SERVER_WORKERS", 4).max(1)
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// `RATE_LIMIT_PER_SECOND`(기본 100), `RATE_LIMIT_BURST_SIZE`(기본 200)
    pub fn load() -> Self {
        Self {
            per_second: env_or("RATE_LIMIT_PER_SECOND", 100u64).max(1),
            burst_size: env_or("RATE_LIMIT_BURST_SIZE", 200u32).max(1),
        }
    }
}

/// 가챠/랭킹 관련 설정
pub struct GachaConfig;

impl GachaConfig {
    pub const MAX_RANKING_LIMIT: u32 = 100;

    /// 가입 시 지급하는 코인 (`GACHA_STARTING_COINS`, 기본 1000)
    pub fn starting_coins() -> i64 {
        env_or("GACHA_STARTING_COINS", 1000i64).max(0)
    }

    /// 랭킹 페이지 기본 크기 (`RANKING_LIMIT`, 기본 50)
    pub fn ranking_limit() -> u32 {
        Self::clamp_ranking_limit(env_or("RANKING_LIMIT", 50u32))
    }

    pub fn clamp_ranking_limit(limit: u32) -> u32 {
        limit.clamp(1, Self::MAX_RANKING_LIMIT)
    }

    /// 전역 랭킹 스냅샷 캐시 TTL (`RANKING_CACHE_SECONDS`, 기본 30초)
    pub fn ranking_cache_seconds() -> u64 {
        env_or("RANKING_CACHE_SECONDS", 30u64)
    }

    /// 한 번에 열 수 있는 최대 박스 수
    pub fn max_pulls_per_open() -> u32 {
        env_or("GACHA_MAX_PULLS", 10u32).max(1)
    }
}

/// GridFS 이미지 저장소 설정
pub struct StorageConfig;

impl StorageConfig {
    pub const ALLOWED_CONTENT_TYPES: [&'static str; 4] =
        ["image/png", "image/jpeg", "image/gif", "image/webp"];

    /// GridFS 버킷 이름 (`STORAGE_BUCKET`, 기본 `images`)
    pub fn bucket_name() -> String {
        env::var("STORAGE_BUCKET").unwrap_or_else(|_| "images".to_string())
    }

    /// 업로드 최대 크기 (`MAX_UPLOAD_BYTES`, 기본 5 MiB)
    pub fn max_upload_bytes() -> usize {
        env_or("MAX_UPLOAD_BYTES", 5 * 1024 * 1024usize)
    }

    /// 이미지 URL 앞부분 (`PUBLIC_BASE_URL`, 기본값은 상대 경로)
    pub fn public_base_url() -> String {
        env::var("PUBLIC_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_default()
    }

    pub fn is_allowed_content_type(content_type: &str) -> bool {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        Self::ALLOWED_CONTENT_TYPES.contains(&essence.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_from_string() {
        assert_eq!(Environment::from_str("development"), Environment::Development);
        assert_eq!(Environment::from_str("DEV"), Environment::Development);
        assert_eq!(Environment::from_str("test"), Environment::Test);
        assert_eq!(Environment::from_str("stage"), Environment::Staging);
        assert_eq!(Environment::from_str("unknown"), Environment::Production);
        assert_eq!(Environment::from_str("PROD"), Environment::Production);
    }

    #[test]
    fn test_ranking_limit_is_clamped() {
        assert_eq!(GachaConfig::clamp_ranking_limit(0), 1);
        assert_eq!(GachaConfig::clamp_ranking_limit(25), 25);
        assert_eq!(GachaConfig::clamp_ranking_limit(5000), GachaConfig::MAX_RANKING_LIMIT);
    }

    #[test]
    fn test_allowed_content_types() {
        assert!(StorageConfig::is_allowed_content_type("image/png"));
        assert!(StorageConfig::is_allowed_content_type("IMAGE/JPEG"));
        assert!(StorageConfig::is_allowed_content_type("image/webp; charset=binary"));
        assert!(!StorageConfig::is_allowed_content_type("image/svg+xml"));
        assert!(!StorageConfig::is_allowed_content_type("application/octet-stream"));
        assert!(!StorageConfig::is_allowed_content_type(""));
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "127.0.0.1");
        }
    }

    #[test]
    fn test_env_or_falls_back_on_missing_key() {
        assert_eq!(env_or("GACHA_TEST_SURELY_MISSING_KEY", 42u32), 42);
    }
}
