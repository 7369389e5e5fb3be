//! # Redis 캐시 클라이언트
//!
//! 리포지토리 계층의 조회 캐시와 랭킹 스냅샷 캐시에 사용하는 Redis 래퍼입니다.
//! 값은 모두 JSON 문자열로 저장됩니다.
//!
//! ## 키 규칙
//!
//! | 키 | 용도 | TTL |
//! |----|------|-----|
//! | `user:{uid}` | 사용자 문서 | 600초 |
//! | `item:{id}` | 아이템 정의 | 600초 |
//! | `ranking:global:{limit}` | 전역 랭킹 스냅샷 | `RANKING_CACHE_SECONDS` |
//!
//! 캐시 실패는 조회 실패로 취급하지 않습니다. 호출 측에서 에러를 무시하고
//! MongoDB로 폴백합니다.

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

/// Redis 캐시 클라이언트
///
/// 내부적으로 `ConnectionManager`를 사용해 끊어진 연결을 자동으로 복구합니다.
/// `clone()`은 같은 멀티플렉스 연결을 공유합니다.
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    /// `REDIS_URL`(기본값 `redis://localhost:6379`)로 연결하고 PING으로 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;
        let mut manager = ConnectionManager::new(client).await?;

        redis::cmd("PING").query_async::<()>(&mut manager).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { manager })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json)
                    .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string())))?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    pub async fn set_with_expiry<T: Serialize>(&self, key: &str, value: &T, seconds: u64) -> Result<(), redis::RedisError> {
        let mut conn = self.manager.clone();
        let json = to_json(value)?;
        conn.set_ex(key, json, seconds).await
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.manager.clone();
        conn.del(key).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.manager.clone();
        conn.del(keys).await
    }

    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.manager.clone();
        conn.keys(pattern).await
    }

    /// 패턴에 맞는 키를 모두 삭제하고 삭제한 개수를 반환합니다.
    ///
    /// 랭킹 스냅샷처럼 limit별로 여러 키가 생기는 캐시를 한 번에 무효화할 때 사용합니다.
    pub async fn del_pattern(&self, pattern: &str) -> Result<usize, redis::RedisError> {
        let keys = self.keys(pattern).await?;
        let count = keys.len();
        self.del_multiple(&keys).await?;
        Ok(count)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, redis::RedisError> {
    serde_json::to_string(value)
        .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))
}
