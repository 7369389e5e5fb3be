//! 캐싱 계층
//!
//! [`redis::RedisClient`]는 시작 시 `ServiceLocator::set()`으로 등록되고,
//! 각 리포지토리에 `Arc<RedisClient>` 필드로 주입됩니다.
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;
