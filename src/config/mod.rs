//! # Configuration Module
//!
//! 환경 변수 기반 설정을 한곳에 모은 모듈입니다.
//!
//! - [`data_config`] - 실행 환경, 서버, Rate Limit, 가챠/랭킹, 이미지 저장소
//! - [`auth_config`] - 토큰 검증용 JWT 설정과 역할 이름
//!
//! ## 환경 변수 요약
//!
//! ```bash
//! # 프로필 (.env.dev / .env.prod 선택)
//! PROFILE=dev
//!
//! # 서버
//! HOST=127.0.0.1
//! PORT=8080
//! SERVER_WORKERS=4
//!
//! # 저장소
//! MONGODB_URI=mongodb://localhost:27017
//! DATABASE_NAME=gacha_dev
//! REDIS_URL=redis://localhost:6379
//! STORAGE_BUCKET=images
//! MAX_UPLOAD_BYTES=5242880
//!
//! # 가챠
//! GACHA_STARTING_COINS=1000
//! GACHA_MAX_PULLS=10
//! RANKING_LIMIT=50
//! RANKING_CACHE_SECONDS=30
//!
//! # 인증
//! JWT_SECRET=shared-secret
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
