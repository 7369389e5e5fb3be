//! 가챠 서비스 백엔드
//!
//! 아이템 소유, 가챠 박스 개봉, 친구, 전투력 랭킹, 프로필 꾸미기와 이미지 저장을
//! 제공하는 Actix-web 기반 REST 서비스입니다. 인증 토큰은 외부 인증 서비스가 발급하고,
//! 이 서비스는 HS256 서명만 검증합니다.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증/응답 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 전투력 계산, 가챠, 친구, 랭킹
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌──────────────────────────┐
//! │ MongoDB + GridFS + Redis │ ← 저장소
//! └──────────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use gacha_service_backend::services::power::PowerService;
//!
//! let total = PowerService::instance().recalculate_total_power("uid-123").await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
pub mod assets;
