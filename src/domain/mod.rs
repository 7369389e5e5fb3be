//! # Domain Layer
//!
//! 가챠 서비스의 도메인 타입을 모아 둔 계층입니다.
//!
//! ```text
//! domain/
//! ├── entities/   # MongoDB 문서 (User, Item, UserItem, Friend, UserProfile, LootBox)
//! ├── dto/        # HTTP 요청/응답 본문
//! └── models/     # 요청 단위 모델 (인증 사용자, 토큰 클레임)
//! ```
//!
//! 엔티티는 `serde`로 BSON과 직접 매핑되며, 외부로 나갈 때는 항상 DTO로 변환됩니다.
//! `models`는 `crate::domain::auth`, `crate::domain::token` 경로로도 접근할 수 있습니다.

pub mod entities;
pub mod dto;
pub mod models;

pub use models::*;
