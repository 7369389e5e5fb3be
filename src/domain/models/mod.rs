//! # Domain Models
//!
//! 영속되지 않는 요청 수준 모델입니다.
//!
//! - [`auth`] - `AuthenticatedUser`, `AuthMode`, `RequiredRole`
//! - [`token`] - 검증된 JWT 클레임

pub mod auth;
pub mod token;
