//! 사용자 관련 요청/응답 DTO
//!
//! `users` 컬렉션 문서는 그대로 노출하지 않고 [`UserResponse`]로 변환해서 내보냅니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
