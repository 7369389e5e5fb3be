//! # Data Transfer Objects
//!
//! HTTP 요청 본문과 응답 본문의 형태를 정의합니다.
//! 요청 DTO는 `validator`로 검증하고, 응답 DTO는 엔티티에서 `From`으로 변환합니다.
//! BSON 시간은 응답에서 RFC 3339 문자열이 되도록 `chrono`로 바꿔 내보냅니다.

pub mod users;
pub mod items;
pub mod inventory;
pub mod gacha;
pub mod friends;
pub mod rankings;
pub mod profiles;
pub mod images;
