//! Users Entity Module
//!
//! 사용자 문서([`user::User`])를 정의합니다.

pub mod user;
