//! 인증 관련 서비스
//!
//! 액세스 토큰 검증만 담당합니다. 토큰 발급과 계정 관리는 외부 인증 서비스 몫입니다.

pub mod token_service;

pub use token_service::*;
