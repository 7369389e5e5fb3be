//! 미들웨어 모듈
//!
//! - [`AuthMiddleware`] - Bearer 토큰 검증, 필수/선택 모드, 역할 검사
//!
//! 요청 로그(`middleware::Logger`), CORS, 속도 제한(`actix-governor`)은 `main.rs`에서
//! 애플리케이션 전체에 등록합니다.

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
