//! 아이템 카탈로그 DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
