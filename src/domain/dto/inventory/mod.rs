//! 보유 아이템(인벤토리) DTO

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
