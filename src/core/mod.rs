//! # Core Framework Module
//!
//! 서비스 전반에서 공유하는 프레임워크 기능입니다.
//!
//! - [`registry`] - `#[service]` / `#[repository]` 싱글톤 레지스트리 (`ServiceLocator`)
//! - [`errors`] - `AppError` 및 HTTP 응답 매핑
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use singleton_macro::service;
//!
//! #[service(name = "power")]
//! pub struct PowerService {
//!     user_repo: Arc<UserRepository>,        // 자동 주입
//!     user_item_repo: Arc<UserItemRepository>,
//!     item_repo: Arc<ItemRepository>,
//! }
//!
//! let power_service = PowerService::instance();
//! let total = power_service.recalculate_total_power(&uid).await?;
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
