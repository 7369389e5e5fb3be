//! # Service Layer
//!
//! 비즈니스 로직 계층입니다. 모든 서비스는 `#[service]` 매크로로 싱글톤 등록되며,
//! 필드로 선언한 리포지토리/서비스는 `ServiceLocator`가 주입합니다.
//!
//! ```text
//! ItemService ─┐
//! InventoryService ─┼──▶ PowerService ──▶ UserRepository / ItemRepository / UserItemRepository
//! GachaService ─┘
//! RankingService ──▶ FriendService
//! ProfileService / UserService / ItemService ──▶ ImageService ──▶ ImageRepository
//! ```

pub mod auth;
pub mod power;
pub mod users;
pub mod items;
pub mod inventory;
pub mod gacha;
pub mod friends;
pub mod rankings;
pub mod profiles;
pub mod images;
