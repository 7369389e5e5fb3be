//! Items Entity Module
//!
//! - [`item::Item`] / [`item::Rarity`] - 아이템 카탈로그
//! - [`user_item::UserItem`] - 사용자별 소유 기록

pub mod item;
pub mod user_item;
