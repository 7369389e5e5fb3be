//! # Repository Layer
//!
//! MongoDB 컬렉션마다 하나의 리포지토리가 있으며, 모두 `#[repository]` 매크로로
//! 싱글톤 등록됩니다. 조회 결과 일부는 Redis에 캐시됩니다.
//!
//! | 리포지토리 | 컬렉션 |
//! |-----------|--------|
//! | [`UserRepository`](users::user_repo::UserRepository) | `users` |
//! | [`ItemRepository`](items::item_repo::ItemRepository) | `items` |
//! | [`UserItemRepository`](inventory::user_item_repo::UserItemRepository) | `user_items` |
//! | [`FriendRepository`](friends::friend_repo::FriendRepository) | `friends` |
//! | [`ProfileRepository`](profiles::profile_repo::ProfileRepository) | `profiles` |
//! | [`LootBoxRepository`](gacha::loot_box_repo::LootBoxRepository) | `loot_boxes` |
//! | [`ImageRepository`](images::image_repo::ImageRepository) | GridFS 버킷 |

pub mod users;
pub mod items;
pub mod inventory;
pub mod friends;
pub mod profiles;
pub mod gacha;
pub mod images;
