//! # Domain Entities
//!
//! MongoDB에 저장되는 문서 타입들입니다. 모든 엔티티는 `serde`로 BSON과
//! 직접 매핑되며, 필드 이름은 snake_case 그대로 저장됩니다.
//!
//! | 모듈 | 엔티티 | 컬렉션 |
//! |------|--------|--------|
//! | [`users`] | `User` | `users` |
//! | [`items`] | `Item`, `Rarity`, `UserItem` | `items`, `user_items` |
//! | [`friends`] | `Friend`, `FriendStatus` | `friends` |
//! | [`profiles`] | `UserProfile` | `user_profiles` |
//! | [`gacha`] | `LootBox`, `DropRate` | `loot_boxes` |
//!
//! 참조 무결성은 문서 DB가 보장하지 않습니다. 예를 들어 삭제된 아이템을 가리키는
//! `UserItem`이 남을 수 있으며, 전투력 계산에서는 이런 기록을 0으로 취급합니다.

pub mod users;
pub mod items;
pub mod friends;
pub mod profiles;
pub mod gacha;
