//! 소유 기록(`user_items`) 리포지토리
//!
//! 사용자별 아이템 수량을 저장합니다. 전투력 재계산의 입력이 됩니다.

pub mod user_item_repo;
