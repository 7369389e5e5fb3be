//! 아이템 정의(`items`) 리포지토리

pub mod item_repo;
