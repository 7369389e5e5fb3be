//! 총 전투력 집계 서비스
//!
//! 사용자 문서의 `total_power`는 소유 기록에서 파생되는 값입니다. 소유 기록이나
//! 아이템 전투력이 바뀌는 모든 경로는 [`PowerService::recalculate_total_power`]로 끝납니다.

pub mod power_service;

pub use power_service::*;
