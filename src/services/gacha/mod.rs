//! 가챠 박스 서비스
//!
//! 뽑기 로직([`roll_rarity`], [`pick_item`])은 난수 생성기를 인자로 받는 순수 함수라서
//! 시드를 고정한 생성기로 테스트할 수 있습니다.

pub mod gacha_service;

pub use gacha_service::*;
