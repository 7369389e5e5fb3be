//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 문자열 정리, ObjectId 파싱, BSON 시간 변환

pub mod string_utils;
