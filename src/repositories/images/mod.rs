//! GridFS 이미지 저장소
//!
//! 아이템 이미지와 프로필 아바타를 `StorageConfig::bucket_name()` 버킷에 저장합니다.

pub mod image_repo;
