//! Image Repository Implementation
//!
//! GridFS 버킷에 이미지 바이너리를 저장합니다. 파일 이름은 `object_path()`로 만든
//! `{folder}/{owner}/{uuid}.{ext}` 형태이고, 콘텐츠 타입과 SHA-256은 파일 메타데이터에 기록됩니다.

use std::sync::Arc;
use futures_util::io::{AsyncReadExt, AsyncWriteExt};
use mongodb::bson::{doc, oid::ObjectId, Bson};
use mongodb::gridfs::GridFsBucket;
use sha2::{Digest, Sha256};
use crate::{
    caching::redis::RedisClient,
    config::StorageConfig,
    core::{errors::AppError, registry::Repository},
    db::Database,
};
use singleton_macro::repository;

/// 업로드된 이미지 정보
#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub id: ObjectId,
    pub path: String,
    pub content_type: String,
    pub size: u64,
    pub sha256: String,
}

impl StoredImage {
    /// `GET /api/v1/images/{id}` 공개 URL
    pub fn public_url(&self) -> String {
        format!("{}/api/v1/images/{}", StorageConfig::public_base_url(), self.id.to_hex())
    }
}

/// 다운로드한 이미지
#[derive(Debug, Clone)]
pub struct ImageData {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[repository(name = "image", collection = "images.files")]
pub struct ImageRepository {
    db: Arc<Database>,

    redis: Arc<RedisClient>,
}

impl ImageRepository {
    fn bucket(&self) -> GridFsBucket {
        self.db.gridfs_bucket(&StorageConfig::bucket_name())
    }

    pub async fn upload(
        &self,
        path: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredImage, AppError> {
        let sha256 = content_hash(bytes);
        let id = ObjectId::new();

        let mut stream = self.bucket()
            .open_upload_stream(path)
            .id(Bson::ObjectId(id))
            .metadata(doc! { "content_type": content_type, "sha256": sha256.as_str() })
            .await
            .map_err(|e| AppError::StorageError(e.to_string()))?;

        stream
            .write_all(bytes)
            .await
            .map_err(|e| AppError::StorageError(format!("GridFS 쓰기 실패: {}", e)))?;
        stream
            .close()
            .await
            .map_err(|e| AppError::StorageError(format!("GridFS 업로드 마무리 실패: {}", e)))?;

        Ok(StoredImage {
            id,
            path: path.to_string(),
            content_type: content_type.to_string(),
            size: bytes.len() as u64,
            sha256,
        })
    }

    /// 파일이 없으면 `None`
    pub async fn download(&self, id: &ObjectId) -> Result<Option<ImageData>, AppError> {
        let bucket = self.bucket();

        let Some(file) = bucket
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::StorageError(e.to_string()))?
        else {
            return Ok(None);
        };

        let content_type = file
            .metadata
            .as_ref()
            .and_then(|metadata| metadata.get_str("content_type").ok())
            .unwrap_or("application/octet-stream")
            .to_string();

        let mut stream = bucket
            .open_download_stream(Bson::ObjectId(*id))
            .await
            .map_err(|e| AppError::StorageError(e.to_string()))?;

        let mut bytes = Vec::with_capacity(file.length as usize);
        stream
            .read_to_end(&mut bytes)
            .await
            .map_err(|e| AppError::StorageError(format!("GridFS 읽기 실패: {}", e)))?;

        Ok(Some(ImageData { content_type, bytes }))
    }

    pub async fn delete(&self, id: &ObjectId) -> Result<(), AppError> {
        self.bucket()
            .delete(Bson::ObjectId(*id))
            .await
            .map_err(|e| AppError::StorageError(e.to_string()))
    }
}

/// 저장 경로 `{folder}/{owner}/{uuid}.{ext}`
///
/// `owner`는 URL 인코딩됩니다.
pub fn object_path(folder: &str, owner: &str, content_type: &str) -> String {
    format!(
        "{}/{}/{}.{}",
        folder.trim_matches('/'),
        urlencoding::encode(owner),
        uuid::Uuid::new_v4(),
        extension_for(content_type)
    )
}

pub fn extension_for(content_type: &str) -> &'static str {
    let essence = content_type.split(';').next().unwrap_or_default().trim();

    match essence.to_ascii_lowercase().as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
}

/// SHA-256 (소문자 hex)
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path_layout() {
        let path = object_path("/avatars/", "user 1", "image/png");
        let parts: Vec<&str> = path.split('/').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "avatars");
        assert_eq!(parts[1], "user%201");
        assert!(parts[2].ends_with(".png"));
        assert_eq!(parts[2].len(), 36 + 4);
    }

    #[test]
    fn test_object_paths_are_unique() {
        assert_ne!(
            object_path("items", "item", "image/webp"),
            object_path("items", "item", "image/webp")
        );
    }

    #[test]
    fn test_extension_for_content_type() {
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("IMAGE/PNG; charset=binary"), "png");
        assert_eq!(extension_for("application/pdf"), "bin");
    }

    #[test]
    fn test_content_hash() {
        assert_eq!(
            content_hash(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
