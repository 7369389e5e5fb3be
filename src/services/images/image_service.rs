//! 이미지 업로드/삭제 서비스
//!
//! 업로드 실패는 로그를 남기고 호출자에게 그대로 돌려줍니다.
//! 삭제 실패는 로그만 남기고 삼킵니다.

use std::sync::Arc;
use mongodb::bson::oid::ObjectId;
use singleton_macro::service;
use crate::{
    config::StorageConfig,
    core::errors::AppError,
    domain::dto::images::ImageUploadResponse,
    repositories::images::image_repo::{object_path, ImageData, ImageRepository, StoredImage},
};

/// 업로드 결과를 응답 DTO로 변환합니다.
pub fn upload_response(stored: &StoredImage) -> ImageUploadResponse {
    ImageUploadResponse {
        id: stored.id.to_hex(),
        path: stored.path.clone(),
        url: stored.public_url(),
        content_type: stored.content_type.clone(),
        size: stored.size,
        sha256: stored.sha256.clone(),
    }
}

/// 업로드 전 타입/크기 검사
pub fn validate_image(content_type: &str, size: usize, max_bytes: usize) -> Result<(), AppError> {
    if !StorageConfig::is_allowed_content_type(content_type) {
        return Err(AppError::ValidationError(format!(
            "지원하지 않는 이미지 형식입니다: {} (허용: {})",
            content_type,
            StorageConfig::ALLOWED_CONTENT_TYPES.join(", ")
        )));
    }

    if size == 0 {
        return Err(AppError::ValidationError("빈 파일은 업로드할 수 없습니다".to_string()));
    }

    if size > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "이미지 크기 {}바이트가 제한 {}바이트를 넘습니다",
            size, max_bytes
        )));
    }

    Ok(())
}

#[service(name = "image")]
pub struct ImageService {
    image_repo: Arc<ImageRepository>,
}

impl ImageService {
    /// `{folder}/{owner}/...` 경로에 이미지를 저장합니다.
    pub async fn upload_image(
        &self,
        folder: &str,
        owner: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<StoredImage, AppError> {
        validate_image(content_type, bytes.len(), StorageConfig::max_upload_bytes())?;

        let path = object_path(folder, owner, content_type);

        match self.image_repo.upload(&path, content_type, bytes).await {
            Ok(stored) => {
                log::info!("🖼️ 이미지 업로드 완료: {} ({}바이트)", stored.path, stored.size);
                Ok(stored)
            }
            Err(e) => {
                log::error!("❌ 이미지 업로드 실패 ({}): {}", path, e);
                Err(e)
            }
        }
    }

    /// 실패해도 에러를 반환하지 않습니다.
    pub async fn delete_image(&self, id: &ObjectId) {
        match self.image_repo.delete(id).await {
            Ok(()) => log::info!("🗑️ 이미지 삭제 완료: {}", id.to_hex()),
            Err(e) => log::error!("❌ 이미지 삭제 실패 ({}): {}", id.to_hex(), e),
        }
    }

    pub async fn get_image(&self, id: &ObjectId) -> Result<ImageData, AppError> {
        self.image_repo
            .download(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("이미지를 찾을 수 없습니다: {}", id.to_hex())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_image_accepts_allowed_types() {
        assert!(validate_image("image/png", 10, 100).is_ok());
        assert!(validate_image("image/webp", 100, 100).is_ok());
    }

    #[test]
    fn test_validate_image_rejects_bad_type() {
        assert!(matches!(
            validate_image("text/html", 10, 100),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_image_size_limits() {
        assert!(matches!(
            validate_image("image/png", 0, 100),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            validate_image("image/png", 101, 100),
            Err(AppError::PayloadTooLarge(_))
        ));
    }

    #[test]
    fn test_upload_response_uses_public_url() {
        let stored = StoredImage {
            id: ObjectId::new(),
            path: "items/abc/1.png".to_string(),
            content_type: "image/png".to_string(),
            size: 42,
            sha256: "ab".repeat(32),
        };

        let response = upload_response(&stored);

        assert_eq!(response.id, stored.id.to_hex());
        assert!(response.url.ends_with(&format!("/api/v1/images/{}", stored.id.to_hex())));
        assert_eq!(response.size, 42);
    }
}
