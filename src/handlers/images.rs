//! # Image HTTP Handlers
//!
//! GridFS에 저장된 이미지를 그대로 내려줍니다. 업로드는 아이템/프로필 핸들러가 담당합니다.

use actix_web::{http::header, web, HttpRequest, HttpResponse, get};
use crate::config::StorageConfig;
use crate::core::errors::AppError;
use crate::services::images::ImageService;
use crate::utils::string_utils::parse_object_id;

#[get("/{image_id}")]
pub async fn get_image(
    image_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&image_id, "image_id")?;

    let service = ImageService::instance();
    let image = service.get_image(&id).await?;

    Ok(HttpResponse::Ok()
        .content_type(image.content_type)
        .insert_header((header::CACHE_CONTROL, "public, max-age=86400, immutable"))
        .body(image.bytes))
}

/// 업로드 요청의 `Content-Type`. 허용된 이미지 형식만 통과합니다.
pub fn request_content_type(req: &HttpRequest) -> Result<String, AppError> {
    let content_type = req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .ok_or_else(|| AppError::ValidationError("Content-Type 헤더가 필요합니다".to_string()))?;

    if !StorageConfig::is_allowed_content_type(&content_type) {
        return Err(AppError::ValidationError(format!(
            "지원하지 않는 이미지 형식입니다: {}",
            content_type
        )));
    }

    Ok(content_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_request_content_type() {
        let req = TestRequest::default()
            .insert_header((header::CONTENT_TYPE, "image/png"))
            .to_http_request();
        assert_eq!(request_content_type(&req).unwrap(), "image/png");

        let req = TestRequest::default()
            .insert_header((header::CONTENT_TYPE, "text/plain"))
            .to_http_request();
        assert!(request_content_type(&req).is_err());

        let req = TestRequest::default().to_http_request();
        assert!(request_content_type(&req).is_err());
    }
}
