//! # Application Error Handling
//!
//! 가챠 서비스 전역에서 사용하는 에러 타입입니다.
//! 모든 서비스/리포지토리 메서드는 `AppResult<T>`를 반환하고,
//! 핸들러에서는 `actix_web::ResponseError` 구현을 통해 자동으로 JSON 에러 응답으로 변환됩니다.
//!
//! ## 상태 코드 매핑
//!
//! | 변형 | HTTP 상태 |
//! |------|-----------|
//! | `ValidationError` | 400 Bad Request |
//! | `AuthenticationError` | 401 Unauthorized |
//! | `InsufficientFunds` | 402 Payment Required |
//! | `AuthorizationError` | 403 Forbidden |
//! | `NotFound` | 404 Not Found |
//! | `ConflictError` | 409 Conflict |
//! | `PayloadTooLarge` | 413 Payload Too Large |
//! | 그 외 | 500 Internal Server Error |
//!
//! ## 응답 형식
//!
//! ```json
//! { "error": "Not found: 아이템을 찾을 수 없습니다" }
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::core::errors::{AppError, AppResult};
//!
//! async fn find_item(&self, id: &str) -> AppResult<Item> {
//!     self.item_repo
//!         .find_by_id(id)
//!         .await?
//!         .ok_or_else(|| AppError::NotFound("아이템을 찾을 수 없습니다".to_string()))
//! }
//! ```

use thiserror::Error;

/// 애플리케이션 전역 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// MongoDB 연산 실패
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 연산 실패
    #[error("Redis error: {0}")]
    RedisError(String),

    /// GridFS 이미지 저장소 연산 실패
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 입력값 검증 실패
    ///
    /// 잘못된 ObjectId, 허용되지 않는 수량, 요청 DTO 검증 실패 등
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 없음
    #[error("Not found: {0}")]
    NotFound(String),

    /// 중복/상태 충돌
    ///
    /// 이미 가입된 사용자, 이미 존재하는 친구 관계, PENDING이 아닌 요청에 대한 응답 등
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 (토큰 누락/만료/서명 불일치)
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 가챠 코인 부족
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(String),

    /// 업로드 크기 제한 초과
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// 그 밖의 내부 오류
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 에러에 대응하는 HTTP 상태 코드
    pub fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::InsufficientFunds(_) => StatusCode::PAYMENT_REQUIRED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        AppError::status_code(self)
    }

    /// 5xx 에러는 서버 로그에 남기고, 클라이언트에는 메시지만 전달합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = AppError::status_code(self);

        if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        }

        actix_web::HttpResponse::build(status)
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

/// MongoDB 유니크 인덱스 위반 코드
pub const DUPLICATE_KEY_CODE: i32 = 11000;

/// 유니크 인덱스 위반인지 확인합니다.
pub fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    matches!(
        e.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY_CODE
    )
}

impl AppError {
    /// 쓰기 에러 변환. 유니크 인덱스 위반은 `ConflictError`, 나머지는 `DatabaseError`입니다.
    pub fn from_write(e: mongodb::error::Error, conflict_message: &str) -> Self {
        if is_duplicate_key(&e) {
            AppError::ConflictError(conflict_message.to_string())
        } else {
            AppError::DatabaseError(e.to_string())
        }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::DatabaseError(e.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::RedisError(e.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 `AppError::InternalError`로 변환하는 확장 trait
///
/// ```rust,ignore
/// let json = serde_json::to_vec_pretty(&index).context("인덱스 직렬화 실패")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저로 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;
    use mongodb::bson::doc;
    use mongodb::error::{ErrorKind, WriteError, WriteFailure};

    fn write_error(code: i32) -> mongodb::error::Error {
        let write_error: WriteError = mongodb::bson::from_document(doc! {
            "code": code,
            "errmsg": "E11000 duplicate key error collection: gacha.friends",
        })
        .unwrap();

        mongodb::error::Error::from(ErrorKind::Write(WriteFailure::WriteError(write_error)))
    }

    #[test]
    fn test_duplicate_key_becomes_conflict() {
        let error = AppError::from_write(write_error(DUPLICATE_KEY_CODE), "이미 존재합니다");

        assert!(matches!(error, AppError::ConflictError(_)));
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_other_write_errors_stay_database_errors() {
        let error = AppError::from_write(write_error(121), "이미 존재합니다");

        assert!(matches!(error, AppError::DatabaseError(_)));
        assert!(!is_duplicate_key(&mongodb::error::Error::custom("network")));
    }

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("quantity must be positive".to_string());
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("Item not found".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_insufficient_funds_maps_to_payment_required() {
        let error = AppError::InsufficientFunds("need 300 coins".to_string());
        assert_eq!(error.error_response().status(), StatusCode::PAYMENT_REQUIRED);
    }

    #[test]
    fn test_conflict_and_auth_errors() {
        assert_eq!(
            AppError::ConflictError("dup".to_string()).error_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::AuthenticationError("expired".to_string()).error_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::AuthorizationError("admin only".to_string()).error_response().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_storage_error_is_internal() {
        let error = AppError::StorageError("gridfs down".to_string());
        assert_eq!(error.error_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_payload_too_large() {
        let error = AppError::PayloadTooLarge("6MB".to_string());
        assert_eq!(error.error_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            _ => panic!("Expected InternalError"),
        }
    }
}
