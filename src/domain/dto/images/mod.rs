//! 이미지 업로드 응답 DTO

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUploadResponse {
    /// GridFS 파일 id
    pub id: String,
    pub path: String,
    pub url: String,
    pub content_type: String,
    pub size: u64,
    /// 내용의 SHA-256 (hex)
    pub sha256: String,
}
