//! Database Connection Management Module
//!
//! MongoDB 연결을 관리합니다. 문서 컬렉션과 GridFS 이미지 버킷이 모두
//! 같은 데이터베이스에 위치합니다.
//!
//! # 환경 변수
//!
//! ```bash
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="gacha_dev"
//! ```
//!
//! # 컬렉션
//!
//! | 컬렉션 | 문서 |
//! |--------|------|
//! | `users` | 사용자 (`_id` = 인증 uid, `total_power` 비정규화) |
//! | `items` | 아이템 정의 |
//! | `user_items` | 소유 기록 (`user_id` + `item_id` 유니크) |
//! | `friends` | 친구 관계 |
//! | `user_profiles` | 프로필 꾸미기 |
//! | `loot_boxes` | 가챠 박스와 드롭 테이블 |
//! | `{STORAGE_BUCKET}.files` / `.chunks` | GridFS 이미지 |

use mongodb::{Client, options::ClientOptions};
use mongodb::gridfs::GridFsBucket;
use mongodb::options::GridFsBucketOptions;
use std::env;
use log::info;

/// MongoDB 데이터베이스 연결 래퍼
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// `MONGODB_URI` / `DATABASE_NAME`으로 연결하고 `ping`으로 검증합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let mongodb_uri = env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let database_name = env::var("DATABASE_NAME")
            .unwrap_or_else(|_| "gacha_dev".to_string());

        let mut client_options = ClientOptions::parse(&mongodb_uri).await?;
        client_options.app_name = Some("gacha_service".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name,
        })
    }

    /// 리포지토리가 컬렉션에 접근할 때 사용하는 데이터베이스 핸들
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    /// 이미지 저장용 GridFS 버킷
    pub fn gridfs_bucket(&self, bucket_name: &str) -> GridFsBucket {
        let options = GridFsBucketOptions::builder()
            .bucket_name(bucket_name.to_string())
            .build();

        self.get_database().gridfs_bucket(options)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database_name(&self) -> &str {
        &self.database_name
    }
}
