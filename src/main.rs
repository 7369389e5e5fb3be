//! 가챠 서비스 메인 애플리케이션
//!
//! MongoDB, Redis 연결을 설정하고 싱글톤 서비스를 초기화한 뒤
//! Actix-web HTTP 서버를 구동합니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, App, HttpServer};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use gacha_service_backend::caching::redis::RedisClient;
use gacha_service_backend::config::{Environment, RateLimitConfig, ServerConfig};
use gacha_service_backend::core::registry::ServiceLocator;
use gacha_service_backend::db::Database;
use gacha_service_backend::repositories::{
    friends::friend_repo::FriendRepository,
    gacha::loot_box_repo::LootBoxRepository,
    inventory::user_item_repo::UserItemRepository,
    items::item_repo::ItemRepository,
    users::user_repo::UserRepository,
};
use gacha_service_backend::routes::configure_all_routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🚀 가챠 서비스 시작중...");

    let (database, redis_client) = initialize_data_stores().await?;

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| std::io::Error::other(format!("서비스 초기화 실패: {}", e)))?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    ensure_indexes().await;

    start_http_server().await
}

async fn start_http_server() -> std::io::Result<()> {
    let bind_address = ServerConfig::bind_address();

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    let rate_limit_config = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limit 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
        .bind(&bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// PROFILE 환경변수에 따라 `.env.dev` / `.env.prod` / `.env`를 로드합니다.
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG` 미지정 시 "info,actix_web=debug"
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
    info!("Current environment: {:?}", Environment::current());
}

async fn initialize_data_stores() -> std::io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new()
        .await
        .map_err(|e| std::io::Error::other(format!("데이터베이스 연결 실패: {}", e)))?;

    info!("✅ MongoDB 연결 성공");

    let redis_client = RedisClient::new()
        .await
        .map_err(|e| std::io::Error::other(format!("Redis 연결 실패: {}", e)))?;

    info!("✅ Redis 연결 성공");

    Ok((Arc::new(database), Arc::new(redis_client)))
}

/// 인덱스 생성 실패는 서버 기동을 막지 않습니다.
async fn ensure_indexes() {
    let results = [
        ("users", UserRepository::instance().create_indexes().await),
        ("items", ItemRepository::instance().create_indexes().await),
        ("user_items", UserItemRepository::instance().create_indexes().await),
        ("friends", FriendRepository::instance().create_indexes().await),
        ("loot_boxes", LootBoxRepository::instance().create_indexes().await),
    ];

    for (collection, result) in results {
        match result {
            Ok(()) => info!("📇 {} 인덱스 준비 완료", collection),
            Err(e) => warn!("{} 인덱스 생성 실패: {}", collection, e),
        }
    }
}

fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
