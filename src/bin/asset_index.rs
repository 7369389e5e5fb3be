//! 정적 이미지 디렉터리의 JSON 인덱스를 생성하는 빌드 도구
//!
//! ```bash
//! cargo run --bin asset_index -- --root public/images --out public/images/index.json \
//!   --prefix /images --ext png --ext webp --grouped
//! ```

use std::path::PathBuf;
use clap::Parser;
use env_logger::Env;
use log::{error, info};
use gacha_service_backend::assets::{build_flat_index, build_grouped_index, scan_assets, write_index};

#[derive(Debug, Parser)]
#[command(name = "asset_index")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 스캔할 디렉터리
    #[arg(short, long, value_name = "DIR")]
    root: PathBuf,

    /// 출력 JSON 파일
    #[arg(short, long, value_name = "FILE")]
    out: PathBuf,

    /// 각 경로 앞에 붙일 URL 접두사
    #[arg(short, long, default_value = "")]
    prefix: String,

    /// 첫 번째 디렉터리 기준으로 묶은 객체를 출력
    #[arg(short, long)]
    grouped: bool,

    /// 포함할 확장자 (반복 가능, 생략 시 전체)
    #[arg(short, long = "ext", value_name = "EXT")]
    extensions: Vec<String>,
}

fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("인덱스 생성 실패: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> gacha_service_backend::core::errors::AppResult<()> {
    let files = scan_assets(&args.root, &args.extensions)?;

    let index = if args.grouped {
        build_grouped_index(&args.prefix, &files)
    } else {
        build_flat_index(&args.prefix, &files)
    };

    write_index(&args.out, &index)?;

    info!("📦 {}개 파일 → {}", files.len(), args.out.display());
    Ok(())
}
