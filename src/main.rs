//! # HSK Studio 웹 서버 진입점
//!
//! 이 파일은 HSK Studio 백엔드 애플리케이션의 **시작점(entry point)**입니다.
//! Rust 프로그램은 항상 `main()` 함수에서 실행이 시작됩니다.
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. SQLite 데이터베이스 연결 풀 생성
//! 4. 데이터베이스 마이그레이션 실행
//! 5. 업로드 파일 저장 디렉토리 생성
//! 6. 관리자 계정과 기본 HSK 급수 시드
//! 7. API 라우터 조립 및 HTTP 서버 시작

use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hskstudio::{config::Config, db::seed, routes::AppState, services::cache::ListCache};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .ok()는 Result를 Option으로 변환하여, .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG 환경변수가 없으면 기본값으로 우리 크레이트와
    // tower_http, axum 모듈을 debug 레벨로 설정합니다.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hskstudio=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env()?;
    tracing::info!("Starting HSK Studio server on {}:{}", config.host, config.port);

    // ── 4단계: SQLite 연결 풀 생성 ──
    // 외래키 제약을 SQLite에서 켜야 RESTRICT 삭제 규칙이 동작합니다.
    // create_if_missing: DB 파일이 없으면 새로 만듭니다.
    let connect_options = SqliteConnectOptions::from_str(&config.database_url)?
        .foreign_keys(true)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    // ── 5단계: 데이터베이스 마이그레이션 실행 ──
    // sqlx::migrate!는 컴파일 타임에 ./migrations 폴더의 SQL 파일들을 포함시키는 매크로
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    // ── 6단계: 업로드 디렉토리 생성 ──
    let uploads_path = Path::new(&config.uploads_path);
    if !uploads_path.exists() {
        tokio::fs::create_dir_all(uploads_path).await?;
        tracing::info!("Created uploads directory: {}", config.uploads_path);
    }

    // ── 7단계: 부팅 시드 ──
    // 관리자 계정과 HSK 1~6 기본 급수를 멱등하게 보장합니다.
    seed::ensure_admin_user(&pool, &config.admin_email, &config.admin_password).await?;
    seed::ensure_default_levels(&pool).await?;

    // ── 8단계: 애플리케이션 상태(State) 생성 ──
    // SqlitePool과 ListCache는 내부적으로 Arc를 사용하므로
    // clone해도 같은 풀/캐시를 가리킵니다.
    let state = AppState {
        pool: pool.clone(),
        uploads_path: config.uploads_path.clone(),
        public_base_url: config.public_base_url.clone(),
        jwt_secret: config.jwt_secret.clone(),
        cache: ListCache::new(),
    };

    // ── 9단계: 라우터 조립 및 서버 시작 ──
    let app = hskstudio::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
