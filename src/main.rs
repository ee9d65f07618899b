use std::net::SocketAddr;

use taskhub::config::{establish_connection, AppConfig};
use taskhub::domain::health::init_start_time;
use taskhub::shutdown::shutdown_signal;
use taskhub::utils::logging::init_logging;
use taskhub::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 설정 로드 (로그 디렉토리가 설정에 있으므로 로깅보다 먼저)
    let config = AppConfig::from_env()?;

    // 3. 로깅 초기화 (guard는 main이 끝날 때까지 유지)
    let _log_guard = init_logging(config.log_dir.as_deref());
    init_start_time();

    // 4. DB 연결 및 스키마 동기화
    let db = establish_connection(&config.database_url, config.db_schema_update).await?;

    // 5. 라우터 설정
    let port = config.server_port;
    let app = create_router(AppState { db, config });

    // 6. 서버 실행
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server listening on {}", addr);
    tracing::info!("Swagger UI: http://localhost:{}/swagger-ui", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
