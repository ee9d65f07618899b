use std::sync::OnceLock;
use std::time::{Duration, Instant};

use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend};
use tokio::time::timeout;

use super::dto::{DatabaseCheck, HealthStatus};
#[cfg(test)]
use super::dto::HealthState;

/// 서버 시작 시간 (전역)
static START_TIME: OnceLock<Instant> = OnceLock::new();

/// DB ping 타임아웃
const DB_CHECK_TIMEOUT: Duration = Duration::from_secs(3);

/// Degraded 상태 임계값
const DEGRADED_THRESHOLD: Duration = Duration::from_millis(500);

/// 서버 시작 시간 초기화
///
/// main 함수에서 서버 시작 시 호출해야 합니다.
pub fn init_start_time() {
    START_TIME.get_or_init(Instant::now);
}

pub fn get_uptime_secs() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

/// 전체 헬스 체크 수행
pub async fn check_health(db: &DatabaseConnection) -> HealthStatus {
    let database = check_database(db).await;

    HealthStatus {
        status: database.state(DEGRADED_THRESHOLD.as_millis() as u64),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: get_uptime_secs(),
        database,
    }
}

fn backend_name(backend: DbBackend) -> &'static str {
    match backend {
        DbBackend::MySql => "mysql",
        DbBackend::Postgres => "postgres",
        DbBackend::Sqlite => "sqlite",
    }
}

async fn check_database(db: &DatabaseConnection) -> DatabaseCheck {
    let backend = backend_name(db.get_database_backend());
    let start = Instant::now();
    let result = timeout(DB_CHECK_TIMEOUT, db.ping()).await;
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(Ok(())) => {
            tracing::debug!(latency_ms, "Database health check passed");
            DatabaseCheck::reachable(backend, latency_ms)
        }
        Ok(Err(e)) => {
            tracing::warn!(latency_ms, error = %e, "Database health check failed");
            DatabaseCheck::unreachable(backend, latency_ms, e.to_string())
        }
        Err(_) => {
            tracing::warn!("Database health check timed out");
            DatabaseCheck::unreachable(backend, DB_CHECK_TIMEOUT.as_millis() as u64, "Timeout")
        }
    }
}
