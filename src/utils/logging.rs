//! 로깅 초기화 모듈
//!
//! JSON 형식의 구조화된 로그를 stdout에 출력하고,
//! 로그 디렉토리가 설정된 경우 일별 롤링 파일에도 함께 기록합니다.

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,taskhub=debug,sea_orm=warn,sqlx=warn";

/// 로깅 시스템을 초기화합니다.
///
/// `RUST_LOG`로 레벨을 조정할 수 있으며 기본값은 `info,taskhub=debug`입니다.
/// `log_dir`가 `Some`이면 `taskhub.log.YYYY-MM-DD` 파일에도 기록합니다.
///
/// 반환되는 `WorkerGuard`는 main에서 유지해야 종료 시 버퍼링된 로그가 유실되지 않습니다.
pub fn init_logging(log_dir: Option<&str>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stdout_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true)
        .flatten_event(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let (writer, guard) = tracing_appender::non_blocking(rolling::daily(dir, "taskhub.log"));
            let layer = fmt::layer()
                .json()
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_current_span(true)
                .flatten_event(false)
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init();

    // 테스트 등에서 이미 초기화된 경우는 무시
    if let Err(err) = result {
        eprintln!("tracing already initialized or failed to initialize: {}", err);
    }

    guard
}
