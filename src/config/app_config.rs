use std::env;

/// 애플리케이션 설정
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// true이면 시작 시 엔티티 기준으로 테이블을 생성
    pub db_schema_update: bool,
    /// None이면 파일 로그를 남기지 않음
    pub log_dir: Option<String>,
    /// CORS 허용 Origin 목록 (비어 있으면 모두 허용)
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if is_production() => return Err(ConfigError::MissingJwtSecret),
            _ => {
                tracing::warn!("JWT_SECRET is not set; using an insecure development secret.");
                "secret".to_string()
            }
        };

        let db_schema_update = parse_bool("DB_SCHEMA_UPDATE", false)?;

        let log_dir = match env::var("LOG_DIR") {
            Ok(dir) if dir.eq_ignore_ascii_case("none") => None,
            Ok(dir) if !dir.is_empty() => Some(dir),
            _ => Some("logs".to_string()),
        };

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            server_port,
            database_url,
            jwt_secret,
            db_schema_update,
            log_dir,
            allowed_origins,
        })
    }
}

fn is_production() -> bool {
    env::var("APP_ENV")
        .map(|v| v.eq_ignore_ascii_case("production"))
        .unwrap_or(false)
}

fn parse_bool(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<bool>()
            .map_err(|_| ConfigError::InvalidBool(key)),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("DATABASE_URL environment variable is required")]
    MissingDatabaseUrl,
    #[error("JWT_SECRET environment variable is required in production")]
    MissingJwtSecret,
    #[error("{0} must be 'true' or 'false'")]
    InvalidBool(&'static str),
}
