use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use tracing::error;
use validator::ValidationErrors;

use super::response::ErrorResponse;

/// 애플리케이션 전역 에러 타입
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
    InternalError(String),
    ValidationError(String),
    JsonParseFailed(String),

    UserNotFound(String),
    WorkspaceNotFound(String),
    ProjectNotFound(String),
    TaskNotFound(String),
    TagNotFound(String),
    SprintNotFound(String),
    MilestoneNotFound(String),
    NotificationNotFound(String),
    RoomNotFound(String),

    /// 워크스페이스 멤버가 아니거나 역할이 부족한 경우
    WorkspaceAccessDenied(String),
    /// 마일스톤 의존성 그래프에 순환이 생기는 경우
    DependencyCycle(String),
    /// 시작일보다 이른 종료일
    InvalidDateRange(String),
}

impl AppError {
    /// 에러 메시지 반환
    pub fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::Conflict(msg)
            | AppError::InternalError(msg)
            | AppError::ValidationError(msg)
            | AppError::UserNotFound(msg)
            | AppError::WorkspaceNotFound(msg)
            | AppError::ProjectNotFound(msg)
            | AppError::TaskNotFound(msg)
            | AppError::TagNotFound(msg)
            | AppError::SprintNotFound(msg)
            | AppError::MilestoneNotFound(msg)
            | AppError::NotificationNotFound(msg)
            | AppError::RoomNotFound(msg)
            | AppError::WorkspaceAccessDenied(msg)
            | AppError::DependencyCycle(msg)
            | AppError::InvalidDateRange(msg) => msg.clone(),
            AppError::JsonParseFailed(msg) => format!("Malformed request body: {}", msg),
        }
    }

    /// 에러 코드 반환
    pub fn error_code(&self) -> String {
        match self {
            AppError::BadRequest(_) => "COMMON400",
            AppError::Unauthorized(_) => "AUTH4001",
            AppError::Forbidden(_) => "COMMON403",
            AppError::Conflict(_) => "COMMON409",
            AppError::InternalError(_) => "COMMON500",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::UserNotFound(_) => "USER4041",
            AppError::WorkspaceNotFound(_) => "WORKSPACE4041",
            AppError::ProjectNotFound(_) => "PROJECT4041",
            AppError::TaskNotFound(_) => "TASK4041",
            AppError::TagNotFound(_) => "TASK4042",
            AppError::SprintNotFound(_) => "SPRINT4041",
            AppError::MilestoneNotFound(_) => "MILESTONE4041",
            AppError::NotificationNotFound(_) => "NOTIFICATION4041",
            AppError::RoomNotFound(_) => "ROOM4041",
            AppError::WorkspaceAccessDenied(_) => "WORKSPACE4031",
            AppError::DependencyCycle(_) => "MILESTONE4001",
            AppError::InvalidDateRange(_) => "SPRINT4001",
        }
        .to_string()
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::ValidationError(_)
            | AppError::JsonParseFailed(_)
            | AppError::DependencyCycle(_)
            | AppError::InvalidDateRange(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) | AppError::WorkspaceAccessDenied(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UserNotFound(_)
            | AppError::WorkspaceNotFound(_)
            | AppError::ProjectNotFound(_)
            | AppError::TaskNotFound(_)
            | AppError::TagNotFound(_)
            | AppError::SprintNotFound(_)
            | AppError::MilestoneNotFound(_)
            | AppError::NotificationNotFound(_)
            | AppError::RoomNotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        // 에러 로깅
        let message = match &self {
            AppError::InternalError(_) => {
                error!("Internal Server Error: {}", message);
                // DB 에러 상세 내용은 응답에 노출하지 않음
                "Internal server error".to_string()
            }
            _ => {
                error!("Error [{}]: {}", error_code, message);
                message
            }
        };

        let error_response = ErrorResponse::new(error_code, message);

        (status, Json(error_response)).into_response()
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// validator 에러를 첫 번째 필드 메시지로 변환
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for '{}'", field))
                })
            })
            .next()
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::ValidationError(message)
    }
}

/// 유니크 제약 위반은 409, FK 위반은 400, 나머지 DB 에러는 500
impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                AppError::Conflict(format!("Duplicate entry: {}", detail))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::BadRequest("Referenced resource does not exist.".to_string())
            }
            _ => AppError::InternalError(err.to_string()),
        }
    }
}

/// 편의 함수들
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        AppError::InternalError(msg.into())
    }
}
