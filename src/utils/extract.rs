//! 추출 실패도 공통 에러 응답(`ErrorResponse`) 형식으로 내려주는 extractor

use axum::extract::{FromRequest, FromRequestParts};

use super::error::AppError;

/// JSON 본문 파싱 실패를 `AppError::JsonParseFailed`로 변환
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// 쿼리 파라미터 파싱 실패를 `AppError::BadRequest`로 변환
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
