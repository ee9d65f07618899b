use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use super::dto::{
    ChatMessageResponse, CreateRoomRequest, MessageQueryParams, RoomResponse, SendMessageRequest,
    UpdateWhiteboardRequest,
};
use super::service::RoomService;
use crate::state::AppState;
use crate::utils::auth::AuthUser;
use crate::utils::error::AppError;
use crate::utils::extract::{AppJson, AppQuery};
use crate::utils::BaseResponse;

/// 방 생성 API
#[utoipa::path(
    post,
    path = "/api/rooms",
    request_body = CreateRoomRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "생성 성공", body = RoomResponse),
        (status = 400, description = "잘못된 요청", body = ErrorResponse)
    ),
    tag = "Room"
)]
pub async fn create_room(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<CreateRoomRequest>,
) -> Result<Json<BaseResponse<RoomResponse>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = RoomService::create_room(state, user_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 방 목록 API
#[utoipa::path(
    get,
    path = "/api/rooms",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [RoomResponse]),
        (status = 401, description = "인증 실패", body = ErrorResponse)
    ),
    tag = "Room"
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<Json<BaseResponse<Vec<RoomResponse>>>, AppError> {
    let result = RoomService::list_rooms(state).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 방 조회 API
#[utoipa::path(
    get,
    path = "/api/rooms/{room_id}",
    params(("room_id" = i64, Path, description = "방 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = RoomResponse),
        (status = 404, description = "Room not found", body = ErrorResponse)
    ),
    tag = "Room"
)]
pub async fn get_room(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(room_id): Path<i64>,
) -> Result<Json<BaseResponse<RoomResponse>>, AppError> {
    let result = RoomService::get_room(state, room_id).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 방 삭제 API (소유자)
#[utoipa::path(
    delete,
    path = "/api/rooms/{room_id}",
    params(("room_id" = i64, Path, description = "방 ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "삭제 성공"),
        (status = 403, description = "소유자가 아님", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse)
    ),
    tag = "Room"
)]
pub async fn delete_room(
    State(state): State<AppState>,
    user: AuthUser,
    Path(room_id): Path<i64>,
) -> Result<Json<BaseResponse<()>>, AppError> {
    let user_id = user.user_id()?;
    RoomService::delete_room(state, user_id, room_id).await?;

    Ok(Json(BaseResponse::empty("Room deleted")))
}

/// 메시지 전송 API
#[utoipa::path(
    post,
    path = "/api/rooms/{room_id}/messages",
    params(("room_id" = i64, Path, description = "방 ID")),
    request_body = SendMessageRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "전송 성공", body = ChatMessageResponse),
        (status = 400, description = "빈 메시지 또는 2000자 초과", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse)
    ),
    tag = "Room"
)]
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthUser,
    Path(room_id): Path<i64>,
    AppJson(req): AppJson<SendMessageRequest>,
) -> Result<Json<BaseResponse<ChatMessageResponse>>, AppError> {
    req.validate()?;
    let user_id = user.user_id()?;

    let result = RoomService::send_message(state, user_id, room_id, req).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 메시지 목록 API
///
/// `after`를 주면 해당 ID 이후의 메시지만 오래된 순으로 반환합니다.
#[utoipa::path(
    get,
    path = "/api/rooms/{room_id}/messages",
    params(
        ("room_id" = i64, Path, description = "방 ID"),
        MessageQueryParams
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "조회 성공", body = [ChatMessageResponse]),
        (status = 404, description = "Room not found", body = ErrorResponse)
    ),
    tag = "Room"
)]
pub async fn list_messages(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(room_id): Path<i64>,
    AppQuery(params): AppQuery<MessageQueryParams>,
) -> Result<Json<BaseResponse<Vec<ChatMessageResponse>>>, AppError> {
    let limit = params.effective_limit();
    let result = RoomService::list_messages(state, room_id, params.after, limit).await?;

    Ok(Json(BaseResponse::success(result)))
}

/// 화이트보드 상태 저장 API
#[utoipa::path(
    put,
    path = "/api/rooms/{room_id}/whiteboard",
    params(("room_id" = i64, Path, description = "방 ID")),
    request_body = UpdateWhiteboardRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "저장 성공", body = RoomResponse),
        (status = 400, description = "1MB 초과", body = ErrorResponse),
        (status = 404, description = "Room not found", body = ErrorResponse)
    ),
    tag = "Room"
)]
pub async fn update_whiteboard(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(room_id): Path<i64>,
    AppJson(req): AppJson<UpdateWhiteboardRequest>,
) -> Result<Json<BaseResponse<RoomResponse>>, AppError> {
    let result = RoomService::update_whiteboard(state, room_id, req.state).await?;

    Ok(Json(BaseResponse::success(result)))
}
