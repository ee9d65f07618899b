use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use tracing::{debug, info};

use super::dto::{ChatMessageResponse, CreateRoomRequest, RoomResponse, SendMessageRequest};
use super::entity::{chat_message, room};
use crate::state::AppState;
use crate::utils::error::AppError;

const ROOM_NOT_FOUND: &str = "Room not found";

/// 직렬화된 화이트보드 상태 최대 크기 (bytes)
pub const WHITEBOARD_MAX_BYTES: usize = 1024 * 1024;

pub struct RoomService;

impl RoomService {
    async fn find_room(state: &AppState, room_id: i64) -> Result<room::Model, AppError> {
        room::Entity::find_by_id(room_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::RoomNotFound(ROOM_NOT_FOUND.to_string()))
    }

    /// 방 생성
    pub async fn create_room(
        state: AppState,
        user_id: i64,
        req: CreateRoomRequest,
    ) -> Result<RoomResponse, AppError> {
        let now = Utc::now().naive_utc();
        let created = room::ActiveModel {
            owner_id: Set(user_id),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description),
            whiteboard_state: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(room_id = created.room_id, owner_id = user_id, "Room created");

        Ok(created.into())
    }

    /// 방 목록 (최근 활동순)
    pub async fn list_rooms(state: AppState) -> Result<Vec<RoomResponse>, AppError> {
        let rooms = room::Entity::find()
            .order_by_desc(room::Column::UpdatedAt)
            .order_by_desc(room::Column::RoomId)
            .all(&state.db)
            .await?;

        Ok(rooms.into_iter().map(RoomResponse::from).collect())
    }

    pub async fn get_room(state: AppState, room_id: i64) -> Result<RoomResponse, AppError> {
        Ok(Self::find_room(&state, room_id).await?.into())
    }

    /// 방 삭제 (소유자만). 메시지는 FK CASCADE로 삭제
    pub async fn delete_room(state: AppState, user_id: i64, room_id: i64) -> Result<(), AppError> {
        let room_model = Self::find_room(&state, room_id).await?;

        if room_model.owner_id != user_id {
            return Err(AppError::forbidden("Only the room owner can delete this room."));
        }

        room::Entity::delete_by_id(room_id).exec(&state.db).await?;

        info!(room_id, deleted_by = user_id, "Room deleted");

        Ok(())
    }

    /// 메시지 전송
    pub async fn send_message(
        state: AppState,
        user_id: i64,
        room_id: i64,
        req: SendMessageRequest,
    ) -> Result<ChatMessageResponse, AppError> {
        Self::find_room(&state, room_id).await?;

        if req.content.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Message must not be blank.".to_string(),
            ));
        }

        let created = chat_message::ActiveModel {
            room_id: Set(room_id),
            sender_id: Set(user_id),
            content: Set(req.content),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        debug!(room_id, chat_message_id = created.chat_message_id, "Chat message stored");

        Ok(created.into())
    }

    /// 메시지 목록 (ID 오름차순, `after` 이후부터 `limit`개)
    pub async fn list_messages(
        state: AppState,
        room_id: i64,
        after: Option<i64>,
        limit: u64,
    ) -> Result<Vec<ChatMessageResponse>, AppError> {
        Self::find_room(&state, room_id).await?;

        let mut query =
            chat_message::Entity::find().filter(chat_message::Column::RoomId.eq(room_id));

        if let Some(after) = after {
            query = query.filter(chat_message::Column::ChatMessageId.gt(after));
        }

        let messages = query
            .order_by_asc(chat_message::Column::ChatMessageId)
            .limit(limit)
            .all(&state.db)
            .await?;

        Ok(messages.into_iter().map(ChatMessageResponse::from).collect())
    }

    /// 화이트보드 상태 전체 교체
    pub async fn update_whiteboard(
        state: AppState,
        room_id: i64,
        whiteboard: serde_json::Value,
    ) -> Result<RoomResponse, AppError> {
        let room_model = Self::find_room(&state, room_id).await?;

        let serialized = serde_json::to_string(&whiteboard)
            .map_err(|e| AppError::bad_request(format!("Invalid whiteboard state: {}", e)))?;

        if serialized.len() > WHITEBOARD_MAX_BYTES {
            return Err(AppError::bad_request(
                "Whiteboard state must be at most 1MB.",
            ));
        }

        let mut active: room::ActiveModel = room_model.into();
        active.whiteboard_state = Set(Some(serialized));
        active.updated_at = Set(Utc::now().naive_utc());

        let updated = active.update(&state.db).await?;

        Ok(updated.into())
    }
}
