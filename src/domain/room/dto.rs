use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::entity::{chat_message, room};
use crate::global::validator::not_blank;

pub const DEFAULT_MESSAGE_LIMIT: u64 = 50;
pub const MAX_MESSAGE_LIMIT: u64 = 200;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[validate(
        length(min = 1, max = 100, message = "Room name must be 1-100 characters."),
        custom(function = "not_blank")
    )]
    pub name: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters."))]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub room_id: i64,
    pub owner_id: i64,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub whiteboard: Option<serde_json::Value>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<room::Model> for RoomResponse {
    fn from(model: room::Model) -> Self {
        // 저장 시 직렬화한 값이므로 파싱 실패는 손상된 데이터로 보고 비워서 반환
        let whiteboard = model
            .whiteboard_state
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok());

        Self {
            room_id: model.room_id,
            owner_id: model.owner_id,
            name: model.name,
            description: model.description,
            whiteboard,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters."))]
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageResponse {
    pub chat_message_id: i64,
    pub room_id: i64,
    pub sender_id: i64,
    pub content: String,
    pub created_at: NaiveDateTime,
}

impl From<chat_message::Model> for ChatMessageResponse {
    fn from(model: chat_message::Model) -> Self {
        Self {
            chat_message_id: model.chat_message_id,
            room_id: model.room_id,
            sender_id: model.sender_id,
            content: model.content,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct MessageQueryParams {
    /// 이 ID 이후의 메시지만
    pub after: Option<i64>,
    /// 최대 개수 (기본 50, 최대 200)
    pub limit: Option<u64>,
}

impl MessageQueryParams {
    pub fn effective_limit(&self) -> u64 {
        self.limit
            .unwrap_or(DEFAULT_MESSAGE_LIMIT)
            .clamp(1, MAX_MESSAGE_LIMIT)
    }
}

/// 화이트보드 전체 상태 교체 요청
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWhiteboardRequest {
    #[schema(value_type = Object)]
    pub state: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn room_model(whiteboard_state: Option<&str>) -> room::Model {
        let now = Utc::now().naive_utc();
        room::Model {
            room_id: 1,
            owner_id: 1,
            name: "Design sync".to_string(),
            description: None,
            whiteboard_state: whiteboard_state.map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn should_decode_stored_whiteboard() {
        let response = RoomResponse::from(room_model(Some(r#"{"shapes":[{"kind":"rect"}]}"#)));

        assert_eq!(
            response.whiteboard,
            Some(serde_json::json!({"shapes": [{"kind": "rect"}]}))
        );
    }

    #[test]
    fn should_drop_corrupted_whiteboard() {
        let response = RoomResponse::from(room_model(Some("{not json")));

        assert!(response.whiteboard.is_none());
    }

    #[test]
    fn should_clamp_message_limit() {
        let params = MessageQueryParams { after: None, limit: Some(1000) };
        assert_eq!(params.effective_limit(), MAX_MESSAGE_LIMIT);

        let params = MessageQueryParams { after: None, limit: Some(0) };
        assert_eq!(params.effective_limit(), 1);

        assert_eq!(MessageQueryParams::default().effective_limit(), DEFAULT_MESSAGE_LIMIT);
    }
}
