use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::debug;

use super::dto::{MarkAllReadResponse, NotificationResponse};
use super::entity::notification;
use crate::state::AppState;
use crate::utils::error::AppError;

pub struct NotificationService;

impl NotificationService {
    /// 알림 생성. 태스크 배정 등 다른 서비스의 트랜잭션 안에서 호출됩니다.
    pub async fn notify<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        title: impl Into<String>,
        message: impl Into<String>,
        link: Option<String>,
    ) -> Result<notification::Model, AppError> {
        let model = notification::ActiveModel {
            user_id: Set(user_id),
            title: Set(title.into()),
            message: Set(message.into()),
            link: Set(link),
            is_read: Set(false),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        debug!(user_id, notification_id = model.notification_id, "Notification created");

        Ok(model)
    }

    /// 내 알림 목록 (최신순)
    pub async fn list_for_user(
        state: AppState,
        user_id: i64,
        unread_only: bool,
    ) -> Result<Vec<NotificationResponse>, AppError> {
        let mut query =
            notification::Entity::find().filter(notification::Column::UserId.eq(user_id));

        if unread_only {
            query = query.filter(notification::Column::IsRead.eq(false));
        }

        let rows = query
            .order_by_desc(notification::Column::CreatedAt)
            .order_by_desc(notification::Column::NotificationId)
            .all(&state.db)
            .await?;

        Ok(rows.into_iter().map(NotificationResponse::from).collect())
    }

    /// 읽음 처리
    ///
    /// 다른 사용자의 알림은 존재 여부를 노출하지 않도록 404로 처리합니다.
    pub async fn mark_read(
        state: AppState,
        user_id: i64,
        notification_id: i64,
    ) -> Result<NotificationResponse, AppError> {
        let model = notification::Entity::find_by_id(notification_id)
            .one(&state.db)
            .await?
            .filter(|n| n.user_id == user_id)
            .ok_or_else(|| {
                AppError::NotificationNotFound("Notification not found".to_string())
            })?;

        if model.is_read {
            return Ok(model.into());
        }

        let mut active: notification::ActiveModel = model.into();
        active.is_read = Set(true);
        let updated = active.update(&state.db).await?;

        Ok(updated.into())
    }

    /// 모두 읽음 처리
    pub async fn mark_all_read(
        state: AppState,
        user_id: i64,
    ) -> Result<MarkAllReadResponse, AppError> {
        let result = notification::Entity::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .exec(&state.db)
            .await?;

        Ok(MarkAllReadResponse {
            updated: result.rows_affected,
        })
    }
}
