use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::info;

use super::dto::{
    AddMemberRequest, CreateWorkspaceRequest, WorkspaceMemberResponse, WorkspaceResponse,
};
use super::entity::{workspace, workspace_member};
use crate::domain::user::entity::user::{self, UserRole};
use crate::state::AppState;
use crate::utils::error::AppError;

const WORKSPACE_NOT_FOUND: &str = "Workspace not found";

pub struct WorkspaceService;

impl WorkspaceService {
    /// 워크스페이스 멤버십 조회
    pub async fn find_membership<C: ConnectionTrait>(
        conn: &C,
        workspace_id: i64,
        user_id: i64,
    ) -> Result<Option<workspace_member::Model>, AppError> {
        Ok(workspace_member::Entity::find()
            .filter(workspace_member::Column::WorkspaceId.eq(workspace_id))
            .filter(workspace_member::Column::UserId.eq(user_id))
            .one(conn)
            .await?)
    }

    /// 멤버가 아니면 워크스페이스가 없는 것처럼 404 처리
    pub async fn require_member<C: ConnectionTrait>(
        conn: &C,
        workspace_id: i64,
        user_id: i64,
    ) -> Result<workspace_member::Model, AppError> {
        Self::find_membership(conn, workspace_id, user_id)
            .await?
            .ok_or_else(|| AppError::WorkspaceNotFound(WORKSPACE_NOT_FOUND.to_string()))
    }

    /// 워크스페이스 생성
    ///
    /// 생성자는 같은 트랜잭션에서 admin 멤버로 등록됩니다.
    pub async fn create_workspace(
        state: AppState,
        user_id: i64,
        req: CreateWorkspaceRequest,
    ) -> Result<WorkspaceResponse, AppError> {
        let duplicate = workspace::Entity::find()
            .filter(workspace::Column::Name.eq(req.name.as_str()))
            .one(&state.db)
            .await?;

        if duplicate.is_some() {
            return Err(AppError::conflict("A workspace with this name already exists."));
        }

        let txn = state.db.begin().await?;
        let now = Utc::now().naive_utc();

        let created = workspace::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            owner_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        workspace_member::ActiveModel {
            workspace_id: Set(created.workspace_id),
            user_id: Set(user_id),
            role: Set(UserRole::Admin),
            joined_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;

        info!(
            workspace_id = created.workspace_id,
            owner_id = user_id,
            "Workspace created"
        );

        Ok(WorkspaceResponse::from_model(created, UserRole::Admin))
    }

    /// 내가 속한 워크스페이스 목록 (이름순)
    pub async fn list_my_workspaces(
        state: AppState,
        user_id: i64,
    ) -> Result<Vec<WorkspaceResponse>, AppError> {
        let rows = workspace_member::Entity::find()
            .filter(workspace_member::Column::UserId.eq(user_id))
            .find_also_related(workspace::Entity)
            .order_by_asc(workspace::Column::Name)
            .all(&state.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(membership, ws)| {
                ws.map(|ws| WorkspaceResponse::from_model(ws, membership.role))
            })
            .collect())
    }

    /// 이름으로 워크스페이스 조회 (멤버만)
    pub async fn find_by_name_for_member<C: ConnectionTrait>(
        conn: &C,
        user_id: i64,
        name: &str,
    ) -> Result<(workspace::Model, workspace_member::Model), AppError> {
        let ws = workspace::Entity::find()
            .filter(workspace::Column::Name.eq(name))
            .one(conn)
            .await?
            .ok_or_else(|| AppError::WorkspaceNotFound(WORKSPACE_NOT_FOUND.to_string()))?;

        let membership = Self::require_member(conn, ws.workspace_id, user_id).await?;

        Ok((ws, membership))
    }

    pub async fn get_workspace(
        state: AppState,
        user_id: i64,
        workspace_id: i64,
    ) -> Result<WorkspaceResponse, AppError> {
        let membership = Self::require_member(&state.db, workspace_id, user_id).await?;

        let ws = workspace::Entity::find_by_id(workspace_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::WorkspaceNotFound(WORKSPACE_NOT_FOUND.to_string()))?;

        Ok(WorkspaceResponse::from_model(ws, membership.role))
    }

    pub async fn get_workspace_by_name(
        state: AppState,
        user_id: i64,
        name: &str,
    ) -> Result<WorkspaceResponse, AppError> {
        let (ws, membership) = Self::find_by_name_for_member(&state.db, user_id, name).await?;

        Ok(WorkspaceResponse::from_model(ws, membership.role))
    }

    /// 멤버 목록 (가입순)
    pub async fn list_members(
        state: AppState,
        user_id: i64,
        workspace_id: i64,
    ) -> Result<Vec<WorkspaceMemberResponse>, AppError> {
        Self::require_member(&state.db, workspace_id, user_id).await?;

        let rows = workspace_member::Entity::find()
            .filter(workspace_member::Column::WorkspaceId.eq(workspace_id))
            .order_by_asc(workspace_member::Column::JoinedAt)
            .order_by_asc(workspace_member::Column::WorkspaceMemberId)
            .find_also_related(user::Entity)
            .all(&state.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(membership, u)| {
                u.map(|u| WorkspaceMemberResponse::new(u, membership.role, membership.joined_at))
            })
            .collect())
    }

    /// 멤버 추가
    ///
    /// - admin/manager만 추가할 수 있고, admin 역할 부여는 admin만 가능
    /// - 이미 멤버이면 409
    pub async fn add_member(
        state: AppState,
        user_id: i64,
        workspace_id: i64,
        req: AddMemberRequest,
    ) -> Result<WorkspaceMemberResponse, AppError> {
        let requester = Self::require_member(&state.db, workspace_id, user_id).await?;

        if !requester.role.can_manage() {
            return Err(AppError::WorkspaceAccessDenied(
                "Only admins and managers can add members.".to_string(),
            ));
        }

        let role = req.role.unwrap_or_default();
        if role.is_admin() && !requester.role.is_admin() {
            return Err(AppError::WorkspaceAccessDenied(
                "Only admins can grant the admin role.".to_string(),
            ));
        }

        let target = user::Entity::find_by_id(req.user_id)
            .one(&state.db)
            .await?
            .ok_or_else(|| AppError::UserNotFound("User not found".to_string()))?;

        if Self::find_membership(&state.db, workspace_id, req.user_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "User is already a member of this workspace.",
            ));
        }

        let membership = workspace_member::ActiveModel {
            workspace_id: Set(workspace_id),
            user_id: Set(req.user_id),
            role: Set(role),
            joined_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&state.db)
        .await?;

        info!(workspace_id, member_id = req.user_id, ?role, "Workspace member added");

        Ok(WorkspaceMemberResponse::new(
            target,
            membership.role,
            membership.joined_at,
        ))
    }

    /// 멤버 제거
    ///
    /// admin은 누구든 제거할 수 있고, 그 외 멤버는 자기 자신만 탈퇴할 수 있습니다.
    /// 마지막 admin은 제거할 수 없습니다.
    pub async fn remove_member(
        state: AppState,
        user_id: i64,
        workspace_id: i64,
        target_user_id: i64,
    ) -> Result<(), AppError> {
        let requester = Self::require_member(&state.db, workspace_id, user_id).await?;

        if user_id != target_user_id && !requester.role.is_admin() {
            return Err(AppError::WorkspaceAccessDenied(
                "Only admins can remove other members.".to_string(),
            ));
        }

        let target = Self::find_membership(&state.db, workspace_id, target_user_id)
            .await?
            .ok_or_else(|| AppError::UserNotFound("Member not found".to_string()))?;

        // admin 수 확인부터 삭제까지 한 트랜잭션, admin 행은 잠금
        let txn = state.db.begin().await?;

        if target.role.is_admin() {
            let admins = workspace_member::Entity::find()
                .filter(workspace_member::Column::WorkspaceId.eq(workspace_id))
                .filter(workspace_member::Column::Role.eq(UserRole::Admin))
                .lock_exclusive()
                .all(&txn)
                .await?;

            if admins.len() <= 1 {
                return Err(AppError::bad_request(
                    "The last admin cannot be removed from the workspace.",
                ));
            }
        }

        workspace_member::Entity::delete_by_id(target.workspace_member_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!(workspace_id, member_id = target_user_id, "Workspace member removed");

        Ok(())
    }

    /// 워크스페이스 삭제 (admin 전용). 프로젝트 이하 데이터는 FK CASCADE로 함께 삭제
    pub async fn delete_workspace(
        state: AppState,
        user_id: i64,
        workspace_id: i64,
    ) -> Result<(), AppError> {
        let requester = Self::require_member(&state.db, workspace_id, user_id).await?;

        if !requester.role.is_admin() {
            return Err(AppError::WorkspaceAccessDenied(
                "Only admins can delete a workspace.".to_string(),
            ));
        }

        workspace::Entity::delete_by_id(workspace_id)
            .exec(&state.db)
            .await?;

        info!(workspace_id, deleted_by = user_id, "Workspace deleted");

        Ok(())
    }
}
