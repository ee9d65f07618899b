pub mod client;
pub mod config;
pub mod domain;
pub mod global;
pub mod shutdown;
pub mod state;
pub mod utils;

pub use state::AppState;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use domain::{
    activity, health, milestone, notification, project, room, sprint, task, user, workspace,
};
use global::middleware::request_id_middleware;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::handler::health_check,
        user::handler::create_user,
        user::handler::get_me,
        user::handler::get_user,
        workspace::handler::create_workspace,
        workspace::handler::list_my_workspaces,
        workspace::handler::get_workspace,
        workspace::handler::get_workspace_by_name,
        workspace::handler::delete_workspace,
        workspace::handler::list_members,
        workspace::handler::add_member,
        workspace::handler::remove_member,
        project::handler::create_project,
        project::handler::get_project,
        project::handler::list_workspace_projects,
        project::handler::update_project,
        project::handler::delete_project,
        project::handler::get_project_stats,
        task::handler::create_task,
        task::handler::get_task,
        task::handler::list_project_tasks,
        task::handler::update_task,
        task::handler::delete_task,
        task::handler::add_tag,
        task::handler::remove_tag,
        sprint::handler::create_sprint,
        sprint::handler::get_sprint,
        sprint::handler::list_project_sprints,
        sprint::handler::update_sprint,
        sprint::handler::delete_sprint,
        milestone::handler::create_milestone,
        milestone::handler::get_milestone,
        milestone::handler::list_project_milestones,
        milestone::handler::update_milestone,
        milestone::handler::delete_milestone,
        milestone::handler::list_dependencies,
        milestone::handler::add_dependency,
        milestone::handler::remove_dependency,
        activity::handler::list_project_activities,
        activity::handler::list_task_activities,
        notification::handler::list_notifications,
        notification::handler::mark_read,
        notification::handler::mark_all_read,
        room::handler::create_room,
        room::handler::list_rooms,
        room::handler::get_room,
        room::handler::delete_room,
        room::handler::send_message,
        room::handler::list_messages,
        room::handler::update_whiteboard,
    ),
    components(
        schemas(
            health::dto::HealthStatus,
            health::dto::HealthState,
            health::dto::DatabaseCheck,
            user::entity::user::UserRole,
            user::dto::CreateUserRequest,
            user::dto::UserResponse,
            workspace::dto::CreateWorkspaceRequest,
            workspace::dto::WorkspaceResponse,
            workspace::dto::AddMemberRequest,
            workspace::dto::WorkspaceMemberResponse,
            project::entity::project::ProjectStatus,
            project::dto::CreateProjectRequest,
            project::dto::UpdateProjectRequest,
            project::dto::ProjectResponse,
            project::dto::ProjectStatsResponse,
            task::entity::task::TaskType,
            task::entity::task::TaskStatus,
            task::entity::task::TaskPriority,
            task::dto::CreateTaskRequest,
            task::dto::UpdateTaskRequest,
            task::dto::AddTagRequest,
            task::dto::TaskResponse,
            sprint::entity::sprint::SprintStatus,
            sprint::dto::CreateSprintRequest,
            sprint::dto::UpdateSprintRequest,
            sprint::dto::SprintResponse,
            sprint::dto::SprintDetailResponse,
            milestone::entity::milestone::MilestoneStatus,
            milestone::dto::CreateMilestoneRequest,
            milestone::dto::UpdateMilestoneRequest,
            milestone::dto::AddDependencyRequest,
            milestone::dto::MilestoneResponse,
            activity::dto::ActivityResponse,
            notification::dto::NotificationResponse,
            notification::dto::MarkAllReadResponse,
            room::dto::CreateRoomRequest,
            room::dto::RoomResponse,
            room::dto::SendMessageRequest,
            room::dto::ChatMessageResponse,
            room::dto::UpdateWhiteboardRequest,
            utils::response::ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "헬스체크"),
        (name = "User", description = "사용자 API"),
        (name = "Workspace", description = "워크스페이스/멤버 API"),
        (name = "Project", description = "프로젝트 API"),
        (name = "Task", description = "태스크/태그 API"),
        (name = "Sprint", description = "스프린트 API"),
        (name = "Milestone", description = "마일스톤/의존성 API"),
        (name = "Activity", description = "활동 로그 API"),
        (name = "Notification", description = "알림 API"),
        (name = "Room", description = "채팅/화이트보드 API")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// ALLOWED_ORIGINS가 비어 있으면 모든 Origin 허용
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    let api = Router::new()
        // users
        .route("/api/users", post(user::handler::create_user))
        .route("/api/users/me", get(user::handler::get_me))
        .route("/api/users/:user_id", get(user::handler::get_user))
        // workspaces
        .route(
            "/api/workspaces",
            get(workspace::handler::list_my_workspaces).post(workspace::handler::create_workspace),
        )
        .route(
            "/api/workspaces/by-name/:name",
            get(workspace::handler::get_workspace_by_name),
        )
        .route(
            "/api/workspaces/:workspace_id",
            get(workspace::handler::get_workspace).delete(workspace::handler::delete_workspace),
        )
        .route(
            "/api/workspaces/:workspace_id/members",
            get(workspace::handler::list_members).post(workspace::handler::add_member),
        )
        .route(
            "/api/workspaces/:workspace_id/members/:user_id",
            delete(workspace::handler::remove_member),
        )
        // projects
        .route("/api/projects", post(project::handler::create_project))
        .route(
            "/api/projects/workspace/:name",
            get(project::handler::list_workspace_projects),
        )
        .route(
            "/api/projects/:project_id",
            get(project::handler::get_project)
                .patch(project::handler::update_project)
                .delete(project::handler::delete_project),
        )
        .route(
            "/api/projects/:project_id/stats",
            get(project::handler::get_project_stats),
        )
        .route(
            "/api/projects/:project_id/tasks",
            get(task::handler::list_project_tasks),
        )
        .route(
            "/api/projects/:project_id/sprints",
            get(sprint::handler::list_project_sprints),
        )
        .route(
            "/api/projects/:project_id/milestones",
            get(milestone::handler::list_project_milestones),
        )
        .route(
            "/api/projects/:project_id/activities",
            get(activity::handler::list_project_activities),
        )
        // tasks
        .route("/api/tasks", post(task::handler::create_task))
        .route(
            "/api/tasks/:task_id",
            get(task::handler::get_task)
                .patch(task::handler::update_task)
                .delete(task::handler::delete_task),
        )
        .route("/api/tasks/:task_id/tags", post(task::handler::add_tag))
        .route(
            "/api/tasks/:task_id/tags/:name",
            delete(task::handler::remove_tag),
        )
        .route(
            "/api/tasks/:task_id/activities",
            get(activity::handler::list_task_activities),
        )
        // sprints
        .route("/api/sprints/create", post(sprint::handler::create_sprint))
        .route(
            "/api/sprints/:sprint_id",
            get(sprint::handler::get_sprint)
                .patch(sprint::handler::update_sprint)
                .delete(sprint::handler::delete_sprint),
        )
        // milestones
        .route("/api/milestones", post(milestone::handler::create_milestone))
        .route(
            "/api/milestones/:milestone_id",
            get(milestone::handler::get_milestone)
                .patch(milestone::handler::update_milestone)
                .delete(milestone::handler::delete_milestone),
        )
        .route(
            "/api/milestones/:milestone_id/dependencies",
            get(milestone::handler::list_dependencies).post(milestone::handler::add_dependency),
        )
        .route(
            "/api/milestones/:milestone_id/dependencies/:depends_on_id",
            delete(milestone::handler::remove_dependency),
        )
        // notifications
        .route(
            "/api/notifications",
            get(notification::handler::list_notifications),
        )
        .route(
            "/api/notifications/read-all",
            post(notification::handler::mark_all_read),
        )
        .route(
            "/api/notifications/:notification_id/read",
            patch(notification::handler::mark_read),
        )
        // rooms
        .route(
            "/api/rooms",
            get(room::handler::list_rooms).post(room::handler::create_room),
        )
        .route(
            "/api/rooms/:room_id",
            get(room::handler::get_room).delete(room::handler::delete_room),
        )
        .route(
            "/api/rooms/:room_id/messages",
            get(room::handler::list_messages).post(room::handler::send_message),
        )
        .route(
            "/api/rooms/:room_id/whiteboard",
            put(room::handler::update_whiteboard),
        );

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health::health_check))
        .merge(api)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
