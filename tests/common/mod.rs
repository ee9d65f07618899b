//! 통합 테스트 공통 헬퍼
//!
//! SQLite 인메모리 DB에 스키마를 만들고, 라우터에 직접 요청을 보냅니다.
#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use http_body_util::BodyExt;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use serde_json::Value;
use tower::ServiceExt;

use taskhub::config::{sync_schema, AppConfig};
use taskhub::domain::user::entity::user::{self, UserRole};
use taskhub::utils::jwt::encode_token;
use taskhub::{create_router, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub db: DatabaseConnection,
    pub router: Router,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut options = ConnectOptions::new("sqlite::memory:");
        // 인메모리 DB는 커넥션마다 별도이므로 하나만 유지
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(Duration::from_secs(600))
            .sqlx_logging(false);

        let db = Database::connect(options).await.expect("connect sqlite");
        sync_schema(&db).await.expect("create schema");

        let config = AppConfig {
            server_port: 0,
            database_url: "sqlite::memory:".to_string(),
            jwt_secret: TEST_SECRET.to_string(),
            db_schema_update: true,
            log_dir: None,
            allowed_origins: Vec::new(),
        };

        let router = create_router(AppState {
            db: db.clone(),
            config,
        });

        Self { db, router }
    }

    /// 사용자 생성 후 ID 반환
    pub async fn create_user(&self, name: &str) -> i64 {
        let now = Utc::now().naive_utc();
        let model = user::ActiveModel {
            email: Set(format!("{}@example.com", name.to_lowercase())),
            name: Set(name.to_string()),
            role: Set(UserRole::Member),
            avatar_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .expect("insert user");

        model.user_id
    }

    pub fn token_for(&self, user_id: i64) -> String {
        encode_token(user_id.to_string(), TEST_SECRET, 3600).expect("encode token")
    }

    /// 요청을 보내고 (상태 코드, JSON 본문)을 반환
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        user_id: Option<i64>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(user_id) = user_id {
            builder = builder.header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.token_for(user_id)),
            );
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str, user_id: i64) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(user_id), None).await
    }

    pub async fn post(&self, uri: &str, user_id: i64, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(user_id), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, user_id: i64, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(user_id), Some(body)).await
    }

    pub async fn put(&self, uri: &str, user_id: i64, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(user_id), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, user_id: i64) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(user_id), None).await
    }

    /// 워크스페이스 생성 후 ID 반환 (생성자는 admin)
    pub async fn create_workspace(&self, owner_id: i64, name: &str) -> i64 {
        let (status, body) = self
            .post("/api/workspaces", owner_id, serde_json::json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::OK, "create workspace: {}", body);
        body["result"]["workspaceId"].as_i64().unwrap()
    }

    pub async fn add_member(&self, admin_id: i64, workspace_id: i64, user_id: i64, role: &str) {
        let (status, body) = self
            .post(
                &format!("/api/workspaces/{}/members", workspace_id),
                admin_id,
                serde_json::json!({ "userId": user_id, "role": role }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "add member: {}", body);
    }

    pub async fn create_project(&self, user_id: i64, workspace_id: i64, name: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/projects",
                user_id,
                serde_json::json!({ "workspaceId": workspace_id, "name": name }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create project: {}", body);
        body["result"]["projectId"].as_i64().unwrap()
    }

    pub async fn create_task(&self, user_id: i64, body: Value) -> Value {
        let (status, body) = self.post("/api/tasks", user_id, body).await;
        assert_eq!(status, StatusCode::OK, "create task: {}", body);
        body["result"].clone()
    }
}
