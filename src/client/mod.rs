//! 대시보드 프론트엔드가 서버 API를 호출하는 방식 그대로의 HTTP 클라이언트
//!
//! URL 조합, bearer 토큰 첨부, 사용자에게 보여줄 에러 문구 변환, 응답 기본값 적용을 담당합니다.

mod error;
mod types;

pub use error::ClientError;
pub use types::{Envelope, NewSprint, ProjectView, SprintView};

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            client: Client::new(),
        }
    }

    /// 이후 모든 요청에 `Authorization: Bearer <token>`을 붙입니다.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// base URL과 path 사이에 `/`가 정확히 하나만 오도록 조합
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, rb: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    async fn send(&self, rb: RequestBuilder) -> Result<Response, ClientError> {
        self.authorized(rb).send().await.map_err(|e| {
            warn!(error = %e, "API request could not be sent");
            ClientError::Network(e.to_string())
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let envelope: Envelope<T> = response.json().await?;

        envelope
            .result
            .ok_or_else(|| ClientError::InvalidResponse(envelope.message))
    }

    /// 프로젝트 조회. 404는 "Project not found"
    pub async fn get_project(&self, project_id: i64) -> Result<ProjectView, ClientError> {
        let url = self.url(&format!("/api/projects/{}", project_id));
        let response = self.send(self.client.get(&url)).await?;

        match response.status() {
            status if status.is_success() => Self::decode(response).await,
            StatusCode::NOT_FOUND => Err(ClientError::ProjectNotFound),
            status => {
                debug!(%url, status = status.as_u16(), "Project fetch failed");
                Err(ClientError::from_status(status))
            }
        }
    }

    /// 워크스페이스 이름으로 프로젝트 목록 조회
    pub async fn list_workspace_projects(
        &self,
        workspace_name: &str,
    ) -> Result<Vec<ProjectView>, ClientError> {
        let mut url = Url::parse(&self.url("/api/projects/workspace"))
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .push(workspace_name);

        let response = self.send(self.client.get(url)).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::from_status(status));
        }

        Self::decode(response).await
    }

    /// 스프린트 생성. 서버가 거절하면 "Failed to create sprint"
    pub async fn create_sprint(&self, sprint: &NewSprint) -> Result<SprintView, ClientError> {
        let url = self.url("/api/sprints/create");
        let response = self.send(self.client.post(&url).json(sprint)).await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), project_id = sprint.project_id, "Sprint creation rejected");
            return Err(ClientError::SprintCreationFailed);
        }

        Self::decode(response).await
    }
}
