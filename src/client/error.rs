use reqwest::StatusCode;

/// API 클라이언트 에러. `Display`는 화면에 그대로 보여줄 수 있는 문구입니다.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Project not found")]
    ProjectNotFound,

    #[error("Failed to create sprint")]
    SprintCreationFailed,

    #[error("Request failed with status {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub fn from_status(status: StatusCode) -> Self {
        ClientError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_format_status_message() {
        let err = ClientError::from_status(StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(
            err.to_string(),
            "Request failed with status 500 Internal Server Error"
        );
    }

    #[test]
    fn should_use_fixed_messages() {
        assert_eq!(ClientError::ProjectNotFound.to_string(), "Project not found");
        assert_eq!(
            ClientError::SprintCreationFailed.to_string(),
            "Failed to create sprint"
        );
    }
}
