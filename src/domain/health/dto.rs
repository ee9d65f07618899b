use serde::Serialize;
use utoipa::ToSchema;

/// `GET /health` 응답
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthState,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    #[schema(example = 3600)]
    pub uptime_secs: u64,
    pub database: DatabaseCheck,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    /// DB는 응답하지만 느림
    Degraded,
    Unhealthy,
}

/// DB ping 결과
#[derive(Serialize, Debug, Clone, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseCheck {
    #[schema(example = "mysql")]
    pub backend: &'static str,
    pub reachable: bool,
    /// ping 소요 시간. 타임아웃이면 타임아웃 한도
    #[schema(example = 3)]
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DatabaseCheck {
    pub fn reachable(backend: &'static str, latency_ms: u64) -> Self {
        Self {
            backend,
            reachable: true,
            latency_ms,
            error: None,
        }
    }

    pub fn unreachable(backend: &'static str, latency_ms: u64, error: impl Into<String>) -> Self {
        Self {
            backend,
            reachable: false,
            latency_ms,
            error: Some(error.into()),
        }
    }

    /// 도달 불가면 unhealthy, `degraded_after_ms` 이상 걸리면 degraded
    pub fn state(&self, degraded_after_ms: u64) -> HealthState {
        if !self.reachable {
            HealthState::Unhealthy
        } else if self.latency_ms >= degraded_after_ms {
            HealthState::Degraded
        } else {
            HealthState::Healthy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_grade_by_reachability_and_latency() {
        assert_eq!(DatabaseCheck::reachable("sqlite", 499).state(500), HealthState::Healthy);
        assert_eq!(DatabaseCheck::reachable("sqlite", 500).state(500), HealthState::Degraded);
        assert_eq!(
            DatabaseCheck::unreachable("mysql", 3000, "Timeout").state(500),
            HealthState::Unhealthy
        );
    }

    #[test]
    fn should_omit_error_for_reachable_database() {
        let json = serde_json::to_value(DatabaseCheck::reachable("mysql", 7)).unwrap();

        assert_eq!(json, serde_json::json!({"backend": "mysql", "reachable": true, "latencyMs": 7}));
    }

    #[test]
    fn should_report_unreachable_database_with_error() {
        let status = HealthStatus {
            status: HealthState::Unhealthy,
            version: "0.1.0",
            uptime_secs: 12,
            database: DatabaseCheck::unreachable("mysql", 4, "connection refused"),
        };

        let json = serde_json::to_value(&status).unwrap();

        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["uptimeSecs"], 12);
        assert_eq!(json["database"]["reachable"], false);
        assert_eq!(json["database"]["error"], "connection refused");
    }
}
