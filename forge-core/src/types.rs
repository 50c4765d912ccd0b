use serde::{Deserialize, Serialize};

/// Restart policy applied to every enhanced service.
pub const DEFAULT_RESTART_POLICY: &str = "unless-stopped";

/// Container health probe, in orchestration-descriptor shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Probe command, e.g. `["CMD", "curl", "-f", "http://localhost:8080/health"]`
    pub test: Vec<String>,
    pub interval: String,
    pub timeout: String,
    pub retries: u32,
}

impl HealthCheck {
    const INTERVAL: &'static str = "30s";
    const TIMEOUT: &'static str = "10s";
    const RETRIES: u32 = 3;

    /// Probe that polls an HTTP endpoint.
    pub fn http(url: impl Into<String>) -> Self {
        Self::with_test(vec![
            "CMD".to_string(),
            "curl".to_string(),
            "-f".to_string(),
            url.into(),
        ])
    }

    /// Probe that runs a shell command inside the container.
    pub fn command(command: impl Into<String>) -> Self {
        Self::with_test(vec!["CMD-SHELL".to_string(), command.into()])
    }

    fn with_test(test: Vec<String>) -> Self {
        Self {
            test,
            interval: Self::INTERVAL.to_string(),
            timeout: Self::TIMEOUT.to_string(),
            retries: Self::RETRIES,
        }
    }
}

/// CPU and memory bounds for a service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// CPU share, e.g. "0.5"
    pub cpus: String,
    /// Memory bound, e.g. "512M"
    pub memory: String,
}

impl ResourceLimits {
    pub fn new(cpus: impl Into<String>, memory: impl Into<String>) -> Self {
        Self {
            cpus: cpus.into(),
            memory: memory.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_probe() {
        let check = HealthCheck::http("http://localhost:3000/");
        assert_eq!(check.test, ["CMD", "curl", "-f", "http://localhost:3000/"]);
        assert_eq!(check.interval, "30s");
        assert_eq!(check.timeout, "10s");
        assert_eq!(check.retries, 3);
    }

    #[test]
    fn test_command_probe() {
        let check = HealthCheck::command("redis-cli ping");
        assert_eq!(check.test, ["CMD-SHELL", "redis-cli ping"]);
    }

    #[test]
    fn test_health_check_json_shape() {
        let json = serde_json::to_value(HealthCheck::command("pg_isready")).unwrap();
        assert_eq!(json["test"][0], "CMD-SHELL");
        assert_eq!(json["retries"], 3);
    }
}
