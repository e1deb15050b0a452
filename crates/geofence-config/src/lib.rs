use geofence_core::SessionPolicy;
use serde::{Deserialize, Serialize};
use std::{env, fmt, str::FromStr};

/// Deployment stage, carried as a metrics label and in the startup log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Local,
    Dev,
    Test,
    Staging,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Dev => "dev",
            Self::Test => "test",
            Self::Staging => "staging",
            Self::Prod => "prod",
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let stage = match value.trim().to_ascii_lowercase().as_str() {
            "local" => Self::Local,
            "dev" | "development" => Self::Dev,
            "test" | "testing" => Self::Test,
            "staging" | "stage" => Self::Staging,
            "prod" | "production" => Self::Prod,
            _ => return Err(()),
        };
        Ok(stage)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const DEFAULT_COMMAND_BUFFER: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub service_name: String,
    pub environment: Environment,
    pub log_level: String,
    pub metrics_addr: Option<String>,
    pub session_policy: SessionPolicy,
    /// Capacity of the engine actor's mailbox.
    pub command_buffer: usize,
}

impl ServiceConfig {
    pub fn from_env(default_service_name: &str) -> Self {
        Self::from_lookup(default_service_name, |key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(
        default_service_name: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let service_name =
            lookup("GEOFENCE_SERVICE_NAME").unwrap_or_else(|| default_service_name.to_string());
        let environment = lookup("GEOFENCE_ENV")
            .and_then(|value| value.parse::<Environment>().ok())
            .unwrap_or_default();
        let log_level = lookup("GEOFENCE_LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let metrics_addr = lookup("GEOFENCE_METRICS_ADDR").filter(|value| !value.trim().is_empty());
        let session_policy = lookup("GEOFENCE_SESSION_POLICY")
            .and_then(|value| value.parse::<SessionPolicy>().ok())
            .unwrap_or_default();
        let command_buffer = lookup("GEOFENCE_COMMAND_BUFFER")
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(DEFAULT_COMMAND_BUFFER);

        Self {
            service_name,
            environment,
            log_level,
            metrics_addr,
            session_policy,
            command_buffer,
        }
    }
}
