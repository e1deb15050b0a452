use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a drawing session does after a region is successfully finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPolicy {
    /// Leave an empty session open so the next region can be drawn without `start`.
    #[default]
    AutoRestart,
    /// Close the session; points added before the next `start` are rejected.
    RequireStart,
}

impl FromStr for SessionPolicy {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "auto_restart" | "auto-restart" | "auto" => Ok(Self::AutoRestart),
            "require_start" | "require-start" | "explicit" => Ok(Self::RequireStart),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SessionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::AutoRestart => "auto_restart",
            Self::RequireStart => "require_start",
        };
        write!(f, "{}", value)
    }
}
