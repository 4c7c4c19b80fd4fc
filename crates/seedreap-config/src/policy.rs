//! Failed-deletion policy.

use crate::ConfigError;
use std::str::FromStr;

/// What the daemon does with a torrent's tracking entry when the delete call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeletePolicy {
    /// The entry stays evicted. The torrent is reconsidered only if a later
    /// snapshot shows it completed again, with a fresh grace period.
    #[default]
    FireAndForget,
    /// The entry is restored with its original timestamp, so the next
    /// cycle issues the deletion again.
    Retry,
}

impl DeletePolicy {
    /// Returns the policy as its configuration identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FireAndForget => "fire-and-forget",
            Self::Retry => "retry",
        }
    }
}

impl FromStr for DeletePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fire-and-forget" | "fire_and_forget" | "none" => Ok(Self::FireAndForget),
            "retry" => Ok(Self::Retry),
            _ => Err(ConfigError::invalid(
                crate::ENV_DELETE_POLICY,
                s,
                "expected `fire-and-forget` or `retry`",
            )),
        }
    }
}

impl std::fmt::Display for DeletePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse() {
        assert_eq!("retry".parse::<DeletePolicy>().unwrap(), DeletePolicy::Retry);
        assert_eq!(
            " Fire-And-Forget ".parse::<DeletePolicy>().unwrap(),
            DeletePolicy::FireAndForget
        );
        assert!("sometimes".parse::<DeletePolicy>().is_err());
    }

    #[test]
    fn test_policy_default() {
        assert_eq!(DeletePolicy::default(), DeletePolicy::FireAndForget);
    }
}
