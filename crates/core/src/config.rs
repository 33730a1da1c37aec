//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the core
//! services. Request handling never reads environment variables, which keeps sessions
//! consistent in multi-threaded runtimes and test harnesses.

use crate::constants::DEFAULT_SESSION_TTL_SECS;
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    lifestyle_model_path: PathBuf,
    combined_model_path: PathBuf,
    map_data_path: PathBuf,
    session_ttl: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfig` if either model path is empty or both models
    /// point at the same artifact.
    pub fn new(
        lifestyle_model_path: PathBuf,
        combined_model_path: PathBuf,
        map_data_path: PathBuf,
    ) -> CoreResult<Self> {
        if lifestyle_model_path.as_os_str().is_empty() {
            return Err(CoreError::InvalidConfig(
                "lifestyle model path cannot be empty".into(),
            ));
        }
        if combined_model_path.as_os_str().is_empty() {
            return Err(CoreError::InvalidConfig(
                "combined model path cannot be empty".into(),
            ));
        }
        if lifestyle_model_path == combined_model_path {
            return Err(CoreError::InvalidConfig(
                "lifestyle and combined models must be different artifacts".into(),
            ));
        }

        Ok(Self {
            lifestyle_model_path,
            combined_model_path,
            map_data_path,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        })
    }

    /// Set how long a session may sit idle before it is discarded.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfig` if `ttl` is zero.
    pub fn with_session_ttl(mut self, ttl: Duration) -> CoreResult<Self> {
        if ttl.is_zero() {
            return Err(CoreError::InvalidConfig(
                "session ttl must be greater than zero".into(),
            ));
        }
        self.session_ttl = ttl;
        Ok(self)
    }

    pub fn lifestyle_model_path(&self) -> &Path {
        &self.lifestyle_model_path
    }

    pub fn combined_model_path(&self) -> &Path {
        &self.combined_model_path
    }

    pub fn map_data_path(&self) -> &Path {
        &self.map_data_path
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }
}

/// Resolve a path from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, returns `default`.
pub fn path_from_env_value(value: Option<String>, default: &str) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Resolve the session ttl from an optional environment value, in whole seconds.
///
/// If `value` is `None` or empty/whitespace, returns the default ttl.
///
/// # Errors
///
/// Returns `CoreError::InvalidConfig` if the value is not a whole number of seconds.
pub fn session_ttl_from_env_value(value: Option<String>) -> CoreResult<Duration> {
    let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) else {
        return Ok(Duration::from_secs(DEFAULT_SESSION_TTL_SECS));
    };
    value
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| CoreError::InvalidConfig(format!("invalid session ttl seconds: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_from_env_value_falls_back_on_blank() {
        assert_eq!(
            path_from_env_value(None, "models/a.json"),
            PathBuf::from("models/a.json")
        );
        assert_eq!(
            path_from_env_value(Some("   ".into()), "models/a.json"),
            PathBuf::from("models/a.json")
        );
        assert_eq!(
            path_from_env_value(Some(" /opt/m.yaml ".into()), "models/a.json"),
            PathBuf::from("/opt/m.yaml")
        );
    }

    #[test]
    fn test_core_config_rejects_shared_model_path() {
        let err = CoreConfig::new(
            PathBuf::from("m.json"),
            PathBuf::from("m.json"),
            PathBuf::from("map.csv"),
        )
        .expect_err("same artifact for both models should be rejected");
        assert!(matches!(err, CoreError::InvalidConfig(msg) if msg.contains("different")));
    }

    #[test]
    fn test_core_config_rejects_empty_model_path() {
        let err = CoreConfig::new(
            PathBuf::new(),
            PathBuf::from("combined.json"),
            PathBuf::from("map.csv"),
        )
        .expect_err("empty path should be rejected");
        assert!(matches!(err, CoreError::InvalidConfig(msg) if msg.contains("lifestyle")));
    }

    #[test]
    fn test_session_ttl_defaults_and_overrides() {
        let cfg = CoreConfig::new(
            PathBuf::from("lifestyle.json"),
            PathBuf::from("combined.json"),
            PathBuf::from("map.csv"),
        )
        .expect("valid config");
        assert_eq!(cfg.session_ttl(), Duration::from_secs(1800));

        let cfg = cfg
            .with_session_ttl(Duration::from_secs(60))
            .expect("positive ttl");
        assert_eq!(cfg.session_ttl(), Duration::from_secs(60));

        let err = cfg
            .with_session_ttl(Duration::ZERO)
            .expect_err("zero ttl should be rejected");
        assert!(matches!(err, CoreError::InvalidConfig(msg) if msg.contains("ttl")));
    }

    #[test]
    fn test_session_ttl_from_env_value() {
        assert_eq!(
            session_ttl_from_env_value(None).expect("default"),
            Duration::from_secs(1800)
        );
        assert_eq!(
            session_ttl_from_env_value(Some(" ".into())).expect("default"),
            Duration::from_secs(1800)
        );
        assert_eq!(
            session_ttl_from_env_value(Some(" 90 ".into())).expect("seconds"),
            Duration::from_secs(90)
        );
        let err = session_ttl_from_env_value(Some("soon".into())).expect_err("not a number");
        assert!(matches!(err, CoreError::InvalidConfig(msg) if msg.contains("soon")));
    }
}
