//! Controller configuration.
//!
//! Every field has a default matching the stock firmware, so an empty JSON
//! object is a valid configuration:
//!
//! ```
//! use doorlock_controller::LockConfig;
//!
//! let config: LockConfig = serde_json::from_str(r#"{ "secret": "4321" }"#).unwrap();
//! assert_eq!(config.secret.to_string(), "4321");
//! assert_eq!(config.lockout_ms, 3000);
//! assert!(config.validate().is_ok());
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use doorlock_core::constants::{
    DEFAULT_BANNER, DEFAULT_CHIME_MS, DEFAULT_COMMAND_QUEUE_CAPACITY, DEFAULT_LOCKOUT_MS,
    DEFAULT_MAX_FAILED_ATTEMPTS, DEFAULT_SCROLL_INTERVAL_MS, DEFAULT_STATUS_INTERVAL_MS,
    DEFAULT_WELCOME, DISPLAY_COLUMNS,
};
use doorlock_core::{Credential, Error, Result};

/// Baud rate of the stock board's UART.
const DEFAULT_BAUD_RATE: u32 = 9600;

/// Runtime configuration of the lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    /// Provisioned 4-digit credential.
    pub secret: Credential,

    /// Length of a lockout and of its alarm envelope.
    pub lockout_ms: u64,

    /// Length of the success chime.
    pub chime_ms: u64,

    /// Cadence of periodic status frames.
    pub status_interval_ms: u64,

    /// Cadence of the idle banner scroll.
    pub scroll_interval_ms: u64,

    /// Consecutive keypad failures that trigger a lockout.
    pub max_failed_attempts: u8,

    /// Capacity of the receive-context command queue.
    pub command_queue_capacity: usize,

    /// Headline shown while waiting for input.
    pub welcome: String,

    /// Text scrolled across the second line while idle.
    pub banner: String,

    /// Serial device opened by the simulator instead of stdin/stdout.
    pub serial_port: Option<String>,

    /// Baud rate for `serial_port`.
    pub baud_rate: u32,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            secret: Credential::FACTORY,
            lockout_ms: DEFAULT_LOCKOUT_MS,
            chime_ms: DEFAULT_CHIME_MS,
            status_interval_ms: DEFAULT_STATUS_INTERVAL_MS,
            scroll_interval_ms: DEFAULT_SCROLL_INTERVAL_MS,
            max_failed_attempts: DEFAULT_MAX_FAILED_ATTEMPTS,
            command_queue_capacity: DEFAULT_COMMAND_QUEUE_CAPACITY,
            welcome: DEFAULT_WELCOME.to_string(),
            banner: DEFAULT_BANNER.to_string(),
            serial_port: None,
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

impl LockConfig {
    /// Load and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Config` if
    /// it does not parse or fails [`validate`](Self::validate).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Check the values the controller cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let durations = [
            ("lockout_ms", self.lockout_ms),
            ("chime_ms", self.chime_ms),
            ("status_interval_ms", self.status_interval_ms),
            ("scroll_interval_ms", self.scroll_interval_ms),
        ];
        if let Some((name, _)) = durations.iter().find(|(_, value)| *value == 0) {
            return Err(Error::Config(format!("{name} must be greater than zero")));
        }

        if self.max_failed_attempts == 0 {
            return Err(Error::Config(
                "max_failed_attempts must be greater than zero".to_string(),
            ));
        }

        if self.command_queue_capacity == 0 {
            return Err(Error::Config(
                "command_queue_capacity must be greater than zero".to_string(),
            ));
        }

        if self.banner.chars().count() < DISPLAY_COLUMNS {
            return Err(Error::Config(format!(
                "banner must be at least {DISPLAY_COLUMNS} characters"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults_match_firmware() {
        let config = LockConfig::default();
        assert_eq!(config.secret.to_string(), "1234");
        assert_eq!(config.lockout_ms, 3000);
        assert_eq!(config.chime_ms, 3000);
        assert_eq!(config.status_interval_ms, 1000);
        assert_eq!(config.max_failed_attempts, 3);
        assert_eq!(config.banner.len(), 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_object_is_default() {
        let config: LockConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LockConfig::default());
    }

    #[test]
    fn test_bad_secret_rejected_at_parse() {
        let result = serde_json::from_str::<LockConfig>(r#"{ "secret": "12a4" }"#);
        assert!(result.is_err());
    }

    #[rstest]
    #[case(r#"{ "lockout_ms": 0 }"#, "lockout_ms")]
    #[case(r#"{ "scroll_interval_ms": 0 }"#, "scroll_interval_ms")]
    #[case(r#"{ "max_failed_attempts": 0 }"#, "max_failed_attempts")]
    #[case(r#"{ "command_queue_capacity": 0 }"#, "command_queue_capacity")]
    #[case(r#"{ "banner": "too short" }"#, "banner")]
    fn test_validate_rejects(#[case] json: &str, #[case] field: &str) {
        let config: LockConfig = serde_json::from_str(json).unwrap();
        match config.validate() {
            Err(Error::Config(message)) => assert!(message.contains(field), "{message}"),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_path_roundtrip() {
        let path =
            std::env::temp_dir().join(format!("doorlock-config-{}.json", std::process::id()));
        let mut config = LockConfig::default();
        config.secret = "9876".parse().unwrap();
        config.serial_port = Some("/dev/ttyUSB0".to_string());
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = LockConfig::from_path(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = LockConfig::from_path("/nonexistent/doorlock.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
