//! Behaviour switches the host picks at construction time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::announce::{Politeness, millis};
use crate::consts::{MONTH_ANNOUNCEMENT_TIMEOUT, SELECTION_ANNOUNCEMENT_TIMEOUT};

/// What Escape does inside the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapeBehavior {
    /// Report the current selection again, unchanged. Lets a popup close
    /// without losing the prior value.
    #[default]
    Reconfirm,
    /// Clear the selection and report `None`
    Clear,
    /// Leave Escape to the host
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    ZeroTimeout { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarOptions {
    pub escape: EscapeBehavior,
    /// Clicking a day also moves keyboard focus and the tab stop to it
    pub pointer_focuses: bool,
    /// How long "Selected: ..." stays in the polite live region
    #[serde(rename = "selection_timeout_ms", with = "millis")]
    pub selection_timeout: Duration,
    /// How long the month heading stays in the assertive live region
    #[serde(rename = "month_timeout_ms", with = "millis")]
    pub month_timeout: Duration,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            escape: EscapeBehavior::default(),
            pointer_focuses: true,
            selection_timeout: SELECTION_ANNOUNCEMENT_TIMEOUT,
            month_timeout: MONTH_ANNOUNCEMENT_TIMEOUT,
        }
    }
}

impl CalendarOptions {
    /// # Errors
    /// Returns `ConfigError::ZeroTimeout` if an announcement would vanish immediately.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.selection_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout {
                field: "selection_timeout_ms",
            });
        }
        if self.month_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout {
                field: "month_timeout_ms",
            });
        }
        Ok(())
    }

    /// Polite messages are selections, assertive ones are month changes
    pub const fn timeout_for(&self, live: Politeness) -> Duration {
        match live {
            Politeness::Polite => self.selection_timeout,
            Politeness::Assertive => self.month_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = CalendarOptions::default();
        assert_eq!(options.escape, EscapeBehavior::Reconfirm);
        assert!(options.pointer_focuses);
        assert_eq!(options.selection_timeout, Duration::from_millis(4000));
        assert_eq!(options.month_timeout, Duration::from_millis(7000));
        assert!(options.validate().is_ok());
        assert_eq!(options.timeout_for(Politeness::Polite), Duration::from_millis(4000));
        assert_eq!(options.timeout_for(Politeness::Assertive), Duration::from_millis(7000));
    }

    #[test]
    fn test_deserialize_partial() {
        let options: CalendarOptions =
            serde_json::from_str(r#"{"escape":"clear","month_timeout_ms":4000}"#).unwrap();
        assert_eq!(options.escape, EscapeBehavior::Clear);
        assert_eq!(options.month_timeout, Duration::from_millis(4000));
        assert_eq!(options.selection_timeout, Duration::from_millis(4000));
        assert!(options.pointer_focuses);

        let empty: CalendarOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, CalendarOptions::default());
    }

    #[test]
    fn test_serialize_round_trip() {
        let options = CalendarOptions {
            escape: EscapeBehavior::Ignore,
            pointer_focuses: false,
            ..CalendarOptions::default()
        };
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(
            json,
            r#"{"escape":"ignore","pointer_focuses":false,"selection_timeout_ms":4000,"month_timeout_ms":7000}"#
        );
        assert_eq!(serde_json::from_str::<CalendarOptions>(&json).unwrap(), options);
    }

    #[test]
    fn test_validate_rejects_zero_timeouts() {
        let options = CalendarOptions {
            selection_timeout: Duration::ZERO,
            ..CalendarOptions::default()
        };
        let err = options.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::ZeroTimeout {
                field: "selection_timeout_ms"
            }
        );
        assert_eq!(err.to_string(), "selection_timeout_ms must be greater than zero");

        let options = CalendarOptions {
            month_timeout: Duration::ZERO,
            ..CalendarOptions::default()
        };
        assert!(options.validate().is_err());
    }
}
