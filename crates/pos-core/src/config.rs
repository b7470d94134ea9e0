use crate::warranty::WarrantyPeriod;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Log output shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format {other:?}, expected compact or json")),
        }
    }
}

/// Terminal configuration.
///
/// # Environment
///
/// | variable | default | |
/// |----------|---------|---|
/// | POS_STORE_NAME | FRIENDS IT ZONE | receipt header |
/// | POS_API_BASE_URL | http://localhost:5000 | REST API root |
/// | POS_API_TOKEN | unset | bearer token |
/// | POS_REQUEST_TIMEOUT_SECS | 30 | per-request timeout |
/// | POS_WARRANTY_PERIOD | 1 year | coverage for each sold unit |
/// | POS_CURRENCY | BDT | |
/// | POS_LOG_FORMAT | compact | `compact` or `json` |
/// | POS_ACTOR_BUFFER | 32 | request queue per in-process store |
#[derive(Debug, Clone, PartialEq)]
pub struct PosConfig {
    pub store_name: String,
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub request_timeout: Duration,
    pub warranty_period: WarrantyPeriod,
    pub currency: String,
    pub log_format: LogFormat,
    pub actor_buffer: usize,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            store_name: "FRIENDS IT ZONE".into(),
            api_base_url: "http://localhost:5000".into(),
            api_token: None,
            request_timeout: Duration::from_secs(30),
            warranty_period: WarrantyPeriod::years(1),
            currency: "BDT".into(),
            log_format: LogFormat::Compact,
            actor_buffer: 32,
        }
    }
}

fn parse<T>(var: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: ToString,
{
    match value {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<T>();
            parsed.map_err(|e| ConfigError::Invalid {
                var,
                reason: e.to_string(),
                value,
            })
        }
    }
}

impl PosConfig {
    /// Reads the process environment. Unset variables take their default; set but
    /// unparsable ones are an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let text = |var: &str, default: String| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let timeout_secs: u64 = parse(
            "POS_REQUEST_TIMEOUT_SECS",
            lookup("POS_REQUEST_TIMEOUT_SECS"),
            defaults.request_timeout.as_secs(),
        )?;
        let actor_buffer: usize =
            parse("POS_ACTOR_BUFFER", lookup("POS_ACTOR_BUFFER"), defaults.actor_buffer)?;
        if actor_buffer == 0 {
            return Err(ConfigError::Invalid {
                var: "POS_ACTOR_BUFFER",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }

        Ok(Self {
            store_name: text("POS_STORE_NAME", defaults.store_name),
            api_base_url: text("POS_API_BASE_URL", defaults.api_base_url),
            api_token: lookup("POS_API_TOKEN").filter(|t| !t.trim().is_empty()),
            request_timeout: Duration::from_secs(timeout_secs),
            warranty_period: parse(
                "POS_WARRANTY_PERIOD",
                lookup("POS_WARRANTY_PERIOD"),
                defaults.warranty_period,
            )?,
            currency: text("POS_CURRENCY", defaults.currency),
            log_format: parse("POS_LOG_FORMAT", lookup("POS_LOG_FORMAT"), defaults.log_format)?,
            actor_buffer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<PosConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PosConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config_from(&[]).unwrap(), PosConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("POS_STORE_NAME", "Branch 2"),
            ("POS_API_TOKEN", "secret"),
            ("POS_REQUEST_TIMEOUT_SECS", "5"),
            ("POS_WARRANTY_PERIOD", "6 months"),
            ("POS_LOG_FORMAT", "JSON"),
            ("POS_ACTOR_BUFFER", "8"),
        ])
        .unwrap();

        assert_eq!(config.store_name, "Branch 2");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.warranty_period, WarrantyPeriod::months(6));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.actor_buffer, 8);
        assert_eq!(config.currency, "BDT");
    }

    #[test]
    fn test_bad_values_are_reported() {
        let err = config_from(&[("POS_REQUEST_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { var: "POS_REQUEST_TIMEOUT_SECS", .. }
        ));
        assert!(config_from(&[("POS_WARRANTY_PERIOD", "forever")]).is_err());
        assert!(config_from(&[("POS_ACTOR_BUFFER", "0")]).is_err());
    }
}
