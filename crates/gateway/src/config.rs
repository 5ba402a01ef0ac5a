use std::env;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_LOG_FILE: &str = "bot.log";
pub const DEFAULT_SYMBOL: &str = "BTCUSDT";
pub const DEFAULT_QUANTITY: f64 = 0.001;
pub const DEFAULT_BASE_URL: &str = "https://fapi.binance.com";
pub const DEFAULT_RECV_WINDOW: u64 = 5000;

/// 시작 시점(또는 클라이언트 생성 시점)에 치명적인 설정 에러
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("BINANCE_API_KEY and BINANCE_API_SECRET are required when DRY_RUN is false.")]
    MissingCredentials,
    #[error("DEFAULT_QUANTITY must be a positive float (got: {0}).")]
    InvalidDefaultQuantity(String),
    #[error("BINANCE_RECV_WINDOW must be a positive integer (got: {0}).")]
    InvalidRecvWindow(String),
    #[error("Live mode requires the exchange backend. Rebuild with the `live` feature.")]
    LiveBackendUnavailable,
}

/// 프로세스 설정. 시작 시 한 번 만들고 이후에는 바뀌지 않는다.
#[derive(Clone)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub dry_run: bool,
    pub log_file: PathBuf,
    pub default_symbol: String,
    pub default_quantity: f64,
    pub base_url: String,
    pub recv_window: u64,
}

impl GatewayConfig {
    /// 프로세스 환경변수에서 설정 로드
    /// dry_run_override가 있으면 DRY_RUN 값보다 우선한다 (CLI `--dry-run`).
    pub fn load(dry_run_override: Option<bool>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok(), dry_run_override)
    }

    /// 임의의 key 조회 함수로 설정 로드. 테스트에서 환경변수를 건드리지 않기 위해 사용한다.
    pub fn from_lookup<F>(lookup: F, dry_run_override: Option<bool>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 빈 문자열은 설정되지 않은 것으로 본다
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let dry_run = match dry_run_override {
            Some(forced) => forced,
            None => get("DRY_RUN").map(|v| parse_bool(&v)).unwrap_or(true),
        };

        let api_key = get("BINANCE_API_KEY");
        let api_secret = get("BINANCE_API_SECRET");

        if !dry_run && (api_key.is_none() || api_secret.is_none()) {
            return Err(ConfigError::MissingCredentials);
        }

        let default_quantity = match get("DEFAULT_QUANTITY") {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v > 0.0 => v,
                _ => return Err(ConfigError::InvalidDefaultQuantity(raw)),
            },
            None => DEFAULT_QUANTITY,
        };

        let recv_window = match get("BINANCE_RECV_WINDOW") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(v) if v > 0 => v,
                _ => return Err(ConfigError::InvalidRecvWindow(raw)),
            },
            None => DEFAULT_RECV_WINDOW,
        };

        Ok(Self {
            api_key,
            api_secret,
            dry_run,
            log_file: PathBuf::from(get("BOT_LOGFILE").unwrap_or_else(|| DEFAULT_LOG_FILE.into())),
            default_symbol: get("DEFAULT_SYMBOL").unwrap_or_else(|| DEFAULT_SYMBOL.into()),
            default_quantity,
            base_url: get("BINANCE_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            recv_window,
        })
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some()
    }
}

impl Default for GatewayConfig {
    /// 자격 증명 없는 dry-run 설정
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            dry_run: true,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            default_symbol: DEFAULT_SYMBOL.to_string(),
            default_quantity: DEFAULT_QUANTITY,
            base_url: DEFAULT_BASE_URL.to_string(),
            recv_window: DEFAULT_RECV_WINDOW,
        }
    }
}

// API 시크릿이 로그에 찍히지 않도록 직접 구현
impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "***");
        f.debug_struct("GatewayConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("dry_run", &self.dry_run)
            .field("log_file", &self.log_file)
            .field("default_symbol", &self.default_symbol)
            .field("default_quantity", &self.default_quantity)
            .field("base_url", &self.base_url)
            .field("recv_window", &self.recv_window)
            .finish()
    }
}

/// DRY_RUN 등 불리언 환경변수 해석: true/1/yes/on (대소문자 무시)
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_dry_run() {
        let config = GatewayConfig::from_lookup(lookup_from(&[]), None).unwrap();

        assert!(config.dry_run);
        assert!(!config.has_credentials());
        assert_eq!(config.log_file, PathBuf::from("bot.log"));
        assert_eq!(config.default_symbol, "BTCUSDT");
        assert_eq!(config.default_quantity, 0.001);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.recv_window, 5000);
    }

    #[test]
    fn test_truthy_values() {
        for v in ["true", "TRUE", "1", "yes", "On"] {
            assert!(parse_bool(v), "{} should be truthy", v);
        }
        for v in ["false", "0", "no", "off", "maybe", ""] {
            assert!(!parse_bool(v), "{} should be falsy", v);
        }
    }

    #[test]
    fn test_live_mode_requires_both_credentials() {
        let only_key = lookup_from(&[("DRY_RUN", "false"), ("BINANCE_API_KEY", "key")]);
        assert_eq!(
            GatewayConfig::from_lookup(only_key, None).unwrap_err(),
            ConfigError::MissingCredentials
        );

        let empty_secret = lookup_from(&[
            ("DRY_RUN", "0"),
            ("BINANCE_API_KEY", "key"),
            ("BINANCE_API_SECRET", ""),
        ]);
        assert_eq!(
            GatewayConfig::from_lookup(empty_secret, None).unwrap_err(),
            ConfigError::MissingCredentials
        );

        let both = lookup_from(&[
            ("DRY_RUN", "no"),
            ("BINANCE_API_KEY", "key"),
            ("BINANCE_API_SECRET", "secret"),
        ]);
        let config = GatewayConfig::from_lookup(both, None).unwrap();
        assert!(!config.dry_run);
        assert!(config.has_credentials());
    }

    #[test]
    fn test_dry_run_override_skips_credential_check() {
        let lookup = lookup_from(&[("DRY_RUN", "false")]);
        let config = GatewayConfig::from_lookup(lookup, Some(true)).unwrap();
        assert!(config.dry_run);
    }

    #[test]
    fn test_invalid_default_quantity() {
        for raw in ["abc", "0", "-1", "inf"] {
            let lookup = lookup_from(&[("DEFAULT_QUANTITY", raw)]);
            assert_eq!(
                GatewayConfig::from_lookup(lookup, None).unwrap_err(),
                ConfigError::InvalidDefaultQuantity(raw.to_string())
            );
        }

        let lookup = lookup_from(&[("DEFAULT_QUANTITY", "0.5"), ("DEFAULT_SYMBOL", "ETHUSDT")]);
        let config = GatewayConfig::from_lookup(lookup, None).unwrap();
        assert_eq!(config.default_quantity, 0.5);
        assert_eq!(config.default_symbol, "ETHUSDT");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let lookup = lookup_from(&[
            ("BINANCE_API_KEY", "my-key"),
            ("BINANCE_API_SECRET", "my-secret"),
        ]);
        let config = GatewayConfig::from_lookup(lookup, None).unwrap();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("my-key"));
        assert!(!debug.contains("my-secret"));
        assert!(debug.contains("***"));
    }
}
