use std::env;
use std::str::FromStr;

/// Token bucket for one route group: refill rate and bucket size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub per_second: u64,
    pub burst: u32,
}

impl FromStr for Quota {
    type Err = String;

    /// `per_second:burst`, both strictly positive.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (rate, burst) = raw
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("'{}' is not per_second:burst", raw))?;
        let per_second = rate.trim().parse::<u64>().ok().filter(|n| *n > 0);
        let burst = burst.trim().parse::<u32>().ok().filter(|n| *n > 0);
        match (per_second, burst) {
            (Some(per_second), Some(burst)) => Ok(Quota { per_second, burst }),
            _ => Err(format!("'{}' needs two positive integers", raw)),
        }
    }
}

/// Per-IP limits for GET routes (`read`) and mutating routes (`write`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub read: Quota,
    pub write: Quota,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            read: Quota {
                per_second: 30,
                burst: 60,
            },
            write: Quota {
                per_second: 10,
                burst: 20,
            },
        }
    }
}

impl RateLimitConfig {
    /// `RATE_LIMIT_ENABLED` toggles limiting; `RATE_LIMIT_CONFIG` is either a
    /// single quota for both groups (`10:20`) or per group
    /// (`read=30:60,write=10:20`). A malformed value keeps the defaults.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(enabled) = env::var("RATE_LIMIT_ENABLED").ok().as_deref().and_then(flag) {
            cfg.enabled = enabled;
        }
        match env::var("RATE_LIMIT_CONFIG") {
            Ok(raw) => cfg.with_overrides(&raw).unwrap_or_else(|err| {
                tracing::warn!("Ignoring RATE_LIMIT_CONFIG '{}': {}", raw, err);
                cfg
            }),
            Err(_) => cfg,
        }
    }

    fn with_overrides(mut self, raw: &str) -> Result<Self, String> {
        let items: Vec<&str> = raw.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
        if items.is_empty() {
            return Err("empty value".to_string());
        }
        for item in items {
            match item.split_once('=') {
                None => {
                    let quota: Quota = item.parse()?;
                    self.read = quota;
                    self.write = quota;
                }
                Some((group, quota)) => {
                    let quota: Quota = quota.parse()?;
                    match group.trim() {
                        "read" => self.read = quota,
                        "write" => self.write = quota,
                        other => return Err(format!("no route group named '{}'", other)),
                    }
                }
            }
        }
        Ok(self)
    }
}

fn flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
