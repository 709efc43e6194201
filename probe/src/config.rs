use std::time::Duration;

use disasterscope_shared::api::DEFAULT_API_BASE;

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 3;

/// Default probe location (lat, lng), matching the map's initial center.
pub const DEFAULT_LATITUDE: f64 = 20.59;
pub const DEFAULT_LONGITUDE: f64 = 78.96;

pub fn api_base() -> String {
    std::env::var("DISASTERSCOPE_API_BASE")
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

pub fn http_timeout() -> Duration {
    std::env::var("PROBE_HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
}

pub fn connect_timeout() -> Duration {
    std::env::var("PROBE_CONNECT_TIMEOUT_SECS")
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_base_defaults_when_unset_or_blank() {
        temp_env::with_var_unset("DISASTERSCOPE_API_BASE", || {
            assert_eq!(api_base(), DEFAULT_API_BASE);
        });
        temp_env::with_var("DISASTERSCOPE_API_BASE", Some("   "), || {
            assert_eq!(api_base(), DEFAULT_API_BASE);
        });
        temp_env::with_var("DISASTERSCOPE_API_BASE", Some(" http://10.0.0.2:5000 "), || {
            assert_eq!(api_base(), "http://10.0.0.2:5000");
        });
    }

    #[test]
    fn timeout_rejects_zero_and_garbage() {
        temp_env::with_var("PROBE_HTTP_TIMEOUT_SECS", Some("0"), || {
            assert_eq!(http_timeout(), Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
        });
        temp_env::with_var("PROBE_HTTP_TIMEOUT_SECS", Some("soon"), || {
            assert_eq!(http_timeout(), Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS));
        });
        temp_env::with_var("PROBE_HTTP_TIMEOUT_SECS", Some(" 25 "), || {
            assert_eq!(http_timeout(), Duration::from_secs(25));
        });
    }
}
