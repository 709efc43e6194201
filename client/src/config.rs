use disasterscope_shared::api::DEFAULT_API_BASE;

/// Initial map center (latitude, longitude).
pub(crate) const INITIAL_CENTER: (f64, f64) = (20.59, 78.96);
/// Initial zoom level, in the same sense as a slippy-map zoom.
pub(crate) const INITIAL_ZOOM: f64 = 5.0;

/// How long the error banner stays up before hiding itself.
pub(crate) const ERROR_BANNER_MS: u32 = 8_000;

/// API base URL. `?api=` wins, then the build-time `DISASTERSCOPE_API_BASE`, then the default.
pub(crate) fn api_base() -> String {
    let from_query = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| query_param(&search, "api"))
        .and_then(|raw| js_sys::decode_uri_component(&raw).ok())
        .and_then(|decoded| decoded.as_string());

    resolve_api_base(from_query, option_env!("DISASTERSCOPE_API_BASE"))
}

fn resolve_api_base(from_query: Option<String>, from_build: Option<&str>) -> String {
    from_query
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            from_build
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
}

/// Raw (still percent-encoded) value of `key` in a `?a=b&c=d` search string.
pub(crate) fn query_param(search: &str, key: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
}
