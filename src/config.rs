use std::env;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub kaltura_api_base: String,
    pub kaltura_cdn_base: String,
    pub kaltura_partner_id: u64,
    pub kaltura_timeout_secs: u64,
    pub thumbnail_width: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            kaltura_api_base: "https://cdnapisec.kaltura.com".to_string(),
            kaltura_cdn_base: "https://cdnsecakmi.kaltura.com".to_string(),
            kaltura_partner_id: 1773841,
            kaltura_timeout_secs: 10,
            thumbnail_width: 655,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let text = |key: &str, default: String| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(default)
        };

        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            kaltura_api_base: text("KALTURA_API_BASE", defaults.kaltura_api_base),
            kaltura_cdn_base: text("KALTURA_CDN_BASE", defaults.kaltura_cdn_base),
            kaltura_partner_id: parse_or(&lookup, "KALTURA_PARTNER_ID", defaults.kaltura_partner_id),
            kaltura_timeout_secs: parse_or(
                &lookup,
                "KALTURA_TIMEOUT_SECS",
                defaults.kaltura_timeout_secs,
            ),
            thumbnail_width: parse_or(&lookup, "THUMBNAIL_WIDTH", defaults.thumbnail_width),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.is_empty() => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("[config] Invalid value for {}: {:?}, using default", key, raw);
            default
        }),
        _ => default,
    }
}
