#[derive(Debug, Clone)]
pub struct Config {
    /// Origin both upstream endpoints are resolved against, without a trailing slash.
    pub api_base_url: String,
    pub port: u16,
    pub upstream_timeout_secs: u64,
    /// Sent as the `use_adsb` flag on the aircraft lookup.
    pub use_adsb: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            api_base_url: std::env::var("AIRLIFT_API_BASE_URL")
                .map_err(|_| anyhow::anyhow!("AIRLIFT_API_BASE_URL environment variable required"))
                .and_then(|url| Self::validate_base_url(&url))?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            upstream_timeout_secs: std::env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("UPSTREAM_TIMEOUT_SECS must be a whole number"))
                .and_then(|secs| {
                    if secs == 0 {
                        anyhow::bail!("UPSTREAM_TIMEOUT_SECS must be greater than zero");
                    }
                    Ok(secs)
                })?,
            use_adsb: std::env::var("USE_ADSB")
                .ok()
                .map(|v| Self::parse_flag(&v))
                .transpose()?
                .unwrap_or(true),
        };

        tracing::debug!("Airlift API base URL: {}", config.api_base_url);
        tracing::debug!("Upstream timeout: {}s", config.upstream_timeout_secs);
        tracing::debug!("ADS-B lookups enabled: {}", config.use_adsb);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    /// Builds a config pointing at `api_base_url` with every other value defaulted.
    pub fn for_base_url(api_base_url: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            api_base_url: Self::validate_base_url(&api_base_url.into())?,
            port: 3000,
            upstream_timeout_secs: 30,
            use_adsb: true,
        })
    }

    fn validate_base_url(url: &str) -> anyhow::Result<String> {
        let url = url.trim();
        if url.is_empty() {
            anyhow::bail!("AIRLIFT_API_BASE_URL cannot be empty");
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            anyhow::bail!("AIRLIFT_API_BASE_URL must start with http:// or https://");
        }
        Ok(url.trim_end_matches('/').to_string())
    }

    fn parse_flag(raw: &str) -> anyhow::Result<bool> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => anyhow::bail!("USE_ADSB must be a boolean, got '{}'", other),
        }
    }
}
