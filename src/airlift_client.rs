use crate::config::Config;
use crate::errors::AppError;
use crate::models::{RawContactsPayload, RawPrimaryPayload};
use std::time::Duration;

/// Client for the two Airlift endpoints: the aircraft lookup and the
/// contacts directory lookup.
///
/// Errors from the aircraft endpoint come back as [`AppError::PrimaryFetch`],
/// errors from the contacts endpoint as [`AppError::SecondaryFetch`], so the
/// caller can tell a fatal failure from a degradable one.
#[derive(Debug, Clone)]
pub struct AirliftClient {
    client: reqwest::Client,
    base_url: String,
    use_adsb: bool,
}

impl AirliftClient {
    /// Creates a new `AirliftClient`.
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the base origin, request timeout and ADS-B flag.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .map_err(|e| {
                AppError::InternalError(format!("Failed to create Airlift client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            use_adsb: config.use_adsb,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the aircraft record for a tail number.
    ///
    /// # Arguments
    ///
    /// * `tail` - Normalized tail number.
    ///
    /// # Returns
    ///
    /// * `Result<RawPrimaryPayload, AppError>` - The raw payload, or `PrimaryFetch`
    ///   on transport failure, non-success status or an unparseable body.
    pub async fn fetch_aircraft(&self, tail: &str) -> Result<RawPrimaryPayload, AppError> {
        let use_adsb = if self.use_adsb { "true" } else { "false" };
        let url = reqwest::Url::parse_with_params(
            &format!("{}/api/aircraft", self.base_url),
            &[("n", tail), ("use_adsb", use_adsb)],
        )?;

        tracing::info!("Fetching aircraft {} from {}", tail, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::PrimaryFetch(format!("Aircraft request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Aircraft lookup for {} returned {}: {}", tail, status, error_text);
            return Err(AppError::PrimaryFetch(format!(
                "Aircraft endpoint returned {}: {}",
                status, error_text
            )));
        }

        let payload: RawPrimaryPayload = response.json().await.map_err(|e| {
            AppError::PrimaryFetch(format!("Failed to parse aircraft response: {}", e))
        })?;

        tracing::info!("✓ Aircraft payload received for {}", tail);
        Ok(payload)
    }

    /// Fetches the contacts directory entries matched to a tail number.
    ///
    /// # Arguments
    ///
    /// * `tail` - Normalized tail number, the same key used for the aircraft lookup.
    ///
    /// # Returns
    ///
    /// * `Result<RawContactsPayload, AppError>` - The raw payload, or `SecondaryFetch`.
    pub async fn fetch_contacts(&self, tail: &str) -> Result<RawContactsPayload, AppError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/api/contacts-by-tail", self.base_url),
            &[("n", tail)],
        )?;

        tracing::info!("Fetching contacts for {} from {}", tail, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::SecondaryFetch(format!("Contacts request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!("Contacts lookup for {} returned {}: {}", tail, status, error_text);
            return Err(AppError::SecondaryFetch(format!(
                "Contacts endpoint returned {}: {}",
                status, error_text
            )));
        }

        let payload: RawContactsPayload = response.json().await.map_err(|e| {
            AppError::SecondaryFetch(format!("Failed to parse contacts response: {}", e))
        })?;

        Ok(payload)
    }
}
