/// Aggregation pipeline for one tail-number lookup.
///
/// 1. Validate and normalize the query
/// 2. Fetch the aircraft payload (fatal on failure)
/// 3. Run every normalizer over it
/// 4. Fetch contacts with the same key (failure degrades only that section)
use crate::airlift_client::AirliftClient;
use crate::config::Config;
use crate::errors::{AppError, ResultExt, EMPTY_QUERY_MESSAGE};
use crate::models::RawPrimaryPayload;
use crate::normalizers;
use crate::time_format::{Clock, SystemClock};
use crate::view::{ContactsSection, ViewModel};
use serde::Serialize;
use std::sync::Arc;

/// Result of a lookup that did not hit a fatal error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// The query was rejected locally; no request was made.
    Invalid { message: String },
    Ready { view: Box<ViewModel> },
}

/// Checkpoints reported by [`Aggregator::run`].
#[derive(Debug, Clone, Copy)]
pub enum Stage<'a> {
    /// The query is valid and the aircraft fetch is about to start.
    Fetching { tail: &'a str },
    /// Primary sections are built; contacts are about to be fetched.
    Merged { view: &'a ViewModel },
}

#[derive(Clone)]
pub struct Aggregator {
    client: AirliftClient,
    clock: Arc<dyn Clock>,
}

impl Aggregator {
    pub fn new(client: AirliftClient, clock: Arc<dyn Clock>) -> Self {
        Self { client, clock }
    }

    /// Aggregator over a fresh client and the system clock.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let client = AirliftClient::new(config)
            .context(format!("Building Airlift client for {}", config.api_base_url))?;
        Ok(Self::new(client, Arc::new(SystemClock)))
    }

    pub fn now(&self) -> i64 {
        self.clock.now_epoch()
    }

    /// Normalizes the query or rejects it with the user-facing instruction.
    pub fn validate(query: &str) -> Result<String, AppError> {
        normalizers::normalize_tail(query)
            .ok_or_else(|| AppError::Validation(EMPTY_QUERY_MESSAGE.to_string()))
    }

    pub async fn fetch_primary(&self, tail: &str) -> Result<RawPrimaryPayload, AppError> {
        self.client.fetch_aircraft(tail).await
    }

    /// Builds every section from the aircraft payload. Contacts start out loading.
    pub fn merge_primary(&self, tail: &str, payload: &RawPrimaryPayload, now: i64) -> ViewModel {
        let (identity, flight_meta) = normalizers::flight_meta(payload, tail);

        ViewModel {
            identity,
            flight_meta,
            registry: normalizers::registry(payload),
            telemetry: normalizers::telemetry(payload, tail, now),
            targeting: normalizers::targeting(payload),
            activity: normalizers::activity(payload, now),
            flight_history: normalizers::flight_history(payload),
            contacts: ContactsSection::Loading,
        }
    }

    /// Fetches and normalizes contacts. Never fails: any error becomes the
    /// unavailable section.
    pub async fn contacts_section(&self, tail: &str) -> ContactsSection {
        match self.client.fetch_contacts(tail).await {
            Ok(payload) => normalizers::contacts(&payload),
            Err(e) => {
                tracing::warn!("Contacts degraded for {}: {}", tail, e);
                ContactsSection::unavailable()
            }
        }
    }

    /// Runs the whole pipeline for one query.
    ///
    /// # Returns
    ///
    /// * `Ok(LookupOutcome::Invalid)` - Empty query; nothing was fetched.
    /// * `Ok(LookupOutcome::Ready)` - Full view model, contacts possibly unavailable.
    /// * `Err(AppError::PrimaryFetch)` - The aircraft lookup failed.
    pub async fn lookup(&self, query: &str) -> Result<LookupOutcome, AppError> {
        self.run(query, |_| true).await?.ok_or_else(|| {
            AppError::InternalError("Lookup stopped before completion".to_string())
        })
    }

    /// The lookup pipeline with a checkpoint at each stage.
    ///
    /// `on_stage` is called synchronously before the aircraft fetch and again
    /// once the primary sections are merged. Returning `false` abandons the
    /// lookup and yields `Ok(None)`.
    pub async fn run<F>(
        &self,
        query: &str,
        mut on_stage: F,
    ) -> Result<Option<LookupOutcome>, AppError>
    where
        F: FnMut(Stage<'_>) -> bool,
    {
        let tail = match Self::validate(query) {
            Ok(tail) => tail,
            Err(e) => {
                tracing::debug!("Rejected query {:?}: {}", query, e);
                return Ok(Some(LookupOutcome::Invalid {
                    message: e.user_message(),
                }));
            }
        };

        if !on_stage(Stage::Fetching { tail: &tail }) {
            return Ok(None);
        }

        tracing::info!("Looking up {}", tail);
        let now = self.now();

        let payload = self.fetch_primary(&tail).await.map_err(|e| {
            tracing::error!("Lookup for {} failed: {}", tail, e);
            e
        })?;

        let mut view = self.merge_primary(&tail, &payload, now);
        if !on_stage(Stage::Merged { view: &view }) {
            return Ok(None);
        }

        view.contacts = self.contacts_section(&tail).await;

        tracing::info!("✓ View ready for {}", tail);
        Ok(Some(LookupOutcome::Ready {
            view: Box::new(view),
        }))
    }
}
