//! The single view slot a UI binds to, guarded by a request generation.
//!
//! Every submission takes the next generation number and fully resets the
//! panel. Responses are applied only while their generation is still the
//! latest, so a slow answer to an old query can never overwrite a newer one.

use crate::aggregator::{Aggregator, LookupOutcome, Stage};
use crate::view::ViewModel;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupState {
    #[default]
    Idle,
    Validating,
    Fetching,
    Merging,
    Ready,
    Failed,
}

/// What the renderer shows. `error` and `view` are never both set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub generation: u64,
    pub state: LookupState,
    /// Set while a network call is in flight.
    pub busy: bool,
    pub error: Option<String>,
    pub view: Option<ViewModel>,
}

pub struct LookupSession {
    aggregator: Aggregator,
    generation: AtomicU64,
    panel: Mutex<Panel>,
}

impl LookupSession {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator,
            generation: AtomicU64::new(0),
            panel: Mutex::new(Panel::default()),
        }
    }

    pub fn snapshot(&self) -> Panel {
        self.lock().clone()
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, Panel> {
        self.panel.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `f` only if `generation` is still the latest submission.
    fn apply<F>(&self, generation: u64, f: F) -> bool
    where
        F: FnOnce(&mut Panel),
    {
        let mut panel = self.lock();
        if self.current_generation() != generation {
            tracing::debug!(
                "Discarding stale update for generation {} (latest {})",
                generation,
                self.current_generation()
            );
            return false;
        }
        f(&mut panel);
        true
    }

    /// Submits a query and drives it to completion.
    ///
    /// Returns the panel as it stands once this submission settles or is
    /// superseded.
    pub async fn submit(&self, query: &str) -> Panel {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.apply(generation, |panel| {
            *panel = Panel {
                generation,
                state: LookupState::Validating,
                ..Panel::default()
            };
        });

        let result = self
            .aggregator
            .run(query, |stage| match stage {
                Stage::Fetching { .. } => self.apply(generation, |panel| {
                    panel.state = LookupState::Fetching;
                    panel.busy = true;
                }),
                Stage::Merged { view } => self.apply(generation, |panel| {
                    panel.state = LookupState::Merging;
                    panel.view = Some(view.clone());
                }),
            })
            .await;

        match result {
            Ok(Some(LookupOutcome::Invalid { message })) => {
                self.apply(generation, |panel| {
                    panel.state = LookupState::Idle;
                    panel.error = Some(message);
                });
            }
            Ok(Some(LookupOutcome::Ready { view })) => {
                self.apply(generation, |panel| {
                    panel.state = LookupState::Ready;
                    panel.busy = false;
                    panel.view = Some(*view);
                });
            }
            Ok(None) => {}
            Err(e) => {
                self.apply(generation, |panel| {
                    panel.state = LookupState::Failed;
                    panel.busy = false;
                    panel.view = None;
                    panel.error = Some(e.user_message());
                });
            }
        }

        self.snapshot()
    }
}
