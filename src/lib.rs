//! Airlift tail-number view library
//!
//! Aggregates the Airlift aircraft lookup (flight tracking, registry, live
//! ADS-B, targeting heuristics) and the contacts directory lookup into one
//! display-ready view model keyed by tail number.
//!
//! # Modules
//!
//! - `api`: HTTP adapter surface.
//! - `core`: Normalization and aggregation logic.
//! - `integrations`: Upstream service clients.
//! - `aggregator`: Lookup pipeline with partial-failure isolation.
//! - `airlift_client`: Client for the aircraft and contacts endpoints.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Raw upstream payload models.
//! - `normalizers`: Per-source mapping into view sections.
//! - `reducer`: First-present field reduction and the `unknown` sentinel.
//! - `session`: Generation-guarded view slot.
//! - `time_format`: Relative time formatting and clocks.
//! - `view`: Display-ready view model.

pub mod api;
pub mod core;
pub mod integrations;

pub mod aggregator;
pub mod airlift_client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod normalizers;
pub mod reducer;
pub mod session;
pub mod time_format;
pub mod view;
