//! Bid integrity and scoring engine for competitive marketplace missions.
//!
//! The crate is split into a pure, deterministic analysis core
//! ([`marketplace`]) and the ambient service plumbing (configuration,
//! telemetry, error surface) shared with the HTTP shell in `services/api`.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
