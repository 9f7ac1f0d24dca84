//! Privalytics - a minimal, privacy-oriented web analytics collector
//!
//! Sites register for an API key, pages send beacons to `/api/track`, and
//! the key owner reads aggregates back. Visitors are identified only by a
//! daily pseudonym derived from IP and UTC date.
//!
//! # Architecture
//! - `storage`: SQLite store (SeaORM) and aggregate queries
//! - `services`: registration, ingestion, analytics
//! - `api`: HTTP handlers and API key middleware
//! - `utils`: pseudonyms, UA / referrer parsing, client IP
//! - `config`: layered static configuration
//! - `runtime`: startup, server mode, shutdown
//! - `system`: logging

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
