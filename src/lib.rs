//! Phone Intelligence API Library
//!
//! Validates a phone number, queries a primary validation provider with
//! round-robin credential rotation, optionally enriches the result with a
//! second provider, and merges everything with bundled reference data into
//! one canonical report.
//!
//! # Modules
//!
//! - `components`: Positional split of numbers into area code and subscriber.
//! - `config`: Configuration management.
//! - `credentials`: Round-robin credential pool.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers and shared state.
//! - `lookup`: The per-request lookup pipeline.
//! - `merger`: Field-precedence merge into the canonical report.
//! - `models`: Normalized records and report types.
//! - `provider_models`: Provider wire payloads and adapters.
//! - `providers`: Provider HTTP clients.
//! - `reference_data`: Static country, timezone and line-type tables.
//! - `retry`: Credential-rotating retry loop.
//! - `router`: Router assembly and OpenAPI document.
//! - `validation`: Input validation.

pub mod components;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod handlers;
pub mod lookup;
pub mod merger;
pub mod models;
pub mod provider_models;
pub mod providers;
pub mod reference_data;
pub mod retry;
pub mod router;
pub mod validation;
