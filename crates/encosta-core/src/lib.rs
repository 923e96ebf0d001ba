#![forbid(unsafe_code)]
//! encosta-core library.
//!
//! Report records, the review lifecycle, and the keyed JSON persistence
//! layer behind the `enc` CLI.
//!
//! # Conventions
//!
//! - **Errors**: typed [`error::ReportError`] at the public API surface;
//!   `anyhow::Result` for config plumbing.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod lock;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;
pub mod view;

pub use error::ReportError;
pub use service::ReportService;
