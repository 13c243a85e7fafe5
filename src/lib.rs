#![deny(missing_docs)]

//! Core library for the student records server.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Mutation and summary counters.
pub mod metrics;
/// Student record model and concurrent storage.
pub mod records;
/// Service facade combining storage and summaries.
pub mod service;
/// Summary generation via a remote model or a local template.
pub mod summarization;
