#![deny(missing_docs)]

//! Core library for the flashcard REST server.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Flashcard data model and the startup loader.
pub mod deck;
/// Structured logging and tracing setup.
pub mod logging;
/// Read-only queries over the loaded deck.
pub mod query;
