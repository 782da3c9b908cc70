//! Repldex - a community wiki backend.
//!
//! This crate serves the Repldex JSON API and the Discord slash-command bot
//! over a single HTTP server. Storage is MongoDB with binary UUID primary
//! keys; the public surface only ever sees their lowercase hex encoding. The
//! Discord side speaks the interactions webhook contract directly: Ed25519
//! signature verification, then dispatch to registered commands.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    unsafe_code,
    unsafe_op_in_unsafe_fn,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,        // Will add gradually
    clippy::missing_panics_doc,        // Will add gradually
)]

/// Discord bot interface - verifier, dispatcher, commands.
pub mod bot;
/// Application configuration loaded from the environment.
pub mod config;
/// Database connector, identifier codec, and repositories.
pub mod db;
/// Unified error types and result handling.
pub mod errors;
/// Public record types.
pub mod models;
/// HTTP router and endpoint handlers.
pub mod routes;
