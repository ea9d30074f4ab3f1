//! Integration tests for the Stargate Rust SDK.
//!
//! These tests drive the public API against an in-process fake of the
//! document API and the DevOps API, served by wiremock. No Stargate
//! deployment is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test integration
//!
//! # With SDK logs
//! RUST_LOG=stargate=debug cargo test --test integration -- --nocapture
//! ```

mod auth_tests;
mod common;
mod config_tests;
mod devops_tests;
mod document_tests;
