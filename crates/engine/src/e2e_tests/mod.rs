//! Router-level end-to-end tests.
//!
//! These tests drive the full HTTP router with:
//! - A real SQLite store in a temporary directory
//! - A fixed clock and a fixed battle draw
//! - Complete App construction with all use cases
//!
//! # Running
//!
//! ```bash
//! cargo test -p pokebattle-engine --lib e2e_tests
//! ```

mod battle_api_tests;
mod e2e_helpers;

pub use e2e_helpers::*;
