//! Pokebattle Engine library.
//!
//! This crate contains all server-side code for the pokemon battle service.
//!
//! ## Structure
//!
//! - `use_cases/` - CRUD and battle orchestration
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// End-to-end tests driving the router against a temporary SQLite store.
#[cfg(test)]
mod e2e_tests;

pub use app::App;
