//! Terminal dashboard for a random-image HTTP API.
//!
//! The library is split along the same seams as the dashboard itself:
//! [`api`] talks to the backend, [`ui`] owns transient UI state behind the
//! [`ui::UiPort`] trait, and [`dashboard`] wires the two together.

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod diagnostics;
pub mod ui;
