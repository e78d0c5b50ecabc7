//! taskpad library
//!
//! Local task persistence, the synchronizing task list view, and theme
//! preferences. The binary in `main.rs` is a thin presentation layer on top.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod hooks;
pub mod logging;
pub mod services;
pub mod store;
pub mod types;
