//! Page Watcher desktop client
//!
//! The `diff` module is the token diff engine and has no UI dependencies;
//! the rest is the eframe client for the watcher backend.

pub mod api;
pub mod app;
pub mod config;
pub mod constant;
pub mod diff;
pub mod diff_loader;
pub mod downloads;
pub mod messages;
pub mod style;
pub mod ui;
pub mod worker;
