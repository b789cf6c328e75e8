//! HTTP client and wire types for the watcher backend.

mod client;
mod types;

pub use client::{ApiError, Client, register_instance};
pub use types::{
    ChangeEvent, CreateMonitorRequest, Monitor, ServerDiffSegment, UpdateMonitorRequest,
    decode_server_diff,
};
