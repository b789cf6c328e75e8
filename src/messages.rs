use crate::api::{ChangeEvent, CreateMonitorRequest, Monitor, UpdateMonitorRequest};
use crate::diff_loader::LoadedDiff;
use std::path::PathBuf;

/// Work the UI hands to the background worker
pub enum Request {
    LoadMonitors,
    CreateMonitor(CreateMonitorRequest),
    UpdateMonitor { id: u64, request: UpdateMonitorRequest },
    DeleteMonitor(u64),
    LoadChanges(u64), // monitor id
    LoadDiff(ChangeEvent),
    SaveFile { file_name: String, data: Vec<u8> },
    SaveFileAs { file_name: String, data: Vec<u8> },
    DownloadAsset { file_name: String, url: String },
}

/// Response messages from background operations
pub enum Response {
    MonitorsLoaded(Result<Vec<Monitor>, String>),
    MonitorCreated(Result<Monitor, String>),
    MonitorUpdated(Result<Monitor, String>),
    MonitorDeleted(Result<u64, String>),
    ChangesLoaded {
        monitor_id: u64,
        result: Result<Vec<ChangeEvent>, String>,
    },
    DiffLoaded {
        change_id: u64,
        loaded: LoadedDiff,
    },
    Saved(Result<PathBuf, String>),
}
