use crate::diff::{DiffStyle, Segment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    pub id: u64,
    pub name: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_selector: Option<String>,
    pub frequency_seconds: i64,
    pub notify_email: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_email_address: Option<String>,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_status: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Monitor {
    pub fn display_label(&self) -> String {
        let mut label = format!("{} ({})", self.name, self.url);
        if !self.active {
            label.push_str(" [inactive]");
        }
        label
    }
}

/// One detected change; the snapshot fields are download URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub id: u64,
    pub monitor_id: u64,
    pub run_id: u64,
    #[serde(default)]
    pub http_status_prev: Option<i32>,
    #[serde(default)]
    pub http_status_curr: Option<i32>,
    #[serde(default)]
    pub html_prev: Option<String>,
    #[serde(default)]
    pub html_curr: Option<String>,
    #[serde(default)]
    pub html_diff: Option<String>,
    #[serde(default)]
    pub screenshot_curr: Option<String>,
    #[serde(default)]
    pub screenshot_prev: Option<String>,
    #[serde(default)]
    pub screenshot_diff: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ChangeEvent {
    /// `(prev, curr)` when both checks reported a status and they differ.
    pub fn status_change(&self) -> Option<(i32, i32)> {
        match (self.http_status_prev, self.http_status_curr) {
            (Some(prev), Some(curr)) if prev != curr => Some((prev, curr)),
            _ => None,
        }
    }

    pub fn display_label(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMonitorRequest {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_selector: Option<String>,
    pub render_js: bool,
    pub frequency_seconds: i64,
    pub notify_email: bool,
    pub notify_email_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMonitorRequest {
    pub frequency_seconds: i64,
    pub active: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterInstanceRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterInstanceResponse {
    pub instance_key: String,
    pub instance_secret: String,
}

/// Segment of a diff computed by the backend (older change events).
#[derive(Debug, Clone, Deserialize)]
pub struct ServerDiffSegment {
    pub text: String,
    #[serde(default)]
    pub kind: Option<String>,
}

impl From<ServerDiffSegment> for Segment {
    fn from(seg: ServerDiffSegment) -> Self {
        Segment::new(seg.text, DiffStyle::from_kind(seg.kind.as_deref()))
    }
}

/// Decode a server diff body; an empty body is an empty diff.
pub fn decode_server_diff(body: &str) -> Result<Vec<Segment>, serde_json::Error> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let raw: Vec<ServerDiffSegment> = serde_json::from_str(body)?;
    Ok(raw.into_iter().map(Segment::from).collect())
}
