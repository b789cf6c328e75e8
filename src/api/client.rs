use super::types::{
    ChangeEvent, CreateMonitorRequest, Monitor, RegisterInstanceRequest,
    RegisterInstanceResponse, UpdateMonitorRequest, decode_server_diff,
};
use crate::constant::{ASSET_TIMEOUT, CHANGES_PAGE_LIMIT, REQUEST_TIMEOUT};
use crate::diff::Segment;
use reqwest::Method;
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};

const INSTANCE_KEY_HEADER: &str = "X-Instance-Key";
const INSTANCE_SECRET_HEADER: &str = "X-Instance-Secret";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("http {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exchange a machine name for instance credentials.
pub fn register_instance(base_url: &str, name: &str) -> Result<(String, String), ApiError> {
    info!("Registering new instance as {:?}", name);
    let http = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;
    let response = http
        .post(format!("{}/api/instances/register", base_url.trim_end_matches('/')))
        .json(&RegisterInstanceRequest { name })
        .send()?;
    let out: RegisterInstanceResponse = check_status(response)?.json()?;
    info!("Registered instance. Key: {}", out.instance_key);
    Ok((out.instance_key, out.instance_secret))
}

/// Blocking client for the watcher backend.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    instance_key: String,
    instance_secret: String,
    http: HttpClient,
}

impl Client {
    pub fn new(
        base_url: impl Into<String>,
        instance_key: impl Into<String>,
        instance_secret: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url,
            instance_key: instance_key.into(),
            instance_secret: instance_secret.into(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn list_monitors(&self) -> Result<Vec<Monitor>, ApiError> {
        self.send_json(self.request(Method::GET, "/api/monitors"))
    }

    pub fn create_monitor(&self, req: &CreateMonitorRequest) -> Result<Monitor, ApiError> {
        self.send_json(self.request(Method::POST, "/api/monitors").json(req))
    }

    pub fn update_monitor(&self, id: u64, req: &UpdateMonitorRequest) -> Result<Monitor, ApiError> {
        let path = format!("/api/monitors/{id}");
        self.send_json(self.request(Method::PUT, &path).json(req))
    }

    pub fn delete_monitor(&self, id: u64) -> Result<(), ApiError> {
        let path = format!("/api/monitors/{id}");
        check_status(self.request(Method::DELETE, &path).send()?)?;
        Ok(())
    }

    pub fn list_changes(&self, monitor_id: u64) -> Result<Vec<ChangeEvent>, ApiError> {
        let path = changes_path(monitor_id);
        self.send_json(self.request(Method::GET, &path))
    }

    /// Download a snapshot. A missing URL is not an error, just no text.
    pub fn fetch_text(&self, url: Option<&str>) -> Result<String, ApiError> {
        let Some(url) = url.filter(|u| !u.is_empty()) else {
            return Ok(String::new());
        };
        debug!("diff: downloading HTML from {}", url);
        let body = check_status(self.http.get(url).send()?)
            .inspect_err(|e| warn!("diff: GET {} failed: {}", url, e))?
            .text()?;
        debug!("diff: download succeeded from {} ({} bytes)", url, body.len());
        Ok(body)
    }

    /// Download a binary asset such as a screenshot.
    pub fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.http.get(url).timeout(ASSET_TIMEOUT).send()?;
        Ok(check_status(response)?.bytes()?.to_vec())
    }

    /// Fetch and decode a diff the backend computed itself.
    pub fn fetch_server_diff(&self, url: &str) -> Result<Vec<Segment>, ApiError> {
        let body = self.fetch_text(Some(url))?;
        Ok(decode_server_diff(&body)?)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        with_credentials(builder, &self.instance_key, &self.instance_secret)
    }

    fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = check_status(builder.send()?)?;
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn changes_path(monitor_id: u64) -> String {
    format!("/api/monitors/{monitor_id}/changes?limit={CHANGES_PAGE_LIMIT}")
}

fn with_credentials(builder: RequestBuilder, key: &str, secret: &str) -> RequestBuilder {
    if key.is_empty() {
        return builder;
    }
    builder
        .header(INSTANCE_KEY_HEADER, key)
        .header(INSTANCE_SECRET_HEADER, secret)
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.as_u16() >= 400 {
        let body = response.text().unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = Client::new("http://localhost:8080/", "", "").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn changes_are_paged() {
        assert_eq!(changes_path(12), "/api/monitors/12/changes?limit=50");
    }

    #[test]
    fn credentials_are_attached_only_with_a_key() {
        let http = HttpClient::new();

        let req = with_credentials(http.get("http://localhost/"), "k", "s")
            .build()
            .unwrap();
        assert_eq!(req.headers()[INSTANCE_KEY_HEADER], "k");
        assert_eq!(req.headers()[INSTANCE_SECRET_HEADER], "s");

        let req = with_credentials(http.get("http://localhost/"), "", "s")
            .build()
            .unwrap();
        assert!(req.headers().get(INSTANCE_KEY_HEADER).is_none());
    }

    #[test]
    fn missing_snapshot_url_is_empty_text() {
        let client = Client::new("http://localhost:8080", "", "").unwrap();
        assert_eq!(client.fetch_text(None).unwrap(), "");
        assert_eq!(client.fetch_text(Some("")).unwrap(), "");
    }

    #[test]
    fn status_error_message() {
        let err = ApiError::Status {
            status: 404,
            body: "not found".into(),
        };
        assert_eq!(err.to_string(), "http 404: not found");
    }

    #[test]
    fn update_body_shape() {
        let body = serde_json::to_string(&UpdateMonitorRequest {
            frequency_seconds: 60,
            active: true,
        })
        .unwrap();
        assert_eq!(body, r#"{"frequency_seconds":60,"active":true}"#);
    }
}
