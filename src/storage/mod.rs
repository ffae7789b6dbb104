//! Layout API client
//!
//! Talks to the layout store over JSON HTTP:
//! - `GET    {base}layouts/names`  → `{"names": [...]}`
//! - `GET    {base}layouts/{name}` → layout, 404 if absent
//! - `POST   {base}layouts`        → create (panels as a JSON string)
//! - `DELETE {base}layouts/{name}`
//!
//! Uses a fire-and-poll pattern that works with macroquad's single-threaded
//! frame loop: every call returns a [`PendingRequest`] that the app polls
//! once per frame. Nothing is retried, deduplicated or timed out.

mod async_ops;
mod http;

pub use async_ops::{AsyncOp, AsyncResult};
pub use http::Method;

use thiserror::Error;

use crate::world::{Layout, LayoutError, LayoutRequest, NamesResponse};

/// Client-side failures of a layout API call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// 404 from the server
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-2xx status
    #[error("server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Connection, DNS, TLS or transport failure
    #[error("network error: {0}")]
    Network(String),

    /// Response body was not the expected JSON
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Response parsed but violates the data model
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Worker went away without reporting a result
    #[error("request was dropped before completing")]
    Dropped,
}

/// An in-flight API call plus what it is about (layout name, empty for lists)
pub struct PendingRequest<T> {
    pub target: String,
    pub op: AsyncOp<T>,
}

impl<T> PendingRequest<T> {
    /// A request that already finished (local validation failures, tests)
    pub fn ready(target: impl Into<String>, result: AsyncResult<T>) -> Self {
        Self {
            target: target.into(),
            op: AsyncOp::ready(result),
        }
    }
}

pub type PendingNames = PendingRequest<Vec<String>>;
pub type PendingLayout = PendingRequest<Layout>;
pub type PendingSave = PendingRequest<()>;
pub type PendingDelete = PendingRequest<()>;

/// Layout API endpoints rooted at a base URL such as `http://127.0.0.1:5000/api/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutClient {
    base_url: String,
}

impl LayoutClient {
    pub fn new(base_url: &str) -> Self {
        let mut base_url = base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn names_url(&self) -> String {
        format!("{}layouts/names", self.base_url)
    }

    pub fn layouts_url(&self) -> String {
        format!("{}layouts", self.base_url)
    }

    pub fn layout_url(&self, name: &str) -> String {
        format!("{}layouts/{}", self.base_url, urlencoding::encode(name))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Fire-and-poll operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch all stored layout names, sorted ascending
    pub fn list_names(&self) -> PendingNames {
        tracing::debug!(url = %self.names_url(), "listing layouts");
        PendingRequest {
            target: String::new(),
            op: AsyncOp::start(Method::Get, self.names_url(), None, parse_names),
        }
    }

    /// Fetch one layout by name
    pub fn get_layout(&self, name: &str) -> PendingLayout {
        tracing::debug!(name, "loading layout");
        PendingRequest {
            target: name.to_string(),
            op: AsyncOp::start(Method::Get, self.layout_url(name), None, parse_layout),
        }
    }

    /// Submit a create request. Always a create: an existing name is rejected
    /// by the server, never overwritten.
    pub fn save_layout(&self, request: &LayoutRequest) -> PendingSave {
        tracing::debug!(name = %request.name, "saving layout");
        let op = match encode_request(request) {
            Ok(body) => AsyncOp::start(Method::Post, self.layouts_url(), Some(body), parse_ack),
            Err(e) => AsyncOp::ready(Err(e)),
        };
        PendingRequest {
            target: request.name.clone(),
            op,
        }
    }

    /// Remove a stored layout by name
    pub fn delete_layout(&self, name: &str) -> PendingDelete {
        tracing::debug!(name, "deleting layout");
        PendingRequest {
            target: name.to_string(),
            op: AsyncOp::start(Method::Delete, self.layout_url(name), None, parse_ack),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Blocking variants (native only; used by tools and tests)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(target_arch = "wasm32"))]
impl LayoutClient {
    pub fn list_names_blocking(&self) -> Result<Vec<String>, ClientError> {
        http::send(Method::Get, &self.names_url(), None).and_then(parse_names)
    }

    pub fn get_layout_blocking(&self, name: &str) -> Result<Layout, ClientError> {
        http::send(Method::Get, &self.layout_url(name), None).and_then(parse_layout)
    }

    pub fn save_layout_blocking(&self, request: &LayoutRequest) -> Result<(), ClientError> {
        let body = encode_request(request)?;
        http::send(Method::Post, &self.layouts_url(), Some(&body)).and_then(parse_ack)
    }

    pub fn delete_layout_blocking(&self, name: &str) -> Result<(), ClientError> {
        http::send(Method::Delete, &self.layout_url(name), None).and_then(parse_ack)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Body encoding / decoding
// ─────────────────────────────────────────────────────────────────────────────

pub fn encode_request(request: &LayoutRequest) -> Result<String, ClientError> {
    serde_json::to_string(request).map_err(|e| ClientError::Decode(e.to_string()))
}

pub fn parse_names(body: String) -> Result<Vec<String>, ClientError> {
    serde_json::from_str::<NamesResponse>(&body)
        .map(NamesResponse::into_sorted)
        .map_err(|e| ClientError::Decode(format!("layout names: {}", e)))
}

pub fn parse_layout(body: String) -> Result<Layout, ClientError> {
    let layout: Layout = serde_json::from_str(&body)
        .map_err(|e| ClientError::Decode(format!("layout: {}", e)))?;
    layout.validate()?;
    Ok(layout)
}

/// Create/delete confirmations carry nothing the editor needs
pub fn parse_ack(_body: String) -> Result<(), ClientError> {
    Ok(())
}

/// Pull a readable message out of an error body (`"Name already in use"`)
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(value) => value
            .get("error")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| body.trim().to_string()),
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{PanelState, SavedPanel};

    #[test]
    fn test_urls() {
        let client = LayoutClient::new("http://localhost:5000/api");
        assert_eq!(client.base_url(), "http://localhost:5000/api/");
        assert_eq!(client.names_url(), "http://localhost:5000/api/layouts/names");
        assert_eq!(client.layouts_url(), "http://localhost:5000/api/layouts");
        assert_eq!(
            client.layout_url("ground floor/2"),
            "http://localhost:5000/api/layouts/ground%20floor%2F2"
        );
    }

    #[test]
    fn test_relative_base_url() {
        let client = LayoutClient::new("/api/");
        assert_eq!(client.layout_url("foo"), "/api/layouts/foo");
    }

    #[test]
    fn test_parse_names_sorts() {
        let names = parse_names(r#"{"names":["kitchen","attic","bath"]}"#.into()).unwrap();
        assert_eq!(names, vec!["attic", "bath", "kitchen"]);
        assert!(matches!(parse_names("{}".into()), Err(ClientError::Decode(_))));
    }

    #[test]
    fn test_parse_layout_validates() {
        let body = r#"{"name":"x","width":2,"height":2,
            "panels":[{"x":4,"y":0,"horizontal":true,"type":"Wall"}]}"#;
        assert!(matches!(
            parse_layout(body.into()),
            Err(ClientError::Layout(LayoutError::PanelOutOfBounds { .. }))
        ));
    }

    #[test]
    fn test_encode_request_shape() {
        let panel = SavedPanel { x: 0, y: 0, horizontal: true, state: PanelState::Wall };
        let req = LayoutRequest::new("foo", 3, 3, &[panel]).unwrap();
        let body: serde_json::Value = serde_json::from_str(&encode_request(&req).unwrap()).unwrap();
        assert_eq!(body["name"], "foo");
        assert_eq!(body["width"], 3);
        assert!(body["panels"].is_string());
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message(r#""Name already in use""#), "Name already in use");
        assert_eq!(error_message(r#"{"error":"boom"}"#), "boom");
        assert_eq!(error_message("Internal Server Error\n"), "Internal Server Error");
    }

    #[test]
    fn test_ready_request_completes_immediately() {
        let mut pending = PendingRequest::ready("foo", Ok(()));
        assert!(pending.op.is_complete());
        assert_eq!(pending.op.take(), Some(Ok(())));
    }
}
