//! Dev layout backend
//!
//! Serves the layout API the editor talks to:
//! - `GET    /api/layouts/names`  → `{"names": [...]}`
//! - `GET    /api/layouts/{name}` → layout or 404
//! - `POST   /api/layouts`        → create, 201
//! - `PUT    /api/layouts/{name}` → update, 404 if absent
//! - `DELETE /api/layouts/{name}` → delete, 404 if absent
//!
//! Replies are JSON; plain messages are JSON strings (`"Layout deleted"`).
//! Optionally serves the web build from a directory for every other path.

mod store;

pub use store::{LayoutPatch, LayoutStore, StoreError};

use serde::Deserialize;
use std::io::Read;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;

use crate::world::{Layout, LayoutError, SavedPanel};

/// Prefix of every API route
pub const API_PREFIX: &str = "/api/layouts";

/// How often the accept loop checks the shutdown flag
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("cannot listen on {addr}: {message}")]
    Bind { addr: String, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Status code and JSON body of a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    fn json<T: serde::Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status, body },
            Err(e) => Self::message(500, &e.to_string()),
        }
    }

    fn message(status: u16, text: &str) -> Self {
        Self {
            status,
            body: serde_json::Value::String(text.to_string()).to_string(),
        }
    }

    fn error(e: &StoreError) -> Self {
        Self::message(e.status(), &e.to_string())
    }
}

/// `panels` arrives as the JSON-encoded string the editor sends, or as a plain array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PanelsField {
    Encoded(String),
    List(Vec<SavedPanel>),
}

impl PanelsField {
    fn decode(self) -> Result<Vec<SavedPanel>, LayoutError> {
        match self {
            PanelsField::Encoded(s) => {
                serde_json::from_str(&s).map_err(|e| LayoutError::MalformedPanels(e.to_string()))
            }
            PanelsField::List(panels) => Ok(panels),
        }
    }
}

/// Request body of create and update; every field optional on the wire
#[derive(Debug, Default, Deserialize)]
struct LayoutBody {
    name: Option<String>,
    width: Option<usize>,
    height: Option<usize>,
    #[serde(alias = "layout")]
    panels: Option<PanelsField>,
}

impl LayoutBody {
    /// An empty or unparseable body counts as no fields at all
    fn parse(body: &str) -> Result<Self, StoreError> {
        if body.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(body)
            .map_err(|e| StoreError::Invalid(LayoutError::MalformedPanels(e.to_string())))
    }

    fn into_layout(self) -> Result<Layout, StoreError> {
        match (self.name, self.width, self.height, self.panels) {
            (Some(name), Some(width), Some(height), Some(panels)) => Ok(Layout {
                name,
                width,
                height,
                panels: panels.decode()?,
            }),
            _ => Err(StoreError::Incomplete),
        }
    }

    fn into_patch(self) -> Result<LayoutPatch, StoreError> {
        Ok(LayoutPatch {
            name: self.name,
            width: self.width,
            height: self.height,
            panels: self.panels.map(PanelsField::decode).transpose()?,
        })
    }
}

#[derive(serde::Serialize)]
struct NamesBody {
    names: Vec<String>,
}

/// Answer one API request against the store
pub fn route(store: &mut LayoutStore, method: &str, url: &str, body: &str) -> ApiResponse {
    let path = url.split('?').next().unwrap_or("");
    let Some(rest) = path.strip_prefix(API_PREFIX) else {
        return ApiResponse::message(404, "Not Found");
    };

    let result = match (method, rest.trim_end_matches('/')) {
        ("POST", "") => LayoutBody::parse(body)
            .and_then(LayoutBody::into_layout)
            .and_then(|layout| store.create(layout))
            .map(|()| ApiResponse::message(201, "New layout created")),
        ("GET", "/names") => Ok(ApiResponse::json(200, &NamesBody { names: store.names() })),
        (method, segment) if segment.starts_with('/') && !segment[1..].contains('/') => {
            let name = match urlencoding::decode(&segment[1..]) {
                Ok(name) => name.into_owned(),
                Err(_) => return ApiResponse::message(400, "Invalid name"),
            };
            match method {
                "GET" => store.get(&name).map(|layout| ApiResponse::json(200, layout)),
                "PUT" => LayoutBody::parse(body)
                    .and_then(LayoutBody::into_patch)
                    .and_then(|patch| store.update(&name, patch))
                    .map(|()| ApiResponse::message(200, "Layout updated")),
                "DELETE" => store
                    .delete(&name)
                    .map(|_| ApiResponse::message(200, "Layout deleted")),
                _ => Ok(ApiResponse::message(405, "Method Not Allowed")),
            }
        }
        ("GET", _) | ("POST", _) | ("PUT", _) | ("DELETE", _) => {
            Ok(ApiResponse::message(404, "Not Found"))
        }
        _ => Ok(ApiResponse::message(405, "Method Not Allowed")),
    };

    result.unwrap_or_else(|e| {
        if e.status() >= 500 {
            tracing::error!(error = %e, "store failure");
        }
        ApiResponse::error(&e)
    })
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "application/javascript",
        Some("wasm") => "application/wasm",
        Some("css") => "text/css",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

/// Map a URL path to a file under `root`, refusing anything that climbs out
pub fn static_file_path(root: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split('?').next().unwrap_or("");
    let decoded = urlencoding::decode(path).ok()?;
    let mut file = root.to_path_buf();
    for part in decoded.split('/').filter(|p| !p.is_empty()) {
        if part == ".." || part == "." || part.contains('\\') {
            return None;
        }
        file.push(part);
    }
    if decoded.ends_with('/') || decoded.is_empty() {
        file.push("index.html");
    }
    Some(file)
}

/// HTTP front end of a [`LayoutStore`]
pub struct LayoutServer {
    server: tiny_http::Server,
    store: LayoutStore,
    web_root: Option<PathBuf>,
}

impl LayoutServer {
    pub fn bind(addr: &str, store: LayoutStore) -> Result<Self, ServerError> {
        let server = tiny_http::Server::http(addr).map_err(|e| ServerError::Bind {
            addr: addr.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            server,
            store,
            web_root: None,
        })
    }

    /// Also serve files (the web build) for non-API paths
    pub fn with_web_root(mut self, root: PathBuf) -> Self {
        self.web_root = Some(root);
        self
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Handle requests until `shutdown` is set
    pub fn serve_until(&mut self, shutdown: &AtomicBool) {
        while !shutdown.load(Ordering::Relaxed) {
            match self.server.recv_timeout(POLL_INTERVAL) {
                Ok(Some(request)) => self.handle(request),
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                    std::thread::sleep(POLL_INTERVAL);
                }
            }
        }
        tracing::info!("server stopped");
    }

    fn handle(&mut self, mut request: tiny_http::Request) {
        let method = request.method().as_str().to_uppercase();
        let url = request.url().to_string();

        if !url.starts_with(API_PREFIX) {
            if let Some(root) = self.web_root.clone() {
                self.serve_file(request, &root, &url);
                return;
            }
        }

        let mut body = String::new();
        let reply = match request.as_reader().read_to_string(&mut body) {
            Ok(_) => route(&mut self.store, &method, &url, &body),
            Err(e) => ApiResponse::message(400, &format!("Unreadable body: {}", e)),
        };
        tracing::info!(%method, %url, status = reply.status, "api request");

        let mut response = tiny_http::Response::from_string(reply.body).with_status_code(reply.status);
        if let Ok(header) =
            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
        {
            response = response.with_header(header);
        }
        if let Err(e) = request.respond(response) {
            tracing::warn!(error = %e, "failed to send response");
        }
    }

    fn serve_file(&self, request: tiny_http::Request, root: &Path, url: &str) {
        let file = static_file_path(root, url).and_then(|path| {
            let data = std::fs::read(&path).ok()?;
            Some((content_type(&path), data))
        });

        let result = match file {
            Some((mime, data)) => {
                tracing::debug!(%url, "static file");
                let mut response = tiny_http::Response::from_data(data);
                if let Ok(header) = tiny_http::Header::from_bytes(&b"Content-Type"[..], mime.as_bytes()) {
                    response = response.with_header(header);
                }
                request.respond(response)
            }
            None => {
                tracing::debug!(%url, "static file not found");
                request.respond(tiny_http::Response::from_string("Not Found").with_status_code(404))
            }
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to send response");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{ClientError, LayoutClient};
    use crate::world::{LayoutRequest, PanelState};
    use std::sync::Arc;

    fn wall() -> SavedPanel {
        SavedPanel { x: 0, y: 0, horizontal: true, state: PanelState::Wall }
    }

    fn create_body(name: &str) -> String {
        serde_json::to_string(&LayoutRequest::new(name, 3, 3, &[wall()]).unwrap()).unwrap()
    }

    #[test]
    fn test_route_create_get_delete() {
        let mut store = LayoutStore::in_memory();

        let created = route(&mut store, "POST", "/api/layouts", &create_body("foo"));
        assert_eq!(created, ApiResponse { status: 201, body: r#""New layout created""#.into() });

        let got = route(&mut store, "GET", "/api/layouts/foo", "");
        assert_eq!(got.status, 200);
        let layout: Layout = serde_json::from_str(&got.body).unwrap();
        assert_eq!(layout.panels, vec![wall()]);

        let names = route(&mut store, "GET", "/api/layouts/names", "");
        assert_eq!(names.body, r#"{"names":["foo"]}"#);

        let deleted = route(&mut store, "DELETE", "/api/layouts/foo", "");
        assert_eq!(deleted.body, r#""Layout deleted""#);
        assert_eq!(route(&mut store, "DELETE", "/api/layouts/foo", "").status, 404);
        assert_eq!(route(&mut store, "GET", "/api/layouts/foo", "").status, 404);
    }

    #[test]
    fn test_route_create_errors() {
        let mut store = LayoutStore::in_memory();
        route(&mut store, "POST", "/api/layouts", &create_body("foo"));

        let dup = route(&mut store, "POST", "/api/layouts", &create_body("foo"));
        assert_eq!(dup, ApiResponse { status: 400, body: r#""Name already in use""#.into() });

        let incomplete = route(&mut store, "POST", "/api/layouts", r#"{"name":"x","width":2}"#);
        assert_eq!(incomplete.body, r#""Incomplete data""#);

        let reserved = route(
            &mut store,
            "POST",
            "/api/layouts",
            r#"{"name":"names","width":2,"height":2,"panels":[]}"#,
        );
        assert_eq!(reserved.body, r#""Invalid name""#);
    }

    #[test]
    fn test_route_accepts_array_and_layout_alias() {
        let mut store = LayoutStore::in_memory();
        let body = r#"{"name":"a","width":3,"height":3,
            "layout":[{"x":0,"y":0,"horizontal":true,"type":"Door"}]}"#;
        assert_eq!(route(&mut store, "POST", "/api/layouts", body).status, 201);
        assert_eq!(store.get("a").unwrap().panels[0].state, PanelState::Door);
    }

    #[test]
    fn test_route_update() {
        let mut store = LayoutStore::in_memory();
        route(&mut store, "POST", "/api/layouts", &create_body("foo"));
        let reply = route(&mut store, "PUT", "/api/layouts/foo", r#"{"width":5,"panels":"[]"}"#);
        assert_eq!(reply.body, r#""Layout updated""#);
        let layout = store.get("foo").unwrap();
        assert_eq!(layout.width, 5);
        assert!(layout.panels.is_empty());

        assert_eq!(route(&mut store, "PUT", "/api/layouts/nope", "{}").status, 404);
    }

    #[test]
    fn test_route_percent_encoded_names() {
        let mut store = LayoutStore::in_memory();
        route(&mut store, "POST", "/api/layouts", &create_body("ground floor"));
        assert_eq!(route(&mut store, "GET", "/api/layouts/ground%20floor", "").status, 200);
    }

    #[test]
    fn test_route_unknown_paths() {
        let mut store = LayoutStore::in_memory();
        assert_eq!(route(&mut store, "GET", "/other", "").status, 404);
        assert_eq!(route(&mut store, "GET", "/api/layouts/a/b", "").status, 404);
        assert_eq!(route(&mut store, "PATCH", "/api/layouts/a", "").status, 405);
    }

    #[test]
    fn test_static_file_path() {
        let root = Path::new("/srv/web");
        assert_eq!(static_file_path(root, "/"), Some(root.join("index.html")));
        assert_eq!(static_file_path(root, "/simwall.wasm?v=1"), Some(root.join("simwall.wasm")));
        assert_eq!(static_file_path(root, "/../secret"), None);
        assert_eq!(static_file_path(root, "/%2e%2e/secret"), None);
    }

    /// Run a server on an ephemeral port for the duration of `f`
    fn with_server(f: impl FnOnce(LayoutClient)) {
        let mut server = LayoutServer::bind("127.0.0.1:0", LayoutStore::in_memory()).unwrap();
        let addr = server.local_addr().unwrap();
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);
        let handle = std::thread::spawn(move || server.serve_until(&flag));

        f(LayoutClient::new(&format!("http://{}/api/", addr)));

        shutdown.store(true, Ordering::Relaxed);
        handle.join().unwrap();
    }

    #[test]
    fn test_client_against_server() {
        with_server(|client| {
            // Save "foo" with one wall on a 3x3 grid
            let request = LayoutRequest::new("foo", 3, 3, &[wall()]).unwrap();
            client.save_layout_blocking(&request).unwrap();

            let stored = client.get_layout_blocking("foo").unwrap();
            assert_eq!(stored.panels, vec![wall()]);
            assert_eq!(client.list_names_blocking().unwrap(), vec!["foo"]);

            // Create only: a second save under the same name is rejected
            match client.save_layout_blocking(&request) {
                Err(ClientError::Rejected { status, message }) => {
                    assert_eq!(status, 400);
                    assert_eq!(message, "Name already in use");
                }
                other => panic!("expected rejection, got {:?}", other),
            }

            // Missing layout
            assert!(matches!(
                client.get_layout_blocking("bar"),
                Err(ClientError::NotFound(_))
            ));

            client.delete_layout_blocking("foo").unwrap();
            assert!(client.list_names_blocking().unwrap().is_empty());
        });
    }

    #[test]
    fn test_async_client_against_server() {
        with_server(|client| {
            let mut pending = client.list_names();
            let start = std::time::Instant::now();
            while !pending.op.is_complete() {
                assert!(start.elapsed().as_secs() < 10, "request never completed");
                std::thread::sleep(Duration::from_millis(5));
            }
            assert_eq!(pending.op.take(), Some(Ok(Vec::new())));
        });
    }
}
