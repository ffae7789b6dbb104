//! HTTP transport for the layout client
//!
//! Native: blocking `ureq` calls (run off the frame loop by `AsyncOp`).
//! WASM: FFI to the `simwall_http_*` functions registered by
//! `web/simwall_http.js`, which wraps the browser's fetch.

use super::{error_message, ClientError};

/// HTTP verbs used by the layout API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// Map a non-2xx status and its body to a client error
pub fn status_error(status: u16, url: &str, body: &str) -> ClientError {
    if status == 404 {
        ClientError::NotFound(url.to_string())
    } else {
        ClientError::Rejected {
            status,
            message: error_message(body),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Native implementation (uses ureq)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(target_arch = "wasm32"))]
pub fn send(method: Method, url: &str, body: Option<&str>) -> Result<String, ClientError> {
    let request = ureq::request(method.as_str(), url);
    let result = match body {
        Some(body) => request
            .set("Content-Type", "application/json; charset=utf-8")
            .send_string(body),
        None => request.call(),
    };

    match result {
        Ok(response) => response
            .into_string()
            .map_err(|e| ClientError::Network(e.to_string())),
        Err(e) => Err(convert_error(e, url)),
    }
}

/// Convert ureq error to ClientError
#[cfg(not(target_arch = "wasm32"))]
fn convert_error(e: ureq::Error, url: &str) -> ClientError {
    match e {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            status_error(code, url, &body)
        }
        other => ClientError::Network(other.to_string()),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// WASM implementation (uses the JavaScript fetch bridge)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
extern "C" {
    fn simwall_http_request(
        method_ptr: *const u8,
        method_len: usize,
        url_ptr: *const u8,
        url_len: usize,
        body_ptr: *const u8,
        body_len: usize,
    ) -> i32;
    fn simwall_http_poll(op_id: i32) -> i32;
    fn simwall_http_status(op_id: i32) -> i32;
    fn simwall_http_body_len(op_id: i32) -> usize;
    fn simwall_http_copy_body(op_id: i32, dest_ptr: *mut u8, max_len: usize) -> usize;
    fn simwall_http_free(op_id: i32);
}

/// Poll status codes from JavaScript
#[cfg(target_arch = "wasm32")]
const POLL_PENDING: i32 = 0;
#[cfg(target_arch = "wasm32")]
const POLL_READY: i32 = 1;

/// One fetch in flight in the browser
#[cfg(target_arch = "wasm32")]
pub struct HttpOp {
    id: i32,
    url: String,
}

#[cfg(target_arch = "wasm32")]
impl HttpOp {
    pub fn start(method: Method, url: &str, body: Option<&str>) -> Self {
        let method = method.as_str();
        let body = body.unwrap_or("");
        let id = unsafe {
            simwall_http_request(
                method.as_ptr(),
                method.len(),
                url.as_ptr(),
                url.len(),
                body.as_ptr(),
                body.len(),
            )
        };
        Self {
            id,
            url: url.to_string(),
        }
    }

    /// `None` while the fetch is still running
    pub fn poll(&mut self) -> Option<Result<String, ClientError>> {
        let status = unsafe { simwall_http_poll(self.id) };
        if status == POLL_PENDING {
            return None;
        }

        let body = self.body();
        let result = if status == POLL_READY {
            let code = unsafe { simwall_http_status(self.id) } as u16;
            if (200..300).contains(&code) {
                Ok(body)
            } else {
                Err(status_error(code, &self.url, &body))
            }
        } else {
            Err(ClientError::Network(body))
        };
        unsafe { simwall_http_free(self.id) };
        Some(result)
    }

    fn body(&self) -> String {
        let len = unsafe { simwall_http_body_len(self.id) };
        if len == 0 {
            return String::new();
        }
        let mut buf = vec![0u8; len];
        let copied = unsafe { simwall_http_copy_body(self.id, buf.as_mut_ptr(), len) };
        buf.truncate(copied);
        String::from_utf8_lossy(&buf).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mapping() {
        assert_eq!(
            status_error(404, "/api/layouts/bar", ""),
            ClientError::NotFound("/api/layouts/bar".into())
        );
        assert_eq!(
            status_error(400, "/api/layouts", r#""Name already in use""#),
            ClientError::Rejected { status: 400, message: "Name already in use".into() }
        );
    }
}
