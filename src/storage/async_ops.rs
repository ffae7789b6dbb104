//! Async Operations
//!
//! Non-blocking API calls that are polled each frame.
//! Native: the request runs on a short-lived background thread that reports
//! back over a channel. WASM: the browser's fetch runs the request and the
//! op id is polled through the JS bridge.

use super::http::Method;
use super::ClientError;

#[cfg(not(target_arch = "wasm32"))]
use std::sync::mpsc::{channel, Receiver, TryRecvError};
#[cfg(not(target_arch = "wasm32"))]
use std::thread;

/// Result type for async operations
pub type AsyncResult<T> = Result<T, ClientError>;

/// Turns a successful response body into the operation's value
pub type ParseFn<T> = fn(String) -> AsyncResult<T>;

/// A handle to a pending async operation that can be polled
#[cfg(not(target_arch = "wasm32"))]
pub struct AsyncOp<T> {
    receiver: Receiver<AsyncResult<T>>,
    result: Option<AsyncResult<T>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl<T: Send + 'static> AsyncOp<T> {
    /// Send the request on a background thread
    pub fn start(method: Method, url: String, body: Option<String>, parse: ParseFn<T>) -> Self {
        let (sender, receiver) = channel();

        thread::spawn(move || {
            let result = super::http::send(method, &url, body.as_deref()).and_then(parse);
            let _ = sender.send(result);
        });

        Self {
            receiver,
            result: None,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl<T> AsyncOp<T> {
    /// An operation that has already finished
    pub fn ready(result: AsyncResult<T>) -> Self {
        let (sender, receiver) = channel();
        let _ = sender.send(result);
        Self {
            receiver,
            result: None,
        }
    }

    /// Check if the operation has completed (polls the channel)
    pub fn is_complete(&mut self) -> bool {
        if self.result.is_some() {
            return true;
        }

        match self.receiver.try_recv() {
            Ok(result) => {
                self.result = Some(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                // Worker panicked or dropped sender
                self.result = Some(Err(ClientError::Dropped));
                true
            }
        }
    }

    /// Take the result if complete
    pub fn take(mut self) -> Option<AsyncResult<T>> {
        if self.result.is_none() {
            // Try one more time
            if let Ok(result) = self.receiver.try_recv() {
                self.result = Some(result);
            }
        }
        self.result
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// WASM (polls the JS fetch bridge)
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(target_arch = "wasm32")]
pub struct AsyncOp<T> {
    http: Option<super::http::HttpOp>,
    parse: Option<ParseFn<T>>,
    result: Option<AsyncResult<T>>,
}

#[cfg(target_arch = "wasm32")]
impl<T> AsyncOp<T> {
    pub fn start(method: Method, url: String, body: Option<String>, parse: ParseFn<T>) -> Self {
        Self {
            http: Some(super::http::HttpOp::start(method, &url, body.as_deref())),
            parse: Some(parse),
            result: None,
        }
    }

    pub fn ready(result: AsyncResult<T>) -> Self {
        Self {
            http: None,
            parse: None,
            result: Some(result),
        }
    }

    pub fn is_complete(&mut self) -> bool {
        if self.result.is_some() {
            return true;
        }
        let Some(http) = self.http.as_mut() else {
            self.result = Some(Err(ClientError::Dropped));
            return true;
        };
        match http.poll() {
            None => false,
            Some(response) => {
                self.http = None;
                let parse = self.parse.take();
                self.result = Some(match (response, parse) {
                    (Ok(body), Some(parse)) => parse(body),
                    (Ok(_), None) => Err(ClientError::Dropped),
                    (Err(e), _) => Err(e),
                });
                true
            }
        }
    }

    pub fn take(mut self) -> Option<AsyncResult<T>> {
        if self.result.is_none() {
            self.is_complete();
        }
        self.result.take()
    }
}
