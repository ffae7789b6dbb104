//! Application state
//!
//! Owns the editor, the layout client and every in-flight request. UI actions
//! start requests; `poll` applies finished ones once per frame. All editor
//! mutation happens here, on the frame loop.

use crate::config::{EditorConfig, StartupParams};
use crate::editor::{EditorAction, EditorState};
use crate::storage::{
    AsyncResult, ClientError, LayoutClient, PendingDelete, PendingLayout, PendingNames,
    PendingRequest, PendingSave,
};
use crate::world::Layout;

/// How long status messages stay visible (seconds)
pub const STATUS_INFO_SECS: f64 = 3.0;
pub const STATUS_ERROR_SECS: f64 = 6.0;

/// Transient message shown in the status bar
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    /// Time (seconds) after which the message is hidden
    pub expiry: f64,
}

/// Requests waiting for a response, oldest first
#[derive(Default)]
pub struct PendingOps {
    pub names: Vec<PendingNames>,
    pub loads: Vec<PendingLayout>,
    pub saves: Vec<PendingSave>,
    pub deletes: Vec<PendingDelete>,
}

/// Remove finished requests, keeping the rest in order
fn take_completed<T>(pending: &mut Vec<PendingRequest<T>>) -> Vec<(String, AsyncResult<T>)> {
    let mut done = Vec::new();
    let mut waiting = Vec::with_capacity(pending.len());
    for mut request in pending.drain(..) {
        if request.op.is_complete() {
            let result = request.op.take().unwrap_or(Err(ClientError::Dropped));
            done.push((request.target, result));
        } else {
            waiting.push(request);
        }
    }
    *pending = waiting;
    done
}

pub struct App {
    pub editor: EditorState,
    pub client: LayoutClient,
    pub pending: PendingOps,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(config: &EditorConfig) -> Self {
        Self::with_client(
            EditorState::from_config(config),
            LayoutClient::new(&config.api_base_url),
        )
    }

    pub fn with_client(editor: EditorState, client: LayoutClient) -> Self {
        Self {
            editor,
            client,
            pending: PendingOps::default(),
            status: None,
        }
    }

    /// Fetch the layouts list and open the startup layout, if any
    pub fn start(&mut self, startup: &StartupParams) {
        self.refresh_names();
        if let Some(name) = &startup.layout_name {
            tracing::info!(name = %name, "opening layout from startup parameters");
            self.request_load(name);
        }
    }

    pub fn refresh_names(&mut self) {
        self.pending.names.push(self.client.list_names());
    }

    pub fn request_load(&mut self, name: &str) {
        self.pending.loads.push(self.client.get_layout(name));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Status bar
    // ─────────────────────────────────────────────────────────────────────────

    pub fn set_status(&mut self, text: impl Into<String>, now: f64) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
            expiry: now + STATUS_INFO_SECS,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>, now: f64) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: true,
            expiry: now + STATUS_ERROR_SECS,
        });
    }

    /// Current status message if not expired
    pub fn status(&self, now: f64) -> Option<&StatusMessage> {
        self.status.as_ref().filter(|s| now < s.expiry)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UI actions
    // ─────────────────────────────────────────────────────────────────────────

    pub fn handle_action(&mut self, action: EditorAction, now: f64) {
        match action {
            EditorAction::ResizeGrid => match self.editor.apply_dimension_inputs() {
                Ok(true) => {
                    let (w, h) = (self.editor.grid.width(), self.editor.grid.height());
                    tracing::info!(width = w, height = h, "new grid");
                    self.set_status(format!("New {}x{} grid", w, h), now);
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "rejected grid size");
                    self.set_error(e.to_string(), now);
                }
            },
            EditorAction::PanelClicked { generation, index } => {
                match self.editor.click_panel_in(generation, index) {
                    Some(state) => tracing::debug!(index, state = %state, "panel cycled"),
                    None => tracing::debug!(index, generation, "click on a replaced grid ignored"),
                }
            }
            EditorAction::Save => match self.editor.save_request() {
                Ok(request) => self.pending.saves.push(self.client.save_layout(&request)),
                Err(e) => self.set_error(format!("Cannot save: {}", e), now),
            },
            EditorAction::Load(name) => self.request_load(&name),
            EditorAction::Delete(name) => {
                self.pending.deletes.push(self.client.delete_layout(&name));
            }
            EditorAction::Refresh => self.refresh_names(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Request completion
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply every request that finished since the last frame
    pub fn poll(&mut self, now: f64) {
        for (_, result) in take_completed(&mut self.pending.names) {
            match result {
                Ok(names) => {
                    tracing::debug!(count = names.len(), "layout list updated");
                    self.editor.set_layout_names(names);
                }
                Err(e) => {
                    tracing::error!(error = %e, "listing layouts failed");
                    self.set_error(format!("Could not list layouts: {}", e), now);
                }
            }
        }

        for (name, result) in take_completed(&mut self.pending.loads) {
            match result {
                Ok(layout) => self.apply_loaded(&name, &layout, now),
                Err(ClientError::NotFound(_)) => {
                    tracing::warn!(name = %name, "layout not found");
                    self.set_error(format!("Layout '{}' not found", name), now);
                }
                Err(e) => {
                    tracing::error!(name = %name, error = %e, "loading layout failed");
                    self.set_error(format!("Load failed: {}", e), now);
                }
            }
        }

        let mut refresh = false;

        for (name, result) in take_completed(&mut self.pending.saves) {
            match result {
                Ok(()) => {
                    tracing::info!(name = %name, "layout saved");
                    self.editor.save_name.set_text(&name);
                    self.set_status(format!("Saved '{}'", name), now);
                    refresh = true;
                }
                Err(e) => {
                    tracing::error!(name = %name, error = %e, "saving layout failed");
                    self.set_error(format!("Save failed: {}", e), now);
                }
            }
        }

        for (name, result) in take_completed(&mut self.pending.deletes) {
            match result {
                Ok(()) => {
                    tracing::info!(name = %name, "layout deleted");
                    self.set_status(format!("Deleted '{}'", name), now);
                    refresh = true;
                }
                Err(ClientError::NotFound(_)) => {
                    tracing::warn!(name = %name, "layout to delete not found");
                    self.set_error(format!("Layout '{}' not found", name), now);
                    refresh = true;
                }
                Err(e) => {
                    tracing::error!(name = %name, error = %e, "deleting layout failed");
                    self.set_error(format!("Delete failed: {}", e), now);
                }
            }
        }

        if refresh {
            self.refresh_names();
        }
    }

    fn apply_loaded(&mut self, name: &str, layout: &Layout, now: f64) {
        match self.editor.load_layout(layout) {
            Ok(()) => {
                tracing::info!(name = %name, width = layout.width, height = layout.height, "layout loaded");
                self.set_status(format!("Loaded '{}'", layout.name), now);
            }
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "stored layout is invalid");
                self.set_error(format!("Cannot open '{}': {}", name, e), now);
            }
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::world::{panel_index, PanelState, SavedPanel};

    /// Client pointing at a closed port; requests it starts fail quietly
    fn offline_app() -> App {
        let config = EditorConfig {
            api_base_url: "http://127.0.0.1:9/api/".into(),
            ..EditorConfig::default()
        };
        App::new(&config)
    }

    #[test]
    fn test_missing_layout_leaves_editor_unchanged() {
        let mut app = offline_app();
        app.editor.click_panel(0);
        app.editor.save_name.set_text("mine");
        let before = app.editor.grid.clone();

        app.pending.loads.push(PendingRequest::ready(
            "bar",
            Err(ClientError::NotFound("http://127.0.0.1:9/api/layouts/bar".into())),
        ));
        app.poll(10.0);

        assert_eq!(app.editor.grid, before);
        assert_eq!(app.editor.save_name.text, "mine");
        let status = app.status(10.0).unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("bar"));
        assert!(app.pending.loads.is_empty());
    }

    #[test]
    fn test_loaded_layout_replaces_grid() {
        let mut app = offline_app();
        let layout = Layout {
            name: "foo".into(),
            width: 3,
            height: 3,
            panels: vec![SavedPanel { x: 0, y: 0, horizontal: true, state: PanelState::Wall }],
        };
        app.pending.loads.push(PendingRequest::ready("foo", Ok(layout.clone())));
        app.poll(0.0);

        assert_eq!(app.editor.grid.width(), 3);
        assert_eq!(app.editor.grid.serialize(), layout.panels);
        assert_eq!(app.editor.save_name.text, "foo");
        assert!(!app.status(0.0).unwrap().is_error);
    }

    #[test]
    fn test_successful_save_refreshes_names() {
        let mut app = offline_app();
        app.pending.saves.push(PendingRequest::ready("foo", Ok(())));
        app.poll(0.0);

        assert_eq!(app.pending.names.len(), 1);
        assert_eq!(app.editor.save_name.text, "foo");
        assert_eq!(app.status(0.0).unwrap().text, "Saved 'foo'");
    }

    #[test]
    fn test_rejected_save_is_reported() {
        let mut app = offline_app();
        app.pending.saves.push(PendingRequest::ready(
            "foo",
            Err(ClientError::Rejected { status: 400, message: "Name already in use".into() }),
        ));
        app.poll(0.0);

        assert!(app.pending.names.is_empty());
        let status = app.status(0.0).unwrap();
        assert!(status.is_error);
        assert!(status.text.contains("Name already in use"));
    }

    #[test]
    fn test_names_update_list() {
        let mut app = offline_app();
        app.pending.names.push(PendingRequest::ready("", Ok(vec!["a".into(), "b".into()])));
        app.poll(0.0);
        assert_eq!(app.editor.layout_names, vec!["a", "b"]);
    }

    #[test]
    fn test_network_error_shows_status() {
        let mut app = offline_app();
        app.pending.names.push(PendingRequest::ready("", Err(ClientError::Network("refused".into()))));
        app.poll(1.0);
        assert!(app.status(1.0).unwrap().is_error);
        // Expires
        assert!(app.status(1.0 + STATUS_ERROR_SECS).is_none());
    }

    #[test]
    fn test_actions() {
        let mut app = offline_app();
        let index = panel_index(5, 1, 1, false);
        let generation = app.editor.grid.generation();
        app.handle_action(EditorAction::PanelClicked { generation, index }, 0.0);
        assert_eq!(app.editor.grid.panel(index).unwrap().state, PanelState::Wall);

        // Save without a name is refused locally
        app.handle_action(EditorAction::Save, 0.0);
        assert!(app.pending.saves.is_empty());
        assert!(app.status(0.0).unwrap().is_error);

        app.editor.save_name.set_text("foo");
        app.handle_action(EditorAction::Save, 0.0);
        assert_eq!(app.pending.saves.len(), 1);

        app.editor.width_input.set_text("7");
        app.handle_action(EditorAction::ResizeGrid, 0.0);
        assert_eq!(app.editor.grid.width(), 7);
        assert_eq!(app.editor.grid.panels().len(), 2 * 7 * 4);
    }

    #[test]
    fn test_click_in_resize_frame_does_not_reach_new_grid() {
        // Width field committed by the same click that hit the canvas
        let mut app = offline_app();
        let generation = app.editor.grid.generation();
        app.editor.width_input.set_text("3");

        app.handle_action(EditorAction::ResizeGrid, 0.0);
        app.handle_action(
            EditorAction::PanelClicked { generation, index: panel_index(5, 3, 0, true) },
            0.0,
        );

        assert_eq!((app.editor.grid.width(), app.editor.grid.height()), (3, 4));
        assert!(app.editor.grid.serialize().is_empty());
    }

    #[test]
    fn test_start_with_startup_name() {
        let mut app = offline_app();
        app.start(&StartupParams { layout_name: Some("foo".into()) });
        assert_eq!(app.pending.names.len(), 1);
        assert_eq!(app.pending.loads.len(), 1);
        assert_eq!(app.pending.loads[0].target, "foo");
    }
}
