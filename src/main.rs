//! simwall editor
//!
//! Draw wall layouts on a pillar grid and store them through the layout API.
//! Open a stored layout on startup with `?name=<layout>` (web) or
//! `--name <layout>` (native).

use macroquad::prelude::*;
use simwall::app::App;
use simwall::config::{EditorConfig, StartupParams};
use simwall::editor::draw_editor;
use simwall::ui::{MouseState, UiContext, BG_COLOR};
use simwall::{logging, VERSION};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("simwall v{}", VERSION),
        window_width: 1280,
        window_height: 800,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    logging::init();

    let config = EditorConfig::load();
    let startup = StartupParams::detect();
    tracing::info!(version = VERSION, api = %config.api_base_url, "simwall starting");

    let mut app = App::new(&config);
    app.start(&startup);

    let mut ui_ctx = UiContext::new();

    loop {
        let now = get_time();

        // Apply finished API requests before drawing this frame
        app.poll(now);

        clear_background(BG_COLOR);
        ui_ctx.begin_frame(MouseState::poll());

        let status = app.status(now).cloned();
        for action in draw_editor(&mut ui_ctx, &mut app.editor, status.as_ref()) {
            app.handle_action(action, now);
        }

        next_frame().await;
    }
}
