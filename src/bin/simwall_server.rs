//! Local layout backend for the simwall editor
//!
//! Usage:
//!   simwall-server                          # 127.0.0.1:5000, layouts.ron
//!   simwall-server --addr 0.0.0.0:8080 --data /tmp/layouts.ron
//!   simwall-server --web-root dist/web      # also serve the web build

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use clap::Parser;
    use simwall::server::{LayoutServer, LayoutStore};
    use std::path::PathBuf;
    use std::process::ExitCode;
    use std::sync::atomic::AtomicBool;

    #[derive(Parser)]
    #[command(name = "simwall-server")]
    #[command(about = "Layout API backend for the simwall editor", version)]
    struct Args {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:5000")]
        addr: String,
        /// RON file holding the stored layouts
        #[arg(long, default_value = "layouts.ron")]
        data: PathBuf,
        /// Directory served for non-API paths (e.g. dist/web)
        #[arg(long)]
        web_root: Option<PathBuf>,
    }

    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);
    simwall::logging::init();
    let args = Args::parse();

    let store = match LayoutStore::open(&args.data) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(path = %args.data.display(), error = %e, "cannot open layout store");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(path = %args.data.display(), layouts = store.len(), "layout store opened");

    let mut server = match LayoutServer::bind(&args.addr, store) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "cannot start server");
            return ExitCode::FAILURE;
        }
    };
    if let Some(root) = args.web_root {
        tracing::info!(root = %root.display(), "serving web build");
        server = server.with_web_root(root);
    }
    tracing::info!(addr = %args.addr, "listening");

    // Runs until the process is killed
    let shutdown = AtomicBool::new(false);
    server.serve_until(&shutdown);
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {}
