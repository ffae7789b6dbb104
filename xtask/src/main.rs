//! Build automation tasks for simwall
//!
//! Usage:
//!   cargo xtask build-web            # Build WASM editor into dist/web
//!   cargo xtask serve                # Build web, then run the layout server on it
//!   cargo xtask package-native       # Release binaries into dist/native

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::Command;

/// macroquad JS loader matching the macroquad version in Cargo.toml
const MQ_JS_BUNDLE_URL: &str =
    "https://raw.githubusercontent.com/not-fl3/macroquad/v0.4.14/js/mq_js_bundle.js";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for simwall")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the WASM editor and assemble dist/web
    BuildWeb {
        /// Mark as dev build (adds DEV to the page title)
        #[arg(long)]
        dev: bool,
    },
    /// Build dist/web and serve it together with the layout API
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:5000")]
        addr: String,
        /// RON file holding the stored layouts
        #[arg(long, default_value = "layouts.ron")]
        data: PathBuf,
    },
    /// Build native release binaries into dist/native
    PackageNative,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::BuildWeb { dev } => build_web(dev),
        Commands::Serve { addr, data } => serve(&addr, &data),
        Commands::PackageNative => package_native(),
    }
}

/// Get the project root directory
fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live inside the workspace")
}

/// Run a command and check for success
fn run_cmd(cmd: &mut Command) -> Result<()> {
    let status = cmd.status().context("Failed to execute command")?;
    if !status.success() {
        anyhow::bail!("Command failed with status: {}", status);
    }
    Ok(())
}

/// Download a file from URL to destination
fn download_file(url: &str, dest: &Path) -> Result<()> {
    println!("Downloading {}...", url);
    run_cmd(
        Command::new("curl")
            .args(["-L", "-o"])
            .arg(dest)
            .arg(url),
    )
}

/// Build WASM for web deployment
fn build_web(dev: bool) -> Result<()> {
    let root = project_root()?;
    let dist = root.join("dist/web");

    println!("Building WASM...");
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args([
                "build",
                "--release",
                "--target",
                "wasm32-unknown-unknown",
                "--bin",
                "simwall",
            ]),
    )?;

    // Keep a downloaded bundle across rebuilds
    let cached_bundle = dist.join("mq_js_bundle.js");
    let bundle = if cached_bundle.exists() {
        Some(std::fs::read(&cached_bundle)?)
    } else {
        None
    };

    // Clean and create dist folder
    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    println!("Copying files to dist/web...");
    std::fs::copy(
        root.join("target/wasm32-unknown-unknown/release/simwall.wasm"),
        dist.join("simwall.wasm"),
    )
    .context("WASM binary missing after build")?;

    let web = root.join("web");
    for file in ["index.html", "simwall_http.js"] {
        std::fs::copy(web.join(file), dist.join(file))
            .with_context(|| format!("copying web/{}", file))?;
    }

    let mq_js = dist.join("mq_js_bundle.js");
    match bundle {
        Some(bytes) => std::fs::write(&mq_js, bytes)?,
        None => download_file(MQ_JS_BUNDLE_URL, &mq_js)?,
    }

    if dev {
        println!("Applying DEV build modifications...");
        let index_path = dist.join("index.html");
        let index = std::fs::read_to_string(&index_path)?;
        std::fs::write(&index_path, index.replace("<title>simwall", "<title>[DEV] simwall"))?;
    }

    println!("Web build complete: dist/web/");
    Ok(())
}

/// Build the web editor, then run the layout server with it as web root
fn serve(addr: &str, data: &Path) -> Result<()> {
    build_web(true)?;

    let root = project_root()?;
    println!("Serving http://{}/", addr);
    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["run", "--release", "--bin", "simwall-server", "--", "--addr", addr])
            .arg("--data")
            .arg(data)
            .arg("--web-root")
            .arg(root.join("dist/web")),
    )
}

/// Build native release binaries
fn package_native() -> Result<()> {
    let root = project_root()?;
    let platform = if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "macos") {
        "macos"
    } else {
        "linux"
    };
    let dist = root.join(format!("dist/native/{}", platform));

    println!("Building native release for {}...", platform);

    if dist.exists() {
        std::fs::remove_dir_all(&dist)?;
    }
    std::fs::create_dir_all(&dist)?;

    run_cmd(
        Command::new("cargo")
            .current_dir(&root)
            .args(["build", "--release"]),
    )?;

    let exe = if platform == "windows" { ".exe" } else { "" };
    for name in ["simwall", "simwall-server"] {
        let binary = format!("{}{}", name, exe);
        std::fs::copy(root.join("target/release").join(&binary), dist.join(&binary))
            .with_context(|| format!("copying {}", binary))?;
    }

    println!("Native build complete: dist/native/{}/", platform);
    Ok(())
}
