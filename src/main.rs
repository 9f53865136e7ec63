// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Weekly Gallery server
//!
//! Serves the image-of-the-week page for a directory of week folders.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use weekly_gallery::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "weekly-gallery")]
#[command(author = "Jonathan D. A. Jewell <hyperpolymath>")]
#[command(version = "1.0.0")]
#[command(about = "Image of the Week gallery server")]
struct Args {
    /// Path to configuration file (JSON format)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Directory containing the week folders
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Host to bind to
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// URL prefix for image links
    #[arg(long = "mm")]
    path_prefix: Option<String>,

    /// Directory served under /static
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Page template replacing the built-in one
    #[arg(long)]
    template: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Apply CLI overrides on top of the loaded config
    fn apply(self, config: &mut AppConfig) {
        if let Some(dir) = self.dir {
            config.gallery.root_dir = dir;
        }
        if let Some(prefix) = self.path_prefix {
            config.gallery.path_prefix = prefix;
        }
        if let Some(template) = self.template {
            config.gallery.template = Some(template);
        }
        if let Some(host) = self.host {
            config.web.host = host;
        }
        if let Some(port) = self.port {
            config.web.port = port;
        }
        if let Some(static_dir) = self.static_dir {
            config.web.static_dir = static_dir;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Weekly Gallery v1.0.0");

    let mut config = AppConfig::load(&args.config)
        .with_context(|| format!("loading config {:?}", args.config))?;
    args.apply(&mut config);

    weekly_gallery::web::start_server(config)
        .await
        .context("gallery server failed")?;

    Ok(())
}
