//! Desktop admin console for MythTV-style job queue commands.
//!
//! The UI thread never blocks on the network: a backend worker thread owns a
//! tokio runtime and talks to the JobQueue HTTP service, paired with the UI
//! over bounded crossbeam channels.

use std::sync::Arc;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use client_core::JobQueueClient;

mod backend_bridge;
mod config;
mod controller;
mod forms;
mod grid;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::AdminGuiApp;

#[derive(Debug, Parser)]
#[command(name = "admin_gui", about = "Job command administration console")]
struct Args {
    /// Base URL of the JobQueue backend, e.g. http://127.0.0.1:6544.
    /// Overrides the config file and the JOBQUEUE_SERVER_URL variable.
    #[arg(long)]
    server_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();
    let mut settings = config::load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    tracing::info!(server_url = %settings.server_url, "starting job command console");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);

    let api = Arc::new(JobQueueClient::new(&settings.server_url));
    backend_bridge::runtime::launch(api, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Job Command Editor")
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Job Command Editor",
        options,
        Box::new(|_cc| Ok(Box::new(AdminGuiApp::new(cmd_tx, ui_rx)))),
    )
}
