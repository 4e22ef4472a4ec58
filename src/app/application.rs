//! Application - Startup and the event loop
//!
//! Loads the configuration, builds every chart page over the HTTP dispatcher
//! and runs the event loop until all pages have settled, then exports the
//! rendered charts.

use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use crossbeam_channel::{Receiver, RecvTimeoutError};
use serde::Serialize;

use crate::app::workspace::Workspace;
use crate::domain::config::AppConfig;
use crate::eventing::AppEvent;
use crate::playback::{Timer, TokioTimer};
use crate::render::SceneRenderer;
use crate::services::{ApiClient, HttpDispatcher};
use crate::state::LoadStatus;
use crate::utils::{format_export_stamp, format_local_datetime, load_config};

/// Written next to the exported charts
#[derive(Debug, Serialize)]
struct ExportManifest {
    generated_at: DateTime<Local>,
    base_url: String,
    files: Vec<PathBuf>,
}

/// Run the application with the config at `config_path` (or the default one)
pub fn run_app(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let started = Local::now();
    tracing::info!(
        "Session started {} against {}",
        format_local_datetime(&started),
        config.server.base_url
    );

    let (event_tx, event_rx) = crossbeam_channel::unbounded::<AppEvent>();
    let client = ApiClient::new(&config.server).context("Invalid server configuration")?;
    let dispatcher = Rc::new(HttpDispatcher::new(client, event_tx.clone()));
    let renderer = Rc::new(SceneRenderer::new());

    let timers = event_tx.clone();
    let mut workspace = Workspace::new(&config, renderer, dispatcher, move || -> Box<dyn Timer> {
        Box::new(TokioTimer::new(timers.clone()))
    })
    .context("Invalid playback configuration")?;

    workspace.dominance.record_frames(config.export.frames);
    workspace.load_all();
    pump_events(&mut workspace, &event_rx, &config);

    let dir = config.export.dir.join(format_export_stamp(&started));
    let files = workspace
        .export(&dir)
        .with_context(|| format!("Failed to export charts to {}", dir.display()))?;
    write_manifest(&dir, &config, started, files)?;
    workspace.teardown();
    Ok(())
}

/// Deliver events until every page has loaded and no playback is running.
/// With frame export on, the dominance playback runs once after loading.
fn pump_events(workspace: &mut Workspace, event_rx: &Receiver<AppEvent>, config: &AppConfig) {
    let idle = Duration::from_secs(config.server.timeout_secs)
        + Duration::from_millis(config.playback.host_interval_ms);
    let mut played = !config.export.frames;
    let mut last_event = Instant::now();

    loop {
        if !workspace.is_loading() {
            if !played {
                played = true;
                let ready = *workspace.dominance.status() == LoadStatus::Ready;
                if ready && workspace.dominance.play() {
                    tracing::info!("Recording sport dominance frames");
                }
            }
            if !workspace.is_playing() {
                break;
            }
        }

        match event_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                last_event = Instant::now();
                workspace.dispatch_event(event);
            }
            Err(RecvTimeoutError::Timeout) if last_event.elapsed() < idle => {}
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!("No events for {:?}, exporting what has loaded", idle);
                break;
            }
            Err(RecvTimeoutError::Disconnected) => {
                tracing::error!("Event channel closed");
                break;
            }
        }
    }
}

fn write_manifest(
    dir: &Path,
    config: &AppConfig,
    generated_at: DateTime<Local>,
    files: Vec<PathBuf>,
) -> Result<()> {
    let manifest = ExportManifest {
        generated_at,
        base_url: config.server.base_url.clone(),
        files,
    };
    let path = dir.join("manifest.json");
    let json = serde_json::to_string_pretty(&manifest)?;
    std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}
