//! A transparent, click-through, always-on-top crosshair overlay with a settings panel.
//!
//! The crosshair state and its geometry are plain data, see [`render`]. The overlay and
//! the panel are egui viewports driven by [`run`].

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod controls;
mod crosshair;
mod geometry;
mod overlay;
mod panel;
mod settings;
mod topmost;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(windows)]
mod windows;

pub use config::{OverlayConfig, TOPMOST_INTERVAL};
pub use controls::{Control, LinkedControl, Source};
pub use crosshair::{render, Anchor, CrosshairState};
pub use geometry::{Color, DrawGeometry, Drawing, LineSegment, Point, Stroke};
pub use overlay::{Overlay, OverlaySurface};
pub use panel::{ControlPanel, GAP_RANGE, SIZE_RANGE};
pub use settings::{load_settings, save_settings, Setting, Settings, Shape};
pub use topmost::{native_topmost, KeepOnTop, NoTopmost, Topmost};

pub type Error = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Install the log subscriber, filtered by `RUST_LOG` and defaulting to `info`.
pub fn setup() -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).try_init()?;
    Ok(())
}

/// Show the overlay and its control panel until the panel is closed.
///
/// Returns the settings as they were when the windows closed.
pub fn run(settings: Settings, config: OverlayConfig) -> Result<Settings, Error> {
    info!("starting overlay with {settings:?}");
    let settings = Arc::new(Mutex::new(settings));
    let overlay = Overlay::new_with_config(&settings.lock(), &config);

    let options = eframe::NativeOptions {
        viewport: app::overlay_viewport(&config),
        ..Default::default()
    };
    let name = config.name.clone();
    let app_settings = settings.clone();
    eframe::run_native(
        &name,
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::OverlayApp::new(
                cc,
                overlay,
                app_settings,
                config,
            )))
        }),
    )
    .map_err(|e| -> Error { format!("overlay event loop failed: {e}").into() })?;

    info!("overlay closed");
    let settings = settings.lock().clone();
    Ok(settings)
}
