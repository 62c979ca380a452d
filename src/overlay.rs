use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::{
    render, Color, CrosshairState, Drawing, OverlayConfig, Point, Setting, Settings, Shape,
};

type RepaintHook = Arc<dyn Fn() + Send + Sync + 'static>;

pub struct OverlaySurface {
    state: CrosshairState,
    stroke_width: f32,
    size: Option<(i32, i32)>,
}

impl OverlaySurface {
    pub fn new(settings: &Settings, config: &OverlayConfig) -> Self {
        OverlaySurface {
            state: CrosshairState::from_settings(settings, config.repositionable),
            stroke_width: config.stroke_width,
            size: None,
        }
    }

    /// Record the surface size, the first call also resolves unset positions.
    pub fn lay_out(&mut self, width: i32, height: i32) {
        if self.size.is_none() {
            self.state.lay_out(width, height);
            info!(
                "first layout {width}x{height}, crosshair at {:?}",
                self.state.center(width, height)
            );
        }
        self.size = Some((width, height));
    }

    pub fn render(&self, width: i32, height: i32) -> Drawing {
        render(&self.state, width, height, self.stroke_width)
    }
}

/// Shared handle to the overlay surface.
#[derive(Clone)]
pub struct Overlay {
    overlay: Arc<Mutex<OverlaySurface>>,
    repaint: Arc<Mutex<Option<RepaintHook>>>,
}

impl std::fmt::Debug for Overlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        write!(f, "Overlay {:?}", self.state())
    }
}

impl Overlay {
    pub fn new(settings: &Settings) -> Overlay {
        Self::new_with_config(settings, &Default::default())
    }

    pub fn new_with_config(settings: &Settings, config: &OverlayConfig) -> Overlay {
        Overlay {
            overlay: Arc::new(Mutex::new(OverlaySurface::new(settings, config))),
            repaint: Arc::new(Mutex::new(None)),
        }
    }

    /// Install the function called after every change to the crosshair.
    pub fn set_repaint_hook<F: Fn() + Send + Sync + 'static>(&self, hook: F) {
        *self.repaint.lock() = Some(Arc::new(hook));
    }

    pub fn state(&self) -> CrosshairState {
        self.overlay.lock().state.clone()
    }

    pub fn is_repositionable(&self) -> bool {
        self.overlay.lock().state.is_repositionable()
    }

    /// Surface size as of the last layout, `None` before the first one.
    pub fn surface_size(&self) -> Option<(i32, i32)> {
        self.overlay.lock().size
    }

    pub fn lay_out(&self, width: i32, height: i32) {
        self.overlay.lock().lay_out(width, height);
    }

    pub fn center(&self, width: i32, height: i32) -> Point {
        self.overlay.lock().state.center(width, height)
    }

    pub fn render(&self, width: i32, height: i32) -> Drawing {
        self.overlay.lock().render(width, height)
    }

    pub fn update(&self, setting: Setting) {
        let applied = self.overlay.lock().state.apply(setting);
        if !applied {
            warn!("ignoring {setting:?}, the crosshair is fixed to the surface center");
            return;
        }
        debug!("{} -> {setting:?}", setting.key());
        self.request_repaint();
    }

    pub fn update_size(&self, size: i32) {
        self.update(Setting::Size(size));
    }

    pub fn update_gap(&self, gap: i32) {
        self.update(Setting::Gap(gap));
    }

    pub fn update_shape(&self, shape: Shape) {
        self.update(Setting::Shape(shape));
    }

    pub fn update_color(&self, color: Color) {
        self.update(Setting::Color(color));
    }

    pub fn update_position(&self, x: i32, y: i32) {
        let applied = {
            let mut overlay = self.overlay.lock();
            overlay.state.apply(Setting::XPosition(x)) && overlay.state.apply(Setting::YPosition(y))
        };
        if !applied {
            warn!("ignoring position ({x}, {y}), the crosshair is fixed to the surface center");
            return;
        }
        debug!("position -> ({x}, {y})");
        self.request_repaint();
    }

    fn request_repaint(&self) {
        // Clone out of the lock, the hook may call back into the gui.
        let hook = self.repaint.lock().clone();
        if let Some(hook) = hook {
            hook();
        }
    }
}
