use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;
use parking_lot::Mutex;
use tracing::info;

use crate::{native_topmost, KeepOnTop, NoTopmost, Topmost};
use crate::{Color, ControlPanel, Drawing, Overlay, OverlayConfig, Point, Settings};

/// Poll interval while waiting for the overlay to become fullscreen.
const LAYOUT_RETRY: Duration = Duration::from_millis(50);

impl From<Color> for egui::Color32 {
    fn from(c: Color) -> Self {
        egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
    }
}

impl From<egui::Color32> for Color {
    fn from(c: egui::Color32) -> Self {
        let [r, g, b, a] = c.to_srgba_unmultiplied();
        Color::new(r, g, b, a)
    }
}

/// Whether the root viewport has reached its fullscreen size.
///
/// X11 window managers apply fullscreen after the window is mapped, so the first frames
/// can arrive at the initial window size.
fn surface_ready(
    size: egui::Vec2,
    fullscreen: Option<bool>,
    monitor: Option<egui::Vec2>,
) -> bool {
    if size.x < 1.0 || size.y < 1.0 || fullscreen == Some(false) {
        return false;
    }
    match monitor {
        Some(monitor) => size.x + 1.0 >= monitor.x && size.y + 1.0 >= monitor.y,
        None => true,
    }
}

fn to_pos2(origin: egui::Pos2, p: Point) -> egui::Pos2 {
    origin + egui::vec2(p.x as f32, p.y as f32)
}

/// Dark panel with the red accent of the crosshair.
fn panel_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    let background = egui::Color32::from_rgb(0x33, 0x33, 0x33);
    visuals.panel_fill = background;
    visuals.window_fill = background;
    visuals.selection.bg_fill = egui::Color32::from_rgb(0xFF, 0x00, 0x00);
    visuals.slider_trailing_fill = true;
    visuals
}

pub fn overlay_viewport(config: &OverlayConfig) -> egui::ViewportBuilder {
    let viewport = egui::ViewportBuilder::default()
        .with_title(config.name.clone())
        .with_transparent(true)
        .with_decorations(false)
        .with_fullscreen(true)
        .with_mouse_passthrough(config.mouse_passthrough)
        .with_taskbar(config.task_bar);
    if config.on_top {
        viewport.with_always_on_top()
    } else {
        viewport
    }
}

/// The overlay runs in the root viewport, the control panel in a deferred one.
pub struct OverlayApp {
    overlay: Overlay,
    settings: Arc<Mutex<Settings>>,
    config: OverlayConfig,
    keep_on_top: KeepOnTop,
    panel: Option<Arc<Mutex<ControlPanel>>>,
}

impl OverlayApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        overlay: Overlay,
        settings: Arc<Mutex<Settings>>,
        config: OverlayConfig,
    ) -> Self {
        cc.egui_ctx.set_visuals(panel_visuals());

        let ctx = cc.egui_ctx.clone();
        overlay.set_repaint_hook(move || ctx.request_repaint_of(egui::ViewportId::ROOT));

        let topmost: Box<dyn Topmost> = if config.on_top {
            native_topmost(cc)
        } else {
            Box::new(NoTopmost)
        };
        let keep_on_top = KeepOnTop::new(topmost, config.topmost_interval, Instant::now());

        OverlayApp {
            overlay,
            settings,
            config,
            keep_on_top,
            panel: None,
        }
    }

    fn paint(&self, ctx: &egui::Context, origin: egui::Pos2, drawing: &Drawing) {
        ctx.options_mut(|o| o.tessellation_options.feathering = drawing.stroke.antialias);
        let painter = ctx.layer_painter(egui::LayerId::background());
        let stroke = egui::Stroke::new(drawing.stroke.width, drawing.stroke.color);
        for segment in drawing.geometry.segments.iter() {
            painter.line_segment(
                [to_pos2(origin, segment.start), to_pos2(origin, segment.end)],
                stroke,
            );
        }
    }

    fn show_panel(&mut self, ctx: &egui::Context) {
        if self.panel.is_none() && self.overlay.surface_size().is_some() {
            info!("opening control panel");
            self.panel = Some(Arc::new(Mutex::new(ControlPanel::new(
                self.overlay.clone(),
                self.settings.clone(),
            ))));
        }
        let Some(panel) = &self.panel else {
            return;
        };

        let panel = panel.clone();
        let title = self.config.panel_title.clone();
        let builder = egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size(self.config.panel_size);
        ctx.show_viewport_deferred(
            egui::ViewportId::from_hash_of("control_panel"),
            builder,
            move |ctx, class| {
                let mut panel = panel.lock();
                if matches!(class, egui::ViewportClass::Embedded) {
                    egui::Window::new(title.as_str()).show(ctx, |ui| panel.ui(ui));
                } else {
                    egui::CentralPanel::default().show(ctx, |ui| panel.ui(ui));
                }
                if ctx.input(|i| i.viewport().close_requested()) {
                    info!("control panel closed, shutting down");
                    ctx.send_viewport_cmd_to(egui::ViewportId::ROOT, egui::ViewportCommand::Close);
                }
            },
        );
    }
}

impl eframe::App for OverlayApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        egui::Rgba::TRANSPARENT.to_array()
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let rect = ctx.screen_rect();
        let (fullscreen, monitor) =
            ctx.input(|i| (i.viewport().fullscreen, i.viewport().monitor_size));
        let ready = surface_ready(rect.size(), fullscreen, monitor);
        if ready {
            let (width, height) = (rect.width() as i32, rect.height() as i32);
            self.overlay.lay_out(width, height);
            let drawing = self.overlay.render(width, height);
            self.paint(ctx, rect.min, &drawing);
        }

        self.show_panel(ctx);

        let next = self.keep_on_top.tick(Instant::now());
        if ready {
            ctx.request_repaint_after(next);
        } else {
            ctx.request_repaint_after(next.min(LAYOUT_RETRY));
        }
    }
}
