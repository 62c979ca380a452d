use std::sync::Arc;

use eframe::egui;
use parking_lot::Mutex;
use tracing::debug;

use crate::{Control, LinkedControl, Source};
use crate::{Anchor, Color, Overlay, Setting, Settings, Shape};

pub const SIZE_RANGE: std::ops::RangeInclusive<i32> = 1..=50;
pub const GAP_RANGE: std::ops::RangeInclusive<i32> = 1..=20;

/// Settings window state, forwards every change to the overlay and the settings.
pub struct ControlPanel {
    overlay: Overlay,
    settings: Arc<Mutex<Settings>>,
    size: LinkedControl,
    gap: LinkedControl,
    shape: Shape,
    position: Option<(Control, Control)>,
    /// Color being edited while the picker is open.
    color_dialog: Option<Color>,
}

impl ControlPanel {
    /// Position slider ranges are taken from the overlay's size at this point.
    pub fn new(overlay: Overlay, settings: Arc<Mutex<Settings>>) -> Self {
        let state = overlay.state();
        let position = match (state.anchor, overlay.surface_size()) {
            (Anchor::Explicit { x, y }, Some((width, height))) => {
                Some((Control::new(x, 0..=width), Control::new(y, 0..=height)))
            }
            (Anchor::Explicit { .. }, None) => {
                Some((Control::new(0, 0..=0), Control::new(0, 0..=0)))
            }
            (Anchor::SurfaceCenter, _) => None,
        };
        ControlPanel {
            size: LinkedControl::new(state.size, SIZE_RANGE),
            gap: LinkedControl::new(state.gap, GAP_RANGE),
            shape: state.shape,
            position,
            color_dialog: None,
            overlay,
            settings,
        }
    }

    pub fn size(&self) -> &LinkedControl {
        &self.size
    }

    pub fn gap(&self) -> &LinkedControl {
        &self.gap
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn position(&self) -> Option<(&Control, &Control)> {
        self.position.as_ref().map(|(x, y)| (x, y))
    }

    pub fn set_size(&mut self, source: Source, size: i32) {
        self.size.control_mut(source).set_value(size);
        self.process();
    }

    pub fn set_gap(&mut self, source: Source, gap: i32) {
        self.gap.control_mut(source).set_value(gap);
        self.process();
    }

    pub fn set_x_position(&mut self, x: i32) {
        if let Some((control, _)) = &mut self.position {
            control.set_value(x);
        }
        self.process();
    }

    pub fn set_y_position(&mut self, y: i32) {
        if let Some((_, control)) = &mut self.position {
            control.set_value(y);
        }
        self.process();
    }

    pub fn set_shape(&mut self, shape: Shape) {
        if shape == self.shape {
            return;
        }
        self.shape = shape;
        self.overlay.update_shape(shape);
        self.store(Setting::Shape(shape));
    }

    /// Apply the outcome of the color picker, `None` is a cancelled pick.
    pub fn pick_color(&mut self, color: Option<Color>) {
        let Some(color) = color else {
            debug!("color selection cancelled");
            return;
        };
        self.overlay.update_color(color);
        self.store(Setting::Color(color));
    }

    /// Commit the pending control notifications.
    fn process(&mut self) {
        if let Some(size) = self.size.sync() {
            self.overlay.update_size(size);
            self.store(Setting::Size(size));
        }
        if let Some(gap) = self.gap.sync() {
            self.overlay.update_gap(gap);
            self.store(Setting::Gap(gap));
        }
        let position = self.position.as_mut().map(|(x_control, y_control)| {
            (
                x_control.take_change(),
                y_control.take_change(),
                x_control.value(),
                y_control.value(),
            )
        });
        if let Some((x_change, y_change, x, y)) = position {
            if let Some(x) = x_change {
                self.overlay.update_position(x, y);
                self.store(Setting::XPosition(x));
            }
            if let Some(y) = y_change {
                self.overlay.update_position(x, y);
                self.store(Setting::YPosition(y));
            }
        }
    }

    fn store(&self, setting: Setting) {
        self.settings.lock().apply(setting);
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        if let Some((x, y)) = &mut self.position {
            slider_row(ui, "X Position:", x);
            slider_row(ui, "Y Position:", y);
        }

        if ui.button("Select Color").clicked() {
            self.color_dialog = Some(self.overlay.state().color);
        }

        linked_row(ui, "Size:", &mut self.size);
        linked_row(ui, "Gap Size:", &mut self.gap);

        let mut shape = self.shape;
        ui.horizontal(|ui| {
            ui.label("Shape:");
            egui::ComboBox::from_id_salt("shape")
                .selected_text(shape.name())
                .show_ui(ui, |ui| {
                    for s in Shape::ALL {
                        ui.selectable_value(&mut shape, s, s.name());
                    }
                });
        });

        self.process();
        self.set_shape(shape);
        self.color_dialog_ui(ui.ctx());
    }

    fn color_dialog_ui(&mut self, ctx: &egui::Context) {
        let Some(mut color) = self.color_dialog else {
            return;
        };
        let mut accepted = None;
        let mut close = false;
        let modal = egui::Modal::new(egui::Id::new("color_dialog")).show(ctx, |ui| {
            ui.heading("Select Color");
            let mut srgb: egui::Color32 = color.into();
            egui::color_picker::color_picker_color32(
                ui,
                &mut srgb,
                egui::color_picker::Alpha::Opaque,
            );
            color = srgb.into();
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    accepted = Some(color);
                    close = true;
                }
                if ui.button("Cancel").clicked() {
                    close = true;
                }
            });
        });
        if close || modal.should_close() {
            self.color_dialog = None;
            self.pick_color(accepted);
        } else {
            self.color_dialog = Some(color);
        }
    }
}

fn slider_row(ui: &mut egui::Ui, label: &str, control: &mut Control) {
    let mut value = control.value();
    ui.horizontal(|ui| {
        ui.label(label);
        let slider = egui::Slider::new(&mut value, control.range()).show_value(false);
        if ui.add(slider).changed() {
            control.set_value(value);
        }
    });
}

fn linked_row(ui: &mut egui::Ui, label: &str, linked: &mut LinkedControl) {
    let mut slider_value = linked.slider.value();
    let mut spin_value = linked.spin_box.value();
    ui.horizontal(|ui| {
        ui.label(label);
        let range = linked.range();
        if ui
            .add(egui::Slider::new(&mut slider_value, range.clone()).show_value(false))
            .changed()
        {
            linked.slider.set_value(slider_value);
        }
        if ui
            .add(egui::DragValue::new(&mut spin_value).range(range))
            .changed()
        {
            linked.spin_box.set_value(spin_value);
        }
    });
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::OverlayConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn panel(config: &OverlayConfig) -> (ControlPanel, Overlay, Arc<Mutex<Settings>>) {
        let settings = Arc::new(Mutex::new(Settings::default()));
        let overlay = Overlay::new_with_config(&settings.lock(), config);
        overlay.lay_out(1920, 1080);
        let panel = ControlPanel::new(overlay.clone(), settings.clone());
        (panel, overlay, settings)
    }

    #[test]
    fn test_size_slider() {
        let (mut panel, overlay, settings) = panel(&Default::default());
        let repaints = Arc::new(AtomicUsize::new(0));
        let r = repaints.clone();
        overlay.set_repaint_hook(move || {
            r.fetch_add(1, Ordering::SeqCst);
        });

        panel.set_size(Source::Slider, 42);
        assert_eq!(panel.size().spin_box.value(), 42);
        assert_eq!(overlay.state().size, 42);
        assert_eq!(settings.lock().size, 42);
        assert_eq!(repaints.load(Ordering::SeqCst), 1);

        // Unchanged value, nothing to commit.
        panel.set_size(Source::SpinBox, 42);
        assert_eq!(repaints.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_gap_spin_box() {
        let (mut panel, overlay, settings) = panel(&Default::default());
        panel.set_gap(Source::SpinBox, 12);
        assert_eq!(panel.gap().slider.value(), 12);
        assert_eq!(overlay.state().gap, 12);
        assert_eq!(settings.lock().gap, 12);

        panel.set_gap(Source::SpinBox, 100);
        assert_eq!(panel.gap().slider.value(), 20);
        assert_eq!(settings.lock().gap, 20);
    }

    #[test]
    fn test_color_pick_and_cancel() {
        let (mut panel, overlay, settings) = panel(&Default::default());
        let blue = Color::rgb(0, 0, 255);
        panel.pick_color(Some(blue));
        assert_eq!(overlay.render(100, 100).stroke.color, blue);
        assert_eq!(settings.lock().color.to_hex(), "#0000FF");

        panel.pick_color(None);
        assert_eq!(overlay.state().color, blue);
        assert_eq!(settings.lock().color, blue);
    }

    #[test]
    fn test_shape() {
        let (mut panel, overlay, settings) = panel(&Default::default());
        panel.set_shape(Shape::Circle);
        assert_eq!(panel.shape(), Shape::Circle);
        assert_eq!(overlay.state().shape, Shape::Circle);
        assert_eq!(settings.lock().shape, Shape::Circle);
        assert!(overlay.render(1920, 1080).geometry.is_empty());
    }

    #[test]
    fn test_position_sliders() {
        let (mut panel, overlay, settings) = panel(&Default::default());
        {
            let (x, y) = panel.position().unwrap();
            assert_eq!(x.range(), 0..=1920);
            assert_eq!(y.range(), 0..=1080);
            assert_eq!((x.value(), y.value()), (960, 540));
        }

        panel.set_x_position(100);
        panel.set_y_position(2000);
        assert_eq!(overlay.state().anchor, Anchor::Explicit { x: 100, y: 1080 });
        let s = settings.lock();
        assert_eq!(s.x_position, Some(100));
        assert_eq!(s.y_position, Some(1080));
    }

    #[test]
    fn test_fixed_center_has_no_position() {
        let (mut panel, overlay, settings) = panel(&OverlayConfig::fixed_center());
        assert!(panel.position().is_none());
        panel.set_x_position(100);
        assert_eq!(overlay.state().anchor, Anchor::SurfaceCenter);
        assert_eq!(settings.lock().x_position, None);
    }
}
