use std::time::Duration;

/// How often the overlay re-asserts its topmost z-order.
pub const TOPMOST_INTERVAL: Duration = Duration::from_millis(10_000);

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    /// Title of the overlay window.
    pub name: String,
    /// Create the overlay as an always-on-top window.
    pub on_top: bool,
    /// Show the overlay in the taskbar.
    pub task_bar: bool,
    /// Let mouse input fall through the overlay to whatever is below it.
    pub mouse_passthrough: bool,
    /// Allow the crosshair center to be moved away from the surface center.
    pub repositionable: bool,
    pub topmost_interval: Duration,
    pub stroke_width: f32,
    pub panel_title: String,
    pub panel_size: [f32; 2],
}

impl Default for OverlayConfig {
    fn default() -> Self {
        OverlayConfig {
            name: "Crosshair".to_owned(),
            on_top: true,
            task_bar: false,
            mouse_passthrough: true,
            repositionable: true,
            topmost_interval: TOPMOST_INTERVAL,
            stroke_width: 2.0,
            panel_title: "Crosshair Customization".to_owned(),
            panel_size: [400.0, 300.0],
        }
    }
}

impl OverlayConfig {
    /// Configuration where the crosshair is always drawn at the surface center.
    pub fn fixed_center() -> Self {
        OverlayConfig {
            repositionable: false,
            ..Default::default()
        }
    }
}
