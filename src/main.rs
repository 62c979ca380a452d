use crosshair_overlay::{load_settings, save_settings, Error, OverlayConfig};

pub fn main() -> std::result::Result<(), Error> {
    crosshair_overlay::setup()?;
    let settings = crosshair_overlay::run(load_settings(), OverlayConfig::default())?;
    save_settings(&settings)
}
