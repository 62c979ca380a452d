//! The settings mapping shared between the control panel and the overlay.
//!
//! Loading and saving are placeholders, there is no on-disk format. Saving echoes the
//! mapping to standard output as json.

use serde::{Deserialize, Serialize};

use crate::{Color, Error};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    #[default]
    Cross,
    /// Selectable and stored, but nothing is drawn for it.
    Circle,
}

impl Shape {
    pub const ALL: [Shape; 2] = [Shape::Cross, Shape::Circle];

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Cross => "Cross",
            Shape::Circle => "Circle",
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Shape {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::ALL
            .iter()
            .find(|shape| shape.name() == s)
            .copied()
            .ok_or_else(|| format!("unknown shape '{s}'").into())
    }
}

/// A single value change, tagged with the settings key it is stored under.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Setting {
    Size(i32),
    Gap(i32),
    Shape(Shape),
    Color(Color),
    XPosition(i32),
    YPosition(i32),
}

impl Setting {
    pub fn key(&self) -> &'static str {
        match self {
            Setting::Size(_) => "size",
            Setting::Gap(_) => "gap",
            Setting::Shape(_) => "shape",
            Setting::Color(_) => "color",
            Setting::XPosition(_) => "x_position",
            Setting::YPosition(_) => "y_position",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub size: i32,
    pub gap: i32,
    pub shape: Shape,
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_position: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_position: Option<i32>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            size: 10,
            gap: 5,
            shape: Shape::Cross,
            color: Color::RED,
            x_position: None,
            y_position: None,
        }
    }
}

impl Settings {
    pub fn apply(&mut self, setting: Setting) {
        match setting {
            Setting::Size(v) => self.size = v,
            Setting::Gap(v) => self.gap = v,
            Setting::Shape(v) => self.shape = v,
            Setting::Color(v) => self.color = v,
            Setting::XPosition(v) => self.x_position = Some(v),
            Setting::YPosition(v) => self.y_position = Some(v),
        }
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

pub fn load_settings() -> Settings {
    Settings::default()
}

pub fn save_settings(settings: &Settings) -> Result<(), Error> {
    println!("Settings saved: {}", settings.to_json()?);
    Ok(())
}
