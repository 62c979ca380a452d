use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl std::ops::Add<Point> for Point {
    type Output = Point;
    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub<Point> for Point {
    type Output = Point;
    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

/// An 8 bit per channel color.
///
/// Serialized as the `#RRGGBB` hex string, the alpha channel is not part of that form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Parse a `#RRGGBB` string, the result is fully opaque.
    pub fn from_hex(s: &str) -> Result<Color, Error> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| format!("color '{s}' does not start with '#'"))?;
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(format!("color '{s}' is not of the form #RRGGBB").into());
        }
        let channel = |i: usize| -> Result<u8, Error> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|e| format!("color '{s}' has an invalid channel: {e}").into())
        };
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::RED
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Color {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub antialias: bool,
}

impl Default for Stroke {
    fn default() -> Self {
        Stroke {
            color: Color::default(),
            width: 2.0,
            antialias: true,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
}

impl LineSegment {
    /// Signed length along the x axis, negative if the segment runs right to left.
    pub fn dx(&self) -> i32 {
        self.end.x - self.start.x
    }

    /// Signed length along the y axis, negative if the segment runs bottom to top.
    pub fn dy(&self) -> i32 {
        self.end.y - self.start.y
    }
}

/// Collection of line segments, built up with chained calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawGeometry {
    pub segments: Vec<LineSegment>,
}

impl DrawGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line_segment(mut self, start: &Point, end: &Point) -> Self {
        self.segments.push(LineSegment {
            start: *start,
            end: *end,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

/// Geometry plus the stroke to draw it with, the output of a render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawing {
    pub geometry: DrawGeometry,
    pub stroke: Stroke,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_color_hex() {
        let c = Color::from_hex("#FF8000").unwrap();
        assert_eq!(c, Color::rgb(255, 128, 0));
        assert_eq!(c.to_hex(), "#FF8000");
        assert_eq!(Color::from_hex("#00ff7f").unwrap().to_hex(), "#00FF7F");

        assert!(Color::from_hex("FF0000").is_err());
        assert!(Color::from_hex("#FF00").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
        assert!(Color::from_hex("#ÿÿÿ").is_err());
    }

    #[test]
    fn test_color_serde() {
        let v = serde_json::to_string(&Color::rgb(0, 0, 255)).unwrap();
        assert_eq!(v, "\"#0000FF\"");
        let c: Color = serde_json::from_str("\"#123456\"").unwrap();
        assert_eq!(c, Color::rgb(0x12, 0x34, 0x56));
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }

    #[test]
    fn test_geometry_builder() {
        let a = Point::new(1, 2);
        let b = Point::new(4, 2);
        let g = DrawGeometry::new()
            .line_segment(&a, &b)
            .line_segment(&b, &a);
        assert_eq!(g.len(), 2);
        assert_eq!(g.segments[0].dx(), 3);
        assert_eq!(g.segments[1].dx(), -3);
        assert_eq!(g.segments[1].dy(), 0);
        assert_eq!(b - a, Point::new(3, 0));
        assert_eq!(a + Point::new(1, 1), Point::new(2, 3));
    }
}
