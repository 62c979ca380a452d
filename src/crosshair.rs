use crate::{Color, DrawGeometry, Drawing, Point, Settings, Setting, Shape, Stroke};

/// Where the crosshair center comes from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// Recomputed from the surface size on every render.
    SurfaceCenter,
    /// Explicit coordinates, a zero coordinate is filled in by the first layout pass.
    Explicit { x: i32, y: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrosshairState {
    pub size: i32,
    pub gap: i32,
    pub shape: Shape,
    pub color: Color,
    pub anchor: Anchor,
}

impl CrosshairState {
    pub fn from_settings(settings: &Settings, repositionable: bool) -> Self {
        let anchor = if repositionable {
            Anchor::Explicit {
                x: settings.x_position.unwrap_or(0),
                y: settings.y_position.unwrap_or(0),
            }
        } else {
            Anchor::SurfaceCenter
        };
        CrosshairState {
            size: settings.size,
            gap: settings.gap,
            shape: settings.shape,
            color: settings.color,
            anchor,
        }
    }

    pub fn is_repositionable(&self) -> bool {
        matches!(self.anchor, Anchor::Explicit { .. })
    }

    /// Fill in unset explicit coordinates with the surface center.
    pub fn lay_out(&mut self, width: i32, height: i32) {
        if let Anchor::Explicit { x, y } = &mut self.anchor {
            if *x == 0 {
                *x = width.div_euclid(2);
            }
            if *y == 0 {
                *y = height.div_euclid(2);
            }
        }
    }

    pub fn center(&self, width: i32, height: i32) -> Point {
        match self.anchor {
            Anchor::SurfaceCenter => Point::new(width.div_euclid(2), height.div_euclid(2)),
            Anchor::Explicit { x, y } => Point::new(x, y),
        }
    }

    /// Returns false if the change does not apply to this state, which is only the case
    /// for a position on a state anchored at the surface center.
    pub fn apply(&mut self, setting: Setting) -> bool {
        match (setting, &mut self.anchor) {
            (Setting::Size(v), _) => self.size = v,
            (Setting::Gap(v), _) => self.gap = v,
            (Setting::Shape(v), _) => self.shape = v,
            (Setting::Color(v), _) => self.color = v,
            (Setting::XPosition(v), Anchor::Explicit { x, .. }) => *x = v,
            (Setting::YPosition(v), Anchor::Explicit { y, .. }) => *y = v,
            (Setting::XPosition(_) | Setting::YPosition(_), Anchor::SurfaceCenter) => {
                return false
            }
        }
        true
    }
}

/// Compute the draw commands for the crosshair on a surface of the given size.
///
/// Half lengths use floor division. There is no relation enforced between size and gap,
/// if the gap exceeds the size the arms run backwards and are passed on as they are.
pub fn render(state: &CrosshairState, width: i32, height: i32, stroke_width: f32) -> Drawing {
    let stroke = Stroke {
        color: state.color,
        width: stroke_width,
        antialias: true,
    };
    let geometry = match state.shape {
        Shape::Cross => {
            let c = state.center(width, height);
            let size_half = state.size.div_euclid(2);
            let gap_half = state.gap.div_euclid(2);
            let h = |dx: i32| c + Point::new(dx, 0);
            let v = |dy: i32| c + Point::new(0, dy);
            DrawGeometry::new()
                .line_segment(&h(-size_half), &h(-gap_half))
                .line_segment(&h(gap_half), &h(size_half))
                .line_segment(&v(-size_half), &v(-gap_half))
                .line_segment(&v(gap_half), &v(size_half))
        }
        // Circle has never been drawn.
        Shape::Circle => DrawGeometry::new(),
    };
    Drawing { geometry, stroke }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::LineSegment;

    fn cross(size: i32, gap: i32, x: i32, y: i32) -> CrosshairState {
        CrosshairState {
            size,
            gap,
            shape: Shape::Cross,
            color: Color::RED,
            anchor: Anchor::Explicit { x, y },
        }
    }

    fn seg(x0: i32, y0: i32, x1: i32, y1: i32) -> LineSegment {
        LineSegment {
            start: Point::new(x0, y0),
            end: Point::new(x1, y1),
        }
    }

    #[test]
    fn test_size_10_gap_4() {
        let d = render(&cross(10, 4, 100, 200), 1920, 1080, 2.0);
        assert_eq!(
            d.geometry.segments,
            vec![
                seg(95, 200, 98, 200),
                seg(102, 200, 105, 200),
                seg(100, 195, 100, 198),
                seg(100, 202, 100, 205),
            ]
        );
        assert_eq!(d.stroke.width, 2.0);
        assert!(d.stroke.antialias);
        assert_eq!(d.stroke.color, Color::RED);
    }

    #[test]
    fn test_symmetric_arms() {
        let (cx, cy) = (640, 360);
        for size in 1..=50 {
            for gap in 0..=size {
                let d = render(&cross(size, gap, cx, cy), 1280, 720, 2.0);
                let s = &d.geometry.segments;
                assert_eq!(s.len(), 4);
                let arm = size / 2 - gap / 2;
                assert_eq!(s[0].dx(), arm);
                assert_eq!(s[1].dx(), arm);
                assert_eq!(s[2].dy(), arm);
                assert_eq!(s[3].dy(), arm);
                // Mirror images about the center.
                assert_eq!(cx - s[0].start.x, s[1].end.x - cx);
                assert_eq!(cx - s[0].end.x, s[1].start.x - cx);
                assert_eq!(cy - s[2].start.y, s[3].end.y - cy);
                assert_eq!(cy - s[2].end.y, s[3].start.y - cy);
                assert!(s[0].start.y == cy && s[1].end.y == cy);
                assert!(s[2].start.x == cx && s[3].end.x == cx);
            }
        }
    }

    #[test]
    fn test_gap_exceeds_size() {
        let d = render(&cross(4, 20, 50, 50), 100, 100, 2.0);
        let s = &d.geometry.segments;
        assert_eq!(s[0], seg(48, 50, 40, 50));
        assert_eq!(s[1], seg(60, 50, 52, 50));
        assert!(s[1].end.x < s[1].start.x);
        assert_eq!(s[2], seg(50, 48, 50, 40));
        assert_eq!(s[3], seg(50, 60, 50, 52));
    }

    #[test]
    fn test_default_settings_centered() {
        let mut state = CrosshairState::from_settings(&Settings::default(), true);
        state.lay_out(1920, 1080);
        let d = render(&state, 1920, 1080, 2.0);
        let s = &d.geometry.segments;
        assert_eq!(s[0], seg(955, 540, 958, 540));
        assert_eq!(s[1], seg(962, 540, 965, 540));
        assert_eq!(d.stroke.color.to_hex(), "#FF0000");
        // Half gap of 2 from the center, 10 / 2 - 5 / 2 = 3 drawn per arm.
        assert_eq!(s[1].start.x - 960, 2);
        assert_eq!(s[1].dx(), 3);
    }

    #[test]
    fn test_circle_draws_nothing() {
        let mut state = cross(10, 4, 10, 10);
        state.apply(Setting::Shape(Shape::Circle));
        assert!(render(&state, 100, 100, 2.0).geometry.is_empty());
    }

    #[test]
    fn test_surface_center_follows_size() {
        let mut state = CrosshairState::from_settings(&Settings::default(), false);
        assert!(!state.is_repositionable());
        assert_eq!(state.center(1920, 1080), Point::new(960, 540));
        assert_eq!(state.center(801, 601), Point::new(400, 300));
        assert!(!state.apply(Setting::XPosition(5)));
        assert_eq!(state.anchor, Anchor::SurfaceCenter);
        state.lay_out(100, 100);
        assert_eq!(state.anchor, Anchor::SurfaceCenter);
    }

    #[test]
    fn test_layout_fills_unset_axes() {
        let settings = Settings {
            x_position: Some(500),
            y_position: Some(0),
            ..Default::default()
        };
        let mut state = CrosshairState::from_settings(&settings, true);
        state.lay_out(1920, 1080);
        assert_eq!(state.anchor, Anchor::Explicit { x: 500, y: 540 });

        assert!(state.apply(Setting::XPosition(0)));
        assert_eq!(state.center(1920, 1080), Point::new(0, 540));
        assert!(state.apply(Setting::YPosition(7)));
        assert_eq!(state.center(10, 10), Point::new(0, 7));
    }
}
