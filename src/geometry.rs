//! Small 2D helpers shared by the simulation, the layout code and the renderer.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle (origin top-left).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Edges count as inside.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Scale `image` uniformly so it fits inside `surface`, centred.
pub fn aspect_fit(image: Size, surface: Size) -> Rect {
    let scale = (surface.width / image.width).min(surface.height / image.height);
    let width = image.width * scale;
    let height = image.height * scale;
    Rect::new(
        (surface.width - width) / 2.0,
        (surface.height - height) / 2.0,
        width,
        height,
    )
}

/// Natural sizes of the images the core lays out. `None` means the image is
/// not fully loaded yet and whatever depends on it is skipped for this frame.
pub trait ImageMetrics {
    fn closeup_size(&self, closeup: &str) -> Option<Size>;
    fn popup_size(&self) -> Option<Size>;
    fn second_screen_size(&self) -> Option<Size>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aspect_fit_letterboxes_wide_image() {
        let r = aspect_fit(Size::new(800.0, 400.0), Size::new(400.0, 700.0));
        assert!((r.width - 400.0).abs() < 1e-9);
        assert!((r.height - 200.0).abs() < 1e-9);
        assert!((r.x - 0.0).abs() < 1e-9);
        assert!((r.y - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_rect_contains_edges() {
        let r = Rect::new(10.0, 10.0, 20.0, 5.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(r.contains(Point::new(30.0, 15.0)));
        assert!(!r.contains(Point::new(30.1, 15.0)));
        assert!(!r.contains(Point::new(9.9, 12.0)));
    }
}
