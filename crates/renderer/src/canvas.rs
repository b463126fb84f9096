//! The RGB raster every compositing pass writes into.

use projection::PixelPoint;
use quake_common::{Color, RenderConfig};

/// A `width` x `height` grid of RGB pixels, row-major with row 0 at the top.
///
/// All writes are bounds-checked: a coordinate off the raster is skipped and
/// reported as `false`, never wrapped into a neighbouring row.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width as usize * height as usize],
        }
    }

    pub fn for_config(config: &RenderConfig, background: Color) -> Self {
        Self::new(config.width, config.height, background)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Overwrite every pixel.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    pub fn get(&self, x: i64, y: i64) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set one pixel; returns whether it was on the canvas.
    pub fn set(&mut self, x: i64, y: i64, color: Color) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }

    pub fn pixel_at(&self, point: PixelPoint) -> Option<Color> {
        self.get(point.x(), point.y())
    }

    pub fn plot(&mut self, point: PixelPoint, color: Color) -> bool {
        self.set(point.x(), point.y(), color)
    }

    /// Number of pixels currently holding `color`.
    pub fn count_color(&self, color: Color) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    /// Packed RGB bytes, 3 per pixel.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for c in &self.pixels {
            let (r, g, b) = c.to_rgb();
            bytes.extend_from_slice(&[r, g, b]);
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_canvas_is_filled() {
        let canvas = Canvas::new(4, 3, Color::WHITE);
        assert_eq!(canvas.pixels().len(), 12);
        assert_eq!(canvas.count_color(Color::WHITE), 12);
    }

    #[test]
    fn test_set_and_get() {
        let mut canvas = Canvas::new(4, 3, Color::WHITE);
        assert!(canvas.set(3, 2, Color::RED));
        assert_eq!(canvas.get(3, 2), Some(Color::RED));
        assert_eq!(canvas.pixels()[2 * 4 + 3], Color::RED);
    }

    #[test]
    fn test_out_of_bounds_writes_are_skipped() {
        let mut canvas = Canvas::new(4, 3, Color::WHITE);
        assert!(!canvas.set(4, 0, Color::RED));
        assert!(!canvas.set(0, 3, Color::RED));
        assert!(!canvas.set(-1, 1, Color::RED));
        assert!(!canvas.set(1, -1, Color::RED));
        // x == width must not wrap onto the next row
        assert_eq!(canvas.get(0, 1), Some(Color::WHITE));
        assert_eq!(canvas.count_color(Color::WHITE), 12);
        assert_eq!(canvas.get(4, 0), None);
    }

    #[test]
    fn test_to_rgb_bytes() {
        let mut canvas = Canvas::new(2, 1, Color::BLACK);
        canvas.set(1, 0, Color::new(1, 2, 3));
        assert_eq!(canvas.to_rgb_bytes(), vec![0, 0, 0, 1, 2, 3]);
    }
}
