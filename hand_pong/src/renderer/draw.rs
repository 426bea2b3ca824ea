use std::ops::Range;

use game_core::{PreviewFrame, Rect};
use glam::Vec2;

use super::font::{glyph, GLYPH_ADVANCE, GLYPH_WIDTH};

/// `0RGB` software framebuffer. Every primitive clips to the buffer.
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    fn set_pixel(&mut self, x: i64, y: i64, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.pixels[y as usize * self.width + x as usize] = color;
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let cols = span(rect.left(), rect.right(), self.width);
        for row in span(rect.top(), rect.bottom(), self.height) {
            let start = row * self.width;
            self.pixels[start + cols.start..start + cols.end].fill(color);
        }
    }

    /// Filled ellipse inscribed in `rect`
    pub fn fill_ellipse(&mut self, rect: Rect, color: u32) {
        let center = rect.center();
        let radii = rect.size * 0.5;
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        for row in span(rect.top(), rect.bottom(), self.height) {
            let dy = (row as f32 + 0.5 - center.y) / radii.y;
            for col in span(rect.left(), rect.right(), self.width) {
                let dx = (col as f32 + 0.5 - center.x) / radii.x;
                if dx * dx + dy * dy <= 1.0 {
                    self.pixels[row * self.width + col] = color;
                }
            }
        }
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: u32) {
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let p = from + delta * (i as f32 / steps as f32);
            self.set_pixel(p.x.floor() as i64, p.y.floor() as i64, color);
        }
    }

    /// Nearest-neighbour scale of `image` into `dest`
    pub fn blit_scaled(&mut self, image: &PreviewFrame, dest: Rect) {
        if image.width == 0 || image.height == 0 || dest.size.x < 1.0 || dest.size.y < 1.0 {
            return;
        }
        let origin_x = dest.left().round();
        let origin_y = dest.top().round();
        for row in span(dest.top(), dest.bottom(), self.height) {
            let v = ((row as f32 - origin_y) / dest.size.y * image.height as f32) as usize;
            let src_row = v.min(image.height - 1) * image.width;
            for col in span(dest.left(), dest.right(), self.width) {
                let u = ((col as f32 - origin_x) / dest.size.x * image.width as f32) as usize;
                let src = src_row + u.min(image.width - 1);
                self.pixels[row * self.width + col] = image.pixels[src];
            }
        }
    }

    /// Bitmap text with its top-left corner at `origin`
    pub fn text(&mut self, text: &str, scale: usize, color: u32, origin: Vec2) {
        let scale = scale.max(1);
        let mut x = origin.x.round() as i64;
        let y = origin.y.round() as i64;
        for c in text.chars() {
            for (row, bits) in glyph(c).iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let px = x + (col * scale) as i64;
                    let py = y + (row * scale) as i64;
                    for sy in 0..scale as i64 {
                        for sx in 0..scale as i64 {
                            self.set_pixel(px + sx, py + sy, color);
                        }
                    }
                }
            }
            x += (GLYPH_ADVANCE * scale) as i64;
            if x >= self.width as i64 {
                break;
            }
        }
    }
}

/// Pixel indices covered by `[lo, hi)`, clipped to `[0, max)`
fn span(lo: f32, hi: f32, max: usize) -> Range<usize> {
    let start = lo.round().clamp(0.0, max as f32) as usize;
    let end = hi.round().clamp(0.0, max as f32) as usize;
    start..end.max(start)
}
