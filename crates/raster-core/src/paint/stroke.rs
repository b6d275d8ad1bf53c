use crate::image::RasterImage;

/// One round daub of paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    /// Center column.
    pub x: usize,
    /// Center row.
    pub y: usize,
    pub radius: u32,
    /// Premultiplied RGBA color.
    pub color: [u8; 4],
}

impl Stroke {
    #[inline]
    pub fn new(x: usize, y: usize, radius: u32, color: [u8; 4]) -> Self {
        Self {
            x,
            y,
            radius,
            color,
        }
    }
}

impl RasterImage {
    /// Rasterize a stroke.
    ///
    /// Pixels with `dx² + dy² <= radius²` take the stroke color. Pixels one
    /// step outside (`dx² + dy² == radius² + 1`) become the truncated average
    /// of their color and the stroke color. Everything outside the image is
    /// skipped.
    pub fn paint_stroke(&mut self, stroke: &Stroke) {
        let r = stroke.radius as isize;
        let r2 = r * r;
        let (width, height) = (self.width() as isize, self.height() as isize);

        for dx in -r..=r {
            for dy in -r..=r {
                let x = stroke.x as isize + dx;
                let y = stroke.y as isize + dy;
                if x < 0 || x >= width || y < 0 || y >= height {
                    continue;
                }
                let (x, y) = (x as usize, y as usize);

                let d2 = dx * dx + dy * dy;
                if d2 <= r2 {
                    self.set_pixel(x, y, stroke.color);
                } else if d2 == r2 + 1 {
                    let current = self.pixel(x, y);
                    let mut blended = [0u8; 4];
                    for c in 0..4 {
                        blended[c] = ((current[c] as u16 + stroke.color[c] as u16) / 2) as u8;
                    }
                    self.set_pixel(x, y, blended);
                }
            }
        }
    }
}
