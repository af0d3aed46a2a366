use image::RgbaImage;

/// Pixels with an alpha above this count as solid
const ALPHA_THRESHOLD: u8 = 127;

/// Per-pixel collision mask built from a sprite's alpha channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    pub fn from_image(image: &RgbaImage) -> Self {
        let bits = image
            .pixels()
            .map(|pixel| pixel.0[3] > ALPHA_THRESHOLD)
            .collect();

        Self {
            width: image.width(),
            height: image.height(),
            bits,
        }
    }

    /// Builds a mask from rows of `#` (solid) and any other char (empty)
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0) as u32;
        let height = rows.len() as u32;
        let mut bits = vec![false; (width * height) as usize];

        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                bits[y * width as usize + x] = ch == '#';
            }
        }

        Self {
            width,
            height,
            bits,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[(y * self.width + x) as usize]
    }

    /// Number of solid pixels
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&bit| bit).count()
    }

    /// Returns the first solid pixel shared with `other`, in this mask's coordinates.
    ///
    /// `offset` is the position of `other`'s top-left corner relative to ours.
    /// Only the intersection of the two rectangles is scanned.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(u32, u32)> {
        let (dx, dy) = (i64::from(offset.0), i64::from(offset.1));

        let x_start = dx.max(0);
        let y_start = dy.max(0);
        let x_end = i64::from(self.width).min(dx + i64::from(other.width));
        let y_end = i64::from(self.height).min(dy + i64::from(other.height));

        if x_start >= x_end || y_start >= y_end {
            return None;
        }

        for y in y_start..y_end {
            for x in x_start..x_end {
                if self.get(x as u32, y as u32) && other.get((x - dx) as u32, (y - dy) as u32) {
                    return Some((x as u32, y as u32));
                }
            }
        }

        None
    }
}
