/// Binarization of the input image and the color-boundary index the
/// finder search runs on.

use image::GrayImage;

/// A dense 2D matrix of single-bit values stored one byte per cell.
///
/// Up to module sampling a set bit means a light pixel; the sampled
/// module matrix flips this so that 1 means a dark module.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BitMatrix {
    pub fn new(width: usize, height: usize) -> BitMatrix {
        BitMatrix { width, height, data: vec![0u8; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        self.data[y * self.width + x] = value;
    }

    /// A copy of the matrix with rows and columns exchanged, so the
    /// vertical boundary scan can reuse the horizontal one.
    pub fn transposed(&self) -> BitMatrix {
        let mut out = BitMatrix::new(self.height, self.width);
        for y in 0..self.height {
            for x in 0..self.width {
                out.set(y, x, self.get(x, y));
            }
        }
        out
    }

    /// Number of set cells.
    pub fn count_ones(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }
}

/// Quantize a grayscale image into black and white pixels.
///
/// The threshold is the mid-range of the pixel values; anything strictly
/// above it counts as white. Good enough for the computer-rendered
/// symbols this decoder targets.
pub fn quantize(image: &GrayImage) -> BitMatrix {
    let (width, height) = image.dimensions();
    let mut min_pixel = u8::MAX;
    let mut max_pixel = u8::MIN;
    for pixel in image.pixels() {
        let v = pixel.0[0];
        if v < min_pixel { min_pixel = v; }
        if v > max_pixel { max_pixel = v; }
    }
    let threshold = (min_pixel as u16 + max_pixel as u16) / 2;

    let mut bits = BitMatrix::new(width as usize, height as usize);
    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[0] as u16 > threshold {
            bits.set(x as usize, y as usize, 1);
        }
    }
    bits
}

/// Per-row index of color boundaries.
///
/// `pos[y]` has `width + 2` entries: `pos[y][0] == 0`, then the X
/// coordinates of the first pixel after each color change in increasing
/// order, then `width` sentinels. `map[y][x]` counts the boundaries
/// strictly left of pixel x, which makes it a direct index into `pos`.
pub struct BoundaryIndex {
    pub pos: Vec<Vec<u32>>,
    pub map: Vec<Vec<u32>>,
}

/// Scan every row of the matrix for color boundaries.
pub fn scan_boundaries(bits: &BitMatrix) -> BoundaryIndex {
    let width = bits.width();
    let height = bits.height();

    let mut pos = Vec::with_capacity(height);
    let mut map = Vec::with_capacity(height);
    for y in 0..height {
        let mut row_pos = Vec::with_capacity(width + 2);
        let mut row_map = Vec::with_capacity(width);
        row_pos.push(0u32);
        let mut count = 0u32;
        if width > 0 {
            row_map.push(0u32);
        }
        for x in 1..width {
            if bits.get(x, y) != bits.get(x - 1, y) {
                row_pos.push(x as u32);
                count += 1;
            }
            row_map.push(count);
        }
        while row_pos.len() < width + 2 {
            row_pos.push(width as u32);
        }
        pos.push(row_pos);
        map.push(row_map);
    }

    BoundaryIndex { pos, map }
}
