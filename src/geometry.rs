/// Placement recovery: the affine transform from module coordinates to
/// image pixels, the version field readout it sometimes needs, and the
/// module sampling done through it.

use crate::binarize::BitMatrix;
use crate::error::DecodeError;
use crate::finder::{FinderCandidate, FinderTriplet};
use crate::format::decode_version_word;
use crate::tables::qr_size;

/// A 2x3 affine transform mapping module coordinates to pixel
/// coordinates. The center of module (i, j) sits at (i+0.5, j+0.5).
#[derive(Clone, Copy, Debug)]
pub struct AffineTransform {
    m: [[f64; 3]; 2],
}

impl AffineTransform {
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.m[0][0] * x + self.m[0][1] * y + self.m[0][2],
            self.m[1][0] * x + self.m[1][1] * y + self.m[1][2],
        )
    }
}

/// Fetch the binarized pixel under the given coordinates. Coordinates
/// are truncated to pixel indices; anything outside the image is a
/// sampling failure (the triplet was not a real symbol corner).
fn sample(bits: &BitMatrix, px: f64, py: f64) -> Result<u8, DecodeError> {
    let xi = px as i64;
    let yi = py as i64;
    if xi < 0 || yi < 0 || xi >= bits.width() as i64 || yi >= bits.height() as i64 {
        return Err(DecodeError::SampleOutOfImage);
    }
    Ok(bits.get(xi as usize, yi as usize))
}

/// Read the 18-bit version field next to the upper-right finder and
/// return the BCH-checked version number.
///
/// Works before the full transform is known: a local transform around
/// the upper-right finder is enough, with its axes picked from the
/// orientation of the UL-UR baseline so 90-degree rotations come out
/// right.
pub fn extract_version(
    bits: &BitMatrix,
    ul: &FinderCandidate,
    ur: &FinderCandidate,
) -> Result<u8, DecodeError> {
    let (mut t00, mut t01, mut t10, mut t11) = (0.0, 0.0, 0.0, 0.0);
    if (ur.cx - ul.cx).abs() > (ur.cy - ul.cy).abs() {
        // not rotated or 180 degrees rotated
        let s = (ur.cx - ul.cx).signum();
        t00 = ur.dx * s;
        t11 = ur.dy * s;
    } else {
        // 90 degrees or 270 degrees rotated
        let s = (ur.cy - ul.cy).signum();
        t10 = ur.dy * s;
        t01 = -ur.dx * s;
    }

    let mut raw_word = 0u32;
    for i in 0..18u32 {
        let x = (i % 3) as f64 - 7.0;
        let y = (i / 3) as f64 - 3.0;
        let px = t00 * x + t01 * y + ur.cx;
        let py = t10 * x + t11 * y + ur.cy;
        if sample(bits, px, py)? == 0 {
            raw_word |= 1 << i;     // dark module reads as a set bit
        }
    }

    let version = decode_version_word(raw_word)?;
    if version < 1 || version > 40 {
        return Err(DecodeError::VersionOutOfRange(version as i32));
    }
    Ok(version as u8)
}

/// Determine the symbol version and the affine transform for the given
/// finder triplet.
///
/// Up to version 6 the version comes from the finder separation alone;
/// beyond that the estimate only selects the version field for readout.
pub fn locate_symbol(
    bits: &BitMatrix,
    triplet: &FinderTriplet,
) -> Result<(AffineTransform, u8), DecodeError> {
    let mut version = triplet.version_estimate.round() as i32;
    if version > 6 {
        version = extract_version(bits, &triplet.ul, &triplet.ur)? as i32;
    }
    if version < 1 || version > 40 {
        return Err(DecodeError::VersionOutOfRange(version));
    }
    let version = version as u8;

    // nominal separation between finder centers, in modules
    let qrsep = (10 + 4 * version as u32) as f64;

    let (ul, ur, dl) = (&triplet.ul, &triplet.ur, &triplet.dl);
    let t00 = (ur.cx - ul.cx) / qrsep;
    let t10 = (ur.cy - ul.cy) / qrsep;
    let t01 = (dl.cx - ul.cx) / qrsep;
    let t11 = (dl.cy - ul.cy) / qrsep;
    // the UL finder center sits at module (3.5, 3.5)
    let t02 = ul.cx - 3.5 * (t00 + t01);
    let t12 = ul.cy - 3.5 * (t10 + t11);

    let transform = AffineTransform {
        m: [[t00, t01, t02], [t10, t11, t12]],
    };
    Ok((transform, version))
}

/// Sample every module of the symbol through the transform.
///
/// The result follows the QR convention: 1 is a dark module, the
/// opposite of the binarized image.
pub fn sample_matrix(
    bits: &BitMatrix,
    transform: &AffineTransform,
    version: u8,
) -> Result<BitMatrix, DecodeError> {
    let qrsize = qr_size(version);
    let mut matrix = BitMatrix::new(qrsize, qrsize);
    for j in 0..qrsize {
        for i in 0..qrsize {
            let (px, py) = transform.apply(i as f64 + 0.5, j as f64 + 0.5);
            let value = sample(bits, px, py)?;
            matrix.set(i, j, 1 - value);
        }
    }
    Ok(matrix)
}
