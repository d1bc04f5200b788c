/// Search for the three position detection patterns of a symbol and
/// combination of them into plausible (UL, UR, DL) triplets.

use itertools::Itertools;

use crate::binarize::{scan_boundaries, BitMatrix};

/// One candidate position detection pattern: sub-pixel center
/// coordinates and the pixels-per-module pitch along each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FinderCandidate {
    pub cx: f64,
    pub cy: f64,
    pub dx: f64,
    pub dy: f64,
}

/// Three candidates arranged like the corners of a symbol, together
/// with the version estimated from their separation.
#[derive(Clone, Copy, Debug)]
pub struct FinderTriplet {
    pub version_estimate: f64,
    pub ul: FinderCandidate,
    pub ur: FinderCandidate,
    pub dl: FinderCandidate,
}

// relative positions of the five color boundaries inside an ideal
// 1:1:3:1:1 slice, measured in modules from the pattern center
const EXPECT_BOUND_POS: [f64; 6] = [-3.5, -2.5, -1.5, 1.5, 2.5, 3.5];

/// Check whether a range of 5 intervals (colored B,W,B,W,B) has the
/// proportions of a slice through a position detection pattern.
/// Returns the center coordinate and the pixels-per-module pitch.
fn check_position_detection(bounds: &[u32]) -> Option<(f64, f64)> {
    if bounds.len() != 6 || bounds[4] >= bounds[5] {
        return None;
    }

    let pattern_width = (bounds[5] - bounds[0]) as f64;
    let middle_width = (bounds[3] - bounds[2]) as f64;
    if pattern_width < 7.0 || middle_width < 3.0 {
        return None;
    }

    let center = bounds.iter().map(|&b| b as f64).sum::<f64>() / 6.0;
    let pitch = (pattern_width + middle_width) / 10.0;

    for k in 0..6 {
        let rel_bound_pos = (bounds[k] as f64 - center) / pitch;
        if (rel_bound_pos - EXPECT_BOUND_POS[k]).abs() >= 0.5 {
            return None;
        }
    }

    Some((center, pitch))
}

/// Locate position detection pattern candidates in the binarized image.
///
/// Every row is scanned for 5-interval windows that pass the proportion
/// check; each horizontal hit is confirmed against the vertical slice
/// through its center before it counts. Nearby duplicates (the same
/// pattern found on several scan rows) are merged.
pub fn find_position_candidates(bits: &BitMatrix) -> Vec<FinderCandidate> {
    let width = bits.width();
    let height = bits.height();

    if width < 7 || height < 7 {
        return Vec::new();
    }

    let hbounds = scan_boundaries(bits);
    let vbounds = scan_boundaries(&bits.transposed());

    let mut raw = Vec::new();
    for y in 0..height {
        let row = &hbounds.pos[y];
        // start at the first black interval, then step two intervals at
        // a time so the window always begins on black
        let mut bx: usize = if bits.get(0, y) != 0 { 1 } else { 0 };
        while (row[bx + 4] as usize) < width {
            if let Some((cx, dx)) = check_position_detection(&row[bx..bx + 6]) {
                let x = cx as usize;
                let by = vbounds.map[x][y] as i64 - 2;
                if bits.get(x, y) == 0 && by >= 0 && by + 4 < height as i64 {
                    let by = by as usize;
                    if let Some((cy, dy)) = check_position_detection(&vbounds.pos[x][by..by + 6]) {
                        if dx <= 2.0 * dy && dy <= 2.0 * dx {
                            raw.push(FinderCandidate { cx, cy, dx, dy });
                        }
                    }
                }
            }
            bx += 2;
        }
    }

    // discard duplicate hits of the same pattern
    let mut patterns: Vec<FinderCandidate> = Vec::new();
    for fnd in raw {
        let duplicate = patterns.iter().any(|t| {
            (t.cx - fnd.cx).abs() < 3.0 * fnd.dx.max(t.dx)
                && (t.cy - fnd.cy).abs() < 3.0 * fnd.dy.max(t.dy)
        });
        if !duplicate {
            patterns.push(fnd);
        }
    }

    patterns
}

/// Select groups of three position detection patterns that could form
/// the finder constellation of one symbol.
///
/// All feasible triplets are returned, sorted by decreasing estimated
/// version so the caller tries the largest interpretation first. Ties
/// keep their discovery order.
pub fn make_finder_triplets(patterns: &[FinderCandidate]) -> Vec<FinderTriplet> {
    let mut triplets = Vec::new();

    // try every candidate in the upper-left role
    for fnd in patterns {
        // search a partner with horizontal separation
        for fndh in patterns {
            // pixel pitch must be roughly compatible
            if 8.0 * (fnd.dx - fndh.dx).abs() > fnd.dx + fndh.dx {
                continue;
            }
            if 8.0 * (fnd.dy - fndh.dy).abs() > fnd.dy + fndh.dy {
                continue;
            }
            // Y coordinates must match
            if (fnd.cy - fndh.cy).abs() > fnd.dy + fndh.dy {
                continue;
            }
            // X separation must be sufficient
            let xsep = 2.0 * (fnd.cx - fndh.cx).abs() / (fnd.dx + fndh.dx);
            if xsep < 12.0 {
                continue;
            }

            // search a partner with vertical separation
            for fndv in patterns {
                if 8.0 * (fnd.dx - fndv.dx).abs() > fnd.dx + fndv.dx {
                    continue;
                }
                if 8.0 * (fnd.dy - fndv.dy).abs() > fnd.dy + fndv.dy {
                    continue;
                }
                if (fnd.cx - fndv.cx).abs() > fnd.dx + fndv.dx {
                    continue;
                }
                let ysep = 2.0 * (fnd.cy - fndv.cy).abs() / (fnd.dy + fndv.dy);
                if ysep < 12.0 || ysep < 0.75 * xsep || ysep > 1.25 * xsep {
                    continue;
                }

                // identify upper-right and lower-left depending on the
                // symbol rotation
                let (ur, dl) = if (fndh.cx - fnd.cx) * (fndv.cy - fnd.cy) > 0.0 {
                    (fndh, fndv)    // not rotated or 180 degrees rotated
                } else {
                    (fndv, fndh)    // 90 or 270 degrees rotated
                };

                let version_estimate = (0.5 * (xsep + ysep) - 10.0) / 4.0;

                triplets.push(FinderTriplet {
                    version_estimate,
                    ul: *fnd,
                    ur: *ur,
                    dl: *dl,
                });
            }
        }
    }

    triplets
        .into_iter()
        .sorted_by(|a, b| b.version_estimate.partial_cmp(&a.version_estimate).unwrap())
        .collect()
}
