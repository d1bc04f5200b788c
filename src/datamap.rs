/// Enumeration of the codeword-carrying modules of a symbol and the
/// codeword readout across them.

use crate::binarize::BitMatrix;
use crate::masking::masking_function;
use crate::tables::{alignment_pattern_points, qr_size, total_codewords};

/// Build the mask of modules owned by function patterns: the three
/// finder corners (with separators and format strips), the two timing
/// lines, the version blocks for version 7 and up, and the alignment
/// patterns.
pub fn function_pattern_mask(version: u8) -> BitMatrix {
    let qrsize = qr_size(version);
    let mut mask = BitMatrix::new(qrsize, qrsize);

    // finder corners; 9 modules wide along the inside edges
    for y in 0..9 {
        for x in 0..9 {
            mask.set(x, y, 1);
        }
        for x in qrsize - 8..qrsize {
            mask.set(x, y, 1);
        }
    }
    for y in qrsize - 8..qrsize {
        for x in 0..9 {
            mask.set(x, y, 1);
        }
    }

    // timing lines
    for k in 0..qrsize {
        mask.set(k, 6, 1);
        mask.set(6, k, 1);
    }

    // version information blocks
    if version > 6 {
        for y in 0..6 {
            for x in qrsize - 11..qrsize - 8 {
                mask.set(x, y, 1);
                mask.set(y, x, 1);
            }
        }
    }

    // alignment patterns, 5x5 around each center
    for (ax, ay) in alignment_pattern_points(version) {
        for y in ay - 2..=ay + 2 {
            for x in ax - 2..=ax + 2 {
                mask.set(x, y, 1);
            }
        }
    }

    mask
}

/// Enumerate the codeword-carrying modules in placement order.
///
/// Modules are listed right to left in strips two columns wide, with
/// the vertical timing column skipped, alternating between upward and
/// downward traversal of the strips. The list is cut off at the exact
/// codeword bit count of the symbol, so the few remainder modules at
/// the end never reach the codeword readout.
pub fn data_module_positions(version: u8) -> Vec<(usize, usize)> {
    let qrsize = qr_size(version);
    let n_bits = 8 * total_codewords(version) as usize;

    // columns right-to-left; the last six shift down by one to jump
    // over the vertical timing column
    let mut columns: Vec<usize> = (1..qrsize).rev().collect();
    let n = columns.len();
    for c in columns[n - 6..].iter_mut() {
        *c -= 1;
    }

    let func_mask = function_pattern_mask(version);

    let mut positions = Vec::with_capacity(n_bits);
    for (strip, pair) in columns.chunks(2).enumerate() {
        let rows: Vec<usize> = if strip % 2 == 0 {
            (0..qrsize).rev().collect()
        } else {
            (0..qrsize).collect()
        };
        for y in rows {
            for &x in pair {
                if func_mask.get(x, y) == 0 {
                    positions.push((x, y));
                }
            }
        }
    }

    positions.truncate(n_bits);
    positions
}

/// Undo the data mask and pack the bits at the data-module positions
/// into codewords, most significant bit first.
pub fn extract_codewords(matrix: &BitMatrix, mask_ref: u8) -> Vec<u8> {
    let qrsize = matrix.width();
    let version = ((qrsize - 17) / 4) as u8;

    let mask = masking_function(mask_ref);
    let positions = data_module_positions(version);

    let mut codewords = Vec::with_capacity(positions.len() / 8);
    let mut word = 0u8;
    let mut nbits = 0;
    for (x, y) in positions {
        let bit = matrix.get(x, y) ^ mask(y, x) as u8;
        word = (word << 1) | bit;
        nbits += 1;
        if nbits == 8 {
            codewords.push(word);
            word = 0;
            nbits = 0;
        }
    }
    codewords
}
