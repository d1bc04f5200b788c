/// Contains lookup tables and other computation functions that provide
/// reference data needed for decoding a QR code, such as the codeword
/// capacity and error correction block structure of each symbol
/// configuration.

use crate::config::{ECCLevel, SymbolConfig};

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Symbol side length in modules for the given version.
pub fn qr_size(version: u8) -> usize {
    17 + 4 * version as usize
}

// total number of codewords per symbol, indexed by version - 1
static TOTAL_CODEWORDS: [u32; 40] = [
      26,   44,   70,  100,  134,  172,  196,  242,  292,  346,
     404,  466,  532,  581,  655,  733,  815,  901,  991, 1085,
    1156, 1258, 1364, 1474, 1588, 1706, 1828, 1921, 2051, 2185,
    2323, 2465, 2611, 2761, 2876, 3034, 3196, 3362, 3532, 3706,
];

/// Total number of codewords (data plus error correction) in a symbol
/// of the given version.
pub fn total_codewords(version: u8) -> u32 {
    TOTAL_CODEWORDS[(version - 1) as usize]
}

#[derive(Clone,Copy,Hash,Eq,PartialEq,Debug)]
pub struct BlockStructure {
    pub check_words: u32,   // error correction codewords over the whole symbol
    pub blocks: u32,        // number of interleaved blocks
}

impl BlockStructure {
    pub const fn new(check_words: u32, blocks: u32) -> BlockStructure {
        BlockStructure { check_words, blocks }
    }
}

macro_rules! define_block_table {
    {$(
        $version:expr,
        $ecc:ident,
        $check_words:expr,
        $blocks:expr;
    )*} => {
        lazy_static! {
            pub static ref BLOCK_STRUCTURE_TABLE: HashMap<SymbolConfig, BlockStructure> = [
                $(
                    (SymbolConfig::new($version, ECCLevel::$ecc), BlockStructure::new($check_words, $blocks)),
                )*
            ].iter().copied().collect();
        }
    }
}

define_block_table!(
     1, L,    7,  1;   1, M,   10,  1;   1, Q,   13,  1;   1, H,   17,  1;
     2, L,   10,  1;   2, M,   16,  1;   2, Q,   22,  1;   2, H,   28,  1;
     3, L,   15,  1;   3, M,   26,  1;   3, Q,   36,  2;   3, H,   44,  2;
     4, L,   20,  1;   4, M,   36,  2;   4, Q,   52,  2;   4, H,   64,  4;
     5, L,   26,  1;   5, M,   48,  2;   5, Q,   72,  4;   5, H,   88,  4;
     6, L,   36,  2;   6, M,   64,  4;   6, Q,   96,  4;   6, H,  112,  4;
     7, L,   40,  2;   7, M,   72,  4;   7, Q,  108,  6;   7, H,  130,  5;
     8, L,   48,  2;   8, M,   88,  4;   8, Q,  132,  6;   8, H,  156,  6;
     9, L,   60,  2;   9, M,  110,  5;   9, Q,  160,  8;   9, H,  192,  8;
    10, L,   72,  4;  10, M,  130,  5;  10, Q,  192,  8;  10, H,  224,  8;
    11, L,   80,  4;  11, M,  150,  5;  11, Q,  224,  8;  11, H,  264, 11;
    12, L,   96,  4;  12, M,  176,  8;  12, Q,  260, 10;  12, H,  308, 11;
    13, L,  104,  4;  13, M,  198,  9;  13, Q,  288, 12;  13, H,  352, 16;
    14, L,  120,  4;  14, M,  216,  9;  14, Q,  320, 16;  14, H,  384, 16;
    15, L,  132,  6;  15, M,  240, 10;  15, Q,  360, 12;  15, H,  432, 18;
    16, L,  144,  6;  16, M,  280, 10;  16, Q,  408, 17;  16, H,  480, 16;
    17, L,  168,  6;  17, M,  308, 11;  17, Q,  448, 16;  17, H,  532, 19;
    18, L,  180,  6;  18, M,  338, 13;  18, Q,  504, 18;  18, H,  588, 21;
    19, L,  196,  7;  19, M,  364, 14;  19, Q,  546, 21;  19, H,  650, 25;
    20, L,  224,  8;  20, M,  416, 16;  20, Q,  600, 20;  20, H,  700, 25;
    21, L,  224,  8;  21, M,  442, 17;  21, Q,  644, 23;  21, H,  750, 25;
    22, L,  252,  9;  22, M,  476, 17;  22, Q,  690, 23;  22, H,  816, 34;
    23, L,  270,  9;  23, M,  504, 18;  23, Q,  750, 25;  23, H,  900, 30;
    24, L,  300, 10;  24, M,  560, 20;  24, Q,  810, 27;  24, H,  960, 32;
    25, L,  312, 12;  25, M,  588, 21;  25, Q,  870, 29;  25, H, 1050, 35;
    26, L,  336, 12;  26, M,  644, 23;  26, Q,  952, 34;  26, H, 1110, 37;
    27, L,  360, 12;  27, M,  700, 25;  27, Q, 1020, 34;  27, H, 1200, 40;
    28, L,  390, 13;  28, M,  728, 26;  28, Q, 1050, 35;  28, H, 1260, 42;
    29, L,  420, 14;  29, M,  784, 28;  29, Q, 1140, 38;  29, H, 1350, 45;
    30, L,  450, 15;  30, M,  812, 29;  30, Q, 1200, 40;  30, H, 1440, 48;
    31, L,  480, 16;  31, M,  868, 31;  31, Q, 1290, 43;  31, H, 1530, 51;
    32, L,  510, 17;  32, M,  924, 33;  32, Q, 1350, 45;  32, H, 1620, 54;
    33, L,  540, 18;  33, M,  980, 35;  33, Q, 1440, 48;  33, H, 1710, 57;
    34, L,  570, 19;  34, M, 1036, 37;  34, Q, 1530, 51;  34, H, 1800, 60;
    35, L,  570, 19;  35, M, 1064, 38;  35, Q, 1590, 53;  35, H, 1890, 63;
    36, L,  600, 20;  36, M, 1120, 40;  36, Q, 1680, 56;  36, H, 1980, 66;
    37, L,  630, 21;  37, M, 1204, 43;  37, Q, 1770, 59;  37, H, 2100, 70;
    38, L,  660, 22;  38, M, 1260, 45;  38, Q, 1860, 62;  38, H, 2220, 74;
    39, L,  720, 24;  39, M, 1316, 47;  39, Q, 1950, 65;  39, H, 2310, 77;
    40, L,  750, 25;  40, M, 1372, 49;  40, Q, 2040, 68;  40, H, 2430, 81;
);

/// Convenience function that just indexes into the static table
pub fn block_structure(config: SymbolConfig) -> BlockStructure {
    BLOCK_STRUCTURE_TABLE[&config]
}

// alignment pattern center coordinates per row of table E.1 in Annex E,
// indexed by version - 1
static ALIGNMENT_COORDS: [&[usize]; 40] = [
    &[6],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

/// The alignment pattern coordinates of the given version, one row of
/// table E.1 in Annex E of the standard. Used for both axes.
pub fn alignment_coord_list(version: u8) -> &'static [usize] {
    ALIGNMENT_COORDS[(version - 1) as usize]
}

/// Alignment pattern centers of a symbol as (x, y) pairs: the full grid
/// spanned by the coordinate row, minus the three grid corners that sit
/// inside finder patterns.
pub fn alignment_pattern_points(version: u8) -> Vec<(usize, usize)> {
    let coords = alignment_coord_list(version);
    let first = coords[0];
    let last = coords[coords.len() - 1];

    let mut points = Vec::with_capacity(coords.len() * coords.len());
    for &y in coords {
        for &x in coords {
            points.push((x, y));
        }
    }
    // coordinates are strictly increasing, so comparing against the
    // row extremes singles out the UL, UR and DL grid corners
    points.retain(|&(x, y)| {
        !((x == first && y == first) || (x == last && y == first) || (x == first && y == last))
    });
    points
}
