//! Reference encoder backing the end-to-end tests: renders Model 2 QR
//! symbols for the decoder to chew on. The Reed-Solomon parity region
//! is left zeroed because the decoder discards it without correction;
//! everything else (function patterns, BCH-protected format and version
//! fields, masking, interleaving) is produced per the standard.

use bitstream_io::{BigEndian, BitWrite, BitWriter};
use image::GrayImage;

use qr_read::binarize::BitMatrix;
use qr_read::bitcoding::char_count_bits;
use qr_read::config::SymbolConfig;
use qr_read::datamap::{data_module_positions, function_pattern_mask};
use qr_read::masking::masking_function;
use qr_read::tables::{alignment_pattern_points, block_structure, qr_size, total_codewords};

type QrBitWriter = BitWriter<Vec<u8>, BigEndian>;

// complete format words (mask applied) from table C.1 of the standard,
// indexed by (ecc bits << 3) | mask reference
const FORMAT_INFOS_QR: [u16; 32] = [
    0x5412, 0x5125, 0x5e7c, 0x5b4b, 0x45f9, 0x40ce, 0x4f97, 0x4aa0, 0x77c4, 0x72f3, 0x7daa,
    0x789d, 0x662f, 0x6318, 0x6c41, 0x6976, 0x1689, 0x13be, 0x1ce7, 0x19d0, 0x0762, 0x0255,
    0x0d0c, 0x083b, 0x355f, 0x3068, 0x3f31, 0x3a06, 0x24b4, 0x2183, 0x2eda, 0x2bed,
];

// complete version words for versions 7 through 40
static VERSION_INFOS: [u32; 34] = [
    0x07c94, 0x085bc, 0x09a99, 0x0a4d3, 0x0bbf6, 0x0c762, 0x0d847, 0x0e60d, 0x0f928, 0x10b78,
    0x1145d, 0x12a17, 0x13532, 0x149a6, 0x15683, 0x168c9, 0x177ec, 0x18ec4, 0x191e1, 0x1afab,
    0x1b08e, 0x1cc1a, 0x1d33f, 0x1ed75, 0x1f250, 0x209d5, 0x216f0, 0x228ba, 0x2379f, 0x24b0b,
    0x2542e, 0x26a64, 0x27541, 0x28c69,
];

/// A data segment to place in the symbol.
pub enum Segment<'a> {
    Numeric(&'a str),
    Alphanumeric(&'a str),
    Bytes(&'a [u8]),
}

impl Segment<'_> {
    /// The bytes the decoder is expected to reproduce for this segment.
    pub fn payload_bytes(&self) -> Vec<u8> {
        match self {
            Segment::Numeric(text) => text.as_bytes().to_vec(),
            Segment::Alphanumeric(text) => text.as_bytes().to_vec(),
            Segment::Bytes(data) => data.to_vec(),
        }
    }

    fn mode_indicator(&self) -> u32 {
        match self {
            Segment::Numeric(_) => 0b0001,
            Segment::Alphanumeric(_) => 0b0010,
            Segment::Bytes(_) => 0b0100,
        }
    }

    fn char_count(&self) -> u32 {
        match self {
            Segment::Numeric(text) => text.len() as u32,
            Segment::Alphanumeric(text) => text.len() as u32,
            Segment::Bytes(data) => data.len() as u32,
        }
    }

    fn payload_bits(&self) -> usize {
        match self {
            Segment::Numeric(text) => {
                let n = text.len();
                n / 3 * 10 + [0, 4, 7][n % 3]
            }
            Segment::Alphanumeric(text) => {
                let n = text.len();
                n / 2 * 11 + n % 2 * 6
            }
            Segment::Bytes(data) => 8 * data.len(),
        }
    }
}

/// The concatenation of the payloads of several segments, i.e. the
/// expected decoder output.
pub fn expected_payload(segments: &[Segment]) -> Vec<u8> {
    segments.iter().flat_map(|s| s.payload_bytes()).collect()
}

fn map_alphanumeric(in_char: u8) -> u32 {
    match in_char {
        0x30..=0x39 => (in_char - 0x30) as u32, // a digit in [0-9] maps to that value
        0x41..=0x5A => (in_char - 0x37) as u32, // capital letters in [A-Z] map to the next 26 values
        0x20 => 36, // space
        0x24 => 37, // dollar $
        0x25 => 38, // percent %
        0x2A => 39, // asterisk *
        0x2B => 40, // plus +
        0x2D => 41, // minus -
        0x2E => 42, // period .
        0x2F => 43, // slash /
        0x3A => 44, // colon :
        _ => panic!("Invalid char for alphanumeric mode!")
    }
}

fn write_numeric_data(stream: &mut QrBitWriter, input: &[u8]) {
    // groups of three digits become a number below 1000 in 10 bits
    let mut i = 0;
    let mut cur_code = 0u32;
    for &l in input {
        assert!(l >= 0x30 && l <= 0x39);
        cur_code = cur_code * 10 + (l - 0x30) as u32;
        i += 1;
        if i == 3 {
            stream.write(10, cur_code).unwrap();
            i = 0;
            cur_code = 0;
        }
    }
    // potentially encode the last incomplete group
    if i == 1 {
        stream.write(4, cur_code).unwrap();
    } else if i == 2 {
        stream.write(7, cur_code).unwrap();
    }
}

fn write_alphanumeric_data(stream: &mut QrBitWriter, input: &[u8]) {
    // pairs of characters become a base-45 number in 11 bits
    let mut i = 0;
    let mut cur_code = 0u32;
    for &l in input {
        cur_code = cur_code * 45 + map_alphanumeric(l);
        i += 1;
        if i == 2 {
            stream.write(11, cur_code).unwrap();
            i = 0;
            cur_code = 0;
        }
    }
    // a remaining single char takes 6 bits
    if i == 1 {
        stream.write(6, cur_code).unwrap();
    }
}

fn write_byte_data(stream: &mut QrBitWriter, input: &[u8]) {
    for &l in input {
        stream.write(8, l as u32).unwrap();
    }
}

/// Encode the segments into the data codeword region of the symbol:
/// mode headers, payloads, terminator, bit padding and the alternating
/// pad codewords.
pub fn build_data_codewords(segments: &[Segment], config: SymbolConfig) -> Vec<u8> {
    let version = config.version();
    let n_total = total_codewords(version) as usize;
    let n_check = block_structure(config).check_words as usize;
    let n_data = n_total - n_check;
    let capacity_bits = 8 * n_data;

    let mut writer: QrBitWriter = BitWriter::endian(Vec::new(), BigEndian);
    let mut used_bits = 0usize;
    for segment in segments {
        let mode = segment.mode_indicator();
        writer.write(4, mode).unwrap();
        writer
            .write(char_count_bits(mode, version), segment.char_count())
            .unwrap();
        match segment {
            Segment::Numeric(text) => write_numeric_data(&mut writer, text.as_bytes()),
            Segment::Alphanumeric(text) => write_alphanumeric_data(&mut writer, text.as_bytes()),
            Segment::Bytes(data) => write_byte_data(&mut writer, data),
        }
        used_bits += 4 + char_count_bits(mode, version) as usize + segment.payload_bits();
    }
    assert!(used_bits <= capacity_bits, "payload does not fit the symbol");

    // terminator, shortened when the stream is nearly full
    let terminator = (capacity_bits - used_bits).min(4);
    if terminator > 0 {
        writer.write(terminator as u32, 0u32).unwrap();
        used_bits += terminator;
    }
    // pad to a codeword boundary
    let fill = (8 - used_bits % 8) % 8;
    if fill > 0 {
        writer.write(fill as u32, 0u32).unwrap();
    }

    let mut data = writer.into_writer();
    // alternating pad codewords up to the data capacity
    let pads = [0xecu8, 0x11];
    let mut k = 0;
    while data.len() < n_data {
        data.push(pads[k % 2]);
        k += 1;
    }
    data
}

/// Interleave the data codewords into placement order and append the
/// (zeroed) parity region.
pub fn interleave_codewords(data: &[u8], config: SymbolConfig) -> Vec<u8> {
    let n_total = total_codewords(config.version()) as usize;
    let structure = block_structure(config);
    let n_blocks = structure.blocks as usize;
    let n_data = n_total - structure.check_words as usize;
    assert_eq!(data.len(), n_data);

    let base = n_data / n_blocks;
    let n_long = n_data % n_blocks;

    // split into blocks; the longer blocks come last
    let mut blocks: Vec<&[u8]> = Vec::with_capacity(n_blocks);
    let mut offset = 0;
    for i in 0..n_blocks {
        let len = if i >= n_blocks - n_long { base + 1 } else { base };
        blocks.push(&data[offset..offset + len]);
        offset += len;
    }

    let mut out = Vec::with_capacity(n_total);
    for r in 0..base + 1 {
        for block in &blocks {
            if r < block.len() {
                out.push(block[r]);
            }
        }
    }
    out.resize(n_total, 0);
    out
}

fn place_function_patterns(matrix: &mut BitMatrix, version: u8) {
    let qrsize = qr_size(version) as i32;

    // finder patterns with their separators
    for &(fx, fy) in &[(0i32, 0i32), (qrsize - 7, 0), (0, qrsize - 7)] {
        for dy in -1..8 {
            for dx in -1..8 {
                let x = fx + dx;
                let y = fy + dy;
                if x < 0 || y < 0 || x >= qrsize || y >= qrsize {
                    continue;
                }
                let r = (dx - 3).abs().max((dy - 3).abs());
                let dark = r < 2 || r == 3;
                matrix.set(x as usize, y as usize, dark as u8);
            }
        }
    }

    // timing patterns
    for k in 8..qrsize as usize - 8 {
        let val = (k % 2 == 0) as u8;
        matrix.set(k, 6, val);
        matrix.set(6, k, val);
    }

    // alignment patterns
    for (ax, ay) in alignment_pattern_points(version) {
        for dy in -2i32..=2 {
            for dx in -2i32..=2 {
                let r = dx.abs().max(dy.abs());
                matrix.set(
                    (ax as i32 + dx) as usize,
                    (ay as i32 + dy) as usize,
                    (r != 1) as u8,
                );
            }
        }
    }
}

fn place_format(matrix: &mut BitMatrix, config: SymbolConfig, mask_ref: u8) {
    let qrsize = qr_size(config.version());
    let index = ((config.level().format_bits() << 3) | mask_ref) as usize;
    let word = FORMAT_INFOS_QR[index] as u32;

    // first copy beside the upper-left finder, least significant bit
    // at the top of column 8
    const MAIN: [(usize, usize); 15] = [
        (8, 0), (8, 1), (8, 2), (8, 3), (8, 4), (8, 5), (8, 7), (8, 8),
        (7, 8), (5, 8), (4, 8), (3, 8), (2, 8), (1, 8), (0, 8),
    ];
    for (k, &(x, y)) in MAIN.iter().enumerate() {
        matrix.set(x, y, ((word >> k) & 1) as u8);
    }
    // second copy split between the other two finders
    for k in 0..8 {
        matrix.set(qrsize - 1 - k, 8, ((word >> k) & 1) as u8);
    }
    for k in 8..15 {
        matrix.set(8, qrsize - 15 + k, ((word >> k) & 1) as u8);
    }
    // the dark module above the lower-left finder
    matrix.set(8, qrsize - 8, 1);
}

fn place_version(matrix: &mut BitMatrix, version: u8) {
    if version < 7 {
        return;
    }
    let qrsize = qr_size(version);
    let word = VERSION_INFOS[(version - 7) as usize];
    for i in 0..18usize {
        let bit = ((word >> i) & 1) as u8;
        matrix.set(qrsize - 11 + i % 3, i / 3, bit);
        matrix.set(i / 3, qrsize - 11 + i % 3, bit);
    }
}

fn place_data(matrix: &mut BitMatrix, version: u8, mask_ref: u8, codewords: &[u8]) {
    let qrsize = qr_size(version);
    let func_mask = function_pattern_mask(version);
    let mask = masking_function(mask_ref);

    // remainder modules carry no data and are zero before masking
    for y in 0..qrsize {
        for x in 0..qrsize {
            if func_mask.get(x, y) == 0 {
                matrix.set(x, y, mask(y, x) as u8);
            }
        }
    }

    let positions = data_module_positions(version);
    assert_eq!(positions.len(), 8 * codewords.len());
    for (k, (x, y)) in positions.into_iter().enumerate() {
        let bit = (codewords[k / 8] >> (7 - k % 8)) & 1;
        matrix.set(x, y, bit ^ mask(y, x) as u8);
    }
}

/// Assemble the module matrix of a symbol holding the given segments.
pub fn encode_matrix(segments: &[Segment], config: SymbolConfig, mask_ref: u8) -> BitMatrix {
    let version = config.version();
    let data = build_data_codewords(segments, config);
    let codewords = interleave_codewords(&data, config);

    let qrsize = qr_size(version);
    let mut matrix = BitMatrix::new(qrsize, qrsize);
    place_function_patterns(&mut matrix, version);
    place_data(&mut matrix, version, mask_ref, &codewords);
    place_format(&mut matrix, config, mask_ref);
    place_version(&mut matrix, version);
    matrix
}

/// Render a module matrix into a grayscale image at the given scale,
/// with the standard 4-module quiet zone on every side.
pub fn render(matrix: &BitMatrix, scale: u32) -> GrayImage {
    let quiet = 4i32;
    let size = (matrix.width() as u32 + 2 * quiet as u32) * scale;
    GrayImage::from_fn(size, size, |px, py| {
        let mx = (px / scale) as i32 - quiet;
        let my = (py / scale) as i32 - quiet;
        let dark = mx >= 0
            && my >= 0
            && (mx as usize) < matrix.width()
            && (my as usize) < matrix.height()
            && matrix.get(mx as usize, my as usize) != 0;
        image::Luma([if dark { 0u8 } else { 255u8 }])
    })
}

/// Encode and render in one go.
pub fn encode_symbol(
    segments: &[Segment],
    config: SymbolConfig,
    mask_ref: u8,
    scale: u32,
) -> GrayImage {
    render(&encode_matrix(segments, config, mask_ref), scale)
}
