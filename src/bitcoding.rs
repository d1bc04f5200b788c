/// Decoding of the mode-segmented bitstream carried in the data
/// codewords.

use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader};

use crate::error::{DecodeError, SegmentMode};

type QrBitReader<'a> = BitReader<Cursor<&'a [u8]>, BigEndian>;

// character codes of the alphanumeric mode, index = character value
const ALPHANUM_TABLE: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Number of bits in the character count field for the given mode
/// indicator (numeric, alphanumeric or byte) and symbol version.
pub fn char_count_bits(mode: u32, version: u8) -> u32 {
    if version <= 9 {
        match mode {
            1 => 10,
            2 => 9,
            _ => 8
        }
    } else if version <= 26 {
        match mode {
            1 => 12,
            2 => 11,
            _ => 16
        }
    } else /* version >= 27 && version <= 40 */ {
        match mode {
            1 => 14,
            2 => 13,
            _ => 16
        }
    }
}

/// Bit-level cursor over the data codewords that keeps count of what is
/// left, so reads past the end turn into decode errors.
struct BitCursor<'a> {
    reader: QrBitReader<'a>,
    remaining: u64,
}

impl<'a> BitCursor<'a> {
    fn new(data: &'a [u8]) -> BitCursor<'a> {
        BitCursor {
            reader: BitReader::endian(Cursor::new(data), BigEndian),
            remaining: 8 * data.len() as u64,
        }
    }

    fn take(&mut self, num_bits: u32) -> Result<u32, DecodeError> {
        if self.remaining < num_bits as u64 {
            return Err(DecodeError::BitstreamUnderflow);
        }
        self.remaining -= num_bits as u64;
        self.reader
            .read::<u32>(num_bits)
            .map_err(|_| DecodeError::BitstreamUnderflow)
    }
}

fn decode_numeric_segment(
    stream: &mut BitCursor,
    nchar: u32,
    out: &mut Vec<u8>,
) -> Result<(), DecodeError> {
    // groups of three digits are packed into 10 bits, a trailing pair
    // into 7 and a trailing single digit into 4
    let mut ndone = 0;
    while ndone < nchar {
        let k = (nchar - ndone).min(3);
        let mut value = stream.take(3 * k + 1)?;
        let start = out.len();
        out.resize(start + k as usize, 0);
        if k > 2 {
            out[start + 2] = 0x30 + (value % 10) as u8;
            value /= 10;
        }
        if k > 1 {
            out[start + 1] = 0x30 + (value % 10) as u8;
            value /= 10;
        }
        if value > 9 {
            return Err(DecodeError::InvalidNumeric);
        }
        out[start] = 0x30 + value as u8;
        ndone += k;
    }
    Ok(())
}

fn decode_alphanumeric_segment(
    stream: &mut BitCursor,
    nchar: u32,
    out: &mut Vec<u8>,
) -> Result<(), DecodeError> {
    // pairs of characters are packed base-45 into 11 bits, a trailing
    // single character into 6
    let mut ndone = 0;
    while ndone < nchar {
        let k = (nchar - ndone).min(2);
        let mut value = stream.take(5 * k + 1)?;
        let start = out.len();
        out.resize(start + k as usize, 0);
        if k > 1 {
            out[start + 1] = ALPHANUM_TABLE[(value % 45) as usize];
            value /= 45;
        }
        if value > 44 {
            return Err(DecodeError::InvalidAlphanumeric);
        }
        out[start] = ALPHANUM_TABLE[value as usize];
        ndone += k;
    }
    Ok(())
}

fn decode_byte_segment(
    stream: &mut BitCursor,
    nchar: u32,
    out: &mut Vec<u8>,
) -> Result<(), DecodeError> {
    for _ in 0..nchar {
        out.push(stream.take(8)? as u8);
    }
    Ok(())
}

/// Walk the bitstream segment by segment and collect the payload bytes.
///
/// Decoding stops at a terminator marker or when fewer than four bits
/// remain, which acts as an implicit terminator at the very end of the
/// stream.
pub fn decode_bitstream(data: &[u8], version: u8) -> Result<Vec<u8>, DecodeError> {
    let mut stream = BitCursor::new(data);
    let mut decoded = Vec::new();

    while stream.remaining >= 4 {
        let mode = stream.take(4)?;
        match mode {
            0 => break,     // terminator
            1 | 2 | 4 => {
                let nchar = stream.take(char_count_bits(mode, version))?;
                match mode {
                    1 => decode_numeric_segment(&mut stream, nchar, &mut decoded)?,
                    2 => decode_alphanumeric_segment(&mut stream, nchar, &mut decoded)?,
                    _ => decode_byte_segment(&mut stream, nchar, &mut decoded)?,
                }
            }
            7 => return Err(DecodeError::UnsupportedMode(SegmentMode::Eci)),
            3 => return Err(DecodeError::UnsupportedMode(SegmentMode::StructuredAppend)),
            5 | 9 => return Err(DecodeError::UnsupportedMode(SegmentMode::Fnc1)),
            8 => return Err(DecodeError::UnsupportedMode(SegmentMode::Kanji)),
            m => return Err(DecodeError::UnsupportedMode(SegmentMode::Other(m as u8))),
        }
    }

    Ok(decoded)
}
