use std::fmt;

use thiserror::Error;

/// A segment mode indicator this decoder does not handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentMode {
    Eci,
    StructuredAppend,
    Fnc1,
    Kanji,
    Other(u8)
}

impl fmt::Display for SegmentMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SegmentMode::Eci => write!(f, "ECI mode not supported"),
            SegmentMode::StructuredAppend => write!(f, "Structured Append mode not supported"),
            SegmentMode::Fnc1 => write!(f, "FNC1 mode not supported"),
            SegmentMode::Kanji => write!(f, "Kanji mode not supported"),
            SegmentMode::Other(m) => write!(f, "unsupported mode indicator 0x{:x}", m)
        }
    }
}

/// The error type for every way a decode attempt can fail.
///
/// Failures up to and including codeword extraction make the top-level
/// loop retry with the next finder triplet; failures in the bitstream
/// walk are final. See `decode_qr_code`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("no position detection patterns found")]
    NoFindersFound,

    #[error("only {0} position detection patterns found")]
    TooFewFinders(usize),

    #[error("no valid finder pattern found")]
    NoFinderTriplet,

    #[error("data corruption in version information")]
    VersionCorrupt,

    #[error("unsupported QR code version {0}")]
    VersionOutOfRange(i32),

    #[error("data corruption in format bits")]
    FormatCorrupt,

    #[error("module sample outside the image")]
    SampleOutOfImage,

    #[error("unexpected end of bitstream")]
    BitstreamUnderflow,

    #[error("invalid numeric data")]
    InvalidNumeric,

    #[error("invalid alphanumeric data")]
    InvalidAlphanumeric,

    #[error("{0}")]
    UnsupportedMode(SegmentMode),
}
