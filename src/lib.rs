//! Decoding of high-quality Model 2 QR codes.
//!
//! The algorithms in this crate are deliberately unsophisticated and
//! only work for computer generated, undamaged symbols on a clean
//! background, upright or rotated by a multiple of 90 degrees. Version
//! and format fields are BCH-checked (detection only) and the
//! Reed-Solomon parity codewords are discarded, so there is no recovery
//! from damaged modules. Forget about processing photographed codes.

use image::GrayImage;

pub use config::{ECCLevel, SymbolConfig};
pub use error::{DecodeError, SegmentMode};

pub mod binarize;
pub mod bitcoding;
pub mod blocks;
pub mod config;
pub mod datamap;
mod debug;
pub mod error;
pub mod finder;
pub mod format;
pub mod geometry;
pub mod masking;
pub mod tables;

use binarize::BitMatrix;
use finder::FinderTriplet;

/// Decode the single QR symbol contained in the image and return its
/// payload bytes.
///
/// The bytes are handed back as stored in the symbol; interpreting them
/// as text (commonly ISO 8859-1 or UTF-8) is up to the caller.
pub fn decode_qr_code(image: &GrayImage) -> Result<Vec<u8>, DecodeError> {
    let bits = binarize::quantize(image);

    let candidates = finder::find_position_candidates(&bits);
    match candidates.len() {
        0 => return Err(DecodeError::NoFindersFound),
        n @ 1..=2 => return Err(DecodeError::TooFewFinders(n)),
        _ => {}
    }

    let triplets = finder::make_finder_triplets(&candidates);
    if triplets.is_empty() {
        return Err(DecodeError::NoFinderTriplet);
    }

    // Try the triplets in order of decreasing estimated version,
    // keeping the error of the first attempt if all of them fail. Once
    // a codeword sequence has been extracted the symbol has definitely
    // been located, so failures after that point are final.
    let mut first_error = None;
    for triplet in &triplets {
        if cfg!(debug_assertions) && debug::debug_enabled() {
            debug::dump_triplet(triplet);
        }
        let (codewords, version, level) = match extract_symbol(&bits, triplet) {
            Ok(extracted) => extracted,
            Err(err) => {
                if first_error.is_none() {
                    first_error = Some(err);
                }
                continue;
            }
        };
        let data = blocks::deinterleave_data(&codewords, version, level);
        return bitcoding::decode_bitstream(&data, version);
    }

    Err(first_error.unwrap_or(DecodeError::NoFinderTriplet))
}

/// One attempt at the vision half of the pipeline: locate the symbol
/// through the given finder triplet, sample its modules and pull out
/// the raw codeword sequence.
fn extract_symbol(
    bits: &BitMatrix,
    triplet: &FinderTriplet,
) -> Result<(Vec<u8>, u8, ECCLevel), DecodeError> {
    let (transform, version) = geometry::locate_symbol(bits, triplet)?;
    let matrix = geometry::sample_matrix(bits, &transform, version)?;
    if cfg!(debug_assertions) && debug::debug_enabled() {
        debug::dump_matrix(&matrix);
    }
    let (level, mask_ref) = format::extract_format(&matrix)?;
    let codewords = datamap::extract_codewords(&matrix, mask_ref);
    Ok((codewords, version, level))
}
