/// Reconstruction of the per-block data streams from the interleaved
/// codeword sequence.

use crate::config::{ECCLevel, SymbolConfig};
use crate::tables::{block_structure, total_codewords};

/// Undo the block interleaving and concatenate the data codewords of
/// every block in block order.
///
/// The error correction codewords are discarded: this decoder performs
/// no Reed-Solomon correction and relies on the symbol being rendered
/// undamaged. The codeword count is fixed by the version table, so a
/// length mismatch here is a bug upstream, not an input condition.
pub fn deinterleave_data(codewords: &[u8], version: u8, level: ECCLevel) -> Vec<u8> {
    let n_codewords = total_codewords(version) as usize;
    let structure = block_structure(SymbolConfig::new(version, level));
    let n_check_words = structure.check_words as usize;
    let n_blocks = structure.blocks as usize;

    // holds as long as extract_codewords reads through the full data
    // module map; a short sequence here is decoder-internal corruption
    assert_eq!(codewords.len(), n_codewords);
    assert_eq!(n_check_words % n_blocks, 0);

    let n_data_words = n_codewords - n_check_words;
    let n_data_words_per_block = n_data_words / n_blocks;
    let n_long_blocks = n_data_words % n_blocks;

    let mut data = Vec::with_capacity(n_data_words);
    for i in 0..n_blocks {
        for r in 0..n_data_words_per_block {
            data.push(codewords[i + r * n_blocks]);
        }
        // the extra codeword of each long block sits in a contiguous
        // run right after the evenly interleaved region
        if i >= n_blocks - n_long_blocks {
            data.push(codewords[n_data_words - n_blocks + i]);
        }
    }
    data
}
