/// Diagnostic dumps for chasing decode failures, switched on with the
/// QR_READ_DEBUG environment variable in debug builds.

use crate::binarize::BitMatrix;
use crate::finder::FinderTriplet;

pub(crate) fn debug_enabled() -> bool {
    std::env::var_os("QR_READ_DEBUG").is_some()
}

/// Print the sampled module matrix to stderr, dark modules as 'X'.
pub(crate) fn dump_matrix(matrix: &BitMatrix) {
    for y in 0..matrix.height() {
        let mut line = String::with_capacity(2 * matrix.width());
        for x in 0..matrix.width() {
            line.push(if matrix.get(x, y) != 0 { 'X' } else { '.' });
            line.push(' ');
        }
        eprintln!("  {}", line);
    }
}

pub(crate) fn dump_triplet(triplet: &FinderTriplet) {
    eprintln!(
        "triplet: est={:.2} ul=({:.1},{:.1}) ur=({:.1},{:.1}) dl=({:.1},{:.1})",
        triplet.version_estimate,
        triplet.ul.cx, triplet.ul.cy,
        triplet.ur.cx, triplet.ur.cy,
        triplet.dl.cx, triplet.dl.cy,
    );
}
