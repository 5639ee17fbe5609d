use ndarray::Array2;
use tracing::debug;

use crate::error::{FusionError, Result};

use super::affine::estimate_affine;
use super::procrustes::{estimate_rigid, estimate_similarity};
use super::translation::estimate_translation;
use super::{Transform, TransformType};

/// Fit a model of the given kind mapping `source` points onto `target` points.
///
/// Both arrays are N×2 with row `i` of `source` corresponding to row `i`
/// of `target`.
pub fn estimate(
    kind: TransformType,
    source: &Array2<f64>,
    target: &Array2<f64>,
) -> Result<Transform> {
    if source.nrows() != target.nrows() {
        return Err(FusionError::PointCountMismatch {
            source_len: source.nrows(),
            target_len: target.nrows(),
        });
    }
    if source.ncols() != 2 || target.ncols() != 2 {
        return Err(FusionError::Degenerate(format!(
            "expected 2D points, got {} and {} columns",
            source.ncols(),
            target.ncols()
        )));
    }

    let needed = kind.min_points();
    if source.nrows() < needed {
        return Err(FusionError::TooFewPoints {
            model: kind.to_string(),
            needed,
            got: source.nrows(),
        });
    }

    debug!(model = %kind, points = source.nrows(), "Estimating transform");
    match kind {
        TransformType::Translation => estimate_translation(source, target),
        TransformType::Rigid => estimate_rigid(source, target),
        TransformType::Similarity => estimate_similarity(source, target),
        TransformType::Affine => estimate_affine(source, target),
    }
}
