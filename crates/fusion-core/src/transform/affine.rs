//! Full affine least-squares fit.
//!
//! Solves `[x y 1] · P = [x' y']` for the 3x2 parameter matrix `P` via SVD.
//! Points are centered first so the design matrix stays well conditioned
//! for large world coordinates.

use nalgebra::DMatrix;
use ndarray::Array2;

use crate::consts::RANK_TOLERANCE;
use crate::error::{FusionError, Result};

use super::translation::centroids;
use super::Transform;

pub fn estimate_affine(source: &Array2<f64>, target: &Array2<f64>) -> Result<Transform> {
    let n = source.nrows();
    let (sc, tc) = centroids(source, target)?;

    let mut design = DMatrix::zeros(n, 3);
    let mut rhs = DMatrix::zeros(n, 2);
    for (i, (p, q)) in source.outer_iter().zip(target.outer_iter()).enumerate() {
        design[(i, 0)] = p[0] - sc[0];
        design[(i, 1)] = p[1] - sc[1];
        design[(i, 2)] = 1.0;
        rhs[(i, 0)] = q[0] - tc[0];
        rhs[(i, 1)] = q[1] - tc[1];
    }

    let svd = design.svd(true, true);
    let eps = RANK_TOLERANCE * svd.singular_values.max();
    if svd.rank(eps) < 3 {
        return Err(FusionError::Degenerate(
            "affine fit needs at least three non-collinear points".into(),
        ));
    }
    let params = svd
        .solve(&rhs, eps)
        .map_err(|e| FusionError::Degenerate(format!("affine solve failed: {e}")))?;

    let (m00, m01, m10, m11) = (
        params[(0, 0)],
        params[(1, 0)],
        params[(0, 1)],
        params[(1, 1)],
    );
    // Undo centering: b = tc + c - M·sc, where c is the fitted centered offset.
    let b0 = tc[0] + params[(2, 0)] - (m00 * sc[0] + m01 * sc[1]);
    let b1 = tc[1] + params[(2, 1)] - (m10 * sc[0] + m11 * sc[1]);

    Ok(Transform::affine(m00, m10, m01, m11, b0, b1))
}
