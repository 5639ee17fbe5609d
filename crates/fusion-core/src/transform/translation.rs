//! Translation-only least-squares fit.
//!
//! The optimal translation is the difference of the two centroids.

use ndarray::{Array2, Axis};

use crate::error::{FusionError, Result};

use super::Transform;

/// Fit `target ≈ source + t`.
pub fn estimate_translation(source: &Array2<f64>, target: &Array2<f64>) -> Result<Transform> {
    let (src_c, tgt_c) = centroids(source, target)?;
    Ok(Transform::translation(
        tgt_c[0] - src_c[0],
        tgt_c[1] - src_c[1],
    ))
}

/// Column means of both point sets.
pub(crate) fn centroids(source: &Array2<f64>, target: &Array2<f64>) -> Result<([f64; 2], [f64; 2])> {
    let mean = |points: &Array2<f64>| {
        points
            .mean_axis(Axis(0))
            .map(|m| [m[0], m[1]])
            .ok_or_else(|| FusionError::Degenerate("empty point set".into()))
    };
    Ok((mean(source)?, mean(target)?))
}
