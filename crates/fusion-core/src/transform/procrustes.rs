//! Closed-form 2D Procrustes fits for rigid and similarity models.
//!
//! With both point sets centered on their centroids, the rotation that
//! minimizes the squared error is `atan2(Σ p×q, Σ p·q)`. The similarity
//! scale is the projected cross-covariance divided by the source spread.

use nalgebra::Vector2;
use ndarray::Array2;

use crate::consts::MIN_POINT_SPREAD;
use crate::error::{FusionError, Result};

use super::translation::centroids;
use super::Transform;

/// Centered second-moment sums used by both fits.
struct Moments {
    src_centroid: Vector2<f64>,
    tgt_centroid: Vector2<f64>,
    /// Σ p·q over centered points.
    dot: f64,
    /// Σ p×q (z component) over centered points.
    cross: f64,
    /// Σ |p|² over centered source points.
    src_spread: f64,
}

fn moments(source: &Array2<f64>, target: &Array2<f64>) -> Result<Moments> {
    let (sc, tc) = centroids(source, target)?;
    let src_centroid = Vector2::new(sc[0], sc[1]);
    let tgt_centroid = Vector2::new(tc[0], tc[1]);

    let mut dot = 0.0;
    let mut cross = 0.0;
    let mut src_spread = 0.0;
    for (p, q) in source.outer_iter().zip(target.outer_iter()) {
        let p = Vector2::new(p[0], p[1]) - src_centroid;
        let q = Vector2::new(q[0], q[1]) - tgt_centroid;
        dot += p.dot(&q);
        cross += p.perp(&q);
        src_spread += p.norm_squared();
    }

    Ok(Moments {
        src_centroid,
        tgt_centroid,
        dot,
        cross,
        src_spread,
    })
}

/// Translation that maps the rotated, scaled source centroid onto the target centroid.
fn residual_translation(m: &Moments, scale: f64, theta: f64) -> Vector2<f64> {
    let rotated = nalgebra::Rotation2::new(theta) * m.src_centroid;
    m.tgt_centroid - rotated * scale
}

/// Fit rotation + translation.
pub fn estimate_rigid(source: &Array2<f64>, target: &Array2<f64>) -> Result<Transform> {
    let m = moments(source, target)?;
    if m.src_spread < MIN_POINT_SPREAD || m.dot.hypot(m.cross) < MIN_POINT_SPREAD {
        return Err(FusionError::Degenerate(
            "rigid fit needs at least two distinct points".into(),
        ));
    }
    let theta = m.cross.atan2(m.dot);
    let t = residual_translation(&m, 1.0, theta);
    Ok(Transform::rigid(theta, t.x, t.y))
}

/// Fit uniform scale + rotation + translation.
pub fn estimate_similarity(source: &Array2<f64>, target: &Array2<f64>) -> Result<Transform> {
    let m = moments(source, target)?;
    if m.src_spread < MIN_POINT_SPREAD {
        return Err(FusionError::Degenerate(
            "similarity fit needs at least two distinct source points".into(),
        ));
    }
    let theta = m.cross.atan2(m.dot);
    let scale = m.dot.hypot(m.cross) / m.src_spread;
    if scale < MIN_POINT_SPREAD {
        return Err(FusionError::Degenerate(
            "target points collapse to a single location".into(),
        ));
    }
    let t = residual_translation(&m, scale, theta);
    Ok(Transform::similarity(scale, theta, t.x, t.y))
}
