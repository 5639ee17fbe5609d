//! 2D transform models fitted between stack world coordinates.
//!
//! All models are stored as a 3x3 homogeneous matrix whose last row is
//! `[0, 0, 1]`; the [`TransformType`] records which parameterization was
//! fitted so the model can be written back out in Render's leaf format.

pub mod affine;
mod dispatcher;
pub mod leaf;
pub mod procrustes;
pub mod translation;

use std::fmt;
use std::str::FromStr;

use nalgebra::{Matrix3, Vector3};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::consts::{AFFINE_CLASS, RIGID_CLASS, SIMILARITY_CLASS, TRANSLATION_CLASS};
use crate::error::FusionError;

pub use dispatcher::estimate;
pub use leaf::LeafTransform;

/// Supported transformation models with increasing degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransformType {
    /// Translation only (2 DOF: dx, dy)
    Translation,
    /// Translation + rotation (3 DOF)
    #[default]
    Rigid,
    /// Translation + rotation + uniform scale (4 DOF)
    Similarity,
    /// Full 2x3 linear map (6 DOF)
    Affine,
}

impl TransformType {
    pub const ALL: [TransformType; 4] = [
        TransformType::Translation,
        TransformType::Rigid,
        TransformType::Similarity,
        TransformType::Affine,
    ];

    pub fn degrees_of_freedom(&self) -> usize {
        match self {
            TransformType::Translation => 2,
            TransformType::Rigid => 3,
            TransformType::Similarity => 4,
            TransformType::Affine => 6,
        }
    }

    /// Minimum number of point correspondences needed for a determined fit.
    ///
    /// Each correspondence contributes two equations.
    pub fn min_points(&self) -> usize {
        self.degrees_of_freedom().div_ceil(2)
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            TransformType::Translation => TRANSLATION_CLASS,
            TransformType::Rigid => RIGID_CLASS,
            TransformType::Similarity => SIMILARITY_CLASS,
            TransformType::Affine => AFFINE_CLASS,
        }
    }

    pub fn from_class_name(class_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.class_name() == class_name)
    }
}

impl fmt::Display for TransformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformType::Translation => write!(f, "TRANSLATION"),
            TransformType::Rigid => write!(f, "RIGID"),
            TransformType::Similarity => write!(f, "SIMILARITY"),
            TransformType::Affine => write!(f, "AFFINE"),
        }
    }
}

impl FromStr for TransformType {
    type Err = FusionError;

    /// Case-sensitive match against the configuration names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_string() == s)
            .ok_or_else(|| {
                FusionError::Config(format!(
                    "unknown transform_type {s:?}, expected one of TRANSLATION, RIGID, SIMILARITY, AFFINE"
                ))
            })
    }
}

/// A fitted 2D model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LeafTransform", into = "LeafTransform")]
pub struct Transform {
    pub transform_type: TransformType,
    /// Row-major homogeneous matrix; last row is always `[0, 0, 1]`.
    pub matrix: Matrix3<f64>,
}

impl Transform {
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self {
            transform_type: TransformType::Translation,
            matrix: Matrix3::new(1.0, 0.0, tx, 0.0, 1.0, ty, 0.0, 0.0, 1.0),
        }
    }

    /// Rotation by `theta` radians (counter-clockwise) followed by translation.
    pub fn rigid(theta: f64, tx: f64, ty: f64) -> Self {
        Self {
            transform_type: TransformType::Rigid,
            ..Self::similarity(1.0, theta, tx, ty)
        }
    }

    pub fn similarity(scale: f64, theta: f64, tx: f64, ty: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        let (a, b) = (scale * cos, scale * sin);
        Self {
            transform_type: TransformType::Similarity,
            matrix: Matrix3::new(a, -b, tx, b, a, ty, 0.0, 0.0, 1.0),
        }
    }

    /// Affine model in Render's parameter order: `x' = m00*x + m01*y + b0`,
    /// `y' = m10*x + m11*y + b1`.
    pub fn affine(m00: f64, m10: f64, m01: f64, m11: f64, b0: f64, b1: f64) -> Self {
        Self {
            transform_type: TransformType::Affine,
            matrix: Matrix3::new(m00, m01, b0, m10, m11, b1, 0.0, 0.0, 1.0),
        }
    }

    pub fn apply(&self, point: [f64; 2]) -> [f64; 2] {
        let p = self.matrix * Vector3::new(point[0], point[1], 1.0);
        [p[0], p[1]]
    }

    pub fn translation_components(&self) -> [f64; 2] {
        [self.matrix[(0, 2)], self.matrix[(1, 2)]]
    }

    /// Rotation angle in radians taken from the first column.
    pub fn rotation_angle(&self) -> f64 {
        self.matrix[(1, 0)].atan2(self.matrix[(0, 0)])
    }

    /// Length of the first column; the uniform scale for similarity models.
    pub fn scale_factor(&self) -> f64 {
        self.matrix[(0, 0)].hypot(self.matrix[(1, 0)])
    }

    /// Root-mean-square distance between `self.apply(source[i])` and `target[i]`.
    pub fn rms_residual(&self, source: &Array2<f64>, target: &Array2<f64>) -> f64 {
        let n = source.nrows().min(target.nrows());
        if n == 0 {
            return 0.0;
        }
        let sum_sq: f64 = source
            .outer_iter()
            .zip(target.outer_iter())
            .map(|(p, q)| {
                let mapped = self.apply([p[0], p[1]]);
                (mapped[0] - q[0]).powi(2) + (mapped[1] - q[1]).powi(2)
            })
            .sum();
        (sum_sq / n as f64).sqrt()
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [tx, ty] = self.translation_components();
        let rotation_deg = self.rotation_angle().to_degrees();
        match self.transform_type {
            TransformType::Translation => write!(f, "Translation(dx={tx:.2}, dy={ty:.2})"),
            TransformType::Rigid => {
                write!(f, "Rigid(dx={tx:.2}, dy={ty:.2}, rot={rotation_deg:.3}°)")
            }
            TransformType::Similarity => write!(
                f,
                "Similarity(dx={tx:.2}, dy={ty:.2}, rot={rotation_deg:.3}°, scale={:.4})",
                self.scale_factor()
            ),
            TransformType::Affine => {
                let m = &self.matrix;
                write!(
                    f,
                    "Affine([{:.4} {:.4} {tx:.2}] [{:.4} {:.4} {ty:.2}])",
                    m[(0, 0)],
                    m[(0, 1)],
                    m[(1, 0)],
                    m[(1, 1)]
                )
            }
        }
    }
}
