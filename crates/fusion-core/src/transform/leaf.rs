//! Render "leaf" transform JSON encoding.
//!
//! ```json
//! {"type": "leaf", "className": "mpicbg.trakem2.transform.RigidModel2D", "dataString": "0.01 12.5 -3.0"}
//! ```

use serde::{Deserialize, Serialize};

use crate::consts::LEAF_TYPE;
use crate::error::{FusionError, Result};

use super::{Transform, TransformType};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafTransform {
    #[serde(rename = "type")]
    pub kind: String,
    pub class_name: String,
    pub data_string: String,
}

impl Transform {
    /// Space-separated model parameters in Render's order for this class.
    ///
    /// | model       | fields                     |
    /// |-------------|----------------------------|
    /// | translation | `tx ty`                    |
    /// | rigid       | `theta tx ty`              |
    /// | similarity  | `scale theta tx ty`        |
    /// | affine      | `m00 m10 m01 m11 b0 b1`    |
    pub fn data_string(&self) -> String {
        let m = &self.matrix;
        let [tx, ty] = self.translation_components();
        let values = match self.transform_type {
            TransformType::Translation => vec![tx, ty],
            TransformType::Rigid => vec![self.rotation_angle(), tx, ty],
            TransformType::Similarity => {
                vec![self.scale_factor(), self.rotation_angle(), tx, ty]
            }
            TransformType::Affine => vec![
                m[(0, 0)],
                m[(1, 0)],
                m[(0, 1)],
                m[(1, 1)],
                tx,
                ty,
            ],
        };
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn to_leaf(&self) -> LeafTransform {
        LeafTransform {
            kind: LEAF_TYPE.to_string(),
            class_name: self.transform_type.class_name().to_string(),
            data_string: self.data_string(),
        }
    }

    pub fn from_leaf(leaf: &LeafTransform) -> Result<Self> {
        if leaf.kind != LEAF_TYPE {
            return Err(FusionError::InvalidTransform(format!(
                "expected type {LEAF_TYPE:?}, got {:?}",
                leaf.kind
            )));
        }
        let kind = TransformType::from_class_name(&leaf.class_name).ok_or_else(|| {
            FusionError::InvalidTransform(format!("unsupported className {}", leaf.class_name))
        })?;
        let values = parse_data_string(&leaf.data_string)?;

        let expected = match kind {
            TransformType::Translation => 2,
            TransformType::Rigid => 3,
            TransformType::Similarity => 4,
            TransformType::Affine => 6,
        };
        if values.len() != expected {
            return Err(FusionError::InvalidTransform(format!(
                "{} expects {expected} values in dataString, got {}",
                leaf.class_name,
                values.len()
            )));
        }

        Ok(match kind {
            TransformType::Translation => Transform::translation(values[0], values[1]),
            TransformType::Rigid => Transform::rigid(values[0], values[1], values[2]),
            TransformType::Similarity => {
                Transform::similarity(values[0], values[1], values[2], values[3])
            }
            TransformType::Affine => Transform::affine(
                values[0], values[1], values[2], values[3], values[4], values[5],
            ),
        })
    }
}

fn parse_data_string(data: &str) -> Result<Vec<f64>> {
    data.split_whitespace()
        .map(|field| {
            field.parse::<f64>().map_err(|e| {
                FusionError::InvalidTransform(format!("bad dataString value {field:?}: {e}"))
            })
        })
        .collect()
}

impl From<Transform> for LeafTransform {
    fn from(transform: Transform) -> Self {
        transform.to_leaf()
    }
}

impl TryFrom<LeafTransform> for Transform {
    type Error = FusionError;

    fn try_from(leaf: LeafTransform) -> Result<Self> {
        Transform::from_leaf(&leaf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_data_string() {
        let t = Transform::translation(1.5, -2.0);
        assert_eq!(t.data_string(), "1.5 -2");
    }

    #[test]
    fn rejects_wrong_field_count() {
        let leaf = LeafTransform {
            kind: "leaf".into(),
            class_name: crate::consts::RIGID_CLASS.into(),
            data_string: "0.1 2.0".into(),
        };
        assert!(Transform::from_leaf(&leaf).is_err());
    }

    #[test]
    fn rejects_unknown_class() {
        let leaf = LeafTransform {
            kind: "leaf".into(),
            class_name: "mpicbg.trakem2.transform.PolynomialTransform2D".into(),
            data_string: "1 2".into(),
        };
        assert!(Transform::from_leaf(&leaf).is_err());
    }
}
