use serde::{Deserialize, Serialize};

use crate::error::{FusionError, Result};

/// Tile metadata as returned by the `tile-specs` endpoint.
///
/// Only the fields needed for sampling are kept; everything else in the
/// service's tile spec (transforms, mipmap levels, ...) is ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSpec {
    pub tile_id: String,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl TileSpec {
    pub fn new(tile_id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            tile_id: tile_id.into(),
            width,
            height,
            z: None,
        }
    }

    /// Tile center in local pixel coordinates, using integer division.
    pub fn local_center(&self) -> [f64; 2] {
        [(self.width / 2.0).floor(), (self.height / 2.0).floor()]
    }
}

/// One local point sent to the `local-to-world-coordinates` endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplePoint {
    pub tile_id: String,
    pub local: [f64; 2],
    pub visible: bool,
}

impl SamplePoint {
    /// Non-visible sample at the center of `tile`.
    pub fn tile_center(tile: &TileSpec) -> Self {
        Self {
            tile_id: tile.tile_id.clone(),
            local: tile.local_center(),
            visible: false,
        }
    }
}

/// One entry of a `local-to-world-coordinates` response.
///
/// The service reports per-point failures in `error` instead of failing
/// the whole batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldCoordinate {
    #[serde(default)]
    pub tile_id: Option<String>,
    #[serde(default)]
    pub world: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WorldCoordinate {
    pub fn new(tile_id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            tile_id: Some(tile_id.into()),
            world: Some(vec![x, y]),
            error: None,
        }
    }

    /// The `(x, y)` world position, or the service's mapping error for `tile_id`.
    pub fn xy(&self, tile_id: &str) -> Result<[f64; 2]> {
        if let Some(ref message) = self.error {
            return Err(FusionError::CoordinateMapping {
                tile_id: tile_id.to_string(),
                message: message.clone(),
            });
        }
        match self.world.as_deref() {
            Some([x, y, ..]) => Ok([*x, *y]),
            _ => Err(FusionError::CoordinateMapping {
                tile_id: tile_id.to_string(),
                message: "response has no world coordinate".into(),
            }),
        }
    }
}
