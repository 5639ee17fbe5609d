//! Point correspondences between two stacks.
//!
//! For every z-plane present in both stacks, tiles present in both are
//! sampled at their local center and mapped to world coordinates in each
//! stack. Row `i` of `acoord` and row `i` of `bcoord` are the same sample
//! seen through stack A and stack B.

use std::collections::{HashMap, HashSet};

use ndarray::{Array2, ArrayView1};
use rayon::ThreadPool;
use tracing::debug;

use crate::error::{FusionError, Result};
use crate::render::{local_to_world_batch, RenderService, SamplePoint, TileSpec};

/// Matched world coordinates of both stacks.
#[derive(Clone, Debug)]
pub struct Correspondences {
    /// N×2 world coordinates in stack A.
    pub acoord: Array2<f64>,
    /// N×2 world coordinates in stack B.
    pub bcoord: Array2<f64>,
    /// `(z, matched tile count)` for every shared z, in processing order.
    pub per_z: Vec<(f64, usize)>,
}

impl Default for Correspondences {
    fn default() -> Self {
        Self {
            acoord: Array2::zeros((0, 2)),
            bcoord: Array2::zeros((0, 2)),
            per_z: Vec::new(),
        }
    }
}

impl Correspondences {
    pub fn len(&self) -> usize {
        self.acoord.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append the pairs resolved at one z.
    pub fn push_z(&mut self, z: f64, a: &[[f64; 2]], b: &[[f64; 2]]) -> Result<()> {
        if a.len() != b.len() {
            return Err(FusionError::PointCountMismatch {
                source_len: b.len(),
                target_len: a.len(),
            });
        }
        for (pa, pb) in a.iter().zip(b) {
            self.acoord.push_row(ArrayView1::from(&pa[..]))?;
            self.bcoord.push_row(ArrayView1::from(&pb[..]))?;
        }
        self.per_z.push((z, a.len()));
        Ok(())
    }
}

/// z-values present in both lists, ascending and without duplicates.
///
/// `-0.0` and `0.0` are the same plane.
pub fn shared_z_values(a: &[f64], b: &[f64]) -> Vec<f64> {
    let in_b: HashSet<u64> = b.iter().map(|&z| plane_key(z).to_bits()).collect();
    let mut shared: Vec<f64> = a
        .iter()
        .map(|&z| plane_key(z))
        .filter(|z| in_b.contains(&z.to_bits()))
        .collect();
    shared.sort_by(f64::total_cmp);
    shared.dedup_by(|x, y| x.to_bits() == y.to_bits());
    shared
}

fn plane_key(z: f64) -> f64 {
    if z == 0.0 {
        0.0
    } else {
        z
    }
}

/// Tiles of stack A whose id also appears in stack B, in stack A's order.
///
/// A tile id listed more than once in stack A keeps the position of its first
/// occurrence and the spec of its last one.
pub fn matched_tiles<'a>(a: &'a [TileSpec], b: &[TileSpec]) -> Vec<&'a TileSpec> {
    let in_b: HashSet<&str> = b.iter().map(|t| t.tile_id.as_str()).collect();
    let latest: HashMap<&str, &'a TileSpec> =
        a.iter().map(|t| (t.tile_id.as_str(), t)).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    a.iter()
        .map(|t| t.tile_id.as_str())
        .filter(|id| in_b.contains(id) && seen.insert(*id))
        .filter_map(|id| latest.get(id).copied())
        .collect()
}

/// One non-visible center sample per tile.
pub fn center_sample_points(tiles: &[&TileSpec]) -> Vec<SamplePoint> {
    tiles.iter().map(|t| SamplePoint::tile_center(t)).collect()
}

/// Fetch z-values of both stacks and collect correspondences over the shared planes.
pub fn collect_correspondences<S>(
    service: &S,
    stack_a: &str,
    stack_b: &str,
    pool: &ThreadPool,
) -> Result<Correspondences>
where
    S: RenderService + ?Sized,
{
    let zs = shared_z_values(&service.z_values(stack_a)?, &service.z_values(stack_b)?);
    collect_at_z_values(service, stack_a, stack_b, &zs, pool, |_| {})
}

/// Collect correspondences over the given z-values.
///
/// `on_z_done` is called with the number of z-planes processed so far.
pub fn collect_at_z_values<S, F>(
    service: &S,
    stack_a: &str,
    stack_b: &str,
    z_values: &[f64],
    pool: &ThreadPool,
    mut on_z_done: F,
) -> Result<Correspondences>
where
    S: RenderService + ?Sized,
    F: FnMut(usize),
{
    let mut correspondences = Correspondences::default();

    for (i, &z) in z_values.iter().enumerate() {
        let a_tiles = service.tile_specs(stack_a, z)?;
        let b_tiles = service.tile_specs(stack_b, z)?;
        let matched = matched_tiles(&a_tiles, &b_tiles);
        debug!("matching {} tiles from z {}", matched.len(), z);

        if !matched.is_empty() {
            // Stack A's tile sizes define the sample for both stacks.
            let samples = center_sample_points(&matched);
            let world_a = local_to_world_batch(service, stack_a, z, &samples, pool)?;
            let world_b = local_to_world_batch(service, stack_b, z, &samples, pool)?;
            correspondences.push_z(z, &world_a, &world_b)?;
        } else {
            correspondences.per_z.push((z, 0));
        }

        on_z_done(i + 1);
    }

    Ok(correspondences)
}
