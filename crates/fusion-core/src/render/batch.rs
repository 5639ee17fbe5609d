use rayon::prelude::*;
use rayon::ThreadPool;

use crate::error::{FusionError, Result};

use super::{RenderService, SamplePoint};

/// Resolve local→world for `points`, split into one contiguous chunk per
/// pool thread and requested in parallel.
///
/// Returns the world `(x, y)` of each point, in input order.
pub fn local_to_world_batch<S>(
    service: &S,
    stack: &str,
    z: f64,
    points: &[SamplePoint],
    pool: &ThreadPool,
) -> Result<Vec<[f64; 2]>>
where
    S: RenderService + ?Sized,
{
    if points.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = points.len().div_ceil(pool.current_num_threads().max(1));
    let responses: Vec<Result<_>> = pool.install(|| {
        points
            .par_chunks(chunk_size)
            .map(|chunk| service.local_to_world(stack, z, chunk))
            .collect()
    });

    let mut world = Vec::with_capacity(points.len());
    for (chunk, response) in points.chunks(chunk_size).zip(responses) {
        let coords = response?;
        if coords.len() != chunk.len() {
            return Err(FusionError::CoordinateCount {
                expected: chunk.len(),
                got: coords.len(),
            });
        }
        for (point, coord) in chunk.iter().zip(&coords) {
            world.push(coord.xy(&point.tile_id)?);
        }
    }
    Ok(world)
}
