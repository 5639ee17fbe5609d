//! Access to the Render web service.
//!
//! [`RenderService`] is the seam between the registration logic and the
//! remote service: [`client::RenderClient`] implements it over HTTP, and
//! tests substitute an in-memory implementation.

mod batch;
pub mod client;
pub mod types;

use crate::error::Result;

pub use batch::local_to_world_batch;
pub use client::RenderClient;
pub use types::{SamplePoint, TileSpec, WorldCoordinate};

/// The three Render calls the registration consumes.
pub trait RenderService: Send + Sync {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// All z-values present in `stack`.
    fn z_values(&self, stack: &str) -> Result<Vec<f64>>;

    /// Tile specs of `stack` at `z`.
    fn tile_specs(&self, stack: &str, z: f64) -> Result<Vec<TileSpec>>;

    /// Map local tile coordinates to world coordinates in `stack` at `z`.
    ///
    /// Returns one entry per input point, in order.
    fn local_to_world(
        &self,
        stack: &str,
        z: f64,
        points: &[SamplePoint],
    ) -> Result<Vec<WorldCoordinate>>;
}
