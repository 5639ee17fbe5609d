use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use fusion_core::error::{FusionError, Result};
use fusion_core::registration::config::{RegistrationConfig, RenderConnection};
use fusion_core::render::{RenderService, SamplePoint, TileSpec, WorldCoordinate};
use fusion_core::transform::{Transform, TransformType};

/// One tile of a fake stack: its spec plus its origin in stack-local space.
#[derive(Clone, Debug)]
pub struct FakeTile {
    pub spec: TileSpec,
    pub origin: [f64; 2],
}

/// A stack whose world coordinates are `placement(origin + local)`.
#[derive(Clone, Debug)]
pub struct FakeStack {
    pub z_values: Vec<f64>,
    pub tiles: HashMap<u64, Vec<FakeTile>>,
    pub placement: Transform,
}

impl FakeStack {
    pub fn new(placement: Transform) -> Self {
        Self {
            z_values: Vec::new(),
            tiles: HashMap::new(),
            placement,
        }
    }

    /// Add a `width`×`height` tile at `origin` on plane `z`.
    pub fn with_tile(mut self, z: f64, tile_id: &str, width: f64, height: f64, origin: [f64; 2]) -> Self {
        if !self.z_values.iter().any(|v| *v == z) {
            self.z_values.push(z);
        }
        self.tiles.entry(z.to_bits()).or_default().push(FakeTile {
            spec: TileSpec {
                z: Some(z),
                ..TileSpec::new(tile_id, width, height)
            },
            origin,
        });
        self
    }

    /// Declare a z-plane without any tiles on it.
    pub fn with_empty_z(mut self, z: f64) -> Self {
        self.z_values.push(z);
        self
    }
}

/// In-memory stand-in for the Render web service.
#[derive(Default)]
pub struct FakeRender {
    pub stacks: HashMap<String, FakeStack>,
    /// Tiles whose coordinate mapping reports an error.
    pub failing_tiles: HashSet<String>,
    /// Answer every coordinate request with one item too few.
    pub drop_last_response: bool,
    pub coordinate_requests: AtomicUsize,
}

impl FakeRender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stack(mut self, name: &str, stack: FakeStack) -> Self {
        self.stacks.insert(name.to_string(), stack);
        self
    }

    pub fn coordinate_requests(&self) -> usize {
        self.coordinate_requests.load(Ordering::SeqCst)
    }

    fn stack(&self, name: &str) -> Result<&FakeStack> {
        self.stacks.get(name).ok_or_else(|| FusionError::Service {
            status: 404,
            url: format!("fake://stack/{name}"),
            body: format!("stack {name} not found"),
        })
    }
}

impl RenderService for FakeRender {
    fn name(&self) -> &str {
        "fake"
    }

    fn z_values(&self, stack: &str) -> Result<Vec<f64>> {
        Ok(self.stack(stack)?.z_values.clone())
    }

    fn tile_specs(&self, stack: &str, z: f64) -> Result<Vec<TileSpec>> {
        Ok(self
            .stack(stack)?
            .tiles
            .get(&z.to_bits())
            .map(|tiles| tiles.iter().map(|t| t.spec.clone()).collect())
            .unwrap_or_default())
    }

    fn local_to_world(
        &self,
        stack: &str,
        z: f64,
        points: &[SamplePoint],
    ) -> Result<Vec<WorldCoordinate>> {
        self.coordinate_requests.fetch_add(1, Ordering::SeqCst);
        let fake = self.stack(stack)?;
        let tiles = fake.tiles.get(&z.to_bits());
        let mut coords: Vec<WorldCoordinate> = points
            .iter()
            .map(|p| {
                let tile = tiles.and_then(|ts| ts.iter().find(|t| t.spec.tile_id == p.tile_id));
                match tile {
                    Some(t) if !self.failing_tiles.contains(&p.tile_id) => {
                        let [x, y] = fake
                            .placement
                            .apply([t.origin[0] + p.local[0], t.origin[1] + p.local[1]]);
                        WorldCoordinate::new(&p.tile_id, x, y)
                    }
                    _ => WorldCoordinate {
                        tile_id: Some(p.tile_id.clone()),
                        world: None,
                        error: Some(format!("tile {} cannot be mapped", p.tile_id)),
                    },
                }
            })
            .collect();
        if self.drop_last_response {
            coords.pop();
        }
        Ok(coords)
    }
}

pub fn identity() -> Transform {
    Transform::translation(0.0, 0.0)
}

/// Inverse of `t`, keeping its model kind.
pub fn inverse(t: &Transform) -> Transform {
    Transform {
        transform_type: t.transform_type,
        matrix: t.matrix.try_inverse().expect("invertible transform"),
    }
}

/// Stack with a `cols`×`rows` grid of 100×50 tiles on each of `zs`.
pub fn grid_stack(zs: &[f64], cols: usize, rows: usize, placement: Transform) -> FakeStack {
    let mut stack = FakeStack::new(placement);
    for &z in zs {
        for r in 0..rows {
            for c in 0..cols {
                stack = stack.with_tile(
                    z,
                    &format!("{z}.{r}.{c}"),
                    100.0,
                    50.0,
                    [c as f64 * 90.0, r as f64 * 45.0],
                );
            }
        }
    }
    stack
}

pub fn test_config(output: PathBuf, transform_type: TransformType) -> RegistrationConfig {
    RegistrationConfig {
        render: RenderConnection {
            host: "localhost".into(),
            port: Some(8080),
            owner: "testuser".into(),
            project: "test".into(),
            client_scripts: None,
        },
        stack_a: "A".into(),
        stack_b: "B".into(),
        transform_type,
        pool_size: 2,
        output_json: Some(output),
    }
}

pub fn thread_pool(threads: usize) -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("thread pool")
}
