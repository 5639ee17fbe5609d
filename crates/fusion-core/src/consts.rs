/// Path prefix of the Render web service REST API.
pub const RENDER_API_PREFIX: &str = "render-ws/v1";

/// Per-request timeout for calls to the Render web service.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Default worker-pool size for local-to-world coordinate batches.
pub const DEFAULT_POOL_SIZE: usize = 1;

/// Singular values below this (relative to the largest) count as zero
/// when checking the rank of the affine design matrix.
pub const RANK_TOLERANCE: f64 = 1e-10;

/// Spread (sum of squared centered distances) below which a point set is
/// treated as collapsed onto a single location.
pub const MIN_POINT_SPREAD: f64 = 1e-12;

/// Render class name for a 2D translation model.
pub const TRANSLATION_CLASS: &str = "mpicbg.trakem2.transform.TranslationModel2D";

/// Render class name for a 2D rigid model.
pub const RIGID_CLASS: &str = "mpicbg.trakem2.transform.RigidModel2D";

/// Render class name for a 2D similarity model.
pub const SIMILARITY_CLASS: &str = "mpicbg.trakem2.transform.SimilarityModel2D";

/// Render class name for a 2D affine model.
pub const AFFINE_CLASS: &str = "mpicbg.trakem2.transform.AffineModel2D";

/// `type` tag of a single (non-list) transform in Render JSON.
pub const LEAF_TYPE: &str = "leaf";
