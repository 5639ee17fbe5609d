use crate::correspondence::Correspondences;
use crate::transform::Transform;

/// Registration stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistrationStage {
    ZValues,
    Correspondences,
    Estimation,
    Writing,
}

impl std::fmt::Display for RegistrationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZValues => write!(f, "Reading z-values"),
            Self::Correspondences => write!(f, "Matching tiles"),
            Self::Estimation => write!(f, "Fitting transform"),
            Self::Writing => write!(f, "Writing output"),
        }
    }
}

/// Result of a registration run.
#[derive(Clone, Debug)]
pub struct RegistrationOutput {
    pub transform: Transform,
    pub correspondences: Correspondences,
    /// RMS distance between mapped stack B points and stack A points.
    pub residual_rms: f64,
}

/// Thread-safe progress reporting for a registration run.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new stage has started. `total_items` is the number of work items
    /// in this stage (e.g., shared z-planes), if known.
    fn begin_stage(&self, _stage: RegistrationStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `register_stacks` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
