pub mod config;
mod orchestrator;
pub mod output;
mod types;

pub use orchestrator::{register_stacks, register_stacks_reported};
pub use output::{read_transform_json, write_transform_json, TransformDocument};
pub use types::{ProgressReporter, RegistrationOutput, RegistrationStage};
