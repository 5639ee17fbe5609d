use std::sync::Arc;

use rayon::ThreadPoolBuilder;
use tracing::info;

use crate::correspondence::{collect_at_z_values, shared_z_values};
use crate::error::Result;
use crate::render::RenderService;
use crate::transform::estimate;

use super::config::RegistrationConfig;
use super::output::write_transform_json;
use super::types::{NoOpReporter, ProgressReporter, RegistrationOutput, RegistrationStage};

/// Register `stack_b` onto `stack_a` and write the fitted transform,
/// reporting progress through `reporter`.
pub fn register_stacks_reported(
    config: &RegistrationConfig,
    service: &dyn RenderService,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<RegistrationOutput> {
    config.validate()?;
    let output_path = config.output_path()?;
    let pool = ThreadPoolBuilder::new()
        .num_threads(config.pool_size)
        .build()?;

    info!(
        stack_a = %config.stack_a,
        stack_b = %config.stack_b,
        service = service.name(),
        "Registering stacks"
    );

    reporter.begin_stage(RegistrationStage::ZValues, None);
    let z_a = service.z_values(&config.stack_a)?;
    let z_b = service.z_values(&config.stack_b)?;
    let z_values = shared_z_values(&z_a, &z_b);
    info!(
        stack_a_planes = z_a.len(),
        stack_b_planes = z_b.len(),
        shared = z_values.len(),
        "Shared z-planes"
    );
    reporter.finish_stage();

    reporter.begin_stage(RegistrationStage::Correspondences, Some(z_values.len()));
    let correspondences = collect_at_z_values(
        service,
        &config.stack_a,
        &config.stack_b,
        &z_values,
        &pool,
        |done| reporter.advance(done),
    )?;
    info!(points = correspondences.len(), "Collected correspondences");
    reporter.finish_stage();

    reporter.begin_stage(RegistrationStage::Estimation, None);
    let transform = estimate(
        config.transform_type,
        &correspondences.bcoord,
        &correspondences.acoord,
    )?;
    let residual_rms = transform.rms_residual(&correspondences.bcoord, &correspondences.acoord);
    info!(residual_rms, "transform found: {}", transform);
    reporter.finish_stage();

    reporter.begin_stage(RegistrationStage::Writing, None);
    write_transform_json(output_path, &transform)?;
    info!(path = %output_path.display(), "Transform written");
    reporter.finish_stage();

    Ok(RegistrationOutput {
        transform,
        correspondences,
        residual_rms,
    })
}

/// Register `stack_b` onto `stack_a` and write the fitted transform.
pub fn register_stacks(
    config: &RegistrationConfig,
    service: &dyn RenderService,
) -> Result<RegistrationOutput> {
    register_stacks_reported(config, service, Arc::new(NoOpReporter))
}
