#[allow(dead_code)]
mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use fusion_core::error::FusionError;
use fusion_core::registration::{
    read_transform_json, register_stacks, register_stacks_reported, ProgressReporter,
    RegistrationStage,
};
use fusion_core::transform::{Transform, TransformType};

use common::{grid_stack, identity, inverse, test_config, FakeRender, FakeStack};

#[test]
fn test_two_tile_rigid_scenario() {
    // Both stacks share z=0 with tiles t1, t2 of 100x50; B is offset by (-20, 10).
    let a = FakeStack::new(identity())
        .with_tile(0.0, "t1", 100.0, 50.0, [0.0, 0.0])
        .with_tile(0.0, "t2", 100.0, 50.0, [90.0, 0.0]);
    let b = FakeStack::new(Transform::translation(-20.0, 10.0))
        .with_tile(0.0, "t1", 100.0, 50.0, [0.0, 0.0])
        .with_tile(0.0, "t2", 100.0, 50.0, [90.0, 0.0]);
    let render = FakeRender::new().with_stack("A", a).with_stack("B", b);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("transform.json");
    let config = test_config(path.clone(), TransformType::Rigid);

    let output = register_stacks(&config, &render).unwrap();
    assert_eq!(output.correspondences.len(), 2);
    assert_eq!(output.correspondences.acoord[[0, 0]], 50.0);
    assert_eq!(output.correspondences.acoord[[0, 1]], 25.0);

    let [tx, ty] = output.transform.translation_components();
    assert_abs_diff_eq!(tx, 20.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ty, -10.0, epsilon = 1e-9);
    assert_abs_diff_eq!(output.transform.rotation_angle(), 0.0, epsilon = 1e-12);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert_eq!(
        json["transform"]["className"],
        "mpicbg.trakem2.transform.RigidModel2D"
    );
    assert_eq!(json["transform"]["type"], "leaf");
}

#[test]
fn test_registration_recovers_rotation_over_many_planes() {
    let truth = Transform::rigid(-0.021, 1500.0, -800.0);
    let render = FakeRender::new()
        .with_stack("A", grid_stack(&[10.0, 11.0, 12.0], 4, 3, identity()))
        .with_stack("B", grid_stack(&[11.0, 12.0, 13.0], 4, 3, inverse(&truth)));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    let config = test_config(path.clone(), TransformType::Rigid);

    let output = register_stacks(&config, &render).unwrap();
    assert_eq!(output.correspondences.len(), 24);
    assert!(output.residual_rms < 1e-6);

    let written = read_transform_json(&path).unwrap();
    assert_eq!(written.transform_type, TransformType::Rigid);
    for r in 0..2 {
        for c in 0..3 {
            assert_abs_diff_eq!(written.matrix[(r, c)], truth.matrix[(r, c)], epsilon = 1e-6);
        }
    }
}

#[test]
fn test_output_overwrites_existing_file() {
    let render = FakeRender::new()
        .with_stack("A", grid_stack(&[0.0], 2, 2, identity()))
        .with_stack("B", grid_stack(&[0.0], 2, 2, Transform::translation(3.0, 4.0)));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    std::fs::write(&path, "stale contents that are much longer than the real output").unwrap();

    let config = test_config(path.clone(), TransformType::Translation);
    register_stacks(&config, &render).unwrap();

    let written = read_transform_json(&path).unwrap();
    assert_abs_diff_eq!(written.translation_components()[0], -3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(written.translation_components()[1], -4.0, epsilon = 1e-9);
}

#[test]
fn test_no_overlap_fails_without_writing() {
    let render = FakeRender::new()
        .with_stack("A", grid_stack(&[0.0], 2, 2, identity()))
        .with_stack("B", grid_stack(&[1.0], 2, 2, identity()));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.json");
    let config = test_config(path.clone(), TransformType::Rigid);

    let err = register_stacks(&config, &render).unwrap_err();
    assert!(matches!(err, FusionError::TooFewPoints { got: 0, .. }));
    assert!(!path.exists());
}

#[test]
fn test_missing_output_directory_propagates_io_error() {
    let render = FakeRender::new()
        .with_stack("A", grid_stack(&[0.0], 2, 2, identity()))
        .with_stack("B", grid_stack(&[0.0], 2, 2, identity()));

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("no_such_dir").join("out.json");
    let config = test_config(path, TransformType::Rigid);

    let err = register_stacks(&config, &render).unwrap_err();
    assert!(matches!(err, FusionError::Io(_)));
}

#[derive(Default)]
struct RecordingReporter {
    stages: Mutex<Vec<(RegistrationStage, Option<usize>)>>,
    advanced: AtomicUsize,
}

impl ProgressReporter for RecordingReporter {
    fn begin_stage(&self, stage: RegistrationStage, total_items: Option<usize>) {
        self.stages.lock().unwrap().push((stage, total_items));
    }

    fn advance(&self, _items_done: usize) {
        self.advanced.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_progress_reports_each_stage() {
    let render = FakeRender::new()
        .with_stack("A", grid_stack(&[0.0, 1.0], 2, 2, identity()))
        .with_stack("B", grid_stack(&[0.0, 1.0], 2, 2, identity()));

    let dir = TempDir::new().unwrap();
    let config = test_config(dir.path().join("out.json"), TransformType::Affine);
    let reporter = Arc::new(RecordingReporter::default());

    register_stacks_reported(&config, &render, reporter.clone()).unwrap();

    let stages = reporter.stages.lock().unwrap().clone();
    assert_eq!(
        stages,
        vec![
            (RegistrationStage::ZValues, None),
            (RegistrationStage::Correspondences, Some(2)),
            (RegistrationStage::Estimation, None),
            (RegistrationStage::Writing, None),
        ]
    );
    assert_eq!(reporter.advanced.load(Ordering::SeqCst), 2);
}

#[test]
fn test_invalid_pool_size_rejected() {
    let render = FakeRender::new();
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path().join("out.json"), TransformType::Rigid);
    config.pool_size = 0;

    let err = register_stacks(&config, &render).unwrap_err();
    assert!(matches!(err, FusionError::Config(_)));
}
