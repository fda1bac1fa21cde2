//! Tests for startup and configuration error handling

use live_annotator::color_range::ColorRange;
use live_annotator::config::{CascadeConfig, Config};
use live_annotator::face_detection::FaceDetectionPipeline;
use live_annotator::Error;
use opencv::prelude::MatExprTraitConst;
use std::path::PathBuf;

#[test]
fn test_missing_cascade_model_aborts_startup() {
    let config = CascadeConfig {
        frontal_face: PathBuf::from("definitely/not/a/real/cascade.xml"),
        profile_face: PathBuf::from("definitely/not/a/real/cascade.xml"),
        eye: PathBuf::from("definitely/not/a/real/cascade.xml"),
        ..CascadeConfig::default()
    };

    let result = FaceDetectionPipeline::new(&config);
    assert!(result.is_err(), "a detector role that cannot load must be fatal");
}

#[test]
fn test_garbage_cascade_file_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("bogus_cascade.xml");
    std::fs::write(&bogus, "<not a cascade>").unwrap();

    let config = CascadeConfig {
        frontal_face: bogus.clone(),
        profile_face: bogus.clone(),
        eye: bogus,
        ..CascadeConfig::default()
    };

    assert!(FaceDetectionPipeline::new(&config).is_err());
}

#[test]
fn test_validate_reports_missing_cascade_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.cascades.frontal_face = dir.path().join("missing.xml");
    config.cascades.profile_face = dir.path().join("missing.xml");
    config.cascades.eye = dir.path().join("missing.xml");

    let err = config.validate().unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("cascade model not found"));
}

#[test]
fn test_config_round_trip_through_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");

    let mut config = Config::default();
    config.camera.device = 2;
    config.camera.tick_ms = 50;
    config.segmentation.min_contour_area = 750.0;
    config.display.window_name = "Round Trip".to_string();

    config.to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded.camera.device, 2);
    assert_eq!(loaded.camera.tick_ms, 50);
    assert_eq!(loaded.segmentation.min_contour_area, 750.0);
    assert_eq!(loaded.display.window_name, "Round Trip");
    assert_eq!(loaded.cascades.frontal_face, config.cascades.frontal_face);
}

#[test]
fn test_config_from_missing_file_is_an_io_error() {
    let result = Config::from_file("definitely/not/a/config.yaml");
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_config_from_malformed_yaml_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "camera: [not, a, mapping").unwrap();

    let result = Config::from_file(&path);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_invalid_color_range_error_mentions_the_range() {
    let range = ColorRange::new([200, 0, 0], [10, 255, 255]);
    assert!(!range.is_valid());

    let frame = opencv::core::Mat::zeros(10, 10, opencv::core::CV_8UC3)
        .unwrap()
        .to_mat()
        .unwrap();
    let err = live_annotator::segmentation::segment(&frame, &range, 500.0).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(err.to_string().contains("color range"));
}
