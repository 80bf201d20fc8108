use std::path::Path;

use cropscan::error::{ArtifactKind, ArtifactLoadCause};
use cropscan::pipeline::PIPELINE_FILE;
use cropscan::{Error, FeatureConfig, PipelineConfig, Predictor};
use image::{DynamicImage, GrayImage, Luma};
use serde_json::{json, Value};

/// 16×16 inputs give a single 2×2-cell block: 36 features.
const N: usize = 36;

fn small_features() -> FeatureConfig {
    FeatureConfig { width: 16, height: 16, ..FeatureConfig::default() }
}

fn zeros(rows: usize, cols: usize) -> Value {
    json!({ "rows": rows, "cols": cols, "data": vec![vec![0.0; cols]; rows] })
}

fn write_dir(dir: &Path, classifier: Value, classes: &[&str], scaler: Value) {
    std::fs::write(dir.join("best_model.json"), classifier.to_string()).unwrap();
    std::fs::write(dir.join("labels.json"), json!({ "classes": classes }).to_string()).unwrap();
    std::fs::write(dir.join("scaler.json"), scaler.to_string()).unwrap();
    small_features().save_json(&dir.join(PIPELINE_FILE)).unwrap();
}

fn standard() -> Value {
    json!({ "kind": "standard", "mean": vec![0.0; N], "scale": vec![1.0; N] })
}

fn load(dir: &Path) -> cropscan::Result<Predictor> {
    Predictor::load(&PipelineConfig::from_model_dir(dir)?)
}

/// Flat image: every feature is zero, so the decision rests on biases alone.
fn flat() -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_pixel(40, 40, Luma([77])))
}

#[test]
fn pipeline_file_sets_the_feature_length() {
    let dir = tempfile::tempdir().unwrap();
    let linear = json!({ "kind": "linear", "coef": zeros(1, N), "intercept": [1.0] });
    write_dir(dir.path(), linear, &["Healthy", "Hispa"], standard());
    let p = load(dir.path()).unwrap();
    assert_eq!(p.extractor().feature_len(), N);
    assert_eq!(p.predict_image(&flat()).unwrap().as_str(), "hispa");
}

#[test]
fn svc_artifact_votes_one_vs_one() {
    let dir = tempfile::tempdir().unwrap();
    let svc = json!({
        "kind": "svc",
        "kernel": { "type": "linear" },
        "support_vectors": zeros(3, N),
        "n_support": [1, 1, 1],
        "dual_coef": zeros(2, 3),
        // (0,1) -> 1, (0,2) -> 2, (1,2) -> 1
        "intercept": [-1.0, -1.0, 1.0],
    });
    let min_max = json!({ "kind": "min_max", "scale": vec![2.0; N], "min": vec![0.0; N] });
    write_dir(dir.path(), svc, &["Brown_Spot", "Leaf_Blast", "Hispa"], min_max);
    let p = load(dir.path()).unwrap();
    assert_eq!(p.predict_image(&flat()).unwrap().as_str(), "leaf_blast");
}

#[test]
fn forest_artifact_walks_its_trees() {
    let dir = tempfile::tempdir().unwrap();
    let forest = json!({
        "kind": "forest",
        "n_features": N,
        "n_classes": 2,
        "trees": [{
            "children_left":  [1, -1, -1],
            "children_right": [2, -1, -1],
            "feature":   [0, -2, -2],
            "threshold": [0.0, -2.0, -2.0],
            "value": [[5.0, 5.0], [0.0, 5.0], [5.0, 0.0]],
        }],
    });
    write_dir(dir.path(), forest, &["Healthy", "Black_Rot"], standard());
    let p = load(dir.path()).unwrap();
    assert_eq!(p.predict_image(&flat()).unwrap().as_str(), "black_rot");
}

#[test]
fn mlp_artifact_runs_its_layers() {
    let dir = tempfile::tempdir().unwrap();
    let mlp = json!({
        "kind": "mlp",
        "layers": [
            { "weights": zeros(N, 4), "biases": [0.0, 0.0, 0.0, 0.0], "activation": "ReLU" },
            { "weights": zeros(4, 3), "biases": [0.1, 0.3, 0.2], "activation": "Softmax" },
        ],
    });
    write_dir(dir.path(), mlp, &["Early_Blight", "Late_Blight", "Healthy"], standard());
    let p = load(dir.path()).unwrap();
    assert_eq!(p.predict_image(&flat()).unwrap().as_str(), "late_blight");
}

#[test]
fn unknown_classifier_kind_is_a_parse_failure() {
    let dir = tempfile::tempdir().unwrap();
    write_dir(dir.path(), json!({ "kind": "xgboost", "booster": "gbtree" }), &["A", "B"], standard());
    match load(dir.path()) {
        Err(Error::ArtifactLoad { kind: ArtifactKind::Classifier, source: ArtifactLoadCause::Parse(_), .. }) => {}
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }
}

#[test]
fn mlp_with_broken_layer_chain_is_invalid() {
    let dir = tempfile::tempdir().unwrap();
    let mlp = json!({
        "kind": "mlp",
        "layers": [
            { "weights": zeros(N, 4), "biases": [0.0, 0.0, 0.0, 0.0], "activation": "ReLU" },
            { "weights": zeros(5, 2), "biases": [0.0, 0.0], "activation": "Softmax" },
        ],
    });
    write_dir(dir.path(), mlp, &["A", "B"], standard());
    match load(dir.path()) {
        Err(Error::ArtifactLoad { kind: ArtifactKind::Classifier, source: ArtifactLoadCause::Invalid(_), .. }) => {}
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }
}

#[test]
fn classifier_with_more_classes_than_labels_fails_at_decode() {
    let dir = tempfile::tempdir().unwrap();
    let linear = json!({
        "kind": "linear",
        "coef": zeros(3, N),
        "intercept": [0.0, 0.0, 1.0],
    });
    write_dir(dir.path(), linear, &["Healthy", "Hispa"], standard());
    let p = load(dir.path()).unwrap();
    match p.predict_image(&flat()) {
        Err(e @ Error::UnknownIndex { index: 2, .. }) => assert!(e.is_configuration_fault()),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn missing_model_directory_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(&dir.path().join("absent")).unwrap_err();
    assert_eq!(err.kind_name(), "artifact_load");
    assert!(err.is_configuration_fault());
}
