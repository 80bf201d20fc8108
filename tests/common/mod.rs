#![allow(dead_code)]

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use cropscan::models::LinearModel;
use cropscan::{
    Artifacts, Classifier, FeatureConfig, FeatureExtractor, LabelDecoder, Matrix, Predictor, Scaler,
};
use image::{DynamicImage, GrayImage, ImageOutputFormat, Rgb, RgbImage, Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Labels the fixture classifier decodes to.
pub const CLASSES: [&str; 2] = ["Healthy", "Late_Blight"];

/// Reference-layout artifacts: identity scaler over 8100 features and a
/// binary linear model that sums them. An all-zero descriptor scores -0.5
/// (class 0, `healthy`); any textured image scores well above zero.
pub fn reference_artifacts() -> (Classifier, LabelDecoder, Scaler) {
    let n = FeatureConfig::default().feature_len();
    let classifier = Classifier::Linear(LinearModel {
        coef: Matrix::from_data(vec![vec![1.0; n]]),
        intercept: vec![-0.5],
    });
    let decoder = LabelDecoder::new(CLASSES.iter().map(|s| s.to_string()).collect());
    let scaler = Scaler::Standard { mean: vec![0.0; n], scale: vec![1.0; n] };
    (classifier, decoder, scaler)
}

/// Writes `best_model.json`, `labels.json` and `scaler.json` into `dir`.
pub fn write_artifacts(dir: &Path, classifier: &Classifier, decoder: &LabelDecoder, scaler: &Scaler) {
    std::fs::write(dir.join("best_model.json"), serde_json::to_vec(classifier).unwrap()).unwrap();
    std::fs::write(dir.join("labels.json"), serde_json::to_vec(decoder).unwrap()).unwrap();
    std::fs::write(dir.join("scaler.json"), serde_json::to_vec(scaler).unwrap()).unwrap();
}

/// A temp directory holding the reference artifacts.
pub fn reference_model_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let (c, d, s) = reference_artifacts();
    write_artifacts(dir.path(), &c, &d, &s);
    dir
}

/// An in-memory predictor over the reference artifacts.
pub fn reference_predictor() -> Predictor {
    let (c, d, s) = reference_artifacts();
    Predictor::new(Arc::new(Artifacts::new(c, d, s)), FeatureExtractor::default())
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

/// Deterministic RGB noise.
pub fn noise_rgb(width: u32, height: u32, seed: u64) -> RgbImage {
    let mut rng = StdRng::seed_from_u64(seed);
    RgbImage::from_fn(width, height, |_, _| Rgb([rng.gen(), rng.gen(), rng.gen()]))
}

/// Deterministic grayscale noise.
pub fn noise_gray(width: u32, height: u32, seed: u64) -> GrayImage {
    let mut rng = StdRng::seed_from_u64(seed);
    GrayImage::from_fn(width, height, |_, _| image::Luma([rng.gen()]))
}

/// Replicates each gray value into three equal channels.
pub fn gray_as_rgb(gray: &GrayImage) -> RgbImage {
    RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y)[0];
        Rgb([v, v, v])
    })
}

/// Adds a fully opaque alpha channel.
pub fn opaque_rgba(rgb: &RgbImage) -> RgbaImage {
    RgbaImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Rgba([r, g, b, 255])
    })
}

pub fn encode_png(img: DynamicImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageOutputFormat::Png).unwrap();
    out.into_inner()
}
