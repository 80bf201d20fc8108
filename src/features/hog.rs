//! Histogram of oriented gradients.
//!
//! Follows the scikit-image formulation: central differences with
//! zeroed borders, unsigned orientations hard-binned (no interpolation
//! between bins or cells), cell sums divided by the cell area, and
//! overlapping blocks with a one-cell stride. Cell histograms carry the
//! same single-precision accumulation, so descriptors match bit for bit.

use std::f64::consts::PI;

use image::GrayImage;

use super::config::{BlockNorm, HogParams};

const EPS: f64 = 1e-5;
const L2HYS_CLIP: f64 = 0.2;

/// Per-pixel gradient magnitude and unsigned orientation in degrees.
struct Gradients {
    magnitude: Vec<f64>,
    orientation: Vec<f64>,
}

fn gradients(img: &GrayImage) -> Gradients {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let px = |x: usize, y: usize| img.as_raw()[y * w + x] as f64;

    let mut magnitude = vec![0.0; w * h];
    let mut orientation = vec![0.0; w * h];
    for y in 0..h {
        for x in 0..w {
            let g_row = if y == 0 || y + 1 == h { 0.0 } else { px(x, y + 1) - px(x, y - 1) };
            let g_col = if x == 0 || x + 1 == w { 0.0 } else { px(x + 1, y) - px(x - 1, y) };
            let i = y * w + x;
            magnitude[i] = g_col.hypot(g_row);
            orientation[i] = (g_row.atan2(g_col) * (180.0 / PI)).rem_euclid(180.0);
        }
    }
    Gradients { magnitude, orientation }
}

/// `[cell_row][cell_col][bin]` flattened; each bin is the mean magnitude of
/// the cell's pixels whose orientation falls in `[bin·w, (bin+1)·w)`.
///
/// Bin edges, the running total and the mean are single precision: each
/// f64 magnitude is added at double precision and the sum rounded back to
/// f32. Every value this returns is therefore exactly representable as f32.
fn cell_histograms(g: &Gradients, width: usize, params: &HogParams, rows: usize, cols: usize) -> Vec<f64> {
    let cell = params.pixels_per_cell as usize;
    let bins = params.orientations;
    let bin_width = 180.0f32 / bins as f32;
    let area = (cell * cell) as f32;

    let mut hist = vec![0.0; rows * cols * bins];
    for r in 0..rows {
        for c in 0..cols {
            let out = &mut hist[(r * cols + c) * bins..(r * cols + c + 1) * bins];
            for (b, slot) in out.iter_mut().enumerate() {
                let lo = (bin_width * b as f32) as f64;
                let hi = (bin_width * (b + 1) as f32) as f64;
                let mut total = 0.0f32;
                for y in r * cell..(r + 1) * cell {
                    for x in c * cell..(c + 1) * cell {
                        let i = y * width + x;
                        let o = g.orientation[i];
                        if o < hi && o >= lo {
                            total = (total as f64 + g.magnitude[i]) as f32;
                        }
                    }
                }
                *slot = (total / area) as f64;
            }
        }
    }
    hist
}

fn normalize_block(block: &mut [f64], norm: BlockNorm) {
    let l2 = |v: &[f64]| (v.iter().map(|x| x * x).sum::<f64>() + EPS * EPS).sqrt();
    match norm {
        BlockNorm::L1 => {
            let d = block.iter().map(|x| x.abs()).sum::<f64>() + EPS;
            block.iter_mut().for_each(|x| *x /= d);
        }
        BlockNorm::L1Sqrt => {
            let d = block.iter().map(|x| x.abs()).sum::<f64>() + EPS;
            block.iter_mut().for_each(|x| *x = (*x / d).sqrt());
        }
        BlockNorm::L2 => {
            let d = l2(block);
            block.iter_mut().for_each(|x| *x /= d);
        }
        BlockNorm::L2Hys => {
            let d = l2(block);
            block.iter_mut().for_each(|x| *x = (*x / d).min(L2HYS_CLIP));
            let d = l2(block);
            block.iter_mut().for_each(|x| *x /= d);
        }
    }
}

/// Computes the descriptor of `img`. Partial cells on the right and bottom
/// edges are ignored; an image with fewer cells than one block yields an
/// empty vector.
pub fn hog(img: &GrayImage, params: &HogParams) -> Vec<f64> {
    let cell = params.pixels_per_cell as usize;
    let per_block = params.cells_per_block as usize;
    let bins = params.orientations;
    if cell == 0 || per_block == 0 || bins == 0 {
        return Vec::new();
    }

    let width = img.width() as usize;
    let rows = img.height() as usize / cell;
    let cols = width / cell;
    if rows < per_block || cols < per_block {
        return Vec::new();
    }

    let hist = cell_histograms(&gradients(img), width, params, rows, cols);

    let blocks_r = rows - per_block + 1;
    let blocks_c = cols - per_block + 1;
    let block_len = per_block * per_block * bins;
    let mut out = Vec::with_capacity(blocks_r * blocks_c * block_len);
    let mut block = Vec::with_capacity(block_len);
    for br in 0..blocks_r {
        for bc in 0..blocks_c {
            block.clear();
            for r in br..br + per_block {
                for c in bc..bc + per_block {
                    let start = (r * cols + c) * bins;
                    block.extend_from_slice(&hist[start..start + bins]);
                }
            }
            normalize_block(&mut block, params.block_norm);
            out.extend_from_slice(&block);
        }
    }
    out
}
