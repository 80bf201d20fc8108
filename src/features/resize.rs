use image::imageops::{self, FilterType};
use image::GrayImage;

use super::config::ResizeKernel;

/// Interpolation weights are stored with this many fractional bits.
const COEF_BITS: u32 = 11;
const COEF_SCALE: f32 = (1 << COEF_BITS) as f32;

/// Source index pair and fixed-point weights for one destination coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    lo: usize,
    hi: usize,
    w_lo: i32,
    w_hi: i32,
}

/// Maps destination coordinates onto the source axis with half-pixel
/// centres, clamping at both edges.
fn taps(src: u32, dst: u32) -> Vec<Tap> {
    let scale = src as f64 / dst as f64;
    let last = src as i64 - 1;
    (0..dst)
        .map(|d| {
            let mut f = ((d as f64 + 0.5) * scale - 0.5) as f32;
            let mut s = f.floor() as i64;
            f -= s as f32;
            if s < 0 {
                s = 0;
                f = 0.0;
            }
            if s >= last {
                s = last;
                f = 0.0;
            }
            let w_lo = ((1.0 - f) * COEF_SCALE).round_ties_even() as i32;
            Tap {
                lo: s as usize,
                hi: (s + 1).min(last) as usize,
                w_lo,
                w_hi: (1 << COEF_BITS) - w_lo,
            }
        })
        .collect()
}

/// Separable fixed-point bilinear resize. The horizontal pass keeps its
/// 11-bit weights unreduced; the vertical pass rounds once at 22 bits.
/// This is OpenCV's scalar 8-bit path. Its SIMD vertical pass drops low
/// bits before the final rounding and can land one level away.
fn bilinear(img: &GrayImage, width: u32, height: u32) -> GrayImage {
    let (sw, sh) = img.dimensions();
    let src = img.as_raw();
    let xt = taps(sw, width);
    let yt = taps(sh, height);

    let horizontal: Vec<Vec<i32>> = (0..sh as usize)
        .map(|y| {
            let row = &src[y * sw as usize..(y + 1) * sw as usize];
            xt.iter()
                .map(|t| row[t.lo] as i32 * t.w_lo + row[t.hi] as i32 * t.w_hi)
                .collect()
        })
        .collect();

    let round = 1i64 << (2 * COEF_BITS - 1);
    GrayImage::from_fn(width, height, |x, y| {
        let t = yt[y as usize];
        let a = horizontal[t.lo][x as usize] as i64;
        let b = horizontal[t.hi][x as usize] as i64;
        let v = (a * t.w_lo as i64 + b * t.w_hi as i64 + round) >> (2 * COEF_BITS);
        image::Luma([v.clamp(0, 255) as u8])
    })
}

/// Resizes a grayscale image to exactly `width × height`.
pub fn resize(img: &GrayImage, width: u32, height: u32, kernel: ResizeKernel) -> GrayImage {
    let filter = match kernel {
        ResizeKernel::Bilinear   => return bilinear(img, width, height),
        ResizeKernel::Triangle   => FilterType::Triangle,
        ResizeKernel::CatmullRom => FilterType::CatmullRom,
        ResizeKernel::Lanczos3   => FilterType::Lanczos3,
    };
    imageops::resize(img, width, height, filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(w: u32, h: u32) -> GrayImage {
        GrayImage::from_fn(w, h, |x, y| image::Luma([((x * 7 + y * 3) % 256) as u8]))
    }

    #[test]
    fn same_size_is_identity() {
        let img = ramp(37, 21);
        assert_eq!(resize(&img, 37, 21, ResizeKernel::Bilinear), img);
    }

    #[test]
    fn constant_image_stays_constant() {
        let img = GrayImage::from_pixel(300, 171, image::Luma([128]));
        let out = resize(&img, 128, 128, ResizeKernel::Bilinear);
        assert_eq!(out.dimensions(), (128, 128));
        assert!(out.pixels().all(|p| p.0[0] == 128));
    }

    #[test]
    fn exact_halving_averages_pixel_pairs() {
        let img = GrayImage::from_fn(4, 1, |x, _| image::Luma([[10, 20, 30, 50][x as usize]]));
        let out = resize(&img, 2, 1, ResizeKernel::Bilinear);
        assert_eq!(out.as_raw(), &vec![15, 40]);
    }

    #[test]
    fn upscaling_clamps_at_edges() {
        let img = GrayImage::from_fn(2, 1, |x, _| image::Luma([[0, 200][x as usize]]));
        let out = resize(&img, 4, 1, ResizeKernel::Bilinear);
        // centres map to -0.25, 0.25, 0.75, 1.25 on the source axis
        assert_eq!(out.as_raw(), &vec![0, 50, 150, 200]);
    }

    #[test]
    fn taps_weights_sum_to_one() {
        for t in taps(300, 128) {
            assert_eq!(t.w_lo + t.w_hi, 1 << COEF_BITS);
            assert!(t.lo <= t.hi && t.hi < 300);
        }
    }

    #[test]
    fn library_kernels_hit_target_size() {
        let img = ramp(50, 40);
        for k in [ResizeKernel::Triangle, ResizeKernel::CatmullRom, ResizeKernel::Lanczos3] {
            assert_eq!(resize(&img, 128, 128, k).dimensions(), (128, 128));
        }
    }
}
