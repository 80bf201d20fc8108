/// BT.601 luma weights in 14-bit fixed point (they sum to 1 << 14).
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const SHIFT: u32 = 14;

/// Luminance of one RGB pixel, rounded to nearest.
#[inline]
pub fn luma(p: [u8; 3]) -> u8 {
    let y = R_WEIGHT * p[0] as u32 + G_WEIGHT * p[1] as u32 + B_WEIGHT * p[2] as u32 + (1 << (SHIFT - 1));
    (y >> SHIFT) as u8
}

pub fn rgb_to_gray(rgb: &[[u8; 3]]) -> Vec<u8> {
    rgb.iter().map(|&p| luma(p)).collect()
}
