//! Separable Gaussian blur of a single-channel plane, edges clamped.

use crate::parallel;

/// Normalized kernel covering +-3 sigma.
pub(crate) fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let sigma = sigma.max(0.1);
    let radius = (sigma * 3.0).ceil() as isize;
    let mut kernel: Vec<f32> = (-radius..=radius)
        .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
        .collect();
    let sum: f32 = kernel.iter().sum();
    for k in &mut kernel {
        *k /= sum;
    }
    kernel
}

#[inline]
fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

pub(crate) fn blur_plane(
    plane: &[f32],
    width: usize,
    height: usize,
    sigma: f32,
    parallel: bool,
) -> Vec<f32> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let kernel = gaussian_kernel(sigma);
    let radius = (kernel.len() / 2) as isize;

    let mut horizontal = vec![0.0f32; width * height];
    parallel::for_each_row_mut(&mut horizontal, width, parallel, |y, out| {
        let src = &plane[y * width..(y + 1) * width];
        for (x, value) in out.iter_mut().enumerate() {
            *value = kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * src[clamp_index(x as isize + k as isize - radius, width)])
                .sum();
        }
    });

    let mut out = vec![0.0f32; width * height];
    parallel::for_each_row_mut(&mut out, width, parallel, |y, row| {
        for (k, w) in kernel.iter().enumerate() {
            let sy = clamp_index(y as isize + k as isize - radius, height);
            let src = &horizontal[sy * width..(sy + 1) * width];
            for (value, s) in row.iter_mut().zip(src) {
                *value += w * s;
            }
        }
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_is_normalized_and_symmetric() {
        let kernel = gaussian_kernel(1.5);
        assert_eq!(kernel.len(), 11);
        assert!((kernel.iter().sum::<f32>() - 1.0).abs() < 1e-5);
        assert_eq!(kernel[0], kernel[10]);
    }

    #[test]
    fn test_constant_plane_unchanged() {
        let plane = vec![0.3; 20 * 10];
        let blurred = blur_plane(&plane, 20, 10, 2.0, false);
        assert!(blurred.iter().all(|v| (v - 0.3).abs() < 1e-5));
    }

    #[test]
    fn test_blur_softens_step() {
        let plane: Vec<f32> = (0..32 * 4).map(|i| if i % 32 < 16 { 0.0 } else { 1.0 }).collect();
        let blurred = blur_plane(&plane, 32, 4, 1.0, false);
        assert!(blurred[15] > 0.0 && blurred[15] < 0.5);
        assert!(blurred[16] > 0.5 && blurred[16] < 1.0);
        assert!(blurred[0] < 1e-4);
    }
}
