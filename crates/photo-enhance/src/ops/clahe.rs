//! Contrast-limited adaptive histogram equalization on Oklab lightness.
//!
//! The image is divided into a grid of tiles. Each tile gets its own
//! clipped histogram and equalization map; every pixel then blends the maps
//! of the four nearest tile centers bilinearly, so tile borders never show.
//! Only lightness is remapped, the a/b coordinates pass through.

use crate::adapt::{Param, ParamSet};
use crate::buffer::PixelBuffer;
use crate::color::Oklab;
use crate::parallel;

use super::ExecContext;

const BINS: usize = 256;

type Map = [f32; BINS];

#[inline]
fn bin_of(l: f32) -> usize {
    ((l.clamp(0.0, 1.0) * (BINS - 1) as f32).round()) as usize
}

/// Equalization map for one tile histogram with `n` samples.
fn equalize(hist: &[u32; BINS], n: u32, clip_limit: f32) -> Map {
    let mut counts = hist.map(|c| c as f32);
    let clip = (clip_limit * n as f32 / BINS as f32).max(1.0);
    let mut excess = 0.0;
    for c in &mut counts {
        if *c > clip {
            excess += *c - clip;
            *c = clip;
        }
    }
    let share = excess / BINS as f32;

    let mut map = [0.0; BINS];
    let mut cumulative = 0.0;
    let total = n as f32;
    for (m, c) in map.iter_mut().zip(counts) {
        let h = c + share;
        // mid-rank keeps a flat tile at identity instead of shifting it
        *m = (((cumulative + 0.5 * h) / total * BINS as f32 - 0.5) / (BINS - 1) as f32)
            .clamp(0.0, 1.0);
        cumulative += h;
    }
    map
}

/// Map of the nearest bin plus the offset from that bin's center, so
/// gradients inside one bin are not posterized.
#[inline]
fn lookup(map: &Map, l: f32) -> f32 {
    let l = l.clamp(0.0, 1.0);
    let bin = bin_of(l);
    map[bin] + (l - bin as f32 / (BINS - 1) as f32)
}

/// Tile index below `pos` and the weight of the next tile, for a pixel at
/// `pos` along an axis split into `tiles` tiles of `size` pixels.
#[inline]
fn neighbors(pos: usize, size: f32, tiles: usize) -> (usize, usize, f32) {
    let f = ((pos as f32 + 0.5) / size - 0.5).clamp(0.0, (tiles - 1) as f32);
    let lo = (f.floor() as usize).min(tiles - 1);
    let hi = (lo + 1).min(tiles - 1);
    (lo, hi, f - lo as f32)
}

pub(crate) fn local_contrast(buffer: &mut PixelBuffer, params: &ParamSet, ctx: &ExecContext) {
    let amount = params.get(Param::ClaheAmount);
    if amount <= 0.0 {
        return;
    }
    let clip_limit = params.get(Param::ClaheClipLimit);
    let (width, height, channels) = (buffer.width(), buffer.height(), buffer.channels());
    let requested = params.get(Param::ClaheTiles).round().max(1.0) as usize;
    let tiles_x = requested.min(width);
    let tiles_y = requested.min(height);
    let tile_w = width as f32 / tiles_x as f32;
    let tile_h = height as f32 / tiles_y as f32;

    let mut lab = vec![Oklab::new(0.0, 0.0, 0.0); width * height];
    parallel::for_each_row_mut(&mut lab, width, ctx.parallel, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            *out = Oklab::from_srgb(buffer.srgb(x, y));
        }
    });

    let tile_bounds = |t: usize, size: f32, len: usize| {
        let start = (t as f32 * size).round() as usize;
        let end = (((t + 1) as f32 * size).round() as usize).min(len);
        start..end.max(start + 1).min(len)
    };

    let mut maps = vec![[0.0f32; BINS]; tiles_x * tiles_y];
    parallel::for_each_row_mut(&mut maps, tiles_x, ctx.parallel, |ty, row| {
        let ys = tile_bounds(ty, tile_h, height);
        for (tx, map) in row.iter_mut().enumerate() {
            let xs = tile_bounds(tx, tile_w, width);
            let mut hist = [0u32; BINS];
            for y in ys.clone() {
                for pixel in &lab[y * width + xs.start..y * width + xs.end] {
                    hist[bin_of(pixel.l)] += 1;
                }
            }
            let n = (ys.len() * xs.len()) as u32;
            *map = equalize(&hist, n, clip_limit);
        }
    });

    let row_len = buffer.row_len();
    parallel::for_each_row_mut(buffer.data_mut(), row_len, ctx.parallel, |y, row| {
        let (ty0, ty1, wy) = neighbors(y, tile_h, tiles_y);
        for (x, pixel) in row.chunks_exact_mut(channels).enumerate() {
            let (tx0, tx1, wx) = neighbors(x, tile_w, tiles_x);
            let src = lab[y * width + x];
            let l = src.l;
            let top = lookup(&maps[ty0 * tiles_x + tx0], l) * (1.0 - wx)
                + lookup(&maps[ty0 * tiles_x + tx1], l) * wx;
            let bottom = lookup(&maps[ty1 * tiles_x + tx0], l) * (1.0 - wx)
                + lookup(&maps[ty1 * tiles_x + tx1], l) * wx;
            let mapped = top * (1.0 - wy) + bottom * wy;
            Oklab::new(l + amount * (mapped - l), src.a, src.b)
                .to_srgb()
                .write_to(pixel);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn luma_std(buffer: &PixelBuffer) -> f32 {
        let luma = buffer.luma_plane(false);
        let mean = luma.iter().sum::<f32>() / luma.len() as f32;
        (luma.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / luma.len() as f32).sqrt()
    }

    #[test]
    fn test_uniform_histogram_maps_to_identity() {
        let hist = [4u32; BINS];
        let map = equalize(&hist, 4 * BINS as u32, 4.0);
        for (i, m) in map.iter().enumerate() {
            assert!((m - i as f32 / 255.0).abs() < 1e-4, "bin {i}: {m}");
        }
    }

    #[test]
    fn test_clip_limits_spike() {
        let mut hist = [0u32; BINS];
        hist[128] = 1000;
        let map = equalize(&hist, 1000, 1.0);
        // a single spike spreads over the range instead of jumping 0 -> 1
        assert!(map[127] > 0.3 && map[129] < 0.7);
    }

    #[test]
    fn test_flat_image_nearly_unchanged() {
        let original = PixelBuffer::filled(48, 32, 3, 0.5).unwrap();
        let mut buffer = original.clone();
        let params = ParamSet::defaults().with(Param::ClaheAmount, 1.0);
        local_contrast(&mut buffer, &params, &ExecContext::default());
        let diff = buffer
            .data()
            .iter()
            .zip(original.data())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max);
        assert!(diff < 0.01, "max diff {diff}");
    }

    #[test]
    fn test_low_contrast_gets_stretched() {
        let data: Vec<f32> = (0..64 * 64)
            .flat_map(|i| {
                let v = 0.45 + 0.1 * ((i % 64) as f32 / 63.0);
                [v, v, v]
            })
            .collect();
        let mut buffer = PixelBuffer::new(64, 64, 3, data).unwrap();
        let before = luma_std(&buffer);
        let params = ParamSet::defaults()
            .with(Param::ClaheAmount, 1.0)
            .with(Param::ClaheClipLimit, 4.0)
            .with(Param::ClaheTiles, 2.0);
        local_contrast(&mut buffer, &params, &ExecContext::default());
        assert!(luma_std(&buffer) > before);
    }

    #[test]
    fn test_more_tiles_than_pixels() {
        let mut buffer = PixelBuffer::filled(3, 2, 3, 0.4).unwrap();
        let params = ParamSet::defaults()
            .with(Param::ClaheAmount, 1.0)
            .with(Param::ClaheTiles, 16.0);
        local_contrast(&mut buffer, &params, &ExecContext::default());
        assert!(buffer.data().iter().all(|v| v.is_finite()));
    }
}
