//! Test fixtures: small synthetic photos written to scratch directories.

use image::{ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};
use rawtone::models::AppConfig;
use rawtone::services::EnhancePipeline;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch directory that lives as long as the fixture.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write `image` as `name` (format from the extension) and return its path.
    pub fn write_rgb(&self, name: &str, image: &RgbImage) -> PathBuf {
        let path = self.path(name);
        image.save(&path).expect("write fixture");
        path
    }

    pub fn write_rgba(&self, name: &str, image: &RgbaImage) -> PathBuf {
        let path = self.path(name);
        image.save(&path).expect("write fixture");
        path
    }

    pub fn write_rgb16(&self, name: &str, image: &ImageBuffer<Rgb<u16>, Vec<u16>>) -> PathBuf {
        let path = self.path(name);
        image.save(&path).expect("write fixture");
        path
    }

    pub fn write_config(&self, yaml: &str) -> PathBuf {
        let path = self.path("rawtone.yaml");
        std::fs::write(&path, yaml).expect("write config");
        path
    }
}

/// Pipeline with default settings but serial execution and no oxipng pass,
/// so tests stay quick and reproducible.
pub fn pipeline() -> EnhancePipeline {
    pipeline_with(AppConfig {
        parallel: false,
        optimize_png: false,
        ..AppConfig::default()
    })
}

pub fn pipeline_with(config: AppConfig) -> EnhancePipeline {
    EnhancePipeline::new(config)
}

/// A plausible daylight scene: sky, a warm subject, textured foliage.
pub fn daylight_scene(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let fy = y as f32 / height as f32;
        let fx = x as f32 / width as f32;
        let rgb = if fy < 0.4 {
            [0.4 + 0.2 * fy, 0.6 + 0.2 * fy, 0.9 - 0.1 * fx]
        } else if (0.35..0.65).contains(&fx) && fy < 0.75 {
            [0.85, 0.64, 0.52]
        } else {
            let t = if (x / 2 + y / 2) % 2 == 0 { 0.06 } else { -0.06 };
            [0.22 + t, 0.48 + t, 0.18 + t]
        };
        Rgb(rgb.map(|c| (c * 255.0).round() as u8))
    })
}

/// Dark, noisy frame, like a high-ISO night shot.
pub fn night_scene(width: u32, height: u32) -> RgbImage {
    let mut state: u32 = 0x9e37_79b9;
    RgbImage::from_fn(width, height, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let n = (state >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0;
        let v = (0.14 + 0.1 * n).clamp(0.0, 1.0);
        Rgb([v, v * 0.95, v * 0.9].map(|c| (c * 255.0).round() as u8))
    })
}

/// Half-transparent copy of the daylight scene.
pub fn translucent_scene(width: u32, height: u32) -> RgbaImage {
    let rgb = daylight_scene(width, height);
    RgbaImage::from_fn(width, height, |x, y| {
        let Rgb([r, g, b]) = *rgb.get_pixel(x, y);
        Rgba([r, g, b, 128])
    })
}

/// Smooth 16-bit gradient.
pub fn deep_gradient(width: u32, height: u32) -> ImageBuffer<Rgb<u16>, Vec<u16>> {
    ImageBuffer::from_fn(width, height, |x, y| {
        let v = ((x + y) as f32 / (width + height) as f32 * 65535.0) as u16;
        Rgb([v, v / 2 + 10_000, 65535 - v])
    })
}

pub fn read(path: &Path) -> Vec<u8> {
    std::fs::read(path).expect("read output")
}
