//! End-to-end tests for the enhance pipeline: file in, file out.

mod common;

use common::*;
use photo_enhance::{OutputFormat, PresetId};
use pretty_assertions::assert_eq;
use rawtone::models::{AppConfig, JpegQuality};
use rawtone::services::EnhanceOptions;
use rawtone::AppError;

#[test]
fn test_enhance_png_to_jpeg() {
    let ws = Workspace::new();
    let input = ws.write_rgb("scene.png", &daylight_scene(64, 48));
    let output = ws.path("scene.jpg");

    let result = pipeline()
        .enhance_file(&input, &output, EnhanceOptions::default())
        .unwrap();

    assert_eq!(result.format, OutputFormat::Jpg);
    assert_eq!(result.preset, PresetId::Standard);
    let quality = result.jpeg_quality.expect("JPEG output reports its quality");
    assert!((85..=95).contains(&quality), "quality {quality}");

    let decoded = assert_jpeg(&read(&output));
    assert_dimensions(&decoded, 64, 48);
}

#[test]
fn test_output_extension_picks_format() {
    let ws = Workspace::new();
    let input = ws.write_rgb("scene.jpg", &daylight_scene(32, 32));
    let output = ws.path("scene.png");

    let result = pipeline()
        .enhance_file(&input, &output, EnhanceOptions::default())
        .unwrap();

    assert_eq!(result.format, OutputFormat::Png);
    assert_eq!(result.jpeg_quality, None);
    assert_png(&read(&output));
}

#[test]
fn test_every_preset_produces_an_image() {
    let ws = Workspace::new();
    let input = ws.write_rgb("scene.png", &daylight_scene(40, 30));

    for preset in PresetId::ALL {
        let output = ws.path(&format!("{preset}.jpg"));
        let options = EnhanceOptions {
            preset: Some(preset),
            ..Default::default()
        };
        pipeline().enhance_file(&input, &output, options).unwrap();
        assert_dimensions(&assert_jpeg(&read(&output)), 40, 30);
    }
}

#[test]
fn test_png_keeps_alpha() {
    let ws = Workspace::new();
    let input = ws.write_rgba("translucent.png", &translucent_scene(24, 24));
    let output = ws.path("translucent.png");

    pipeline()
        .enhance_file(&input, &output, EnhanceOptions::default())
        .unwrap();

    let decoded = assert_png(&read(&output)).to_rgba8();
    assert!(decoded.pixels().all(|p| p.0[3] == 128));
}

#[test]
fn test_jpeg_from_alpha_input() {
    let ws = Workspace::new();
    let input = ws.write_rgba("translucent.png", &translucent_scene(24, 24));
    let output = ws.path("flat.jpg");

    pipeline()
        .enhance_file(&input, &output, EnhanceOptions::default())
        .unwrap();

    assert_dimensions(&assert_jpeg(&read(&output)), 24, 24);
}

#[test]
fn test_sixteen_bit_png_round_trip_keeps_depth() {
    let ws = Workspace::new();
    let input = ws.write_rgb16("deep.png", &deep_gradient(32, 16));
    let output = ws.path("deep_out.png");

    pipeline()
        .enhance_file(&input, &output, EnhanceOptions::default())
        .unwrap();

    let decoded = assert_png(&read(&output));
    assert_eq!(decoded.color(), image::ColorType::Rgb16);
}

#[test]
fn test_large_result_is_fitted_to_delivery_box() {
    let ws = Workspace::new();
    let input = ws.write_rgb("wide.png", &daylight_scene(120, 60));
    let output = ws.path("wide.jpg");
    let config = AppConfig {
        parallel: false,
        max_width: 60,
        max_height: 100,
        ..AppConfig::default()
    };

    let result = pipeline_with(config)
        .enhance_file(&input, &output, EnhanceOptions::default())
        .unwrap();

    assert_eq!((result.width, result.height), (60, 30));
    assert_dimensions(&assert_jpeg(&read(&output)), 60, 30);
}

#[test]
fn test_fixed_jpeg_quality_is_used() {
    let ws = Workspace::new();
    let input = ws.write_rgb("scene.png", &daylight_scene(32, 24));
    let output = ws.path("scene.jpg");
    let config = AppConfig {
        parallel: false,
        jpeg_quality: JpegQuality::Fixed(70),
        ..AppConfig::default()
    };

    let result = pipeline_with(config)
        .enhance_file(&input, &output, EnhanceOptions::default())
        .unwrap();
    assert_eq!(result.jpeg_quality, Some(70));
}

#[test]
fn test_night_preset_brightens_dark_frame() {
    let ws = Workspace::new();
    let input = ws.write_rgb("night.png", &night_scene(64, 64));
    let output = ws.path("night_out.png");
    let options = EnhanceOptions {
        preset: Some(PresetId::Night),
        ..Default::default()
    };

    pipeline().enhance_file(&input, &output, options).unwrap();

    let before = mean_level(&image::open(&input).unwrap());
    let after = mean_level(&assert_png(&read(&output)));
    assert!(after > before + 0.1, "before {before}, after {after}");
}

#[test]
fn test_missing_input_is_io_error() {
    let ws = Workspace::new();
    let err = pipeline()
        .enhance_file(
            &ws.path("missing.png"),
            &ws.path("out.jpg"),
            EnhanceOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, AppError::Io(_)), "{err:?}");
    assert!(!ws.path("out.jpg").exists());
}

#[test]
fn test_corrupt_input_is_decode_error() {
    let ws = Workspace::new();
    let input = ws.path("corrupt.png");
    std::fs::write(&input, b"\x89PNG\r\n\x1a\nnot really").unwrap();

    let err = pipeline()
        .enhance_file(&input, &ws.path("out.jpg"), EnhanceOptions::default())
        .unwrap_err();
    assert!(matches!(err, AppError::Decode(_)), "{err:?}");
}

#[test]
fn test_analyze_and_plan_reports() {
    let ws = Workspace::new();
    let input = ws.write_rgb("night.png", &night_scene(48, 48));
    let p = pipeline();

    let report = p.analyze_file(&input).unwrap();
    assert_eq!((report.width, report.height, report.bit_depth), (48, 48, 8));
    assert!(report.low_light);

    let plan = p.plan_file(&input, Some(PresetId::Night)).unwrap();
    assert_eq!(plan.preset, "night");
    assert_eq!(plan.steps.len(), PresetId::Night.definition().steps.len());
}

#[test]
fn test_preview_is_unenhanced_and_capped() {
    let ws = Workspace::new();
    let input = ws.write_rgb("wide.png", &night_scene(1200, 40));
    let output = ws.path("preview.jpg");

    let (width, height) = pipeline().preview_file(&input, &output).unwrap();
    assert_eq!((width, height), (1080, 36));

    let preview = assert_jpeg(&read(&output));
    let original = mean_level(&image::open(&input).unwrap());
    assert!((mean_level(&preview) - original).abs() < 0.03);
}
