//! Domain-critical regression tests for photo-enhance.
//!
//! These tests pin the pipeline contracts every preset must honor, not the
//! look of any single preset. Each test documents the regression it guards
//! against.

#[cfg(test)]
mod domain_tests {
    use crate::adapt::{adapt, Param, NOISE_HIGH};
    use crate::analysis::{analyze, Characteristic, CharacteristicVector};
    use crate::api::{EnhanceError, Enhancer};
    use crate::buffer::{OutputFormat, PixelBuffer};
    use crate::ops::{self, ExecContext, OpKind};
    use crate::presets::{PresetDefinition, PresetId};
    use pretty_assertions::assert_eq;

    /// xorshift64 in -1.0..1.0
    struct Noise(u64);

    impl Noise {
        fn next(&mut self) -> f32 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            (self.0 >> 40) as f32 / (1u64 << 24) as f32 * 2.0 - 1.0
        }
    }

    /// A small scene: sky gradient on top, warm "skin" block, green lower
    /// half with texture. Exercises every classifier and most operations.
    fn scene(width: usize, height: usize) -> PixelBuffer {
        let mut noise = Noise(0x1234_5678_9abc_def1);
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                let fy = y as f32 / height as f32;
                let fx = x as f32 / width as f32;
                let n = 0.01 * noise.next();
                let rgb = if fy < 0.4 {
                    [0.35 + 0.2 * fy, 0.55 + 0.2 * fy, 0.9 - 0.1 * fx]
                } else if (0.3..0.6).contains(&fx) && fy < 0.7 {
                    [0.85, 0.64, 0.52]
                } else {
                    let t = if (x / 3 + y / 3) % 2 == 0 { 0.05 } else { -0.05 };
                    [0.2 + t, 0.45 + t, 0.15 + t]
                };
                data.extend(rgb.map(|c| (c + n).clamp(0.0, 1.0)));
            }
        }
        PixelBuffer::new(width, height, 3, data).unwrap()
    }

    /// Dark frame with strong luminance noise, like a high-ISO night shot.
    fn dark_noisy(width: usize, height: usize) -> PixelBuffer {
        let mut noise = Noise(0xdead_beef_cafe_f00d);
        let data = (0..width * height)
            .flat_map(|_| {
                let v = (0.15 + 0.12 * noise.next()).clamp(0.0, 1.0);
                [v, v * 0.95, v * 0.9]
            })
            .collect();
        PixelBuffer::new(width, height, 3, data).unwrap()
    }

    fn enhance(buffer: &PixelBuffer, preset: PresetId) -> PixelBuffer {
        Enhancer::new()
            .parallel(false)
            .enhance(buffer.clone(), preset, OutputFormat::Png)
            .unwrap()
            .buffer
    }

    // ========================================================================
    // GAP 1: Shape and range are preserved by every preset
    // ========================================================================

    /// If this breaks, it means: some operation resized the buffer, dropped
    /// or added a channel, or wrote a sample outside 0.0..=1.0 that the
    /// encoder would then wrap or clip unpredictably.
    #[test]
    fn test_every_preset_preserves_shape_and_range() {
        let input = scene(48, 40);
        for preset in PresetId::ALL {
            let out = enhance(&input, preset);
            assert_eq!(
                (out.width(), out.height(), out.channels()),
                (48, 40, 3),
                "{preset} changed the buffer shape"
            );
            assert!(
                out.data().iter().all(|v| (0.0..=1.0).contains(v)),
                "{preset} wrote a sample out of range"
            );
        }
    }

    /// If this breaks, it means: an operation writes into the alpha channel,
    /// which would punch holes into transparent PNG output.
    #[test]
    fn test_alpha_survives_every_preset() {
        let rgb = scene(24, 20);
        let data: Vec<f32> = rgb
            .data()
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 0.6])
            .collect();
        let input = PixelBuffer::new(24, 20, 4, data).unwrap();
        for preset in PresetId::ALL {
            let out = enhance(&input, preset);
            assert_eq!(out.channels(), 4);
            assert!(
                out.data().chunks_exact(4).all(|p| p[3] == 0.6),
                "{preset} touched alpha"
            );
        }
    }

    // ========================================================================
    // GAP 2: Determinism, serial and parallel
    // ========================================================================

    /// If this breaks, it means: some operation depends on hidden state
    /// (an unseeded random source, iteration order of a hash map, a cache
    /// that outlives the invocation).
    #[test]
    fn test_enhance_is_deterministic() {
        let input = scene(40, 32);
        for preset in PresetId::ALL {
            assert_eq!(enhance(&input, preset), enhance(&input, preset), "{preset}");
        }
    }

    /// If this breaks, it means: a parallel path reduces in thread order or
    /// reads a neighbouring row that another thread already overwrote.
    /// The image is large enough to actually take the rayon path.
    #[test]
    fn test_serial_matches_parallel_for_every_preset() {
        let input = scene(160, 120);
        for preset in PresetId::ALL {
            let serial = enhance(&input, preset);
            let parallel = Enhancer::new()
                .parallel(true)
                .enhance(input.clone(), preset, OutputFormat::Png)
                .unwrap()
                .buffer;
            assert!(serial == parallel, "{preset} differs between serial and parallel");
        }
    }

    // ========================================================================
    // GAP 3: Adaptation stays inside the schema and honors noise coupling
    // ========================================================================

    fn extreme_vectors() -> Vec<CharacteristicVector> {
        let corners = [0.0, 1.0];
        let mut vectors = Vec::new();
        for &level in &corners {
            for &noise in &[0.0, 0.2] {
                vectors.push(CharacteristicVector {
                    brightness: level,
                    contrast: level,
                    noise,
                    saturation: level,
                    sharpness: level,
                    dark_ratio: level,
                    bright_ratio: 1.0 - level,
                    skin_ratio: level,
                    green_ratio: level,
                    blue_ratio: 1.0 - level,
                    warm_ratio: level,
                    channel_means: [level, 1.0 - level, 1.0 - level],
                });
            }
        }
        vectors
    }

    /// If this breaks, it means: a rule pushed a value past its declared
    /// range and the final clamp was skipped, so an operation would run
    /// with a parameter it was never designed for.
    #[test]
    fn test_adapted_values_stay_in_range() {
        for preset in PresetId::ALL {
            for v in extreme_vectors() {
                let set = adapt(preset.definition(), &v);
                assert_eq!(set.steps.len(), preset.definition().steps.len());
                for step in &set.steps {
                    for &param in Param::ALL {
                        let value = step.params.get(param);
                        assert!(
                            param.spec().contains(value),
                            "{preset}: {param} = {value}"
                        );
                    }
                }
            }
        }
    }

    /// If this breaks, it means: on a noisy image a preset sharpens more or
    /// denoises less than its base values, amplifying exactly the noise it
    /// should be hiding.
    #[test]
    fn test_noise_coupling_for_every_preset() {
        let noisy = CharacteristicVector {
            noise: NOISE_HIGH * 4.0,
            brightness: 0.2,
            sharpness: 0.0,
            ..Default::default()
        };
        for preset in PresetId::ALL {
            let def = preset.definition();
            let set = adapt(def, &noisy);
            for (step, planned) in def.steps.iter().zip(&set.steps) {
                match step.op {
                    OpKind::Denoise => assert!(
                        planned.params.get(Param::DenoiseStrength)
                            >= step.base_value(Param::DenoiseStrength),
                        "{preset}: denoise below base"
                    ),
                    OpKind::Sharpen => assert!(
                        planned.params.get(Param::SharpenAmount)
                            <= step.base_value(Param::SharpenAmount),
                        "{preset}: sharpen above base"
                    ),
                    OpKind::Clarity => assert!(
                        planned.params.get(Param::ClarityAmount)
                            <= step.base_value(Param::ClarityAmount),
                        "{preset}: clarity above base"
                    ),
                    _ => {}
                }
            }
            let denoise_max = set
                .steps
                .iter()
                .filter(|s| s.op == OpKind::Denoise)
                .any(|s| s.params.get(Param::DenoiseStrength) >= 1.0);
            let sharpen_max = set
                .steps
                .iter()
                .filter(|s| s.op == OpKind::Sharpen)
                .any(|s| s.params.get(Param::SharpenAmount) >= Param::SharpenAmount.spec().max);
            assert!(!(denoise_max && sharpen_max), "{preset}: both at maximum");
        }
    }

    // ========================================================================
    // GAP 4: Rules push in the direction the image calls for
    // ========================================================================

    /// An unremarkable, well-exposed frame. Each test below moves a single
    /// component away from it.
    fn typical() -> CharacteristicVector {
        CharacteristicVector {
            brightness: 0.5,
            contrast: 0.3,
            saturation: 0.3,
            sharpness: 0.4,
            noise: 0.005,
            ..Default::default()
        }
    }

    fn planned(preset: PresetId, v: &CharacteristicVector, param: Param) -> f32 {
        adapt(preset.definition(), v)
            .first(param)
            .unwrap_or_else(|| panic!("{preset} has no {param} step"))
    }

    /// If this breaks, it means: an underexposed frame gets the same lift or
    /// the same denoising as a well-exposed one, so the exposure step
    /// brightens shadow noise that nothing cleaned up.
    #[test]
    fn test_dark_frames_get_more_exposure_and_denoise() {
        let mid = typical();
        let dark = CharacteristicVector {
            brightness: 0.08,
            ..typical()
        };
        for preset in PresetId::ALL {
            let def = preset.definition();
            if def.uses(OpKind::Exposure) {
                let (d, m) = (
                    planned(preset, &dark, Param::ExposureStrength),
                    planned(preset, &mid, Param::ExposureStrength),
                );
                assert!(d > m, "{preset}: exposure dark {d} vs mid {m}");
            }
            if def.uses(OpKind::Denoise) {
                let (d, m) = (
                    planned(preset, &dark, Param::DenoiseStrength),
                    planned(preset, &mid, Param::DenoiseStrength),
                );
                assert!(d > m, "{preset}: denoise dark {d} vs mid {m}");
            }
        }
    }

    /// If this breaks, it means: a preset that boosts color pushes an
    /// already saturated image just as hard as a muted one, clipping
    /// channels and posterizing bright hues.
    #[test]
    fn test_saturated_images_get_a_smaller_boost() {
        let muted = CharacteristicVector {
            saturation: 0.1,
            ..typical()
        };
        let vivid = CharacteristicVector {
            saturation: 0.9,
            ..typical()
        };
        for preset in PresetId::ALL {
            let def = preset.definition();
            let (lo, hi) = (adapt(def, &muted), adapt(def, &vivid));
            for ((step, l), h) in def.steps.iter().zip(&lo.steps).zip(&hi.steps) {
                let (param, neutral) = match step.op {
                    OpKind::Saturation => (Param::SaturationScale, 1.0),
                    OpKind::Vibrance => (Param::VibranceAmount, 0.0),
                    _ => continue,
                };
                let (l, h) = (l.params.get(param), h.params.get(param));
                assert!(h <= l, "{preset}: {param} vivid {h} vs muted {l}");
                if step.base_value(param) > neutral {
                    assert!(h < l, "{preset}: {param} boost ignores saturation");
                }
            }
        }
    }

    /// If this breaks, it means: soft images no longer get extra
    /// sharpening, or the extra sharpening runs into the top of the range
    /// where halos appear around edges.
    #[test]
    fn test_soft_images_get_more_sharpening_below_the_maximum() {
        let soft = CharacteristicVector {
            sharpness: 0.05,
            ..typical()
        };
        let crisp = CharacteristicVector {
            sharpness: 0.8,
            ..typical()
        };
        let max = Param::SharpenAmount.spec().max;
        for preset in PresetId::ALL {
            let def = preset.definition();
            let (s, c) = (adapt(def, &soft), adapt(def, &crisp));
            for ((step, s), c) in def.steps.iter().zip(&s.steps).zip(&c.steps) {
                if step.op != OpKind::Sharpen {
                    continue;
                }
                let (s, c) = (
                    s.params.get(Param::SharpenAmount),
                    c.params.get(Param::SharpenAmount),
                );
                assert!(s >= c, "{preset}: sharpen soft {s} vs crisp {c}");
                assert!(s < max, "{preset}: sharpen {s} reaches the maximum");
                let adapts = step.rules.iter().any(|r| {
                    r.param == Param::SharpenAmount && r.input == Characteristic::Sharpness
                });
                if adapts {
                    assert!(s > c, "{preset}: sharpen ignores softness");
                }
            }
        }
    }

    // ========================================================================
    // GAP 5: Analyzer and empty schedule
    // ========================================================================

    /// If this breaks, it means: the pipeline mutates the buffer outside
    /// the operation steps, or the analyzer is not a pure function of the
    /// pixels.
    #[test]
    fn test_empty_schedule_is_identity() {
        static NOTHING: PresetDefinition = PresetDefinition {
            id: PresetId::Standard,
            description: "no steps",
            steps: &[],
        };
        let input = scene(32, 24);
        let result = Enhancer::new()
            .enhance_with(input.clone(), &NOTHING, OutputFormat::Png)
            .unwrap();
        assert_eq!(result.buffer, input);
        assert_eq!(analyze(&result.buffer, false), result.characteristics);
        assert!(result.parameters.steps.is_empty());
    }

    /// If this breaks, it means: the analyzer gives different answers for
    /// the same pixels depending on the parallel flag.
    #[test]
    fn test_analyze_serial_matches_parallel() {
        let input = scene(200, 150);
        assert_eq!(analyze(&input, false), analyze(&input, true));
    }

    // ========================================================================
    // GAP 6: End-to-end scenarios
    // ========================================================================

    /// If this breaks, it means: a flat image breaks an operation (division
    /// by a zero standard deviation, an empty histogram) or local contrast
    /// invents structure where there is none.
    #[test]
    fn test_mid_gray_scenario() {
        let input = PixelBuffer::filled(40, 30, 3, 0.5).unwrap();
        let v = analyze(&input, false);
        assert!((v.brightness - 0.5).abs() < 1e-4);
        assert!(v.contrast < 1e-6);
        assert_eq!(v.saturation, 0.0);
        assert_eq!(v.noise, 0.0);
        assert_eq!(v.sharpness, 0.0);

        for preset in PresetId::ALL {
            let out = Enhancer::new().enhance(input.clone(), preset, OutputFormat::Jpg);
            assert!(out.is_ok(), "{preset} failed on mid-gray: {out:?}");
        }

        // Local contrast alone leaves it visually unchanged
        for def in PresetId::ALL.map(PresetId::definition) {
            for step in def.steps.iter().filter(|s| s.op == OpKind::LocalContrast) {
                let mut buffer = input.clone();
                let params = adapt(def, &v)
                    .steps
                    .into_iter()
                    .find(|s| s.op == OpKind::LocalContrast)
                    .map(|s| s.params)
                    .unwrap_or_else(|| step.base_params());
                ops::apply(step.op, &mut buffer, &params, &ExecContext::default()).unwrap();
                let diff = buffer
                    .data()
                    .iter()
                    .zip(input.data())
                    .map(|(a, b)| (a - b).abs())
                    .fold(0.0f32, f32::max);
                assert!(diff < 0.01, "{}: local contrast moved gray by {diff}", def.id);
            }
        }
    }

    /// If this breaks, it means: the low-light preset no longer does its
    /// job, either because its adaptation rules stopped reacting to a dark
    /// noisy frame or because the general preset became more aggressive.
    #[test]
    fn test_night_beats_standard_on_dark_noisy_input() {
        let input = dark_noisy(96, 96);
        let before = analyze(&input, false);
        assert!(before.is_low_light());
        assert!(before.noise > NOISE_HIGH, "fixture noise {}", before.noise);

        let night = analyze(&enhance(&input, PresetId::Night), false);
        let standard = analyze(&enhance(&input, PresetId::Standard), false);

        assert!(
            night.brightness > standard.brightness,
            "night {} vs standard {}",
            night.brightness,
            standard.brightness
        );
        assert!(
            night.noise < standard.noise,
            "night noise {} vs standard {}",
            night.noise,
            standard.noise
        );
    }

    /// If this breaks, it means: an unknown preset name produced output (or
    /// a different error), so a caller could deliver an unenhanced image.
    #[test]
    fn test_unknown_preset_produces_nothing() {
        let result =
            Enhancer::new().enhance_named(scene(8, 8), "lomography", OutputFormat::Jpg);
        assert_eq!(
            result.map(|r| r.width()),
            Err(EnhanceError::UnknownPreset("lomography".into()))
        );
    }

    // ========================================================================
    // GAP 7: Noise estimate is not fooled by texture
    // ========================================================================

    /// If this breaks, it means: the noise estimator counts hard edges or
    /// regular texture as noise, so architecture and fabric shots would get
    /// smeared by denoising and lose their sharpening.
    #[test]
    fn test_noise_estimate_separates_grain_from_texture() {
        let mut noise = Noise(42);
        let grain: Vec<f32> = (0..64 * 64)
            .flat_map(|_| {
                // Irwin-Hall approximation of a unit normal
                let n: f32 = (0..12).map(|_| (noise.next() + 1.0) / 2.0).sum::<f32>() - 6.0;
                let v = 0.5 + 0.03 * n;
                [v, v, v]
            })
            .collect();
        let grainy = PixelBuffer::new(64, 64, 3, grain).unwrap();

        let checker: Vec<f32> = (0..64 * 64)
            .flat_map(|i| {
                let (x, y) = (i % 64, i / 64);
                let v = if (x / 8 + y / 8) % 2 == 0 { 0.2 } else { 0.8 };
                [v, v, v]
            })
            .collect();
        let textured = PixelBuffer::new(64, 64, 3, checker).unwrap();

        let grainy_noise = analyze(&grainy, false).noise;
        let textured_noise = analyze(&textured, false).noise;
        assert!(
            (grainy_noise - 0.03).abs() < 0.01,
            "grain sigma 0.03 estimated as {grainy_noise}"
        );
        assert!(textured_noise < 0.005, "checkerboard estimated as {textured_noise}");
    }

    // ========================================================================
    // GAP 8: Preset data
    // ========================================================================

    /// If this breaks, it means: a preset definition runs sharpening before
    /// denoising, saturates before white balance, or puts grain anywhere but
    /// last.
    #[test]
    fn test_all_presets_validate() {
        for preset in PresetId::ALL {
            assert_eq!(preset.definition().validate(), Ok(()), "{preset}");
        }
    }
}
