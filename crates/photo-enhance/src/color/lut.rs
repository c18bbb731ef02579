//! Gamma lookup tables generated by build.rs.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Sample a 4096-entry table at `value` (0.0..=1.0) with linear interpolation.
///
/// Out-of-range and NaN inputs are clamped (NaN maps to 0.0).
#[inline]
fn sample(table: &[f32; 4096], value: f32) -> f32 {
    let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    let scaled = value * 4095.0;
    let index = scaled as usize;
    if index >= 4095 {
        return table[4095];
    }
    let frac = scaled - index as f32;
    let a = table[index];
    a + (table[index + 1] - a) * frac
}

/// sRGB-encoded value to linear light.
#[inline]
pub fn srgb_to_linear(srgb: f32) -> f32 {
    sample(&SRGB_TO_LINEAR, srgb)
}

/// Linear light to sRGB encoding.
#[inline]
pub fn linear_to_srgb(linear: f32) -> f32 {
    sample(&LINEAR_TO_SRGB, linear)
}
