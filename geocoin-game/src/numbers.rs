//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Floor a f64 and clamp it to the i32 range, returning 0 for NaN values.
#[must_use]
pub fn floor_f64_to_i32(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    let min = cast::<i32, f64>(i32::MIN).unwrap_or(f64::MIN);
    let max = cast::<i32, f64>(i32::MAX).unwrap_or(f64::MAX);
    let clamped = value.floor().clamp(min, max);
    cast::<f64, i32>(clamped).unwrap_or(0)
}

/// Floor a f64 into the u32 range, returning 0 for non-finite or negative values.
#[must_use]
pub fn floor_f64_to_u32(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let max = cast::<u32, f64>(u32::MAX).unwrap_or(f64::MAX);
    let clamped = value.floor().clamp(0.0, max);
    cast::<f64, u32>(clamped).unwrap_or(0)
}

/// Convert a u64 to a unit-interval float using its top 53 bits.
#[must_use]
pub fn u64_to_unit_f64(value: u64) -> f64 {
    let mantissa = cast::<u64, f64>(value >> 11).unwrap_or(0.0);
    let scale = cast::<u64, f64>(1_u64 << 53).unwrap_or(f64::MAX);
    mantissa / scale
}
