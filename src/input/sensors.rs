use crate::error::Result;
use crate::token::TokenId;

/// Single best-effort scan per call; no retries.
pub trait TokenReader {
    fn poll(&mut self) -> Option<TokenId>;
}

/// Raw sample from the volume potentiometer's ADC.
pub trait VolumeSensor {
    fn read(&mut self) -> Result<i32>;
}

/// Linear scale of a raw sample to volume, rounded to two decimals.
///
/// Not clamped here; the audio easing clamps.
pub fn normalize_volume(raw: i32, full_scale: i32) -> f32 {
    let v = raw as f32 / full_scale as f32;
    (v * 100.0).round() / 100.0
}
