use std::f32::consts::FRAC_PI_2;

/// Map a linear volume knob position to output gain.
///
/// A quarter sine makes the low end of the knob usable, and `max_volume`
/// caps the result below full scale.
pub fn eased_gain(volume: f32, max_volume: f32) -> f32 {
    let v = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
    (v * FRAC_PI_2).sin() * max_volume
}
