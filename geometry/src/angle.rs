/// Map an angle in degrees into `[0, 360)`.
///
/// NaN and infinities come back as NaN.
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if a >= 360.0 { 0.0 } else { a }
}
