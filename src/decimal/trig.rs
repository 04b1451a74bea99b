//! Degree-mode trigonometry.
//!
//! The HP-35 only works in degrees. Angles are reduced into `[0, 360)`
//! before evaluation, and multiples of 90° return exact values so that
//! `sin 180` displays `0.` instead of a binary rounding residue such as
//! `1.224646799-16`.

/// Reduce an angle in degrees into `[0, 360)`.
pub fn reduce_degrees(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

/// Quadrant index (0..=3) when `reduced` is an exact multiple of 90°.
fn exact_quadrant(reduced: f64) -> Option<u8> {
    if reduced % 90.0 == 0.0 {
        Some((reduced / 90.0) as u8)
    } else {
        None
    }
}

/// Sine of an angle in degrees.
pub fn sin_deg(angle: f64) -> f64 {
    let reduced = reduce_degrees(angle);
    match exact_quadrant(reduced) {
        Some(0) | Some(2) => 0.0,
        Some(1) => 1.0,
        Some(3) => -1.0,
        _ => reduced.to_radians().sin(),
    }
}

/// Cosine of an angle in degrees.
pub fn cos_deg(angle: f64) -> f64 {
    let reduced = reduce_degrees(angle);
    match exact_quadrant(reduced) {
        Some(0) => 1.0,
        Some(2) => -1.0,
        Some(1) | Some(3) => 0.0,
        _ => reduced.to_radians().cos(),
    }
}

/// Tangent of an angle in degrees.
///
/// Returns `None` at the singular angles 90° and 270°; the caller decides
/// what to show there.
pub fn tan_deg(angle: f64) -> Option<f64> {
    let reduced = reduce_degrees(angle);
    match exact_quadrant(reduced) {
        Some(0) | Some(2) => Some(0.0),
        Some(_) => None,
        None => Some(reduced.to_radians().tan()),
    }
}

/// Whether a tangent singularity sits on the positive side (90°) or the
/// negative side (270°) of the circle.
pub fn tan_singularity_sign(angle: f64) -> f64 {
    if reduce_degrees(angle) == 270.0 {
        -1.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_degrees() {
        assert_eq!(reduce_degrees(450.0), 90.0);
        assert_eq!(reduce_degrees(-90.0), 270.0);
        assert_eq!(reduce_degrees(720.0), 0.0);
        assert_eq!(reduce_degrees(33.5), 33.5);
    }

    #[test]
    fn test_exact_quadrants() {
        assert_eq!(sin_deg(180.0), 0.0);
        assert_eq!(sin_deg(270.0), -1.0);
        assert_eq!(cos_deg(90.0), 0.0);
        assert_eq!(cos_deg(-180.0), -1.0);
        assert_eq!(tan_deg(180.0), Some(0.0));
    }

    #[test]
    fn test_tan_singularities() {
        assert_eq!(tan_deg(90.0), None);
        assert_eq!(tan_deg(270.0), None);
        assert_eq!(tan_deg(-90.0), None);
        assert_eq!(tan_singularity_sign(90.0), 1.0);
        assert_eq!(tan_singularity_sign(-90.0), -1.0);
    }

    #[test]
    fn test_off_axis_angles() {
        assert!((sin_deg(30.0) - 0.5).abs() < 1e-15);
        assert!((cos_deg(60.0) - 0.5).abs() < 1e-15);
        assert!((tan_deg(45.0).unwrap_or_default() - 1.0).abs() < 1e-15);
    }
}
