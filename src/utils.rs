use rustyms::Element;

/// Rest mass of the electron in Dalton.
pub const ELECTRON_MASS: f64 = 5.485_799_090_65e-4;

/// Relative difference between `value` and `reference` in parts per million, rounded to the
/// nearest integer. The second argument is always the reference the difference is divided by.
/// A reference that is not a finite positive number (or a non-finite `value`) gives `u32::MAX`,
/// which never passes a tolerance check.
///
/// # Arguments
/// * `value` - Observed (or candidate) mass or m/z
/// * `reference` - Mass or m/z to compare against
///
#[inline]
pub fn ppm_increment(value: f64, reference: f64) -> u32 {
    if !reference.is_finite() || reference <= 0.0 || !value.is_finite() {
        return u32::MAX;
    }
    ((value - reference) / reference * 1_000_000.0).abs().round() as u32
}

/// Monoisotopic mass of an elemental composition. Negative counts are losses.
/// Returns `None` if any of the elements has no known monoisotopic mass.
///
/// # Arguments
/// * `composition` - Element and count pairs
///
pub fn composition_mass(composition: &[(Element, i32)]) -> Option<f64> {
    composition.iter().try_fold(0.0, |acc, (element, count)| {
        element
            .mass(None)
            .map(|mass| acc + mass.value * *count as f64)
    })
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_ppm_increment() {
        assert_eq!(ppm_increment(1_000_010.0, 1_000_000.0), 10);
        assert_eq!(ppm_increment(999_990.0, 1_000_000.0), 10);
        assert_eq!(ppm_increment(700.5, 700.5), 0);
        assert_eq!(ppm_increment(700.5, 700.49999), 0);
    }

    #[test]
    fn test_ppm_increment_rounding() {
        // 10.4 ppm rounds down, 10.5 ppm rounds up
        assert_eq!(ppm_increment(1_000_010.4, 1_000_000.0), 10);
        assert_eq!(ppm_increment(1_000_010.6, 1_000_000.0), 11);
    }

    #[test]
    fn test_composition_mass() {
        let water = composition_mass(&[(Element::H, 2), (Element::O, 1)]).unwrap();
        assert!((water - 18.010565).abs() < 1e-5, "{water}");

        let loss = composition_mass(&[(Element::H, -2), (Element::O, -1)]).unwrap();
        assert!((loss + water).abs() < 1e-12);

        assert_eq!(composition_mass(&[]), Some(0.0));
    }

    #[test]
    fn test_ppm_increment_invalid_reference() {
        assert_eq!(ppm_increment(699.49, -2.99), u32::MAX);
        assert_eq!(ppm_increment(-2.99, -2.99), u32::MAX);
        assert_eq!(ppm_increment(0.0, 0.0), u32::MAX);
        assert_eq!(ppm_increment(700.5, 0.0), u32::MAX);
        assert_eq!(ppm_increment(700.5, f64::NAN), u32::MAX);
        assert_eq!(ppm_increment(f64::NAN, 700.5), u32::MAX);
        assert_eq!(ppm_increment(700.5, f64::INFINITY), u32::MAX);
        // Negative values against a positive reference are still a large difference
        assert_eq!(ppm_increment(-700.5, 700.5), 2_000_000);
    }

    #[test]
    fn test_ppm_increment_argument_order_near_tolerance() {
        // 0.01 Da at 1000 Da is 9.9999 ppm one way and 10.0 ppm the other
        assert_eq!(ppm_increment(1000.0, 1000.01), 10);
        assert_eq!(ppm_increment(1000.01, 1000.0), 10);
        // 0.011 Da is 10.9999 and 11.0 ppm
        assert_eq!(ppm_increment(1000.0, 1000.011), 11);
        assert_eq!(ppm_increment(1000.011, 1000.0), 11);
    }
}
