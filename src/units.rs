// ⚖️ Unit Conversion - EU FIC derived nutrition values
// Sodium (mg) → salt (g) and kcal → kJ. Pure, total functions: NaN in, NaN out.

/// Salt equivalent factor for sodium (EU FIC Annex XIV)
pub const SALT_PER_SODIUM: f64 = 2.5;

/// Kilojoules per kilocalorie
pub const KJ_PER_KCAL: f64 = 4.184;

/// Convert sodium in milligrams to salt in grams.
///
/// No rounding is applied here; callers format for display.
///
/// ```
/// use label_draft::units::sodium_to_salt;
/// assert_eq!(sodium_to_salt(400.0), 1.0);
/// ```
pub fn sodium_to_salt(sodium_mg: f64) -> f64 {
    sodium_mg * SALT_PER_SODIUM / 1000.0
}

/// Convert kilocalories to kilojoules, rounded half up to a whole number.
///
/// The result is kept as `f64` so non-finite input propagates instead of
/// collapsing to an integer sentinel.
///
/// ```
/// use label_draft::units::kcal_to_kj;
/// assert_eq!(kcal_to_kj(100.0), 418.0);
/// ```
pub fn kcal_to_kj(kcal: f64) -> f64 {
    (kcal * KJ_PER_KCAL + 0.5).floor()
}

/// Round to `places` decimals with ties going up, like `Number.toFixed`.
///
/// `{:.N}` formatting alone rounds exact ties to even (0.125 -> "0.12").
///
/// ```
/// use label_draft::units::round_half_up;
/// assert_eq!(format!("{:.2}", round_half_up(0.125, 2)), "0.13");
/// ```
pub fn round_half_up(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale + 0.5).floor() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sodium_to_salt_known_values() {
        assert_eq!(sodium_to_salt(0.0), 0.0);
        assert_eq!(sodium_to_salt(400.0), 1.0);
        assert_relative_eq!(sodium_to_salt(300.0), 0.75);
    }

    #[test]
    fn test_sodium_to_salt_is_linear() {
        for x in [1.0, 12.5, 300.0, 1234.0] {
            assert_relative_eq!(sodium_to_salt(2.0 * x), 2.0 * sodium_to_salt(x));
        }
    }

    #[test]
    fn test_kcal_to_kj_known_values() {
        assert_eq!(kcal_to_kj(100.0), 418.0);
        assert_eq!(kcal_to_kj(0.0), 0.0);
        assert_eq!(kcal_to_kj(200.0), 837.0);
        assert_eq!(kcal_to_kj(350.0), 1464.0);
    }

    #[test]
    fn test_kcal_to_kj_is_integral() {
        for kcal in [0.1, 1.0, 33.3, 99.99, 512.75] {
            let kj = kcal_to_kj(kcal);
            assert_eq!(kj, kj.trunc(), "{} kcal gave non-integral {}", kcal, kj);
        }
    }

    #[test]
    fn test_round_half_up_breaks_ties_upward() {
        let shown: Vec<String> = [50.0, 250.0, 450.0]
            .iter()
            .map(|mg| format!("{:.2}", round_half_up(sodium_to_salt(*mg), 2)))
            .collect();
        assert_eq!(shown, ["0.13", "0.63", "1.13"]);
        assert_eq!(format!("{:.2}", round_half_up(0.75, 2)), "0.75");
        assert!(round_half_up(f64::NAN, 2).is_nan());
    }

    #[test]
    fn test_non_finite_propagates() {
        assert!(sodium_to_salt(f64::NAN).is_nan());
        assert!(kcal_to_kj(f64::NAN).is_nan());
        assert_eq!(sodium_to_salt(-400.0), -1.0);
    }
}
