//! Angle arithmetic shared by the chart, aspect and solar modules.

/// Wrap a longitude into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let mut wrapped = degrees % 360.0;
    if wrapped < 0.0 {
        wrapped += 360.0;
    }
    // -1e-15 + 360.0 rounds to 360.0
    if wrapped >= 360.0 {
        wrapped -= 360.0;
    }
    wrapped
}

/// Shortest angular distance between two longitudes, in `[0, 180]`.
pub fn separation(lon1: f64, lon2: f64) -> f64 {
    let diff = (lon1 - lon2).abs();
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Unwrap a longitude step so that it takes the short way around the circle.
pub fn unwrap_step(delta: f64) -> f64 {
    if delta > 180.0 {
        delta - 360.0
    } else if delta < -180.0 {
        delta + 360.0
    } else {
        delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_negative_and_overflow() {
        assert_eq!(normalize_degrees(-30.0), 330.0);
        assert_eq!(normalize_degrees(390.0), 30.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!(normalize_degrees(-1e-15) < 360.0);
    }

    #[test]
    fn separation_folds_to_half_circle() {
        assert_eq!(separation(10.0, 350.0), 20.0);
        assert_eq!(separation(0.0, 180.0), 180.0);
        assert_eq!(separation(100.0, 40.0), 60.0);
    }

    #[test]
    fn unwrap_takes_short_path() {
        // 0.5° -> 359.0° is a 1.5° retrograde step
        assert!((unwrap_step(359.0 - 0.5) - -1.5).abs() < 1e-12);
        // 359.5° -> 0.5° is a 1° direct step
        assert!((unwrap_step(0.5 - 359.5) - 1.0).abs() < 1e-12);
        assert_eq!(unwrap_step(12.0), 12.0);
    }
}
