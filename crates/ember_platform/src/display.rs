//! Display query helpers.

/// Normalizes a platform-reported refresh rate to two decimal places.
///
/// Raw refresh rates carry floating-point jitter (59.994 on a nominal 60 Hz
/// panel); callers compare and persist the normalized value.
pub fn normalize_refresh_rate(raw: f32) -> f32 {
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jittery_rate_rounds_to_hundredth() {
        assert_eq!(normalize_refresh_rate(59.994), 59.99);
    }

    #[test]
    fn exact_rate_is_unchanged() {
        assert_eq!(normalize_refresh_rate(60.0), 60.0);
    }

    #[test]
    fn high_refresh_panels() {
        assert_eq!(normalize_refresh_rate(119.988), 119.99);
        assert_eq!(normalize_refresh_rate(90.0), 90.0);
    }
}
