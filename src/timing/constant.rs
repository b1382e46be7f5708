use crate::srt::Subtitle;

use super::clamp_to_origin;

/// Constant affine retiming: a multiplicative factor expressed in parts
/// per million deviation from unity, applied before an additive
/// translation. Integer ppm arithmetic keeps repeated applications free of
/// floating-point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearRetime {
    pub factor_ppm: i64,
    pub translation_ms: i64,
}

impl LinearRetime {
    pub fn identity() -> Self {
        Self {
            factor_ppm: 0,
            translation_ms: 0,
        }
    }

    /// Converts the CLI's floating-point factor and seconds into the
    /// integer representation once, at the boundary.
    pub fn from_factor_and_translation(factor: f64, translation_secs: f64) -> Self {
        Self {
            factor_ppm: ((factor - 1.0) * 1e6).round() as i64,
            translation_ms: (translation_secs * 1000.0).round() as i64,
        }
    }

    /// `out = in + in*ppm/1_000_000 + translation`, widened so arbitrarily
    /// large timestamps cannot overflow the intermediate product.
    pub fn apply(&self, t: i64) -> i64 {
        let scaled = (t as i128 * self.factor_ppm as i128) / 1_000_000;
        t + scaled as i64 + self.translation_ms
    }

    /// Transforms both timestamps of a record. Returns `None` when the
    /// record lands entirely before the stream origin and must be dropped.
    pub fn retime(&self, subtitle: &Subtitle) -> Option<(u64, u64)> {
        clamp_to_origin(self.apply(subtitle.start as i64), self.apply(subtitle.end as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(start: u64, end: u64) -> Subtitle {
        Subtitle::new(1, start, end, "x")
    }

    #[test]
    fn identity_keeps_every_timestamp() {
        let retime = LinearRetime::from_factor_and_translation(1.0, 0.0);
        assert_eq!(retime, LinearRetime::identity());
        assert_eq!(retime.retime(&sub(0, 1)), Some((0, 1)));
        assert_eq!(retime.retime(&sub(5000, 7000)), Some((5000, 7000)));
    }

    #[test]
    fn translation_shifts_both_timestamps() {
        let retime = LinearRetime::from_factor_and_translation(1.0, 2.5);
        assert_eq!(retime.retime(&sub(1000, 3000)), Some((3500, 5500)));
    }

    #[test]
    fn factor_scales_before_translation() {
        // 1.1 => +100_000 ppm; 10_000ms scales to 11_000 then shifts by -1s.
        let retime = LinearRetime::from_factor_and_translation(1.1, -1.0);
        assert_eq!(retime.retime(&sub(10_000, 20_000)), Some((10_000, 21_000)));
    }

    #[test]
    fn record_pushed_before_origin_is_dropped() {
        let retime = LinearRetime::from_factor_and_translation(1.0, -10.0);
        assert_eq!(retime.retime(&sub(5000, 8000)), None);
    }

    #[test]
    fn start_before_origin_is_clamped_not_dropped() {
        let retime = LinearRetime::from_factor_and_translation(1.0, -6.0);
        assert_eq!(retime.retime(&sub(5000, 8000)), Some((0, 2000)));
    }

    #[test]
    fn zero_duration_at_origin_is_dropped() {
        let retime = LinearRetime::from_factor_and_translation(1.0, -8.0);
        assert_eq!(retime.retime(&sub(5000, 8000)), None);
    }

    #[test]
    fn huge_timestamps_do_not_overflow() {
        let retime = LinearRetime {
            factor_ppm: 500_000,
            translation_ms: 0,
        };
        let t = 4_000_000_000_000; // ~126 years in ms
        assert_eq!(retime.apply(t), 6_000_000_000_000);
    }
}
