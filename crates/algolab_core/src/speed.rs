//! Speed dial to auto-advance interval mapping.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User-facing speed control, always within `[1, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct SpeedDial(u8);

impl SpeedDial {
    /// Slowest setting
    pub const MIN: SpeedDial = SpeedDial(1);
    /// Fastest setting
    pub const MAX: SpeedDial = SpeedDial(100);
    /// Setting used when nothing else is configured
    pub const DEFAULT: SpeedDial = SpeedDial(50);

    /// Create a dial, clamping into `[1, 100]`
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    /// Raw dial value
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Auto-advance period in milliseconds: `1000 - dial * 9`.
    /// Ranges from 991 (dial 1) down to 100 (dial 100).
    #[must_use]
    pub const fn interval_ms(&self) -> u64 {
        1000 - self.0 as u64 * 9
    }

    /// Auto-advance period
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms())
    }
}

impl Default for SpeedDial {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i64> for SpeedDial {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<SpeedDial> for i64 {
    fn from(dial: SpeedDial) -> Self {
        i64::from(dial.0)
    }
}

impl std::fmt::Display for SpeedDial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-function form of the mapping, clamping the raw dial first
#[must_use]
pub fn interval_ms(dial: i64) -> u64 {
    SpeedDial::new(dial).interval_ms()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_endpoints() {
        assert_eq!(SpeedDial::MIN.interval_ms(), 991);
        assert_eq!(SpeedDial::MAX.interval_ms(), 100);
        assert_eq!(SpeedDial::DEFAULT.interval_ms(), 550);
    }

    #[test]
    fn test_clamping() {
        assert_eq!(SpeedDial::new(0), SpeedDial::MIN);
        assert_eq!(SpeedDial::new(-40), SpeedDial::MIN);
        assert_eq!(SpeedDial::new(250), SpeedDial::MAX);
        assert_eq!(interval_ms(1000), 100);
        assert_eq!(interval_ms(-1), 991);
    }

    #[test]
    fn test_interval_duration() {
        assert_eq!(SpeedDial::new(10).interval(), Duration::from_millis(910));
    }

    #[test]
    fn test_serde_clamps() {
        let dial: SpeedDial = serde_json::from_str("400").unwrap();
        assert_eq!(dial, SpeedDial::MAX);
        assert_eq!(serde_json::to_string(&SpeedDial::new(42)).unwrap(), "42");
    }

    proptest::proptest! {
        #[test]
        fn prop_interval_in_bounds(dial: i64) {
            let ms = interval_ms(dial);
            proptest::prop_assert!((100..=991).contains(&ms));
        }

        #[test]
        fn prop_faster_dial_never_slower(a in 1i64..=100, b in 1i64..=100) {
            if a <= b {
                proptest::prop_assert!(interval_ms(a) >= interval_ms(b));
            }
        }
    }
}
