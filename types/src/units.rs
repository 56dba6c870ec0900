/// A frequency value.  The unit is Hz; [`Display`](std::fmt::Display) prints whole MHz.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Frequency(pub u64);

/// One megahertz.
pub const MHZ: Frequency = Frequency(1_000_000);

impl Frequency {
    pub const fn from_hz(hz: u64) -> Self {
        Self(hz)
    }

    /// Panics if the frequency does not fit in a `u64` Hz count.
    pub const fn from_mhz(mhz: u64) -> Self {
        match mhz.checked_mul(1_000_000) {
            Some(hz) => Self(hz),
            None => panic!("frequency overflow"),
        }
    }

    pub const fn checked_mul(self, rhs: u64) -> Option<Self> {
        match self.0.checked_mul(rhs) {
            Some(hz) => Some(Self(hz)),
            None => None,
        }
    }

    pub const fn hz(self) -> u64 {
        self.0
    }

    /// The frequency in whole MHz, truncated.
    pub const fn mhz(self) -> u64 {
        self.0 / 1_000_000
    }

    /// The period of this frequency, in ns.
    pub fn period_ns(self) -> f64 {
        period_ns(f64::from(self))
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} MHz", self.mhz())
    }
}

// Overflow panics regardless of the overflow-checks setting.
impl std::ops::Mul<u64> for Frequency {
    type Output = Frequency;

    fn mul(self, rhs: u64) -> Self::Output {
        match self.checked_mul(rhs) {
            Some(res) => res,
            None => panic!("frequency overflow"),
        }
    }
}

impl std::ops::Mul<Frequency> for u64 {
    type Output = Frequency;

    fn mul(self, rhs: Frequency) -> Self::Output {
        rhs * self
    }
}

impl std::ops::Div<u64> for Frequency {
    type Output = Frequency;

    fn div(self, rhs: u64) -> Self::Output {
        Frequency(self.0 / rhs)
    }
}

impl From<Frequency> for f64 {
    fn from(value: Frequency) -> Self {
        value.0 as f64
    }
}

/// Converts a frequency in Hz to a period in ns.
pub fn period_ns(freq: f64) -> f64 {
    1e9 / freq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_mhz() {
        let a = Frequency::from_mhz(1);
        assert_eq!(a, MHZ);
        assert_eq!(a.hz(), 1_000_000);
        assert_eq!(a.to_string(), "1 MHz");
        assert_eq!(Frequency::from_hz(2_500_000).to_string(), "2 MHz");
    }

    #[test]
    fn test_frequency_scale() {
        let b = 5 * MHZ;
        assert_eq!(b.hz(), 5_000_000);
        assert_eq!(b.to_string(), "5 MHz");
        assert_eq!(MHZ * 200, Frequency::from_mhz(200));
        assert_eq!(Frequency::from_mhz(100) / 4, Frequency::from_mhz(25));
    }

    #[test]
    fn test_frequency_overflow() {
        let big = Frequency::from_mhz(10_000_000_000_000);
        assert_eq!(big.mhz(), 10_000_000_000_000);
        assert_eq!(big.checked_mul(2), None);
        assert_eq!(MHZ.checked_mul(3), Some(Frequency::from_mhz(3)));
        assert!(std::panic::catch_unwind(|| big * 2).is_err());
        assert!(std::panic::catch_unwind(|| 2 * big).is_err());
        assert!(std::panic::catch_unwind(|| Frequency::from_mhz(u64::MAX / 1000)).is_err());
    }

    #[test]
    fn test_period() {
        assert_eq!(period_ns(50e6), 20.0);
        assert_eq!(Frequency::from_mhz(100).period_ns(), 10.0);
    }
}
