//! Fixed-point money arithmetic.
//!
//! All monetary amounts are an integer count of minor currency units
//! (paise). Repeated extension additions and partial refunds therefore never
//! accumulate floating-point drift; rounding happens exactly once per
//! computation, half-up.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Basis points divisor for revenue-share splits (10000 = 100%).
pub const BPS_SCALE: i64 = 10_000;

/// Minor units per major currency unit.
pub const MINOR_PER_MAJOR: i64 = 100;

/// A monetary amount in minor currency units (paise).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Whole major units (e.g. rupees) to `Money`.
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Cost of `minutes` at an hourly rate, rounded half-up.
    pub fn per_hour_for_minutes(rate_per_hour: Money, minutes: i64) -> Money {
        debug_assert!(minutes >= 0);
        Money(div_round_half_up(rate_per_hour.0 * minutes, 60))
    }

    /// Fraction of this amount expressed in basis points, rounded half-up.
    pub fn mul_bps(self, bps: u32) -> Money {
        Money(div_round_half_up(self.0 * bps as i64, BPS_SCALE))
    }

    /// `self * numerator / denominator`, rounded half-up. Used for partial
    /// refunds (`total * remaining_minutes / total_minutes`).
    pub fn mul_ratio(self, numerator: i64, denominator: i64) -> Money {
        debug_assert!(denominator > 0);
        Money(div_round_half_up(self.0 * numerator, denominator))
    }

    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }
}

fn div_round_half_up(numerator: i64, denominator: i64) -> i64 {
    debug_assert!(denominator > 0);
    if numerator >= 0 {
        (numerator + denominator / 2) / denominator
    } else {
        -((-numerator + denominator / 2) / denominator)
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        Money(iter.map(|m| m.0).sum())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        write!(
            f,
            "{}{}.{:02} INR",
            sign,
            abs / MINOR_PER_MAJOR,
            abs % MINOR_PER_MAJOR
        )
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_hours_at_forty_per_hour() {
        // price_per_hour=40, 2 hours -> 80
        let cost = Money::per_hour_for_minutes(Money::from_major(40), 120);
        assert_eq!(cost, Money::from_major(80));
    }

    #[test]
    fn fractional_hours_round_half_up() {
        // 90 minutes at 41/hr = 61.50 exactly
        let cost = Money::per_hour_for_minutes(Money::from_major(41), 90);
        assert_eq!(cost.minor(), 6150);
        // 1 minute at 0.01/hr rounds 0.0166 paise -> 0
        let tiny = Money::per_hour_for_minutes(Money::from_minor(1), 1);
        assert_eq!(tiny.minor(), 0);
    }

    #[test]
    fn bps_split_is_exact_on_spec_example() {
        // total=80, revenue_share=15% -> platform 12, owner 68
        let total = Money::from_major(80);
        let platform = total.mul_bps(1500);
        let owner = total - platform;
        assert_eq!(platform, Money::from_major(12));
        assert_eq!(owner, Money::from_major(68));
        assert_eq!(owner + platform, total);
    }

    #[test]
    fn ratio_clamps_naturally_at_bounds() {
        let total = Money::from_major(100);
        assert_eq!(total.mul_ratio(0, 120), Money::ZERO);
        assert_eq!(total.mul_ratio(120, 120), total);
    }

    #[test]
    fn display_formats_minor_units() {
        assert_eq!(Money::from_minor(12345).to_string(), "123.45 INR");
        assert_eq!(Money::ZERO.to_string(), "0.00 INR");
        assert_eq!(Money::from_minor(-250).to_string(), "-2.50 INR");
    }

    #[test]
    fn sum_over_iterator() {
        let parts = [Money::from_major(1), Money::from_major(2)];
        let total: Money = parts.iter().copied().sum();
        assert_eq!(total, Money::from_major(3));
    }
}
