//! Loyalty program domain entity

use chrono::{DateTime, Utc};

use crate::shared::{money::MINOR_PER_MAJOR, Money};

/// Milli-points scale: `points_per_unit_milli = 100` means 0.1 points per
/// major currency unit spent.
pub const POINTS_MILLI_SCALE: i64 = 1_000;

/// Outcome of a voucher redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Redemption {
    pub vouchers: i64,
    pub points_spent: i64,
    pub wallet_credit: Money,
}

/// Admin-managed loyalty program. At most one program is active at a time.
#[derive(Debug, Clone)]
pub struct LoyaltyProgram {
    pub id: i32,
    pub name: String,
    /// Milli-points accrued per major unit spent
    pub points_per_unit_milli: i64,
    /// Points required per voucher
    pub min_redeem_points: i64,
    /// Wallet credit per voucher
    pub redeem_value: Money,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl LoyaltyProgram {
    /// Points earned on a payment, rounded down.
    pub fn points_for(&self, amount: Money) -> i64 {
        if amount.minor() <= 0 {
            return 0;
        }
        amount.minor() * self.points_per_unit_milli / (MINOR_PER_MAJOR * POINTS_MILLI_SCALE)
    }

    /// Whole-voucher redemption of a point balance, or None below the
    /// threshold.
    pub fn redeem(&self, points: i64) -> Option<Redemption> {
        if self.min_redeem_points <= 0 || points < self.min_redeem_points {
            return None;
        }
        let vouchers = points / self.min_redeem_points;
        Some(Redemption {
            vouchers,
            points_spent: vouchers * self.min_redeem_points,
            wallet_credit: self.redeem_value.mul_ratio(vouchers, 1),
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_program() -> LoyaltyProgram {
        LoyaltyProgram {
            id: 1,
            name: "Dock Rewards".into(),
            points_per_unit_milli: 100, // 0.1 points per rupee
            min_redeem_points: 100,
            redeem_value: Money::from_major(10),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn hundred_rupees_earns_ten_points() {
        let p = sample_program();
        assert_eq!(p.points_for(Money::from_major(100)), 10);
    }

    #[test]
    fn accrual_rounds_down() {
        let p = sample_program();
        // 99.99 at 0.1/unit = 9.999 -> 9
        assert_eq!(p.points_for(Money::from_minor(9_999)), 9);
        assert_eq!(p.points_for(Money::ZERO), 0);
        assert_eq!(p.points_for(Money::from_minor(-500)), 0);
    }

    #[test]
    fn redeem_250_points_yields_two_vouchers() {
        let p = sample_program();
        let r = p.redeem(250).unwrap();
        assert_eq!(r.vouchers, 2);
        assert_eq!(r.points_spent, 200);
        assert_eq!(r.wallet_credit, Money::from_major(20));
    }

    #[test]
    fn redeem_below_threshold_is_none() {
        let p = sample_program();
        assert!(p.redeem(99).is_none());
        assert!(p.redeem(0).is_none());
    }

    #[test]
    fn redeem_exactly_at_threshold() {
        let p = sample_program();
        let r = p.redeem(100).unwrap();
        assert_eq!(r.vouchers, 1);
        assert_eq!(r.points_spent, 100);
        assert_eq!(r.wallet_credit, Money::from_major(10));
    }
}
