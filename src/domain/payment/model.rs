//! Payment ledger domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::shared::Money;

/// How a payment was (or will be) settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    /// Stored wallet balance
    Wallet,
    /// Long-range contactless tag, charged externally
    FasTag,
    /// Short-range contactless card, charged externally
    Nfc,
    CreditCard,
    DebitCard,
    /// Ledger-only entry for money returned to a user
    Refund,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wallet => "wallet",
            Self::FasTag => "fastag",
            Self::Nfc => "nfc",
            Self::CreditCard => "credit_card",
            Self::DebitCard => "debit_card",
            Self::Refund => "refund",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "wallet" => Some(Self::Wallet),
            "fastag" => Some(Self::FasTag),
            "nfc" => Some(Self::Nfc),
            "credit_card" => Some(Self::CreditCard),
            "debit_card" => Some(Self::DebitCard),
            "refund" => Some(Self::Refund),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An append-only payments ledger entry. Amounts are always positive; the
/// direction is carried by the method (`Refund` entries flow back to the
/// user).
#[derive(Debug, Clone)]
pub struct Payment {
    /// Transaction id, `txn_<uuid>`
    pub id: String,
    pub user_id: i32,
    /// Absent for entries not tied to a booking (wallet top-up, voucher
    /// credit)
    pub reservation_id: Option<i32>,
    pub amount: Money,
    pub method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        user_id: i32,
        reservation_id: Option<i32>,
        amount: Money,
        method: PaymentMethod,
    ) -> Self {
        Self {
            id: Self::new_txn_id(),
            user_id,
            reservation_id,
            amount,
            method,
            created_at: Utc::now(),
        }
    }

    /// Collision-free transaction id.
    pub fn new_txn_id() -> String {
        format!("txn_{}", Uuid::new_v4())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn method_roundtrip() {
        for method in [
            PaymentMethod::Wallet,
            PaymentMethod::FasTag,
            PaymentMethod::Nfc,
            PaymentMethod::CreditCard,
            PaymentMethod::DebitCard,
            PaymentMethod::Refund,
        ] {
            assert_eq!(PaymentMethod::from_str(method.as_str()), Some(method));
        }
        assert_eq!(PaymentMethod::from_str("upi"), None);
    }

    #[test]
    fn txn_ids_are_prefixed_and_unique() {
        let ids: HashSet<String> = (0..100).map(|_| Payment::new_txn_id()).collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.iter().all(|id| id.starts_with("txn_")));
    }

    #[test]
    fn new_payment_carries_fields() {
        let p = Payment::new(7, Some(3), Money::from_major(80), PaymentMethod::Wallet);
        assert_eq!(p.user_id, 7);
        assert_eq!(p.reservation_id, Some(3));
        assert_eq!(p.amount, Money::from_major(80));
        assert_eq!(p.method, PaymentMethod::Wallet);
    }
}
