//! Payment settlement
//!
//! One `Instrument` implementation per payment method, dispatched through a
//! table keyed by `PaymentMethod`. Instruments charge a staged user clone;
//! the caller persists on success, so a decline leaves no trace.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use tracing::debug;

use crate::domain::{PaymentMethod, User};
use crate::shared::{DomainError, DomainResult, Money};

/// A way of taking money from a user.
pub trait Instrument: Send + Sync {
    /// Charge `amount` against the staged `user`. Wallet-style instruments
    /// debit the balance; external ones only validate linkage.
    fn charge(&self, user: &mut User, amount: Money) -> DomainResult<()>;
}

/// Stored wallet balance.
struct WalletInstrument;

impl Instrument for WalletInstrument {
    fn charge(&self, user: &mut User, amount: Money) -> DomainResult<()> {
        if user.balance < amount {
            return Err(DomainError::InsufficientFunds);
        }
        user.balance -= amount;
        Ok(())
    }
}

/// Contactless tag or card billed externally; only linkage is checked here.
struct LinkedTagInstrument {
    label: &'static str,
    select: fn(&User) -> Option<&String>,
}

impl Instrument for LinkedTagInstrument {
    fn charge(&self, user: &mut User, _amount: Money) -> DomainResult<()> {
        match (self.select)(user) {
            Some(id) if !id.is_empty() => Ok(()),
            _ => Err(DomainError::InstrumentNotLinked(self.label)),
        }
    }
}

/// Simulated card gateway. Declines with the configured probability; a real
/// acquirer integration would live behind the same trait.
struct CardGateway {
    decline_probability: f64,
}

impl Instrument for CardGateway {
    fn charge(&self, _user: &mut User, amount: Money) -> DomainResult<()> {
        if rand::thread_rng().gen::<f64>() < self.decline_probability {
            debug!(%amount, "simulated gateway decline");
            return Err(DomainError::GatewayDeclined);
        }
        Ok(())
    }
}

/// Dispatch table over the configured instruments.
pub struct PaymentService {
    instruments: HashMap<PaymentMethod, Arc<dyn Instrument>>,
}

impl PaymentService {
    pub fn new(gateway_decline_probability: f64) -> Self {
        let mut instruments: HashMap<PaymentMethod, Arc<dyn Instrument>> = HashMap::new();
        instruments.insert(PaymentMethod::Wallet, Arc::new(WalletInstrument));
        instruments.insert(
            PaymentMethod::FasTag,
            Arc::new(LinkedTagInstrument {
                label: "fastag",
                select: |u| u.fastag_id.as_ref(),
            }),
        );
        instruments.insert(
            PaymentMethod::Nfc,
            Arc::new(LinkedTagInstrument {
                label: "nfc card",
                select: |u| u.nfc_card_id.as_ref(),
            }),
        );
        let gateway = Arc::new(CardGateway {
            decline_probability: gateway_decline_probability,
        });
        instruments.insert(PaymentMethod::CreditCard, gateway.clone());
        instruments.insert(PaymentMethod::DebitCard, gateway);
        Self { instruments }
    }

    /// Charge `amount` via `method` against the staged `user`.
    pub fn charge(&self, user: &mut User, method: PaymentMethod, amount: Money) -> DomainResult<()> {
        if !amount.is_positive() {
            return Err(DomainError::InvalidInput(
                "payment amount must be positive".into(),
            ));
        }
        let instrument = self.instruments.get(&method).ok_or_else(|| {
            DomainError::InvalidInput(format!("{} cannot be charged", method))
        })?;
        instrument.charge(user, amount)
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    fn sample_user(balance_major: i64) -> User {
        let mut u = User::new(3, "Asha", UserRole::Rider);
        u.balance = Money::from_major(balance_major);
        u
    }

    #[test]
    fn wallet_debits_balance() {
        let svc = PaymentService::new(0.0);
        let mut u = sample_user(500);
        svc.charge(&mut u, PaymentMethod::Wallet, Money::from_major(80))
            .unwrap();
        assert_eq!(u.balance, Money::from_major(420));
    }

    #[test]
    fn wallet_balance_fifty_cannot_pay_eighty() {
        let svc = PaymentService::new(0.0);
        let mut u = sample_user(50);
        let err = svc
            .charge(&mut u, PaymentMethod::Wallet, Money::from_major(80))
            .unwrap_err();
        assert!(matches!(err, DomainError::InsufficientFunds));
        // Nothing debited on failure
        assert_eq!(u.balance, Money::from_major(50));
    }

    #[test]
    fn fastag_requires_linked_tag() {
        let svc = PaymentService::new(0.0);
        let mut u = sample_user(0);
        let err = svc
            .charge(&mut u, PaymentMethod::FasTag, Money::from_major(80))
            .unwrap_err();
        assert!(matches!(err, DomainError::InstrumentNotLinked("fastag")));

        u.fastag_id = Some("FT-1001".into());
        svc.charge(&mut u, PaymentMethod::FasTag, Money::from_major(80))
            .unwrap();
        // External billing, wallet untouched
        assert_eq!(u.balance, Money::ZERO);
    }

    #[test]
    fn nfc_rejects_empty_linkage() {
        let svc = PaymentService::new(0.0);
        let mut u = sample_user(0);
        u.nfc_card_id = Some(String::new());
        let err = svc
            .charge(&mut u, PaymentMethod::Nfc, Money::from_major(10))
            .unwrap_err();
        assert!(matches!(err, DomainError::InstrumentNotLinked(_)));
    }

    #[test]
    fn card_gateway_decline_and_accept() {
        let always_decline = PaymentService::new(1.0);
        let mut u = sample_user(0);
        let err = always_decline
            .charge(&mut u, PaymentMethod::CreditCard, Money::from_major(80))
            .unwrap_err();
        assert!(matches!(err, DomainError::GatewayDeclined));
        assert!(err.is_retryable());

        let never_decline = PaymentService::new(0.0);
        never_decline
            .charge(&mut u, PaymentMethod::DebitCard, Money::from_major(80))
            .unwrap();
    }

    #[test]
    fn non_positive_amount_rejected() {
        let svc = PaymentService::new(0.0);
        let mut u = sample_user(100);
        assert!(svc
            .charge(&mut u, PaymentMethod::Wallet, Money::ZERO)
            .is_err());
        assert!(svc
            .charge(&mut u, PaymentMethod::Wallet, Money::from_minor(-100))
            .is_err());
    }

    #[test]
    fn refund_is_not_chargeable() {
        let svc = PaymentService::new(0.0);
        let mut u = sample_user(100);
        let err = svc
            .charge(&mut u, PaymentMethod::Refund, Money::from_major(10))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }
}
