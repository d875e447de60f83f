//! Loyalty ledger
//!
//! Point accrual on settled payments and whole-voucher redemption into the
//! wallet. The active program drives the rates; a configured fallback rate
//! applies when no program is active.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::domain::loyalty::POINTS_MILLI_SCALE;
use crate::domain::{LoyaltyProgram, Payment, PaymentMethod, Redemption, User};
use crate::infrastructure::{LockManager, Storage};
use crate::notifications::{Event, PointsRedeemedEvent, SharedEventBus};
use crate::shared::money::MINOR_PER_MAJOR;
use crate::shared::{DomainError, DomainResult, Money};

/// Service for loyalty operations
pub struct LoyaltyService {
    storage: Arc<dyn Storage>,
    locks: Arc<LockManager>,
    event_bus: SharedEventBus,
    /// Milli-points per major unit when no program is active
    fallback_points_per_unit_milli: i64,
}

impl LoyaltyService {
    pub fn new(
        storage: Arc<dyn Storage>,
        locks: Arc<LockManager>,
        event_bus: SharedEventBus,
        fallback_points_per_unit_milli: i64,
    ) -> Self {
        Self {
            storage,
            locks,
            event_bus,
            fallback_points_per_unit_milli,
        }
    }

    /// Points earned on a payment of `amount`, per the active program or the
    /// fallback rate. Rounds down.
    pub async fn points_for(&self, amount: Money) -> DomainResult<i64> {
        if amount.minor() <= 0 {
            return Ok(0);
        }
        let rate_milli = match self.storage.get_active_loyalty_program().await? {
            Some(program) => program.points_per_unit_milli,
            None => self.fallback_points_per_unit_milli,
        };
        Ok(amount.minor() * rate_milli / (MINOR_PER_MAJOR * POINTS_MILLI_SCALE))
    }

    /// Credit accrued points onto a staged user. The caller holds the user
    /// lock and persists the clone.
    pub async fn accrue(&self, user: &mut User, amount: Money) -> DomainResult<i64> {
        let points = self.points_for(amount).await?;
        user.reward_points += points;
        Ok(points)
    }

    /// Convert whole vouchers of points into wallet credit.
    pub async fn redeem(&self, user_id: i32) -> DomainResult<Redemption> {
        let program = self
            .storage
            .get_active_loyalty_program()
            .await?
            .ok_or(DomainError::NotFound {
                entity: "LoyaltyProgram",
                field: "is_active",
                value: "true".to_string(),
            })?;

        let _user_guard = self.locks.lock_user(user_id).await?;

        let mut user = self
            .storage
            .get_user(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })?;

        let redemption = program
            .redeem(user.reward_points)
            .ok_or(DomainError::InsufficientPoints)?;

        user.reward_points -= redemption.points_spent;
        user.balance += redemption.wallet_credit;

        self.storage
            .save_payment(Payment::new(
                user_id,
                None,
                redemption.wallet_credit,
                PaymentMethod::Refund,
            ))
            .await?;
        self.storage.update_user(user).await?;

        info!(
            user_id,
            vouchers = redemption.vouchers,
            points_spent = redemption.points_spent,
            credit = %redemption.wallet_credit,
            "points redeemed"
        );
        self.event_bus
            .publish(Event::PointsRedeemed(PointsRedeemedEvent {
                user_id,
                vouchers: redemption.vouchers,
                points_spent: redemption.points_spent,
                wallet_credit: redemption.wallet_credit.minor(),
                timestamp: Utc::now(),
            }));

        Ok(redemption)
    }

    /// Admin-only: create a new program version. Activating it deactivates
    /// any previous one.
    pub async fn upsert_program(
        &self,
        admin_id: i32,
        name: String,
        points_per_unit_milli: i64,
        min_redeem_points: i64,
        redeem_value: Money,
        is_active: bool,
    ) -> DomainResult<LoyaltyProgram> {
        let admin = self
            .storage
            .get_user(admin_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: admin_id.to_string(),
            })?;
        if !admin.is_admin() {
            return Err(DomainError::Forbidden(
                "only admins may manage the loyalty program".to_string(),
            ));
        }
        if points_per_unit_milli < 0 || min_redeem_points <= 0 || !redeem_value.is_positive() {
            return Err(DomainError::InvalidInput(
                "program rates must be positive".to_string(),
            ));
        }

        let program = self
            .storage
            .save_loyalty_program(LoyaltyProgram {
                id: 0,
                name,
                points_per_unit_milli,
                min_redeem_points,
                redeem_value,
                is_active,
                created_at: Utc::now(),
            })
            .await?;
        info!(program_id = program.id, active = program.is_active, "loyalty program saved");
        Ok(program)
    }

    pub async fn get_active_program(&self) -> DomainResult<Option<LoyaltyProgram>> {
        self.storage.get_active_loyalty_program().await
    }
}

// ── Tests ──────────────────────────────────────────────────────
