//! User domain entity

use chrono::{DateTime, Utc};

use crate::shared::Money;

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    /// Regular user booking spaces
    Rider,
    /// Lists and owns parking facilities
    Owner,
    /// Verifies facilities, manages the loyalty program
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rider => "rider",
            Self::Owner => "owner",
            Self::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "owner" => Self::Owner,
            "admin" => Self::Admin,
            _ => Self::Rider,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered vehicle
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: i32,
    pub vehicle_type: String,
    pub license_plate: String,
    pub is_ev: bool,
    pub is_default: bool,
}

/// Platform user account.
///
/// Identity (credentials, profile) lives in the external identity provider;
/// the core only reads the role and mutates balance, points and linked
/// payment instruments transactionally.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub role: UserRole,
    /// Stored wallet balance, never negative
    pub balance: Money,
    /// Loyalty point balance, never negative
    pub reward_points: i64,
    /// Linked long-range contactless tag (FASTag), if any
    pub fastag_id: Option<String>,
    /// Linked short-range contactless card (NFC), if any
    pub nfc_card_id: Option<String>,
    pub vehicles: Vec<Vehicle>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: i32, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            name: name.into(),
            role,
            balance: Money::ZERO,
            reward_points: 0,
            fastag_id: None,
            nfc_card_id: None,
            vehicles: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// The default vehicle, or the first registered one.
    pub fn default_vehicle(&self) -> Option<&Vehicle> {
        self.vehicles
            .iter()
            .find(|v| v.is_default)
            .or_else(|| self.vehicles.first())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrip() {
        for role in [UserRole::Rider, UserRole::Owner, UserRole::Admin] {
            assert_eq!(UserRole::from_str(role.as_str()), role);
        }
    }

    #[test]
    fn unknown_role_defaults_to_rider() {
        assert_eq!(UserRole::from_str("something"), UserRole::Rider);
    }

    #[test]
    fn new_user_starts_empty() {
        let u = User::new(1, "Asha", UserRole::Rider);
        assert_eq!(u.balance, Money::ZERO);
        assert_eq!(u.reward_points, 0);
        assert!(u.fastag_id.is_none());
        assert!(!u.is_admin());
    }

    #[test]
    fn default_vehicle_prefers_flag() {
        let mut u = User::new(1, "Asha", UserRole::Rider);
        u.vehicles.push(Vehicle {
            id: 1,
            vehicle_type: "Car".into(),
            license_plate: "KA01AB1234".into(),
            is_ev: false,
            is_default: false,
        });
        u.vehicles.push(Vehicle {
            id: 2,
            vehicle_type: "EV".into(),
            license_plate: "TN69EV0001".into(),
            is_ev: true,
            is_default: true,
        });
        assert_eq!(u.default_vehicle().map(|v| v.id), Some(2));
    }
}
