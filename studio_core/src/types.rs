//! Core domain types for the studio ledger.
//!
//! This module defines the fundamental types used throughout the system:
//! - Typed entity identifiers
//! - Clients, staff and their shared contact details
//! - Rentable equipment and its categories
//! - Sessions, their status machine and booking requests

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Condition label given to equipment added without one
pub const DEFAULT_CONDITION: &str = "good";

// ============================================================================
// Identifiers
// ============================================================================

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub fn get(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

entity_id!(
    /// Client identifier
    ClientId
);
entity_id!(
    /// Staff member identifier
    StaffId
);
entity_id!(
    /// Equipment item identifier
    EquipmentId
);
entity_id!(
    /// Session (booking) identifier
    SessionId
);

// ============================================================================
// People
// ============================================================================

/// Name and contact details shared by clients and staff
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
}

impl Contact {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A studio client
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: ClientId,
    pub contact: Contact,
    pub registered_at: DateTime<Utc>,
    /// Number of sessions ever booked; never decremented
    pub sessions_count: u32,
}

/// A staff member (photographer) whose time is billed per hour
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Staff {
    pub id: StaffId,
    pub contact: Contact,
    pub specialization: String,
    pub hourly_rate: Decimal,
    pub experience_years: u32,
}

// ============================================================================
// Equipment
// ============================================================================

/// Category of rentable equipment
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCategory {
    PrimaryDevice,
    Optic,
    Lighting,
    Backdrop,
    Other,
}

impl EquipmentCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            EquipmentCategory::PrimaryDevice => "primary_device",
            EquipmentCategory::Optic => "optic",
            EquipmentCategory::Lighting => "lighting",
            EquipmentCategory::Backdrop => "backdrop",
            EquipmentCategory::Other => "other",
        }
    }
}

impl fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EquipmentCategory {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "primary_device" | "primary-device" | "camera" => Ok(EquipmentCategory::PrimaryDevice),
            "optic" | "lens" => Ok(EquipmentCategory::Optic),
            "lighting" | "light" => Ok(EquipmentCategory::Lighting),
            "backdrop" | "background" => Ok(EquipmentCategory::Backdrop),
            "other" => Ok(EquipmentCategory::Other),
            other => Err(crate::Error::validation(format!(
                "unknown equipment category '{}'",
                other
            ))),
        }
    }
}

/// A rentable equipment item
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    pub category: EquipmentCategory,
    pub model: String,
    /// Rental price per hour
    pub rental_price: Decimal,
    /// False while reserved by a planned or in-progress session
    pub available: bool,
    pub condition: String,
}

// ============================================================================
// Sessions
// ============================================================================

/// Lifecycle status of a session
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl SessionStatus {
    /// Planned and in-progress sessions hold their equipment
    pub fn is_active(self) -> bool {
        matches!(self, SessionStatus::Planned | SessionStatus::InProgress)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionStatus::Planned => "planned",
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

/// An operator-requested status change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionTransition {
    Start,
    Complete,
    Cancel,
}

impl SessionTransition {
    pub fn verb(self) -> &'static str {
        match self {
            SessionTransition::Start => "start",
            SessionTransition::Complete => "complete",
            SessionTransition::Cancel => "cancel",
        }
    }

    /// Status reached by applying this transition to `from`, if permitted
    pub fn target(self, from: SessionStatus) -> Option<SessionStatus> {
        match (from, self) {
            (SessionStatus::Planned, SessionTransition::Start) => Some(SessionStatus::InProgress),
            (SessionStatus::Planned | SessionStatus::InProgress, SessionTransition::Complete) => {
                Some(SessionStatus::Completed)
            }
            (SessionStatus::Planned | SessionStatus::InProgress, SessionTransition::Cancel) => {
                Some(SessionStatus::Cancelled)
            }
            _ => None,
        }
    }
}

/// A booked session consuming staff time and equipment
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub id: SessionId,
    /// Not guaranteed to resolve under the lenient booking policy
    pub client_id: ClientId,
    pub staff_id: StaffId,
    pub equipment_ids: Vec<EquipmentId>,
    pub scheduled_at: NaiveDateTime,
    pub duration_hours: u32,
    pub session_type: String,
    pub location: String,
    pub status: SessionStatus,
    /// Fixed at booking time from the rates then in effect
    pub total_cost: Decimal,
}

// ============================================================================
// Requests
// ============================================================================

/// Fields collected to register a client
#[derive(Clone, Debug, Default)]
pub struct NewClient {
    pub contact: Contact,
}

/// Fields collected to register a staff member
#[derive(Clone, Debug, Default)]
pub struct NewStaff {
    pub contact: Contact,
    pub specialization: String,
    pub hourly_rate: Decimal,
    pub experience_years: u32,
}

/// Fields collected to register an equipment item
#[derive(Clone, Debug)]
pub struct NewEquipment {
    pub name: String,
    pub category: EquipmentCategory,
    pub model: String,
    pub rental_price: Decimal,
    /// Falls back to [`DEFAULT_CONDITION`] when absent or blank
    pub condition: Option<String>,
}

/// Fields collected to book a session
#[derive(Clone, Debug)]
pub struct BookingRequest {
    pub client_id: ClientId,
    pub staff_id: StaffId,
    pub equipment_ids: Vec<EquipmentId>,
    pub scheduled_at: NaiveDateTime,
    pub duration_hours: u32,
    pub session_type: String,
    pub location: String,
}
