use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Booking lifecycle state. Creation assigns `Pending`; no transition is
/// performed by this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Pending,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "Pending"),
        }
    }
}

/// An immutable booking record bound to the purchasing identity.
#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: i64,
    pub tourist_id: i64,
    pub package_id: i64,
    pub party_size: u32,
    pub total_cost: Money,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub tourist_id: i64,
    pub package_id: i64,
    pub party_size: u32,
    pub total_cost: Money,
    pub status: BookingStatus,
}

/// A booking joined with its package and, for admin listings only, the
/// purchasing tourist. Identity fields are absent from tourist-facing
/// serializations rather than null.
#[derive(Debug, Clone, Serialize)]
pub struct BookingView {
    pub booking_id: i64,
    pub created_at: DateTime<Utc>,
    pub party_size: u32,
    pub total_cost: Money,
    pub status: BookingStatus,
    pub package_name: String,
    pub destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tourist_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tourist_email: Option<String>,
}
