use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::OrderItem;

/// Server-side order status, parsed from the backend's loose status strings
/// into one closed enum.
///
/// This is the single source of truth for everything derived from status:
/// milestone position ([`OrderStatus::milestone_index`]), display label
/// ([`OrderStatus::label`]) and cancellability
/// ([`OrderStatus::is_cancellable`]). Screens consume these methods instead
/// of re-declaring their own mapping tables.
///
/// `TemporarilyAssigned` is kept distinct from `Scheduled` even though both
/// map to the same milestone: the backend treats them differently and one
/// screen styles them differently, so presentation decides how to render
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    TemporarilyAssigned,
    Scheduled,
    PickedUp,
    InCleaning,
    ReadyForDelivery,
    Delivered,
    Cancelled,
}

/// The backend sent a status string we do not recognise.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Unrecognised order status: {0}")]
pub struct ParseStatusError(pub String);

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    /// Case-insensitive parse covering the aliases the backend has been
    /// observed to emit ("pending", "PICKUP", "washing", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s.trim().to_ascii_lowercase().as_str() {
            "pending" => OrderStatus::Pending,
            "temporarily_assigned" | "temp_assigned" => OrderStatus::TemporarilyAssigned,
            "scheduled" | "assigned" | "confirmed" => OrderStatus::Scheduled,
            "pickup" | "picked_up" => OrderStatus::PickedUp,
            "washing" | "cleaning" | "in_cleaning" | "processing" => OrderStatus::InCleaning,
            "ready_for_delivery" | "ready" | "out_for_delivery" => OrderStatus::ReadyForDelivery,
            "delivered" | "completed" => OrderStatus::Delivered,
            "cancelled" | "canceled" => OrderStatus::Cancelled,
            _ => return Err(ParseStatusError(s.to_string())),
        };
        Ok(status)
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = ParseStatusError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> String {
        status.wire_name().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl OrderStatus {
    /// Canonical wire spelling used when the client writes a status back.
    pub fn wire_name(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::TemporarilyAssigned => "temporarily_assigned",
            OrderStatus::Scheduled => "scheduled",
            OrderStatus::PickedUp => "picked_up",
            OrderStatus::InCleaning => "in_cleaning",
            OrderStatus::ReadyForDelivery => "ready_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Customer-facing label.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Order placed",
            OrderStatus::TemporarilyAssigned => "Finding your cleaner",
            OrderStatus::Scheduled => "Pickup scheduled",
            OrderStatus::PickedUp => "Picked up",
            OrderStatus::InCleaning => "In cleaning",
            OrderStatus::ReadyForDelivery => "Ready for delivery",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Index of the furthest milestone this status has reached on the
    /// Scheduled → Pickup → In cleaning → Ready → Delivered ladder.
    /// `None` for cancelled orders, which leave the ladder entirely.
    pub fn milestone_index(self) -> Option<usize> {
        match self {
            OrderStatus::Pending | OrderStatus::TemporarilyAssigned | OrderStatus::Scheduled => {
                Some(0)
            }
            OrderStatus::PickedUp => Some(1),
            OrderStatus::InCleaning => Some(2),
            OrderStatus::ReadyForDelivery => Some(3),
            OrderStatus::Delivered => Some(4),
            OrderStatus::Cancelled => None,
        }
    }

    /// The customer may cancel only before the courier is on their way:
    /// once the order reaches pickup the backend rejects cancellation.
    pub fn is_cancellable(self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::TemporarilyAssigned | OrderStatus::Scheduled
        )
    }

    /// Delivered and Cancelled orders never change status again.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// Per-stage transition timestamps, when the backend supplies them.
///
/// Most deployments only ever send `created_at`; the projector synthesizes
/// stage times from fixed offsets when a field here is absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimestamps {
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub picked_up_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub cleaning_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub ready_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
}

/// An order as persisted by the backend.
///
/// Immutable from the client's perspective except for `status`, which the
/// backend advances monotonically (see [`crate::tracking`] for how regressions
/// are handled).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedOrder {
    pub id: u64,
    pub uuid: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub pickup_address: String,
    pub delivery_address: String,
    pub subtotal: i64,
    pub tax_amount: i64,
    pub total_amount: i64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub stage_timestamps: Option<StageTimestamps>,
}
