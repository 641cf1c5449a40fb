use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CustomerLocation, OrderItem};

/// A half-open time range with an inclusive start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// A window is well-formed when it has positive width.
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }
}

/// The in-progress order being assembled across screens.
///
/// Created empty at flow start, mutated through
/// [`DraftOrderStore`](crate::draft::DraftOrderStore) commands, cleared on
/// successful submission or explicit cancel. Exactly one session owns a
/// draft; it is never shared across concurrent flows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftOrder {
    pub items: Vec<OrderItem>,
    pub pickup_window: Option<TimeWindow>,
    /// Derived from `pickup_window` plus service processing time; never set
    /// directly by callers.
    pub delivery_window: Option<TimeWindow>,
    pub location: Option<CustomerLocation>,
    pub notes: String,
    pub payment_method_hint: Option<String>,
}

impl DraftOrder {
    /// Total garment count across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
            && self.pickup_window.is_none()
            && self.location.is_none()
            && self.notes.is_empty()
    }
}
