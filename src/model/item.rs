use serde::{Deserialize, Serialize};

/// The cleaning service requested for a garment line.
///
/// Each service carries a processing duration used to derive the delivery
/// window from the pickup window (see
/// [`DraftOrderStore::set_schedule`](crate::draft::DraftOrderStore::set_schedule)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceType {
    WashFold,
    DryClean,
    HangDry,
    IronOnly,
}

impl ServiceType {
    /// Hours the facility needs before the garment is ready for delivery.
    pub fn processing_hours(self) -> i64 {
        match self {
            ServiceType::WashFold => 24,
            ServiceType::DryClean => 48,
            ServiceType::HangDry => 24,
            ServiceType::IronOnly => 12,
        }
    }

    /// Display name for receipts and line summaries.
    pub fn label(self) -> &'static str {
        match self {
            ServiceType::WashFold => "Wash & fold",
            ServiceType::DryClean => "Dry cleaning",
            ServiceType::HangDry => "Hang dry",
            ServiceType::IronOnly => "Iron only",
        }
    }
}

/// One garment line on an order.
///
/// `unit_price` is expressed in the currency's minor units (e.g. cents), so
/// pricing arithmetic stays integral. Mutable while the order is in draft,
/// immutable once submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub garment_type_id: String,
    pub service: ServiceType,
    pub description: String,
    pub quantity: u32,
    pub weight_lbs: f64,
    pub unit_price: i64,
}

impl OrderItem {
    pub fn new(
        garment_type_id: impl Into<String>,
        service: ServiceType,
        description: impl Into<String>,
        quantity: u32,
        weight_lbs: f64,
        unit_price: i64,
    ) -> Self {
        Self {
            garment_type_id: garment_type_id.into(),
            service,
            description: description.into(),
            quantity,
            weight_lbs,
            unit_price,
        }
    }

    /// Line total in minor units.
    pub fn line_total(&self) -> i64 {
        self.unit_price * i64::from(self.quantity)
    }
}

/// Partial update applied to a draft item in place.
///
/// Only quantity and price are mutable on an existing line; changing the
/// garment or service is modelled as remove + add.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItemPatch {
    pub quantity: Option<u32>,
    pub unit_price: Option<i64>,
    pub description: Option<String>,
}
