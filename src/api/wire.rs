//! Wire shape for `POST /orders`.
//!
//! The backend's contract has two quirks the transform honours: coordinates
//! travel as strings, and timestamps are ISO-8601 text. City and country fall
//! back to segments of the free-form address when the structured fields were
//! never filled in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{DraftOrder, OrderItem, ServiceType};

/// The draft was missing a field the wire shape requires. Validation runs
/// before the transform, so reaching this from [`crate::submission`] means a
/// programming error rather than user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IncompleteDraft {
    #[error("Draft has no location")]
    MissingLocation,
    #[error("Draft has no pickup window")]
    MissingPickupWindow,
    #[error("Draft has no delivery window")]
    MissingDeliveryWindow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireLocation {
    pub latitude: String,
    pub longitude: String,
    pub address_text: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOrderItem {
    pub garment_type_id: String,
    pub service_type: ServiceType,
    pub description: String,
    pub quantity: u32,
    pub weight_lbs: f64,
    pub unit_price: i64,
}

impl From<&OrderItem> for WireOrderItem {
    fn from(item: &OrderItem) -> Self {
        Self {
            garment_type_id: item.garment_type_id.clone(),
            service_type: item.service,
            description: item.description.clone(),
            quantity: item.quantity,
            weight_lbs: item.weight_lbs,
            unit_price: item.unit_price,
        }
    }
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireOrderRequest {
    pub customer_location: WireLocation,
    pub items: Vec<WireOrderItem>,
    pub preferred_pickup_time_start: String,
    pub preferred_pickup_time_end: String,
    pub preferred_delivery_time_start: String,
    pub preferred_delivery_time_end: String,
    pub notes: String,
    pub tags: Vec<String>,
}

impl TryFrom<&DraftOrder> for WireOrderRequest {
    type Error = IncompleteDraft;

    fn try_from(draft: &DraftOrder) -> Result<Self, Self::Error> {
        let location = draft.location.as_ref().ok_or(IncompleteDraft::MissingLocation)?;
        let pickup = draft.pickup_window.ok_or(IncompleteDraft::MissingPickupWindow)?;
        let delivery = draft.delivery_window.ok_or(IncompleteDraft::MissingDeliveryWindow)?;

        Ok(Self {
            customer_location: WireLocation {
                latitude: location.latitude.to_string(),
                longitude: location.longitude.to_string(),
                address_text: location.address_text.clone(),
                city: location.city_or_fallback(),
                country: location.country_or_fallback(),
            },
            items: draft.items.iter().map(WireOrderItem::from).collect(),
            preferred_pickup_time_start: pickup.start.to_rfc3339(),
            preferred_pickup_time_end: pickup.end.to_rfc3339(),
            preferred_delivery_time_start: delivery.start.to_rfc3339(),
            preferred_delivery_time_end: delivery.end.to_rfc3339(),
            notes: draft.notes.clone(),
            tags: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerLocation, TimeWindow};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn serialises_coordinates_as_strings() {
        let start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let draft = DraftOrder {
            items: vec![OrderItem::new("shirt", ServiceType::DryClean, "silk shirt", 1, 0.5, 8000)],
            pickup_window: Some(TimeWindow::new(start, start + Duration::hours(2))),
            delivery_window: Some(TimeWindow::new(
                start + Duration::hours(50),
                start + Duration::hours(52),
            )),
            location: Some(CustomerLocation::new(0.39, 32.58, "Kira Rd, Kampala, Uganda", "", "")),
            notes: "gate code 4412".into(),
            payment_method_hint: None,
        };

        let request = WireOrderRequest::try_from(&draft).unwrap();
        assert_eq!(request.customer_location.latitude, "0.39");
        assert_eq!(request.customer_location.city, "Kampala");
        assert_eq!(request.customer_location.country, "Uganda");
        assert_eq!(request.preferred_pickup_time_start, start.to_rfc3339());

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["customerLocation"]["latitude"], "0.39");
        assert_eq!(json["items"][0]["serviceType"], "DRY_CLEAN");
    }

    #[test]
    fn incomplete_draft_is_rejected() {
        let draft = DraftOrder::default();
        assert_eq!(
            WireOrderRequest::try_from(&draft),
            Err(IncompleteDraft::MissingLocation)
        );
    }
}
