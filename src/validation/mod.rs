//! Validation engine: completeness and consistency checks on a draft order.
//!
//! [`validate`] never short-circuits: every applicable issue is collected and
//! returned together so the UI can annotate all offending fields at once. It
//! is also re-run unconditionally inside
//! [`OrderSubmissionClient::submit`](crate::submission::OrderSubmissionClient::submit),
//! regardless of any earlier screen-level check.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::DraftOrder;

/// Identifies the draft field an issue refers to, so screens can highlight
/// the right control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Items,
    Location,
    PickupWindow,
    DeliveryWindow,
}

/// One reason the draft cannot be submitted yet.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("Add at least one garment to your order")]
    NoItems,

    #[error("All items must have a quantity of at least one")]
    ZeroQuantityItem,

    #[error("Choose a pickup location before submitting")]
    MissingLocation,

    #[error("We couldn't get a GPS fix for your location; pick it on the map")]
    NoGpsFix,

    #[error("Choose a pickup time")]
    MissingPickupWindow,

    #[error("Pickup window must start before it ends")]
    PickupWindowInverted,

    #[error("Delivery window must start before it ends")]
    DeliveryWindowInverted,

    #[error("Delivery must start after the pickup window has closed")]
    DeliveryOverlapsPickup,
}

impl ValidationIssue {
    /// The field this issue should be attached to.
    pub fn field(&self) -> DraftField {
        match self {
            ValidationIssue::NoItems | ValidationIssue::ZeroQuantityItem => DraftField::Items,
            ValidationIssue::MissingLocation | ValidationIssue::NoGpsFix => DraftField::Location,
            ValidationIssue::MissingPickupWindow | ValidationIssue::PickupWindowInverted => {
                DraftField::PickupWindow
            }
            ValidationIssue::DeliveryWindowInverted | ValidationIssue::DeliveryOverlapsPickup => {
                DraftField::DeliveryWindow
            }
        }
    }
}

/// Checks the draft for submission readiness. Empty result means valid.
///
/// Checks are independent; a draft missing both items and location reports
/// both issues, not just the first.
pub fn validate(draft: &DraftOrder) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if draft.items.is_empty() {
        issues.push(ValidationIssue::NoItems);
    } else if draft.items.iter().any(|i| i.quantity == 0) {
        issues.push(ValidationIssue::ZeroQuantityItem);
    }

    match &draft.location {
        None => issues.push(ValidationIssue::MissingLocation),
        Some(loc) if !loc.has_gps_fix() => issues.push(ValidationIssue::NoGpsFix),
        Some(_) => {}
    }

    match &draft.pickup_window {
        None => issues.push(ValidationIssue::MissingPickupWindow),
        Some(w) if !w.is_well_formed() => issues.push(ValidationIssue::PickupWindowInverted),
        Some(_) => {}
    }

    if let Some(w) = &draft.delivery_window {
        if !w.is_well_formed() {
            issues.push(ValidationIssue::DeliveryWindowInverted);
        }
    }

    if let (Some(pickup), Some(delivery)) = (&draft.pickup_window, &draft.delivery_window) {
        // Strictly before: a delivery window starting the second pickup ends
        // is still an overlap from the courier's point of view.
        if pickup.end >= delivery.start {
            issues.push(ValidationIssue::DeliveryOverlapsPickup);
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomerLocation, OrderItem, ServiceType, TimeWindow};
    use chrono::{Duration, TimeZone, Utc};

    fn valid_draft() -> DraftOrder {
        let pickup_start = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        DraftOrder {
            items: vec![OrderItem::new("shirt", ServiceType::WashFold, "shirts", 2, 1.5, 2000)],
            pickup_window: Some(TimeWindow::new(pickup_start, pickup_start + Duration::hours(2))),
            delivery_window: Some(TimeWindow::new(
                pickup_start + Duration::hours(26),
                pickup_start + Duration::hours(28),
            )),
            location: Some(CustomerLocation::new(0.39, 32.58, "Kira Rd, Kampala, Uganda", "", "")),
            notes: String::new(),
            payment_method_hint: None,
        }
    }

    #[test]
    fn valid_draft_has_no_issues() {
        assert!(validate(&valid_draft()).is_empty());
    }

    #[test]
    fn missing_items_and_location_both_reported() {
        let mut draft = valid_draft();
        draft.items.clear();
        draft.location = None;
        let issues = validate(&draft);
        assert!(issues.contains(&ValidationIssue::NoItems));
        assert!(issues.contains(&ValidationIssue::MissingLocation));
        assert!(issues.len() >= 2);
    }

    #[test]
    fn zero_latitude_fails_even_with_location_present() {
        let mut draft = valid_draft();
        if let Some(loc) = draft.location.as_mut() {
            loc.latitude = 0.0;
        }
        let issues = validate(&draft);
        assert_eq!(issues, vec![ValidationIssue::NoGpsFix]);
        assert_eq!(issues[0].field(), DraftField::Location);
    }

    #[test]
    fn delivery_must_start_after_pickup_closes() {
        let mut draft = valid_draft();
        let pickup = draft.pickup_window.unwrap();
        // Delivery starting exactly at pickup end still counts as overlap.
        draft.delivery_window =
            Some(TimeWindow::new(pickup.end, pickup.end + Duration::hours(2)));
        let issues = validate(&draft);
        assert_eq!(issues, vec![ValidationIssue::DeliveryOverlapsPickup]);
    }

    #[test]
    fn inverted_windows_reported_independently() {
        let mut draft = valid_draft();
        let pickup = draft.pickup_window.unwrap();
        draft.pickup_window = Some(TimeWindow::new(pickup.end, pickup.start));
        let delivery = draft.delivery_window.unwrap();
        draft.delivery_window = Some(TimeWindow::new(delivery.end, delivery.start));
        let issues = validate(&draft);
        assert!(issues.contains(&ValidationIssue::PickupWindowInverted));
        assert!(issues.contains(&ValidationIssue::DeliveryWindowInverted));
    }
}
