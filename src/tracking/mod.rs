//! Status tracking projector: turns a fetched order's coarse status into the
//! customer-facing milestone timeline.
//!
//! [`project`] is a pure function over the order and the current time; it is
//! re-run on every render and nothing here is persisted. Milestone position
//! comes from the one canonical table on
//! [`OrderStatus`](crate::model::OrderStatus), never from per-screen maps.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{OrderStatus, StageTimestamps, SubmittedOrder};

/// One step on the delivery timeline, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneKey {
    Scheduled,
    Pickup,
    InCleaning,
    ReadyForDelivery,
    Delivered,
}

/// The canonical milestone ladder.
pub const MILESTONES: [MilestoneKey; 5] = [
    MilestoneKey::Scheduled,
    MilestoneKey::Pickup,
    MilestoneKey::InCleaning,
    MilestoneKey::ReadyForDelivery,
    MilestoneKey::Delivered,
];

impl MilestoneKey {
    pub fn label(self) -> &'static str {
        match self {
            MilestoneKey::Scheduled => "Scheduled",
            MilestoneKey::Pickup => "Pickup",
            MilestoneKey::InCleaning => "In cleaning",
            MilestoneKey::ReadyForDelivery => "Ready for delivery",
            MilestoneKey::Delivered => "Delivered",
        }
    }

    /// Fixed offset from order creation used to estimate this stage's time
    /// when the backend supplies no per-stage timestamp. A presentation
    /// approximation, not history.
    fn estimate_offset(self) -> Duration {
        match self {
            MilestoneKey::Scheduled => Duration::hours(0),
            MilestoneKey::Pickup => Duration::hours(24),
            MilestoneKey::InCleaning => Duration::hours(26),
            MilestoneKey::ReadyForDelivery => Duration::hours(48),
            MilestoneKey::Delivered => Duration::hours(50),
        }
    }

    /// The backend-supplied timestamp for this stage, when present.
    fn recorded_at(self, stages: &StageTimestamps) -> Option<DateTime<Utc>> {
        match self {
            MilestoneKey::Scheduled => stages.scheduled_at,
            MilestoneKey::Pickup => stages.picked_up_at,
            MilestoneKey::InCleaning => stages.cleaning_at,
            MilestoneKey::ReadyForDelivery => stages.ready_at,
            MilestoneKey::Delivered => stages.delivered_at,
        }
    }
}

/// One rendered timeline entry. Only completed milestones carry a timestamp.
/// Derived fresh on every projection, so it only ever serializes outward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackingMilestone {
    pub key: MilestoneKey,
    pub label: &'static str,
    pub completed: bool,
    pub timestamp: Option<DateTime<Utc>>,
}

/// The projected timeline for one order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingProjection {
    pub milestones: Vec<TrackingMilestone>,
    /// Terminal, out-of-band state: the timeline is frozen and screens
    /// render the cancellation banner instead of further progress.
    pub cancelled: bool,
    pub status: OrderStatus,
}

impl TrackingProjection {
    /// Number of completed milestones, useful for progress bars.
    pub fn completed_count(&self) -> usize {
        self.milestones.iter().filter(|m| m.completed).count()
    }
}

/// Projects the order's status onto the milestone ladder.
///
/// A status that maps to a later milestone completes all earlier ones. The
/// projection is computed fresh from the current status every time: if the
/// server ever moved a status backwards, the next projection would simply
/// show fewer completed milestones. This is a known edge, not a guaranteed
/// invariant, since there is no client-side mechanism to regress a milestone
/// that was already rendered.
///
/// Timestamps prefer the backend's per-stage times and fall back to
/// `created_at` plus fixed offsets, capped at `now` so an estimate never
/// lands in the future for a stage that has already happened.
pub fn project(order: &SubmittedOrder, now: DateTime<Utc>) -> TrackingProjection {
    let cancelled = order.status == OrderStatus::Cancelled;
    // A cancelled order still reached the scheduled milestone by existing;
    // the coarse status carries no memory of anything later.
    let reached = order.status.milestone_index().unwrap_or(0);
    let stages = order.stage_timestamps.clone().unwrap_or_default();

    let milestones = MILESTONES
        .iter()
        .enumerate()
        .map(|(index, &key)| {
            let completed = if cancelled { index == 0 } else { index <= reached };
            let timestamp = completed.then(|| {
                key.recorded_at(&stages).unwrap_or_else(|| {
                    let estimate = order.created_at + key.estimate_offset();
                    estimate.min(now)
                })
            });
            TrackingMilestone { key, label: key.label(), completed, timestamp }
        })
        .collect();

    TrackingProjection { milestones, cancelled, status: order.status }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderStatus;
    use chrono::TimeZone;

    fn order(status: OrderStatus) -> SubmittedOrder {
        let created = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        SubmittedOrder {
            id: 1,
            uuid: "u-1".into(),
            status,
            items: vec![],
            pickup_address: "Kira Rd".into(),
            delivery_address: "Kira Rd".into(),
            subtotal: 9000,
            tax_amount: 1620,
            total_amount: 10620,
            notes: String::new(),
            tags: vec![],
            created_at: created,
            updated_at: created,
            stage_timestamps: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 4, 12, 0, 0).unwrap()
    }

    #[test]
    fn later_status_completes_all_earlier_milestones() {
        let projection = project(&order(OrderStatus::ReadyForDelivery), now());
        let completed: Vec<bool> = projection.milestones.iter().map(|m| m.completed).collect();
        assert_eq!(completed, vec![true, true, true, true, false]);
    }

    #[test]
    fn completion_is_monotone_across_the_status_ladder() {
        let ladder = ["pending", "PICKUP", "washing", "ready_for_delivery", "delivered"];
        let mut previous = 0;
        for raw in ladder {
            let status: OrderStatus = raw.parse().unwrap();
            let count = project(&order(status), now()).completed_count();
            assert!(count >= previous, "{raw} regressed the timeline");
            previous = count;
        }
        assert_eq!(previous, MILESTONES.len());
    }

    #[test]
    fn only_completed_milestones_carry_timestamps() {
        let projection = project(&order(OrderStatus::PickedUp), now());
        for milestone in &projection.milestones {
            assert_eq!(milestone.completed, milestone.timestamp.is_some());
        }
    }

    #[test]
    fn synthesized_timestamps_never_land_in_the_future() {
        let soon = order(OrderStatus::Delivered).created_at + Duration::hours(1);
        let projection = project(&order(OrderStatus::Delivered), soon);
        for milestone in projection.milestones {
            assert!(milestone.timestamp.unwrap() <= soon);
        }
    }

    #[test]
    fn backend_stage_timestamps_win_over_estimates() {
        let mut o = order(OrderStatus::PickedUp);
        let picked = Utc.with_ymd_and_hms(2026, 3, 1, 10, 30, 0).unwrap();
        o.stage_timestamps = Some(StageTimestamps {
            picked_up_at: Some(picked),
            ..Default::default()
        });

        let projection = project(&o, now());
        let pickup = &projection.milestones[1];
        assert_eq!(pickup.key, MilestoneKey::Pickup);
        assert_eq!(pickup.timestamp, Some(picked));
    }

    #[test]
    fn cancelled_freezes_the_timeline() {
        let projection = project(&order(OrderStatus::Cancelled), now());
        assert!(projection.cancelled);
        assert_eq!(projection.completed_count(), 1);
        assert!(projection.milestones[0].completed);
    }

    #[test]
    fn temporarily_assigned_projects_like_scheduled() {
        let a = project(&order(OrderStatus::TemporarilyAssigned), now());
        let b = project(&order(OrderStatus::Scheduled), now());
        assert_eq!(a.completed_count(), b.completed_count());
        assert_ne!(a.status, b.status);
    }
}
