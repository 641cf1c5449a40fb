//! Availability gate: pre-submission check for nearby service capacity.
//!
//! The check is advisory, not authoritative: the backend is the final
//! arbiter of serviceability. Policy, in full:
//!
//! - at least one candidate → proceed to submission;
//! - zero candidates → block, there is genuinely no service in range;
//! - timeout or network failure → neither proceed nor block silently; the
//!   outcome is surfaced so the user can retry or explicitly choose to
//!   proceed without the check.
//!
//! The vendor search runs under [`crate::deadline::with_deadline`], so a
//! response arriving after the deadline is dropped and never observed.

use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::api::{ApiError, VendorCandidate, VendorDirectory};
use crate::deadline::with_deadline;
use crate::model::CustomerLocation;

/// Default bound on the vendor search.
pub const DEFAULT_CHECK_DEADLINE: Duration = Duration::from_secs(8);

/// Default search radius in meters.
pub const DEFAULT_RADIUS_M: u32 = 5_000;

/// Why the gate could not produce an answer.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UnreachableReason {
    #[error("Availability check timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Availability check failed: {0}")]
    Network(#[from] ApiError),
}

/// Result of one availability check.
#[derive(Debug, Clone, PartialEq)]
pub enum AvailabilityOutcome {
    /// At least one service point in range; submission may proceed.
    Available { candidates: Vec<VendorCandidate> },
    /// The search succeeded and found nothing; submission is blocked.
    NoneInRange,
    /// The search never produced an answer. The caller must ask the user
    /// whether to retry or proceed without the check.
    Unreachable { reason: UnreachableReason },
}

/// Bounded pre-submission availability check over a [`VendorDirectory`].
pub struct AvailabilityGate<D: VendorDirectory> {
    directory: D,
    deadline: Duration,
}

impl<D: VendorDirectory> AvailabilityGate<D> {
    pub fn new(directory: D) -> Self {
        Self { directory, deadline: DEFAULT_CHECK_DEADLINE }
    }

    pub fn with_deadline(directory: D, deadline: Duration) -> Self {
        Self { directory, deadline }
    }

    /// Searches for service points within `radius_m` of `location`, bounded
    /// by the configured deadline.
    #[instrument(skip(self, location))]
    pub async fn check(&self, location: &CustomerLocation, radius_m: u32) -> AvailabilityOutcome {
        let search = self.directory.search(location.latitude, location.longitude, radius_m);

        match with_deadline(self.deadline, search).await {
            Ok(Ok(candidates)) if candidates.is_empty() => {
                info!("No service points in range");
                AvailabilityOutcome::NoneInRange
            }
            Ok(Ok(candidates)) => {
                info!(count = candidates.len(), "Service points found");
                AvailabilityOutcome::Available { candidates }
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Vendor search failed");
                AvailabilityOutcome::Unreachable { reason: UnreachableReason::Network(e) }
            }
            Err(elapsed) => {
                warn!(deadline = ?elapsed.0, "Vendor search timed out");
                AvailabilityOutcome::Unreachable {
                    reason: UnreachableReason::TimedOut(elapsed.0),
                }
            }
        }
    }
}
