//! Error types for order submission.

use thiserror::Error;

use crate::api::{ApiError, IncompleteDraft};
use crate::availability::UnreachableReason;
use crate::draft::DraftStoreError;
use crate::validation::ValidationIssue;

/// Why a `submit` call did not produce an order.
///
/// Except for `AlreadyInFlight`, every variant leaves the draft exactly as it
/// was, so the user can fix the problem (or just retry) without re-entering
/// anything.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Another submission is in flight; this call was a no-op and made no
    /// request.
    #[error("A submission is already in flight")]
    AlreadyInFlight,

    /// Pre-flight validation failed. All issues are included, not just the
    /// first.
    #[error("Draft is not ready to submit ({} issues)", issues.len())]
    Invalid { issues: Vec<ValidationIssue> },

    /// The availability check succeeded and found no service points.
    #[error("No laundry service available in your area")]
    NoServiceInRange,

    /// The availability check never produced an answer. Ask the user whether
    /// to retry or resubmit with
    /// [`SubmitOptions::proceed_without_availability`](super::SubmitOptions).
    #[error("Could not confirm service availability: {reason}")]
    AvailabilityUnreachable { reason: UnreachableReason },

    /// The draft passed validation but still lacked a wire-required field.
    /// Indicates a bug in validation coverage, not bad user input.
    #[error(transparent)]
    IncompleteDraft(#[from] IncompleteDraft),

    /// The backend rejected or failed the create request. The draft is
    /// preserved for retry.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The order was created but recording it locally failed.
    #[error(transparent)]
    Store(#[from] DraftStoreError),
}
