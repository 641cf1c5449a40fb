//! Order submission: turns a validated draft into a persisted backend order.
//!
//! # Sequence
//! 1. Atomically claim the in-flight slot: a second `submit` while one is
//!    running returns [`SubmissionError::AlreadyInFlight`] without touching
//!    the network. This is a real state check, not a UI-disable hint, so
//!    double-taps cannot create duplicate orders.
//! 2. Re-validate the draft (defense in depth; screens validate too).
//! 3. Run the availability gate, unless the user explicitly consented to
//!    proceeding without it after an earlier unreachable outcome.
//! 4. Transform the draft into the wire shape and `POST /orders`.
//! 5. On success, clear the draft's items/schedule/notes and retain the
//!    returned identifiers for the payment step.
//!
//! Validation and availability failures abort before any create request is
//! made; network and server failures leave the draft unmodified for retry.

pub mod error;

pub use error::SubmissionError;

use std::sync::{Arc, Mutex};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{info, instrument, warn};

use crate::api::{OrdersApi, VendorDirectory, WireOrderRequest};
use crate::availability::{AvailabilityGate, AvailabilityOutcome, DEFAULT_RADIUS_M};
use crate::draft::{DraftOrderStore, DraftStorage, SubmittedRef};
use crate::model::SubmittedOrder;
use crate::validation;

/// Observable submission state, for screens that render a spinner or a
/// retry affordance. Never persisted; a restart always begins `Idle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
    Succeeded { order_id: u64 },
    Failed { message: String },
}

/// Caller choices for one `submit` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmitOptions {
    /// Skip the availability gate. Only set after the gate reported
    /// [`AvailabilityOutcome::Unreachable`] and the user explicitly chose to
    /// proceed anyway; never set it silently.
    pub proceed_without_availability: bool,
}

/// Client owning the submission protocol for one draft.
pub struct OrderSubmissionClient<S, A, D>
where
    S: DraftStorage,
    A: OrdersApi,
    D: VendorDirectory,
{
    store: Arc<AsyncMutex<DraftOrderStore<S>>>,
    api: A,
    gate: AvailabilityGate<D>,
    radius_m: u32,
    state: Mutex<SubmissionState>,
}

impl<S, A, D> OrderSubmissionClient<S, A, D>
where
    S: DraftStorage,
    A: OrdersApi,
    D: VendorDirectory,
{
    pub fn new(store: Arc<AsyncMutex<DraftOrderStore<S>>>, api: A, gate: AvailabilityGate<D>) -> Self {
        Self {
            store,
            api,
            gate,
            radius_m: DEFAULT_RADIUS_M,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn with_radius(mut self, radius_m: u32) -> Self {
        self.radius_m = radius_m;
        self
    }

    /// Current observable state.
    pub fn state(&self) -> SubmissionState {
        self.state.lock().unwrap().clone()
    }

    /// Claims the in-flight slot. Check-and-set under one lock, so of two
    /// logically concurrent callers exactly one wins.
    fn begin(&self) -> Result<(), SubmissionError> {
        let mut state = self.state.lock().unwrap();
        if *state == SubmissionState::Submitting {
            return Err(SubmissionError::AlreadyInFlight);
        }
        *state = SubmissionState::Submitting;
        Ok(())
    }

    fn finish(&self, next: SubmissionState) {
        *self.state.lock().unwrap() = next;
    }

    fn fail<E: Into<SubmissionError>>(&self, error: E) -> SubmissionError {
        let error = error.into();
        self.finish(SubmissionState::Failed { message: error.to_string() });
        error
    }

    /// Submits the current draft. See the module docs for the full sequence.
    #[instrument(skip(self, options))]
    pub async fn submit(&self, options: SubmitOptions) -> Result<SubmittedOrder, SubmissionError> {
        self.begin()?;

        let draft = self.store.lock().await.snapshot();

        let issues = validation::validate(&draft);
        if !issues.is_empty() {
            warn!(count = issues.len(), "Draft failed pre-flight validation");
            return Err(self.fail(SubmissionError::Invalid { issues }));
        }

        if options.proceed_without_availability {
            info!("Skipping availability check at user's request");
        } else {
            // Validation guarantees the location is present.
            let location = draft.location.clone().ok_or_else(|| {
                self.fail(SubmissionError::Invalid {
                    issues: vec![validation::ValidationIssue::MissingLocation],
                })
            })?;

            match self.gate.check(&location, self.radius_m).await {
                AvailabilityOutcome::Available { candidates } => {
                    info!(count = candidates.len(), "Availability confirmed");
                }
                AvailabilityOutcome::NoneInRange => {
                    return Err(self.fail(SubmissionError::NoServiceInRange));
                }
                AvailabilityOutcome::Unreachable { reason } => {
                    return Err(self.fail(SubmissionError::AvailabilityUnreachable { reason }));
                }
            }
        }

        let request = WireOrderRequest::try_from(&draft).map_err(|e| self.fail(e))?;

        match self.api.create_order(request).await {
            Ok(order) => {
                info!(order_id = order.id, "Order created");
                let reference = SubmittedRef { id: order.id, uuid: order.uuid.clone() };
                self.store
                    .lock()
                    .await
                    .mark_submitted(reference)
                    .map_err(|e| self.fail(e))?;
                self.finish(SubmissionState::Succeeded { order_id: order.id });
                Ok(order)
            }
            Err(e) => {
                // Draft untouched so the user can retry as-is.
                warn!(error = %e, "Order creation failed");
                Err(self.fail(e))
            }
        }
    }
}
