//! Flow orchestration: wires the draft store, availability gate and
//! submission client together behind one façade the screens talk to.

pub mod error;
pub mod tracing;

pub use error::{CancelError, FetchError, PaymentError};
pub use tracing::setup_tracing;

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex as AsyncMutex;

use crate::api::{OrdersApi, VendorDirectory};
use crate::availability::AvailabilityGate;
use crate::draft::{DraftOrderStore, DraftStorage, DraftStoreError};
use crate::model::SubmittedOrder;
use crate::pricing::PricingConfig;
use crate::submission::{OrderSubmissionClient, SubmissionError, SubmissionState, SubmitOptions};
use crate::tracking::{self, TrackingProjection};

/// The one object a session holds for the whole order lifecycle.
///
/// Screens issue draft commands through [`OrderFlow::draft`], trigger
/// submission through [`OrderFlow::submit`], and use the fetch/track/cancel/
/// payment operations once an order exists.
pub struct OrderFlow<S, A, D>
where
    S: DraftStorage,
    A: OrdersApi + Clone,
    D: VendorDirectory,
{
    store: Arc<AsyncMutex<DraftOrderStore<S>>>,
    submission: OrderSubmissionClient<S, A, D>,
    api: A,
}

impl<S, A, D> OrderFlow<S, A, D>
where
    S: DraftStorage,
    A: OrdersApi + Clone,
    D: VendorDirectory,
{
    /// Builds the flow, restoring any persisted draft from `storage`.
    pub fn new(
        storage: S,
        api: A,
        directory: D,
        pricing_config: PricingConfig,
    ) -> Result<Self, DraftStoreError> {
        let store = Arc::new(AsyncMutex::new(DraftOrderStore::load(storage, pricing_config)?));
        let gate = AvailabilityGate::new(directory);
        let submission = OrderSubmissionClient::new(store.clone(), api.clone(), gate);
        Ok(Self { store, submission, api })
    }

    /// As [`OrderFlow::new`] but with a custom availability deadline.
    pub fn with_availability_deadline(
        storage: S,
        api: A,
        directory: D,
        pricing_config: PricingConfig,
        deadline: Duration,
    ) -> Result<Self, DraftStoreError> {
        let store = Arc::new(AsyncMutex::new(DraftOrderStore::load(storage, pricing_config)?));
        let gate = AvailabilityGate::with_deadline(directory, deadline);
        let submission = OrderSubmissionClient::new(store.clone(), api.clone(), gate);
        Ok(Self { store, submission, api })
    }

    /// Handle to the draft store for issuing commands and reading snapshots.
    pub fn draft(&self) -> Arc<AsyncMutex<DraftOrderStore<S>>> {
        self.store.clone()
    }

    /// Submits the current draft. See [`crate::submission`] for the protocol.
    pub async fn submit(&self, options: SubmitOptions) -> Result<SubmittedOrder, SubmissionError> {
        self.submission.submit(options).await
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.submission.state()
    }

    /// Fetches a submitted order for tracking or payment.
    pub async fn fetch_order(&self, id: u64) -> Result<SubmittedOrder, FetchError> {
        Ok(self.api.fetch_order(id).await?)
    }

    /// Projects a fetched order onto the milestone timeline.
    pub fn track(&self, order: &SubmittedOrder, now: DateTime<Utc>) -> TrackingProjection {
        tracking::project(order, now)
    }

    /// Cancels a submitted order. Refused locally once the order has passed
    /// the cancellable statuses; the backend enforces the same rule.
    pub async fn cancel_order(&self, order: &SubmittedOrder) -> Result<(), CancelError> {
        if !order.status.is_cancellable() {
            return Err(CancelError::NotCancellable(order.status));
        }
        Ok(self.api.cancel_order(order.id).await?)
    }

    /// Starts mobile-money payment for the order submitted in this session.
    pub async fn initiate_payment(&self, phone_number: &str) -> Result<(), PaymentError> {
        let uuid = {
            let store = self.store.lock().await;
            store
                .submitted_ref()
                .map(|r| r.uuid.clone())
                .ok_or(PaymentError::NoSubmittedOrder)?
        };
        Ok(self.api.initiate_payment(&uuid, phone_number).await?)
    }
}
