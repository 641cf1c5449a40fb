//! Draft order store: the single owner of the in-progress order.
//!
//! Screens never assign draft fields directly; they issue commands
//! (`add_item`, `set_schedule`, ...) and read snapshots. Dependent state,
//! meaning the derived delivery window and the estimated total, is
//! recomputed on every relevant mutation rather than cached.
//!
//! # Persistence
//! Durable fields (items, location, submitted-order identifiers) are written
//! through the [`DraftStorage`] seam as a serde_json payload after every
//! mutation that touches them, so they survive process restarts. Ephemeral
//! submission state (in-flight and error flags) lives in
//! [`crate::submission`] and is never persisted.

pub mod error;
pub mod storage;

pub use error::DraftStoreError;
pub use storage::{DraftStorage, MemoryDraftStorage, StorageError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::model::{CustomerLocation, DraftOrder, OrderItem, OrderItemPatch, TimeWindow};
use crate::pricing::{self, PricingBreakdown, PricingConfig, PricingModifiers};

/// Storage key for the persisted draft payload. Versioned so a future shape
/// change can migrate instead of failing to decode.
const DRAFT_KEY: &str = "draft_order_v1";

/// Width of the pickup window offered to the courier.
const PICKUP_WINDOW_HOURS: i64 = 2;

/// Width of the derived delivery window.
const DELIVERY_WINDOW_HOURS: i64 = 2;

/// Processing time assumed when the draft has no items yet.
const DEFAULT_PROCESSING_HOURS: i64 = 24;

/// Identifiers of the order produced by a successful submission, retained for
/// the payment step after the rest of the draft is cleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedRef {
    pub id: u64,
    pub uuid: String,
}

/// The subset of draft state that survives restarts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedDraft {
    items: Vec<OrderItem>,
    location: Option<CustomerLocation>,
    submitted: Option<SubmittedRef>,
}

/// Command-driven controller owning the [`DraftOrder`] for this session.
///
/// Exactly one store exists per flow; it is never shared across concurrent
/// flows, so mutations apply in the order the UI issues them.
pub struct DraftOrderStore<S: DraftStorage> {
    draft: DraftOrder,
    modifiers: PricingModifiers,
    submitted: Option<SubmittedRef>,
    pricing_config: PricingConfig,
    storage: S,
}

impl<S: DraftStorage> DraftOrderStore<S> {
    /// Creates a store, restoring any durable fields persisted by an earlier
    /// session. A missing or undecodable payload starts a fresh draft.
    pub fn load(storage: S, pricing_config: PricingConfig) -> Result<Self, DraftStoreError> {
        let mut store = Self {
            draft: DraftOrder::default(),
            modifiers: PricingModifiers::default(),
            submitted: None,
            pricing_config,
            storage,
        };

        if let Some(raw) = store.storage.read(DRAFT_KEY)? {
            match serde_json::from_str::<PersistedDraft>(&raw) {
                Ok(persisted) => {
                    debug!(items = persisted.items.len(), "Restored persisted draft");
                    store.draft.items = persisted.items;
                    store.draft.location = persisted.location;
                    store.submitted = persisted.submitted;
                }
                Err(e) => {
                    // A corrupt payload is not worth blocking the flow over.
                    tracing::warn!(error = %e, "Discarding undecodable persisted draft");
                    store.storage.remove(DRAFT_KEY)?;
                }
            }
        }

        Ok(store)
    }

    /// A read-only copy of the current draft.
    pub fn snapshot(&self) -> DraftOrder {
        self.draft.clone()
    }

    pub fn modifiers(&self) -> PricingModifiers {
        self.modifiers
    }

    /// Identifiers of the last successful submission, if any.
    pub fn submitted_ref(&self) -> Option<&SubmittedRef> {
        self.submitted.as_ref()
    }

    /// Appends an item to the draft.
    pub fn add_item(&mut self, item: OrderItem) -> Result<(), DraftStoreError> {
        debug!(garment = %item.garment_type_id, quantity = item.quantity, "Adding item");
        self.draft.items.push(item);
        self.rederive_delivery_window();
        self.persist()
    }

    /// Removes and returns the item at `index`.
    ///
    /// Every item after `index` shifts down by one: after removing index 0
    /// from a three-item draft, the former index-1 item is at index 0.
    /// Callers holding indices across this call must re-read the snapshot.
    pub fn remove_item(&mut self, index: usize) -> Result<OrderItem, DraftStoreError> {
        if index >= self.draft.items.len() {
            return Err(DraftStoreError::ItemIndexOutOfBounds {
                index,
                len: self.draft.items.len(),
            });
        }
        let removed = self.draft.items.remove(index);
        debug!(index, garment = %removed.garment_type_id, "Removed item");
        self.rederive_delivery_window();
        self.persist()?;
        Ok(removed)
    }

    /// Applies a partial update to the item at `index`.
    pub fn update_item(&mut self, index: usize, patch: OrderItemPatch) -> Result<(), DraftStoreError> {
        let len = self.draft.items.len();
        let item = self
            .draft
            .items
            .get_mut(index)
            .ok_or(DraftStoreError::ItemIndexOutOfBounds { index, len })?;

        if let Some(quantity) = patch.quantity {
            item.quantity = quantity;
        }
        if let Some(unit_price) = patch.unit_price {
            item.unit_price = unit_price;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        self.persist()
    }

    /// Sets the pickup window from its start and derives the delivery window.
    ///
    /// Pickup window width is fixed; delivery starts once the slowest
    /// selected service has had its processing time after pickup closes
    /// (24h when no items are selected yet), and is also of fixed width.
    pub fn set_schedule(&mut self, pickup_start: DateTime<Utc>) {
        let pickup_end = pickup_start + Duration::hours(PICKUP_WINDOW_HOURS);
        self.draft.pickup_window = Some(TimeWindow::new(pickup_start, pickup_end));
        self.rederive_delivery_window();
        debug!(%pickup_start, "Schedule set");
    }

    pub fn set_location(&mut self, location: CustomerLocation) -> Result<(), DraftStoreError> {
        self.draft.location = Some(location);
        self.persist()
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.draft.notes = notes.into();
    }

    pub fn set_payment_method_hint(&mut self, hint: Option<String>) {
        self.draft.payment_method_hint = hint;
    }

    pub fn set_modifiers(&mut self, modifiers: PricingModifiers) {
        self.modifiers = modifiers;
    }

    /// Current estimated total. Always recomputed from the current item list;
    /// nothing is cached, so this can never go stale.
    pub fn estimated_total(&self) -> PricingBreakdown {
        pricing::compute_total(&self.draft.items, &self.modifiers, &self.pricing_config)
    }

    /// Records a successful submission: items, schedule and notes are
    /// cleared, the identifiers are retained for the payment step, and the
    /// location is kept for the next order.
    pub fn mark_submitted(&mut self, reference: SubmittedRef) -> Result<(), DraftStoreError> {
        info!(order_id = reference.id, "Draft submitted; clearing order fields");
        self.draft.items.clear();
        self.draft.pickup_window = None;
        self.draft.delivery_window = None;
        self.draft.notes.clear();
        self.submitted = Some(reference);
        self.persist()
    }

    /// Restores the initial empty draft. Used after the payment step
    /// completes or on explicit cancel.
    pub fn reset(&mut self) -> Result<(), DraftStoreError> {
        info!("Resetting draft");
        self.draft = DraftOrder::default();
        self.modifiers = PricingModifiers::default();
        self.submitted = None;
        self.storage.remove(DRAFT_KEY)?;
        Ok(())
    }

    /// Delivery window follows both the schedule and the selected services,
    /// so any item mutation re-derives it while a pickup window exists.
    fn rederive_delivery_window(&mut self) {
        let Some(pickup) = self.draft.pickup_window else {
            return;
        };
        let processing_hours = self
            .draft
            .items
            .iter()
            .map(|i| i.service.processing_hours())
            .max()
            .unwrap_or(DEFAULT_PROCESSING_HOURS);
        let delivery_start = pickup.end + Duration::hours(processing_hours);
        let delivery_end = delivery_start + Duration::hours(DELIVERY_WINDOW_HOURS);
        self.draft.delivery_window = Some(TimeWindow::new(delivery_start, delivery_end));
    }

    fn persist(&mut self) -> Result<(), DraftStoreError> {
        let payload = PersistedDraft {
            items: self.draft.items.clone(),
            location: self.draft.location.clone(),
            submitted: self.submitted.clone(),
        };
        let raw = serde_json::to_string(&payload)?;
        self.storage.write(DRAFT_KEY, &raw)?;
        Ok(())
    }
}
