//! Seams to the backend: traits the networking layer implements, the wire
//! request shape, and the shared API error taxonomy.
//!
//! The HTTP transport itself lives outside this crate (it is a generic
//! authenticated JSON client); everything here is transport-agnostic so the
//! core flow can be driven by the [`mock`] implementations in tests.

pub mod error;
pub mod mock;
pub mod wire;

pub use error::*;
pub use wire::*;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::SubmittedOrder;

/// Backend order endpoints consumed by the core flow.
///
/// - `create_order`: `POST /orders`
/// - `fetch_order`: `GET /orders/:id`
/// - `cancel_order`: `PATCH /orders/:id/cancel`
/// - `initiate_payment`: `POST /payments/initiate/:orderUuid`
#[async_trait]
pub trait OrdersApi: Send + Sync {
    async fn create_order(&self, request: WireOrderRequest) -> Result<SubmittedOrder, ApiError>;

    async fn fetch_order(&self, id: u64) -> Result<SubmittedOrder, ApiError>;

    async fn cancel_order(&self, id: u64) -> Result<(), ApiError>;

    /// Mobile-money payment initiation. Consumes the order uuid produced by
    /// submission; the payment UI itself is outside this crate.
    async fn initiate_payment(&self, order_uuid: &str, phone_number: &str)
        -> Result<(), ApiError>;
}

/// A nearby service point returned by the vendor-availability search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorCandidate {
    pub id: u64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub distance_m: Option<f64>,
}

/// Vendor-availability search by coordinates and radius.
#[async_trait]
pub trait VendorDirectory: Send + Sync {
    async fn search(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: u32,
    ) -> Result<Vec<VendorCandidate>, ApiError>;
}
