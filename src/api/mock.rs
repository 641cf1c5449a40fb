//! Scripted backend doubles for testing the core flow without a network.
//!
//! Mirrors the expectation-builder style used across the codebase's tests:
//! queue expectations, hand the mock to the component under test, then call
//! `verify()` to assert every expectation was consumed.
//!
//! ```ignore
//! let api = MockOrdersApi::new();
//! api.expect_create_order().return_ok(order);
//!
//! // drive the submission client...
//!
//! assert_eq!(api.create_calls(), 1);
//! api.verify();
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{ApiError, OrdersApi, VendorCandidate, VendorDirectory, WireOrderRequest};
use crate::model::SubmittedOrder;

enum OrderExpectation {
    Create {
        delay: Option<Duration>,
        response: Result<SubmittedOrder, ApiError>,
    },
    Fetch {
        id: u64,
        response: Result<SubmittedOrder, ApiError>,
    },
    Cancel {
        id: u64,
        response: Result<(), ApiError>,
    },
    Payment {
        response: Result<(), ApiError>,
    },
}

#[derive(Default)]
struct OrdersApiState {
    expectations: Mutex<VecDeque<OrderExpectation>>,
    create_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    cancel_calls: AtomicUsize,
    payment_calls: AtomicUsize,
}

/// Scripted [`OrdersApi`] with expectation tracking and call counters.
///
/// Cloning shares the same expectation queue, so a clone can be handed to the
/// component under test while the original verifies.
#[derive(Clone, Default)]
pub struct MockOrdersApi {
    state: Arc<OrdersApiState>,
}

impl MockOrdersApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `create_order` call.
    pub fn expect_create_order(&self) -> CreateOrderExpectation<'_> {
        CreateOrderExpectation { mock: self, delay: None }
    }

    /// Expects a `fetch_order` call for `id`.
    pub fn expect_fetch_order(&self, id: u64) -> FetchOrderExpectation<'_> {
        FetchOrderExpectation { mock: self, id }
    }

    /// Expects a `cancel_order` call for `id`.
    pub fn expect_cancel_order(&self, id: u64) -> CancelOrderExpectation<'_> {
        CancelOrderExpectation { mock: self, id }
    }

    /// Expects an `initiate_payment` call.
    pub fn expect_initiate_payment(&self) -> PaymentExpectation<'_> {
        PaymentExpectation { mock: self }
    }

    pub fn create_calls(&self) -> usize {
        self.state.create_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.state.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn cancel_calls(&self) -> usize {
        self.state.cancel_calls.load(Ordering::SeqCst)
    }

    pub fn payment_calls(&self) -> usize {
        self.state.payment_calls.load(Ordering::SeqCst)
    }

    /// Panics if any queued expectation was never consumed.
    pub fn verify(&self) {
        let exps = self.state.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all OrdersApi expectations were met. {} remaining", exps.len());
        }
    }

    fn push(&self, expectation: OrderExpectation) {
        self.state.expectations.lock().unwrap().push_back(expectation);
    }

    fn pop(&self) -> Option<OrderExpectation> {
        self.state.expectations.lock().unwrap().pop_front()
    }
}

/// Builder for `create_order` expectations.
pub struct CreateOrderExpectation<'a> {
    mock: &'a MockOrdersApi,
    delay: Option<Duration>,
}

impl CreateOrderExpectation<'_> {
    /// Delays the response by `duration` (virtual time under a paused
    /// runtime). Useful for holding a submission in flight.
    pub fn after(mut self, duration: Duration) -> Self {
        self.delay = Some(duration);
        self
    }

    pub fn return_ok(self, order: SubmittedOrder) {
        self.mock.push(OrderExpectation::Create { delay: self.delay, response: Ok(order) });
    }

    pub fn return_err(self, error: ApiError) {
        self.mock.push(OrderExpectation::Create { delay: self.delay, response: Err(error) });
    }
}

/// Builder for `fetch_order` expectations.
pub struct FetchOrderExpectation<'a> {
    mock: &'a MockOrdersApi,
    id: u64,
}

impl FetchOrderExpectation<'_> {
    pub fn return_ok(self, order: SubmittedOrder) {
        self.mock.push(OrderExpectation::Fetch { id: self.id, response: Ok(order) });
    }

    pub fn return_err(self, error: ApiError) {
        self.mock.push(OrderExpectation::Fetch { id: self.id, response: Err(error) });
    }
}

/// Builder for `cancel_order` expectations.
pub struct CancelOrderExpectation<'a> {
    mock: &'a MockOrdersApi,
    id: u64,
}

impl CancelOrderExpectation<'_> {
    pub fn return_ok(self) {
        self.mock.push(OrderExpectation::Cancel { id: self.id, response: Ok(()) });
    }

    pub fn return_err(self, error: ApiError) {
        self.mock.push(OrderExpectation::Cancel { id: self.id, response: Err(error) });
    }
}

/// Builder for `initiate_payment` expectations.
pub struct PaymentExpectation<'a> {
    mock: &'a MockOrdersApi,
}

impl PaymentExpectation<'_> {
    pub fn return_ok(self) {
        self.mock.push(OrderExpectation::Payment { response: Ok(()) });
    }

    pub fn return_err(self, error: ApiError) {
        self.mock.push(OrderExpectation::Payment { response: Err(error) });
    }
}

#[async_trait]
impl OrdersApi for MockOrdersApi {
    async fn create_order(&self, _request: WireOrderRequest) -> Result<SubmittedOrder, ApiError> {
        self.state.create_calls.fetch_add(1, Ordering::SeqCst);
        match self.pop() {
            Some(OrderExpectation::Create { delay, response }) => {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                response
            }
            _ => panic!("Unexpected create_order call"),
        }
    }

    async fn fetch_order(&self, id: u64) -> Result<SubmittedOrder, ApiError> {
        self.state.fetch_calls.fetch_add(1, Ordering::SeqCst);
        match self.pop() {
            Some(OrderExpectation::Fetch { id: expected, response }) => {
                assert_eq!(id, expected, "fetch_order called with unexpected id");
                response
            }
            _ => panic!("Unexpected fetch_order call"),
        }
    }

    async fn cancel_order(&self, id: u64) -> Result<(), ApiError> {
        self.state.cancel_calls.fetch_add(1, Ordering::SeqCst);
        match self.pop() {
            Some(OrderExpectation::Cancel { id: expected, response }) => {
                assert_eq!(id, expected, "cancel_order called with unexpected id");
                response
            }
            _ => panic!("Unexpected cancel_order call"),
        }
    }

    async fn initiate_payment(&self, _uuid: &str, _phone: &str) -> Result<(), ApiError> {
        self.state.payment_calls.fetch_add(1, Ordering::SeqCst);
        match self.pop() {
            Some(OrderExpectation::Payment { response }) => response,
            _ => panic!("Unexpected initiate_payment call"),
        }
    }
}

enum SearchExpectation {
    Respond(Result<Vec<VendorCandidate>, ApiError>),
    /// The search never settles; used to exercise the deadline race.
    NeverSettle,
}

#[derive(Default)]
struct VendorDirectoryState {
    expectations: Mutex<VecDeque<SearchExpectation>>,
    search_calls: AtomicUsize,
}

/// Scripted [`VendorDirectory`].
#[derive(Clone, Default)]
pub struct MockVendorDirectory {
    state: Arc<VendorDirectoryState>,
}

impl MockVendorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_search(&self) -> SearchExpectationBuilder<'_> {
        SearchExpectationBuilder { mock: self }
    }

    pub fn search_calls(&self) -> usize {
        self.state.search_calls.load(Ordering::SeqCst)
    }

    pub fn verify(&self) {
        let exps = self.state.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all VendorDirectory expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder for `search` expectations.
pub struct SearchExpectationBuilder<'a> {
    mock: &'a MockVendorDirectory,
}

impl SearchExpectationBuilder<'_> {
    pub fn return_ok(self, candidates: Vec<VendorCandidate>) {
        self.mock
            .state
            .expectations
            .lock()
            .unwrap()
            .push_back(SearchExpectation::Respond(Ok(candidates)));
    }

    pub fn return_err(self, error: ApiError) {
        self.mock
            .state
            .expectations
            .lock()
            .unwrap()
            .push_back(SearchExpectation::Respond(Err(error)));
    }

    /// The search hangs forever, so only a deadline can resolve the caller.
    pub fn never_settle(self) {
        self.mock
            .state
            .expectations
            .lock()
            .unwrap()
            .push_back(SearchExpectation::NeverSettle);
    }
}

#[async_trait]
impl VendorDirectory for MockVendorDirectory {
    async fn search(
        &self,
        _latitude: f64,
        _longitude: f64,
        _radius_m: u32,
    ) -> Result<Vec<VendorCandidate>, ApiError> {
        self.state.search_calls.fetch_add(1, Ordering::SeqCst);
        let expectation = self.state.expectations.lock().unwrap().pop_front();
        match expectation {
            Some(SearchExpectation::Respond(response)) => response,
            Some(SearchExpectation::NeverSettle) => std::future::pending().await,
            None => panic!("Unexpected search call"),
        }
    }
}
