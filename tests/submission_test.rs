//! Submission protocol tests: real submission client and draft store, with
//! scripted backend doubles.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio::sync::Mutex as AsyncMutex;

use laundry_flow::api::mock::{MockOrdersApi, MockVendorDirectory};
use laundry_flow::api::{ApiError, VendorCandidate};
use laundry_flow::availability::AvailabilityGate;
use laundry_flow::draft::{DraftOrderStore, MemoryDraftStorage};
use laundry_flow::model::{CustomerLocation, OrderItem, ServiceType, SubmittedOrder};
use laundry_flow::pricing::PricingConfig;
use laundry_flow::submission::{
    OrderSubmissionClient, SubmissionError, SubmissionState, SubmitOptions,
};

fn valid_store() -> Arc<AsyncMutex<DraftOrderStore<MemoryDraftStorage>>> {
    let mut store =
        DraftOrderStore::load(MemoryDraftStorage::new(), PricingConfig::default()).unwrap();
    store
        .add_item(OrderItem::new("shirt", ServiceType::WashFold, "shirts", 2, 1.5, 2000))
        .unwrap();
    store
        .add_item(OrderItem::new("suit", ServiceType::DryClean, "grey suit", 1, 2.0, 5000))
        .unwrap();
    store
        .set_location(CustomerLocation::new(0.39, 32.58, "Kira Rd, Kampala, Uganda", "", ""))
        .unwrap();
    store.set_schedule(Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
    Arc::new(AsyncMutex::new(store))
}

fn created_order(id: u64) -> SubmittedOrder {
    let created = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
    SubmittedOrder {
        id,
        uuid: format!("uuid-{id}"),
        status: "pending".parse().unwrap(),
        items: vec![],
        pickup_address: "Kira Rd, Kampala, Uganda".into(),
        delivery_address: "Kira Rd, Kampala, Uganda".into(),
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

fn candidate() -> VendorCandidate {
    VendorCandidate {
        id: 1,
        name: "Bubbles Laundromat".into(),
        latitude: 0.39,
        longitude: 32.58,
        distance_m: Some(800.0),
    }
}

fn client(
    store: Arc<AsyncMutex<DraftOrderStore<MemoryDraftStorage>>>,
    api: MockOrdersApi,
    directory: MockVendorDirectory,
) -> OrderSubmissionClient<MemoryDraftStorage, MockOrdersApi, MockVendorDirectory> {
    OrderSubmissionClient::new(store, api, AvailabilityGate::new(directory))
}

#[tokio::test(start_paused = true)]
async fn second_submit_while_in_flight_makes_no_request() {
    let api = MockOrdersApi::new();
    let directory = MockVendorDirectory::new();
    directory.expect_search().return_ok(vec![candidate()]);
    // Hold the first submission in flight for a while.
    api.expect_create_order().after(Duration::from_secs(5)).return_ok(created_order(42));

    let store = valid_store();
    let client = Arc::new(client(store.clone(), api.clone(), directory.clone()));

    let first = {
        let client = client.clone();
        tokio::spawn(async move { client.submit(SubmitOptions::default()).await })
    };

    // Let the first call claim the in-flight slot and reach the network.
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;
    assert_eq!(client.state(), SubmissionState::Submitting);

    let second = client.submit(SubmitOptions::default()).await;
    assert!(matches!(second, Err(SubmissionError::AlreadyInFlight)));

    let order = first.await.unwrap().unwrap();
    assert_eq!(order.id, 42);
    assert_eq!(api.create_calls(), 1, "double-tap must not duplicate the order");
    assert_eq!(client.state(), SubmissionState::Succeeded { order_id: 42 });

    // Success clears the order fields and retains the identifiers.
    let store = store.lock().await;
    assert!(store.snapshot().items.is_empty());
    assert_eq!(store.submitted_ref().unwrap().uuid, "uuid-42");
    api.verify();
    directory.verify();
}

#[tokio::test]
async fn invalid_draft_aborts_before_any_network_call() {
    let api = MockOrdersApi::new();
    let directory = MockVendorDirectory::new();
    let store = Arc::new(AsyncMutex::new(
        DraftOrderStore::load(MemoryDraftStorage::new(), PricingConfig::default()).unwrap(),
    ));
    let client = client(store, api.clone(), directory.clone());

    let result = client.submit(SubmitOptions::default()).await;
    match result {
        Err(SubmissionError::Invalid { issues }) => {
            // Empty draft: missing items, location and schedule at least.
            assert!(issues.len() >= 2);
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
    assert_eq!(api.create_calls(), 0);
    assert_eq!(directory.search_calls(), 0);
}

#[tokio::test]
async fn no_vendors_in_range_blocks_submission() {
    let api = MockOrdersApi::new();
    let directory = MockVendorDirectory::new();
    directory.expect_search().return_ok(vec![]);

    let client = client(valid_store(), api.clone(), directory.clone());

    let result = client.submit(SubmitOptions::default()).await;
    assert!(matches!(result, Err(SubmissionError::NoServiceInRange)));
    assert_eq!(api.create_calls(), 0, "blocked submissions must not reach the backend");
}

#[tokio::test(start_paused = true)]
async fn availability_timeout_then_consented_submit_runs_once() {
    let api = MockOrdersApi::new();
    let directory = MockVendorDirectory::new();
    directory.expect_search().never_settle();
    api.expect_create_order().return_ok(created_order(7));

    let store = valid_store();
    let client = OrderSubmissionClient::new(
        store,
        api.clone(),
        AvailabilityGate::with_deadline(directory.clone(), Duration::from_secs(3)),
    );

    // The timer wins the race; the caller is told to ask the user.
    let result = client.submit(SubmitOptions::default()).await;
    assert!(matches!(result, Err(SubmissionError::AvailabilityUnreachable { .. })));
    assert_eq!(api.create_calls(), 0);
    assert_eq!(directory.search_calls(), 1);

    // The user chose "proceed anyway": exactly one create request, and no
    // second availability check.
    let order = client
        .submit(SubmitOptions { proceed_without_availability: true })
        .await
        .unwrap();
    assert_eq!(order.id, 7);
    assert_eq!(api.create_calls(), 1);
    assert_eq!(directory.search_calls(), 1);
    api.verify();
}

#[tokio::test]
async fn server_failure_preserves_draft_for_retry() {
    let api = MockOrdersApi::new();
    let directory = MockVendorDirectory::new();
    directory.expect_search().return_ok(vec![candidate()]);
    api.expect_create_order().return_err(ApiError::Server("boom".into()));
    directory.expect_search().return_ok(vec![candidate()]);
    api.expect_create_order().return_ok(created_order(9));

    let store = valid_store();
    let before = store.lock().await.snapshot();
    let client = client(store.clone(), api.clone(), directory.clone());

    let result = client.submit(SubmitOptions::default()).await;
    assert!(matches!(result, Err(SubmissionError::Api(ApiError::Server(_)))));
    assert!(matches!(client.state(), SubmissionState::Failed { .. }));
    assert_eq!(store.lock().await.snapshot(), before, "draft must survive a failed submit");

    // Retry with the unchanged draft succeeds.
    let order = client.submit(SubmitOptions::default()).await.unwrap();
    assert_eq!(order.id, 9);
    assert_eq!(api.create_calls(), 2);
    api.verify();
    directory.verify();
}
