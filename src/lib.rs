//! # Laundry Flow
//!
//! > **The order lifecycle core for a laundry pickup & delivery app.**
//!
//! This crate holds everything in the order flow with real invariants:
//! assembling a draft order, pricing it, gating submission on validation and
//! vendor availability, creating the order exactly once, and projecting its
//! server-side status onto the customer-facing timeline. Screens, navigation
//! and the HTTP transport live outside; they drive this crate through
//! commands and trait seams.
//!
//! ## Module Tour
//!
//! ### 1. The Data ([`model`])
//! Pure DTOs: garment lines, locations, the draft aggregate, the submitted
//! order, and [`OrderStatus`](model::OrderStatus). That enum is the single
//! closed type every status-derived decision (milestone, label,
//! cancellability) reads from.
//!
//! ### 2. The Engines ([`pricing`], [`validation`], [`tracking`])
//! Pure functions. Pricing turns items + modifiers into an integral
//! minor-unit breakdown; validation collects every completeness issue at
//! once; tracking projects a status onto the milestone ladder. None of them
//! return errors for expected input variation; they return structured
//! results.
//!
//! ### 3. The Draft Owner ([`draft`])
//! [`DraftOrderStore`](draft::DraftOrderStore) is the one owner of the
//! in-progress order. Screens issue commands and read snapshots; durable
//! fields cross the [`DraftStorage`](draft::DraftStorage) seam as an explicit
//! serialize/deserialize step, never as ambient global state.
//!
//! ### 4. The Protocol ([`availability`], [`submission`], [`deadline`])
//! The availability gate races the vendor search against a deadline and
//! reports proceed/block/ask-the-user. The submission client holds the
//! at-most-one-in-flight guarantee and the re-validate → gate → transform →
//! POST sequence. [`deadline::with_deadline`] is the reusable bounded-call
//! primitive both build on.
//!
//! ### 5. The Seams ([`api`])
//! `OrdersApi` and `VendorDirectory` traits plus the wire request shape and
//! error taxonomy. The [`api::mock`] module scripts these for tests the same
//! way the integration tests under `tests/` do.
//!
//! ### 6. The Orchestrator ([`lifecycle`])
//! [`OrderFlow`](lifecycle::OrderFlow) wires storage, gate and submission
//! client together and exposes the post-submission operations (fetch, track,
//! cancel, pay). `setup_tracing()` installs the log subscriber; core modules
//! only ever log through the `tracing` facade.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod api;
pub mod availability;
pub mod deadline;
pub mod draft;
pub mod lifecycle;
pub mod model;
pub mod pricing;
pub mod submission;
pub mod tracking;
pub mod validation;
