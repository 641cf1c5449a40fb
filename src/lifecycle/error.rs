//! Error types for post-submission order operations.

use thiserror::Error;

use crate::api::ApiError;
use crate::model::OrderStatus;

/// Failure to retrieve a submitted order for tracking or payment.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// The identifier does not exist. Terminal; a retry affordance would
    /// mislead the user.
    #[error("Order not found")]
    NotFound,

    /// The fetch itself failed; surface with a retry affordance.
    #[error(transparent)]
    Api(ApiError),
}

impl FetchError {
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::NotFound => false,
            FetchError::Api(e) => e.is_retryable(),
        }
    }
}

impl From<ApiError> for FetchError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::NotFound => FetchError::NotFound,
            other => FetchError::Api(other),
        }
    }
}

/// Failure to cancel a submitted order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CancelError {
    /// The order has progressed past the point where the customer may
    /// cancel. The backend enforces this too; checking locally saves a
    /// round trip that would 400.
    #[error("Order can no longer be cancelled (status: {0})")]
    NotCancellable(OrderStatus),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Failure to start the mobile-money payment for a submitted order.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PaymentError {
    /// No order has been submitted in this session, so there is no order
    /// uuid to pay against.
    #[error("No submitted order to pay for")]
    NoSubmittedOrder,

    #[error(transparent)]
    Api(#[from] ApiError),
}
