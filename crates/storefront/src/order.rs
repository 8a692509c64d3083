//! Order submission.
//!
//! Builds the order payload from the current cart snapshot plus customer
//! info, POSTs it exactly once, and clears the cart only after the server
//! accepts. No retry and no idempotency key; a failed submission leaves the
//! cart exactly as it was so the customer can resubmit.

use charcoal_core::{CustomerInfo, OrderPayload};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::cart::CartStore;
use crate::client::{ApiClient, ApiError};
use crate::config::StorefrontConfig;

/// Errors that can occur during order submission.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The order endpoint rejected or never received the submission.
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Server acknowledgement of an accepted order.
///
/// The endpoint's response shape is loose; anything it does not provide
/// defaults to empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderConfirmation {
    #[serde(alias = "id")]
    pub order_id: String,
    pub message: String,
}

/// Order submission service bound to one cart.
#[derive(Clone)]
pub struct OrderService {
    client: ApiClient,
    order_url: String,
    restaurant_id: String,
    cart: CartStore,
}

impl OrderService {
    #[must_use]
    pub fn new(client: ApiClient, config: &StorefrontConfig, cart: CartStore) -> Self {
        Self {
            client,
            order_url: config.order_url(),
            restaurant_id: config.restaurant_id.clone(),
            cart,
        }
    }

    /// Submit the current cart as an order.
    ///
    /// On success the cart is cleared. On failure the cart is untouched and
    /// the error is returned; the caller decides whether to resubmit. An
    /// empty cart is not rejected here (that guard belongs to the
    /// presentation layer) and submits with a zero grand total.
    ///
    /// # Errors
    ///
    /// Returns an error if the POST fails or the endpoint rejects the order.
    #[instrument(skip(self, customer), fields(restaurant_id = %self.restaurant_id))]
    pub async fn place_order(
        &self,
        customer: &CustomerInfo,
    ) -> Result<OrderConfirmation, OrderError> {
        let lines = self.cart.lines();
        let payload = OrderPayload::build(&self.restaurant_id, &lines, customer);

        let response = match self.client.post_json(&self.order_url, &payload).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Order submission failed, cart left intact");
                return Err(e.into());
            }
        };

        let confirmation = parse_confirmation(&response);
        info!(
            order_id = %confirmation.order_id,
            grand_total = %payload.grand_total,
            "Order accepted, clearing cart"
        );
        self.cart.clear().await;
        Ok(confirmation)
    }
}

/// Parse the acknowledgement leniently; an unrecognized body still counts
/// as success since the server already returned 2xx.
fn parse_confirmation(response: &serde_json::Value) -> OrderConfirmation {
    serde_json::from_value(response.clone()).unwrap_or_default()
}
