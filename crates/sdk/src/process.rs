//! Provider response processing.
//!
//! Turns a raw, untrusted [`OrderProviderResponse`] into validated
//! [`OrdersAndFillableAmounts`]: enforces the requested-pair invariant, drops
//! orders expiring within the expiry buffer, and resolves per-order fillable
//! amounts through the injected [`OrderStateSource`].
//!
//! Pair validation and expiry filtering are pure and synchronous; only the
//! state-source lookup awaits.

use std::time::Duration;

use alloy::primitives::U256;
use tracing::{debug, warn};

use crate::{
    error::BuyerError,
    provider::{OrderProviderRequest, OrderProviderResponse},
    types::{OrdersAndFillableAmounts, SignedOrder},
};

/// Resolves the portion of each order's maker amount that is still fillable.
///
/// Injected capability: swap in an implementation backed by on-chain state
/// for settlement-accurate amounts, or keep the offline default.
#[allow(async_fn_in_trait)]
pub trait OrderStateSource {
    /// One fillable maker amount per input order, same order and length.
    async fn fillable_maker_amounts(
        &self,
        orders: &[SignedOrder],
    ) -> Result<Vec<U256>, BuyerError>;
}

/// Offline default state source: treats every order's stated maker amount as
/// fully fillable.
#[derive(Clone, Copy, Debug, Default)]
pub struct StatedAmounts;

impl OrderStateSource for StatedAmounts {
    async fn fillable_maker_amounts(
        &self,
        orders: &[SignedOrder],
    ) -> Result<Vec<U256>, BuyerError> {
        Ok(orders.iter().map(|order| order.maker_asset_amount()).collect())
    }
}

/// Processor for raw provider responses.
#[derive(Clone, Copy, Debug)]
pub struct ResponseProcessor {
    expiry_buffer: Duration,
}

impl ResponseProcessor {
    pub fn new(expiry_buffer: Duration) -> Self { Self { expiry_buffer } }

    /// Orders expiring within this buffer are treated as unfillable.
    pub fn expiry_buffer(&self) -> Duration { self.expiry_buffer }

    /// Checks every order references exactly the requested asset pair.
    pub fn validate_pair(
        &self,
        request: &OrderProviderRequest,
        orders: &[SignedOrder],
    ) -> Result<(), BuyerError> {
        for order in orders {
            if *order.maker_asset_data() != request.maker_asset_data
                || *order.taker_asset_data() != request.taker_asset_data
            {
                warn!(
                    requested_maker = %request.maker_asset_data,
                    requested_taker = %request.taker_asset_data,
                    order_maker = %order.maker_asset_data(),
                    order_taker = %order.taker_asset_data(),
                    "provider returned order for a different asset pair"
                );
                return Err(BuyerError::ProviderContract(format!(
                    "requested pair ({}, {}), got order for ({}, {})",
                    request.maker_asset_data,
                    request.taker_asset_data,
                    order.maker_asset_data(),
                    order.taker_asset_data(),
                )));
            }
        }
        Ok(())
    }

    /// Drops orders expiring within the expiry buffer of `now_unix`.
    pub fn filter_expiring(&self, orders: Vec<SignedOrder>, now_unix: u64) -> Vec<SignedOrder> {
        let buffer_seconds = self.expiry_buffer.as_secs();
        let before = orders.len();
        let kept: Vec<_> = orders
            .into_iter()
            .filter(|order| !order.expires_within(buffer_seconds, now_unix))
            .collect();
        if kept.len() < before {
            debug!(dropped = before - kept.len(), "dropped orders expiring within buffer");
        }
        kept
    }

    /// Full pipeline: validate pair, filter expiring orders, resolve fillable
    /// amounts, drop orders with nothing left to fill.
    pub async fn process<S: OrderStateSource>(
        &self,
        request: &OrderProviderRequest,
        response: OrderProviderResponse,
        now_unix: u64,
        state_source: &S,
    ) -> Result<OrdersAndFillableAmounts, BuyerError> {
        self.validate_pair(request, &response.orders)?;
        let orders = self.filter_expiring(response.orders, now_unix);

        let amounts = state_source.fillable_maker_amounts(&orders).await?;
        if amounts.len() != orders.len() {
            return Err(BuyerError::ProviderContract(format!(
                "state source returned {} fillable amounts for {} orders",
                amounts.len(),
                orders.len()
            )));
        }

        // Clamp to the stated maker amount and drop fully filled orders
        let (orders, amounts): (Vec<_>, Vec<_>) = orders
            .into_iter()
            .zip(amounts)
            .map(|(order, fillable)| {
                let clamped = fillable.min(order.maker_asset_amount());
                (order, clamped)
            })
            .filter(|(_, fillable)| !fillable.is_zero())
            .unzip();

        Ok(OrdersAndFillableAmounts::new(orders, amounts))
    }
}
