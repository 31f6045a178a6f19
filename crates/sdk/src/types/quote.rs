use alloy::primitives::{Bytes, U256};

use super::SignedOrder;

/// Cost breakdown of one side of a quote, in taker-asset base units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuyQuoteInfo {
    asset_cost: U256,
    fee_cost: U256,
}

impl BuyQuoteInfo {
    pub(crate) fn new(asset_cost: U256, fee_cost: U256) -> Self { Self { asset_cost, fee_cost } }

    /// Cost of acquiring the requested asset itself.
    pub fn asset_cost(&self) -> U256 { self.asset_cost }

    /// Cost of acquiring the fee asset owed for the fill.
    pub fn fee_cost(&self) -> U256 { self.fee_cost }

    /// Total cost: asset cost plus fee cost.
    pub fn total_cost(&self) -> U256 { self.asset_cost + self.fee_cost }
}

impl std::fmt::Display for BuyQuoteInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "asset: {} + fees: {} = {}",
            self.asset_cost,
            self.fee_cost,
            self.total_cost()
        )
    }
}

/// Immutable snapshot of an achievable buy.
///
/// Produced per request and never mutated; holds the orders selected to
/// satisfy the requested amount, the fee-order subset pricing the fees owed,
/// and best-case/worst-case cost figures. Best case assumes the sourced
/// prices hold; worst case inflates them by the slippage fraction the quote
/// was requested with.
#[derive(Clone, Debug)]
pub struct BuyQuote {
    asset_data: Bytes,
    buy_amount: U256,
    orders: Vec<SignedOrder>,
    fee_orders: Vec<SignedOrder>,
    best_case: BuyQuoteInfo,
    worst_case: BuyQuoteInfo,
}

impl BuyQuote {
    pub(crate) fn new(
        asset_data: Bytes,
        buy_amount: U256,
        orders: Vec<SignedOrder>,
        fee_orders: Vec<SignedOrder>,
        best_case: BuyQuoteInfo,
        worst_case: BuyQuoteInfo,
    ) -> Self {
        Self { asset_data, buy_amount, orders, fee_orders, best_case, worst_case }
    }

    /// Asset data of the asset being bought.
    pub fn asset_data(&self) -> &Bytes { &self.asset_data }

    /// Requested buy amount, in maker-asset base units.
    pub fn buy_amount(&self) -> U256 { self.buy_amount }

    /// Orders selected to satisfy the buy amount, in fill order.
    pub fn orders(&self) -> &[SignedOrder] { &self.orders }

    /// Fee orders selected to cover the fees owed. Empty when the bought
    /// asset is itself the fee asset or no fees are owed.
    pub fn fee_orders(&self) -> &[SignedOrder] { &self.fee_orders }

    /// Cost estimate at the sourced prices.
    pub fn best_case(&self) -> BuyQuoteInfo { self.best_case }

    /// Cost estimate with the slippage buffer applied.
    pub fn worst_case(&self) -> BuyQuoteInfo { self.worst_case }
}

/// Per-request quote options.
#[derive(Clone, Copy, Debug)]
pub struct BuyQuoteOpts {
    /// Bypass the order cache and refetch even when fresh.
    pub force_refresh: bool,

    /// Slippage fraction applied to the worst-case estimate, e.g. `0.2`
    /// tolerates a 20% price move between quote and execution.
    pub slippage: f64,
}

impl Default for BuyQuoteOpts {
    fn default() -> Self {
        Self { force_refresh: false, slippage: crate::buyer::DEFAULT_SLIPPAGE_FRACTION }
    }
}
