mod order;
mod quote;

use alloy::primitives::U256;
pub use order::SignedOrder;
pub use quote::{BuyQuote, BuyQuoteInfo, BuyQuoteOpts};

use crate::{error::BuyerError, num};

/// ID of the target network (1 = mainnet).
pub type NetworkId = u64;

/// Ordered set of orders for one asset-pair direction, each paired with the
/// portion of its maker amount still fillable.
///
/// Invariant (enforced by the response processor): all orders share the same
/// maker and taker asset data, and there is exactly one fillable amount per
/// order.
#[derive(Clone, Debug, Default)]
pub struct OrdersAndFillableAmounts {
    orders: Vec<SignedOrder>,
    fillable_amounts: Vec<U256>,
}

impl OrdersAndFillableAmounts {
    pub fn new(orders: Vec<SignedOrder>, fillable_amounts: Vec<U256>) -> Self {
        debug_assert_eq!(orders.len(), fillable_amounts.len());
        Self { orders, fillable_amounts }
    }

    pub fn is_empty(&self) -> bool { self.orders.is_empty() }

    pub fn len(&self) -> usize { self.orders.len() }

    pub fn orders(&self) -> &[SignedOrder] { &self.orders }

    pub fn fillable_amounts(&self) -> &[U256] { &self.fillable_amounts }

    /// Orders zipped with their fillable maker amounts, in provider order.
    pub fn iter(&self) -> impl Iterator<Item = (&SignedOrder, U256)> {
        self.orders.iter().zip(self.fillable_amounts.iter().copied())
    }

    /// Total fillable maker-asset volume.
    pub fn total_fillable_maker_amount(&self) -> U256 {
        self.fillable_amounts.iter().copied().fold(U256::ZERO, |acc, a| acc + a)
    }

    /// Total taker-asset volume the fillable maker volume would cost,
    /// proportional per order with ceiling rounding.
    pub fn total_fillable_taker_amount(&self) -> Result<U256, BuyerError> {
        let mut total = U256::ZERO;
        for (order, fillable) in self.iter() {
            if fillable.is_zero() {
                continue;
            }
            total += num::mul_div_ceil(
                fillable,
                order.taker_asset_amount(),
                order.maker_asset_amount(),
            )?;
        }
        Ok(total)
    }
}

/// Available volume for an asset pair, ignoring fees and slippage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Liquidity {
    /// Fillable maker-asset volume.
    pub maker_volume: U256,
    /// Taker-asset volume the maker volume would cost.
    pub taker_volume: U256,
}
