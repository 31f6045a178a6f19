//! Buy quote calculation.
//!
//! Pure arithmetic over already-sourced order sets: no I/O, no cache access.

use alloy::primitives::{Bytes, U256};

use crate::{
    error::BuyerError,
    num,
    types::{BuyQuote, BuyQuoteInfo, OrdersAndFillableAmounts, SignedOrder},
};

/// Computes a [`BuyQuote`] for `buy_amount` of the maker asset.
///
/// Walks `primary` greedily in provider-supplied order, accumulating fillable
/// maker amount until the buy amount is met; the taker-side cost of each fill
/// is proportional with ceiling rounding, as is the taker fee accrued. The
/// same greedy walk over `fee_orders` prices the fee owed, skipped entirely
/// when `buying_fee_asset` (the fee walk would be buying the asset already
/// being bought).
///
/// Best case is the computed cost; worst case inflates asset and fee cost by
/// `slippage_ppm` (parts-per-million), so it is monotonic in the slippage
/// fraction.
pub fn calculate_buy_quote(
    asset_data: Bytes,
    primary: &OrdersAndFillableAmounts,
    fee_orders: &OrdersAndFillableAmounts,
    buy_amount: U256,
    slippage_ppm: u64,
    buying_fee_asset: bool,
) -> Result<BuyQuote, BuyerError> {
    if primary.is_empty() {
        return Err(BuyerError::AssetUnavailable);
    }

    let primary_walk = walk(primary, buy_amount)?;
    let asset_cost = primary_walk.taker_cost;
    let fee_owed = primary_walk.fee_accrued;

    let (fee_cost, used_fee_orders) = if buying_fee_asset || fee_owed.is_zero() {
        (U256::ZERO, Vec::new())
    } else {
        let fee_walk = walk(fee_orders, fee_owed).map_err(|err| match err {
            BuyerError::InsufficientLiquidity { requested, available } => {
                BuyerError::InsufficientFeeLiquidity { fee_owed: requested, available }
            },
            other => other,
        })?;
        // Fees on fee orders are ignored: the recursion terminates here, the
        // same first-order approximation the fee walk itself is.
        (fee_walk.taker_cost, fee_walk.orders)
    };

    let best_case = BuyQuoteInfo::new(asset_cost, fee_cost);
    let worst_case = BuyQuoteInfo::new(
        num::inflate_ceil(asset_cost, slippage_ppm)?,
        num::inflate_ceil(fee_cost, slippage_ppm)?,
    );

    Ok(BuyQuote::new(
        asset_data,
        buy_amount,
        primary_walk.orders,
        used_fee_orders,
        best_case,
        worst_case,
    ))
}

struct Walk {
    orders: Vec<SignedOrder>,
    taker_cost: U256,
    fee_accrued: U256,
}

/// Greedy fill of `amount` maker units from the order set.
fn walk(orders: &OrdersAndFillableAmounts, amount: U256) -> Result<Walk, BuyerError> {
    let mut remaining = amount;
    let mut taker_cost = U256::ZERO;
    let mut fee_accrued = U256::ZERO;
    let mut used = Vec::new();

    for (order, fillable) in orders.iter() {
        if remaining.is_zero() {
            break;
        }
        let take = remaining.min(fillable);
        if take.is_zero() || order.maker_asset_amount().is_zero() {
            continue;
        }
        taker_cost +=
            num::mul_div_ceil(take, order.taker_asset_amount(), order.maker_asset_amount())?;
        fee_accrued += num::mul_div_ceil(take, order.taker_fee(), order.maker_asset_amount())?;
        remaining -= take;
        used.push(order.clone());
    }

    if !remaining.is_zero() {
        return Err(BuyerError::InsufficientLiquidity {
            requested: amount,
            available: amount - remaining,
        });
    }

    Ok(Walk { orders: used, taker_cost, fee_accrued })
}

#[cfg(test)]
mod tests {
    use alloy::primitives::Address;

    use super::*;
    use crate::asset;

    fn asset_a() -> Bytes { asset::encode_erc20(Address::repeat_byte(0x0a)) }

    fn asset_b() -> Bytes { asset::encode_erc20(Address::repeat_byte(0x0b)) }

    fn fee_asset() -> Bytes { asset::encode_erc20(Address::repeat_byte(0x0f)) }

    fn u(n: u64) -> U256 { U256::from(n) }

    fn order(
        maker_asset_data: Bytes,
        maker_amount: u64,
        taker_amount: u64,
        taker_fee: u64,
    ) -> SignedOrder {
        SignedOrder::new(
            Address::repeat_byte(0xaa),
            Address::ZERO,
            Address::ZERO,
            Address::ZERO,
            u(maker_amount),
            u(taker_amount),
            U256::ZERO,
            u(taker_fee),
            4_102_444_800,
            U256::ZERO,
            maker_asset_data,
            asset_b(),
            Bytes::new(),
        )
    }

    /// Two orders at pair (A, B) with fillable maker amounts [100, 50].
    fn primary() -> OrdersAndFillableAmounts {
        OrdersAndFillableAmounts::new(
            vec![order(asset_a(), 100, 50, 0), order(asset_a(), 50, 50, 0)],
            vec![u(100), u(50)],
        )
    }

    fn no_fees() -> OrdersAndFillableAmounts { OrdersAndFillableAmounts::default() }

    #[test]
    fn test_greedy_walk_spans_orders() {
        // Buy 120: first order fully (100 @ 0.5 = 50), 20 of the second
        // (20 @ 1.0 = 20), leaving 30 fillable behind.
        let quote =
            calculate_buy_quote(asset_a(), &primary(), &no_fees(), u(120), 0, false).unwrap();
        assert_eq!(quote.orders().len(), 2);
        assert_eq!(quote.best_case().asset_cost(), u(70));
        assert_eq!(quote.best_case().total_cost(), u(70));
        assert_eq!(quote.worst_case(), quote.best_case());
    }

    #[test]
    fn test_exact_fill_boundary() {
        // Exactly the total fillable volume succeeds and consumes everything
        let quote =
            calculate_buy_quote(asset_a(), &primary(), &no_fees(), u(150), 0, false).unwrap();
        assert_eq!(quote.orders().len(), 2);
        assert_eq!(quote.best_case().asset_cost(), u(100));

        // One unit more is insufficient liquidity
        let err =
            calculate_buy_quote(asset_a(), &primary(), &no_fees(), u(151), 0, false).unwrap_err();
        match err {
            BuyerError::InsufficientLiquidity { requested, available } => {
                assert_eq!(requested, u(151));
                assert_eq!(available, u(150));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_primary_is_unavailable() {
        let err = calculate_buy_quote(
            asset_a(),
            &OrdersAndFillableAmounts::default(),
            &no_fees(),
            u(1),
            0,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, BuyerError::AssetUnavailable));
    }

    #[test]
    fn test_slippage_is_monotonic() {
        let mut prev = U256::ZERO;
        for ppm in [0u64, 1_000, 50_000, 200_000, 500_000, 1_000_000] {
            let quote =
                calculate_buy_quote(asset_a(), &primary(), &no_fees(), u(120), ppm, false).unwrap();
            let worst = quote.worst_case().total_cost();
            assert!(worst >= prev, "worst case decreased at {ppm} ppm");
            assert!(worst >= quote.best_case().total_cost());
            prev = worst;
        }
    }

    #[test]
    fn test_slippage_inflates_worst_case_only() {
        // 20% slippage
        let quote =
            calculate_buy_quote(asset_a(), &primary(), &no_fees(), u(120), 200_000, false).unwrap();
        assert_eq!(quote.best_case().asset_cost(), u(70));
        assert_eq!(quote.worst_case().asset_cost(), u(84));
    }

    #[test]
    fn test_fee_orders_price_the_fee_owed() {
        // Primary order charges a taker fee of 10 fee units per 100 maker
        // units; fee orders sell 100 fee units for 200 taker units.
        let primary = OrdersAndFillableAmounts::new(
            vec![order(asset_a(), 100, 50, 10)],
            vec![u(100)],
        );
        let fees = OrdersAndFillableAmounts::new(
            vec![order(fee_asset(), 100, 200, 0)],
            vec![u(100)],
        );

        let quote = calculate_buy_quote(asset_a(), &primary, &fees, u(100), 0, false).unwrap();
        // Asset cost 50; fee owed 10, costing 10 * 200 / 100 = 20
        assert_eq!(quote.best_case().asset_cost(), u(50));
        assert_eq!(quote.best_case().fee_cost(), u(20));
        assert_eq!(quote.best_case().total_cost(), u(70));
        assert_eq!(quote.fee_orders().len(), 1);
    }

    #[test]
    fn test_buying_fee_asset_skips_fee_walk() {
        let primary = OrdersAndFillableAmounts::new(
            vec![order(fee_asset(), 100, 50, 10)],
            vec![u(100)],
        );
        let quote = calculate_buy_quote(fee_asset(), &primary, &no_fees(), u(100), 0, true).unwrap();
        assert_eq!(quote.best_case().fee_cost(), U256::ZERO);
        assert!(quote.fee_orders().is_empty());
    }

    #[test]
    fn test_insufficient_fee_liquidity() {
        let primary = OrdersAndFillableAmounts::new(
            vec![order(asset_a(), 100, 50, 10)],
            vec![u(100)],
        );
        let fees = OrdersAndFillableAmounts::new(
            vec![order(fee_asset(), 5, 10, 0)],
            vec![u(5)],
        );
        let err = calculate_buy_quote(asset_a(), &primary, &fees, u(100), 0, false).unwrap_err();
        match err {
            BuyerError::InsufficientFeeLiquidity { fee_owed, available } => {
                assert_eq!(fee_owed, u(10));
                assert_eq!(available, u(5));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_partial_fillable_amounts_respected() {
        // Order states 100 maker units but only 40 remain fillable
        let primary = OrdersAndFillableAmounts::new(
            vec![order(asset_a(), 100, 50, 0), order(asset_a(), 50, 50, 0)],
            vec![u(40), u(50)],
        );
        let quote =
            calculate_buy_quote(asset_a(), &primary, &no_fees(), u(60), 0, false).unwrap();
        // 40 @ 0.5 = 20 plus 20 @ 1.0 = 20
        assert_eq!(quote.best_case().asset_cost(), u(40));
        assert_eq!(quote.orders().len(), 2);
    }
}
