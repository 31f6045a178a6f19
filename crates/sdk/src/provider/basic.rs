use alloy::primitives::Bytes;
use itertools::Itertools;

use super::{OrderProvider, OrderProviderRequest, OrderProviderResponse};
use crate::{error::BuyerError, types::SignedOrder};

/// Order provider over a fixed in-memory order list.
///
/// Serves whatever subset of the stored orders matches the requested pair;
/// availability is derived from the stored orders themselves. Useful for
/// tests and for integrating order feeds sourced out of band.
#[derive(Clone, Debug, Default)]
pub struct BasicOrderProvider {
    orders: Vec<SignedOrder>,
}

impl BasicOrderProvider {
    pub fn new(orders: Vec<SignedOrder>) -> Self { Self { orders } }

    pub fn orders(&self) -> &[SignedOrder] { &self.orders }
}

impl OrderProvider for BasicOrderProvider {
    async fn get_orders(
        &self,
        request: &OrderProviderRequest,
    ) -> Result<OrderProviderResponse, BuyerError> {
        let orders = self
            .orders
            .iter()
            .filter(|order| {
                *order.maker_asset_data() == request.maker_asset_data
                    && *order.taker_asset_data() == request.taker_asset_data
            })
            .cloned()
            .collect();
        Ok(OrderProviderResponse { orders })
    }

    async fn available_maker_asset_datas(
        &self,
        taker_asset_data: &Bytes,
    ) -> Result<Vec<Bytes>, BuyerError> {
        Ok(self
            .orders
            .iter()
            .filter(|order| order.taker_asset_data() == taker_asset_data)
            .map(|order| order.maker_asset_data().clone())
            .unique()
            .collect())
    }

    async fn available_taker_asset_datas(
        &self,
        maker_asset_data: &Bytes,
    ) -> Result<Vec<Bytes>, BuyerError> {
        Ok(self
            .orders
            .iter()
            .filter(|order| order.maker_asset_data() == maker_asset_data)
            .map(|order| order.taker_asset_data().clone())
            .unique()
            .collect())
    }
}
