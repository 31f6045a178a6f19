//! Order provider capability.
//!
//! The provider is the injected, swappable source of candidate orders for an
//! asset pair. It is an untrusted boundary: callers validate that a response
//! only references the requested pair before using it (see
//! [`crate::process`]).

mod basic;
mod relayer;

use alloy::primitives::Bytes;
pub use basic::BasicOrderProvider;
pub use relayer::RelayerOrderProvider;

use crate::{error::BuyerError, types::NetworkId, types::SignedOrder};

/// Request for orders of a single asset-pair direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderProviderRequest {
    pub maker_asset_data: Bytes,
    pub taker_asset_data: Bytes,
    pub network_id: NetworkId,
}

/// Raw provider response, unvalidated.
#[derive(Clone, Debug, Default)]
pub struct OrderProviderResponse {
    pub orders: Vec<SignedOrder>,
}

/// Capability supplying candidate orders for a given asset pair.
#[allow(async_fn_in_trait)]
pub trait OrderProvider {
    /// Orders offering `maker_asset_data` against `taker_asset_data`, in the
    /// order the provider ranks them for filling.
    async fn get_orders(
        &self,
        request: &OrderProviderRequest,
    ) -> Result<OrderProviderResponse, BuyerError>;

    /// Maker asset datas the provider has orders for against the given taker
    /// asset.
    async fn available_maker_asset_datas(
        &self,
        taker_asset_data: &Bytes,
    ) -> Result<Vec<Bytes>, BuyerError>;

    /// Taker asset datas the provider has orders for against the given maker
    /// asset.
    async fn available_taker_asset_datas(
        &self,
        maker_asset_data: &Bytes,
    ) -> Result<Vec<Bytes>, BuyerError>;
}
