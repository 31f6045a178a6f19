//! Asset buyer SDK.
//!
//! # Overview
//!
//! Sources signed orders for an asset pair from an injected
//! [`provider::OrderProvider`], caches them briefly to avoid redundant
//! network calls, and evaluates achievable buy prices over them.
//!
//! Use [`buyer::AssetBuyer`] as the entry point: [`buyer::AssetBuyer::get_buy_quote`]
//! walks the sourced orders greedily and returns best-case/worst-case cost
//! figures accounting for taker fees and a slippage buffer;
//! [`buyer::AssetBuyer::get_liquidity_for_asset_data`] reports raw available
//! volume.
//!
//! [`sim`] hosts the randomized staking-pool exercise driver, which shares
//! nothing with the buyer beyond the crate.
//!
//! See `./tests` for examples.
//!
//! # Limitations/follow-ups
//!
//! * No on-chain execution: quotes carry the signed orders so a downstream
//!   consumer can fill them, but submission is out of scope here.
//! * No network resilience: provider calls have no retries, timeouts or
//!   backpressure; a hung call blocks the enclosing task.
//! * The cache has no eviction beyond time-based staleness and no lock around
//!   check-then-fetch-then-store; see [`cache::OrderCache`] for the race
//!   policy.
//!
//! # Features
//!
//! | Feature | Default | Description |
//! | --- | --- | --- |
//! | `display` | yes | Enables [`tabled::Tabled`] implementations for order types. |

pub mod asset;
pub mod buyer;
pub mod cache;
pub mod calculate;
pub mod error;
pub mod num;
pub mod process;
pub mod provider;
pub mod sim;
pub mod types;

use alloy::primitives::{Address, Bytes, address};

/// Network the orders settle on.
///
/// Carries the well-known token addresses the buyer needs resolved: the
/// ether token quotes are denominated in and the fee token protocol fees are
/// paid in.
#[derive(Clone, Debug)]
pub struct Network {
    network_id: types::NetworkId,
    ether_token: Address,
    fee_token: Address,
}

impl Network {
    pub fn mainnet() -> Self {
        Self {
            network_id: 1,
            ether_token: address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2"),
            fee_token: address!("0xE41d2489571d322189246DaFA5ebDe1F4699F498"),
        }
    }

    pub fn custom(network_id: types::NetworkId, ether_token: Address, fee_token: Address) -> Self {
        Self { network_id, ether_token, fee_token }
    }

    pub fn network_id(&self) -> types::NetworkId { self.network_id }

    pub fn ether_token(&self) -> Address { self.ether_token }

    pub fn fee_token(&self) -> Address { self.fee_token }

    /// ERC-20 asset data of the ether token.
    pub fn ether_token_asset_data(&self) -> Bytes { asset::encode_erc20(self.ether_token) }

    /// ERC-20 asset data of the fee token.
    pub fn fee_token_asset_data(&self) -> Bytes { asset::encode_erc20(self.fee_token) }
}
