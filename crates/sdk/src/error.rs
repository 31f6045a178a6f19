use alloy::primitives::U256;
use thiserror::Error;

/// Errors produced by the asset buyer.
///
/// Three families per the failure model:
/// * input validation (`InvalidAssetData`, `InvalidArgument`) - synchronous,
///   raised before any I/O is attempted;
/// * provider contract (`ProviderContract`) - the order provider returned data
///   it promised not to, fatal to the current call;
/// * liquidity (`AssetUnavailable`, `InsufficientLiquidity`,
///   `InsufficientFeeLiquidity`) - the sourced order set cannot satisfy the
///   request.
///
/// No variant is retried anywhere; all failures propagate to the caller.
#[derive(Debug, Error)]
pub enum BuyerError {
    /// Asset data does not decode under the ERC-20 asset-data encoding.
    #[error("invalid asset data: {0}")]
    InvalidAssetData(String),

    /// A caller-supplied argument is out of range or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The order provider returned a response violating its call contract,
    /// e.g. an order referencing an asset pair other than the requested one.
    #[error("order provider violated its contract: {0}")]
    ProviderContract(String),

    /// No orders exist for the requested asset pair.
    #[error("no orders are available for the requested asset pair")]
    AssetUnavailable,

    /// The fillable volume of the primary order set cannot cover the
    /// requested buy amount.
    #[error("insufficient liquidity: requested {requested}, fillable {available}")]
    InsufficientLiquidity { requested: U256, available: U256 },

    /// The fee order set cannot cover the fees owed for the fill.
    #[error("insufficient fee liquidity: fee owed {fee_owed}, fillable {available}")]
    InsufficientFeeLiquidity { fee_owed: U256, available: U256 },

    /// Transport-level failure talking to a remote order provider.
    #[error("order provider transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for BuyerError {
    fn from(err: reqwest::Error) -> Self { BuyerError::Transport(err.to_string()) }
}
