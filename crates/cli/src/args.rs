use alloy::primitives::{Address, U256};
use clap::{Parser, Subcommand};

pub(crate) const DEFAULT_RELAYER_ENDPOINT: &str = "https://api.radarrelay.com/0x";

#[derive(Parser, Debug)]
#[command(name = "asset-buyer", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Standard relayer HTTP endpoint to source orders from (base URL without
    /// the version segment)
    #[arg(long, global = true, default_value_t = DEFAULT_RELAYER_ENDPOINT.to_string())]
    pub relayer: String,

    /// Network ID the orders settle on
    #[arg(long, global = true, default_value_t = 1)]
    pub network_id: u64,

    /// Ether token address quotes are denominated in [default: mainnet WETH]
    #[arg(long, global = true)]
    pub ether_token: Option<Address>,

    /// Fee token address protocol fees are paid in [default: mainnet ZRX]
    #[arg(long, global = true)]
    pub fee_token: Option<Address>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch a buy quote for an ERC-20 token amount
    Quote {
        /// Token to buy
        #[arg(long)]
        token: Address,

        /// Amount to buy, in base units
        #[arg(long)]
        amount: U256,

        /// Slippage fraction applied to the worst-case estimate
        #[arg(long, default_value_t = asset_buyer::buyer::DEFAULT_SLIPPAGE_FRACTION)]
        slippage: f64,

        /// Bypass the order cache and refetch
        #[arg(long, default_value_t = false)]
        force_refresh: bool,
    },
    /// Show available liquidity for an ERC-20 token
    Liquidity {
        /// Token to report liquidity for
        #[arg(long)]
        token: Address,
    },
    /// List tokens the relayer offers against the ether token
    Assets,
}
