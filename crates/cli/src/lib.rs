pub mod args;
mod liquidity;
mod quote;

use args::Cli;
use asset_buyer::{
    Network,
    buyer::{AssetBuyer, AssetBuyerOpts},
    provider::RelayerOrderProvider,
};

use crate::args::Commands;

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mainnet = Network::mainnet();
    let network = Network::custom(
        cli.network_id,
        cli.ether_token.unwrap_or(mainnet.ether_token()),
        cli.fee_token.unwrap_or(mainnet.fee_token()),
    );

    let provider = RelayerOrderProvider::new(cli.relayer.clone(), cli.network_id);
    let buyer = AssetBuyer::new(provider, AssetBuyerOpts { network, ..Default::default() });

    match &cli.command {
        Commands::Quote { token, amount, slippage, force_refresh } => {
            quote::render(&buyer, *token, *amount, *slippage, *force_refresh).await?
        },
        Commands::Liquidity { token } => liquidity::render(&buyer, *token).await?,
        Commands::Assets => liquidity::render_assets(&buyer).await?,
    }

    Ok(())
}
