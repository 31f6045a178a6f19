use alloy::primitives::Address;
use anyhow::Context;
use asset_buyer::{asset, buyer::AssetBuyer, provider::OrderProvider};
use colored::Colorize;

pub(crate) async fn render<P: OrderProvider>(
    buyer: &AssetBuyer<P>,
    token: Address,
) -> anyhow::Result<()> {
    let asset_data = asset::encode_erc20(token);
    let liquidity = buyer
        .get_liquidity_for_asset_data(&asset_data)
        .await
        .context("fetching liquidity")?;

    println!("{}", format!("Liquidity for {}", token).bold().purple());
    println!("  maker volume: {}", liquidity.maker_volume);
    println!("  taker volume: {}", liquidity.taker_volume);
    Ok(())
}

pub(crate) async fn render_assets<P: OrderProvider>(
    buyer: &AssetBuyer<P>,
) -> anyhow::Result<()> {
    let available = buyer
        .available_asset_datas()
        .await
        .context("fetching available assets")?;

    println!("{}", format!("{} asset(s) available:", available.len()).bold().purple());
    for asset_data in &available {
        match asset::decode_erc20(asset_data) {
            Ok(token) => println!("  {}", token),
            // Relayers may list pairs under proxies we don't decode
            Err(_) => println!("  {} (non-ERC-20)", asset_data),
        }
    }
    Ok(())
}
