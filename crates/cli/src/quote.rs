use alloy::primitives::{Address, U256};
use anyhow::Context;
use asset_buyer::{asset, buyer::AssetBuyer, provider::OrderProvider, types::BuyQuoteOpts};
use colored::Colorize;
use tabled::{Table, settings::Style};

pub(crate) async fn render<P: OrderProvider>(
    buyer: &AssetBuyer<P>,
    token: Address,
    amount: U256,
    slippage: f64,
    force_refresh: bool,
) -> anyhow::Result<()> {
    let asset_data = asset::encode_erc20(token);
    let quote = buyer
        .get_buy_quote(&asset_data, amount, &BuyQuoteOpts { force_refresh, slippage })
        .await
        .context("fetching buy quote")?;

    println!("{}", format!("Buy {} base units of {}", amount, token).bold().purple());
    println!("  best case:  {}", quote.best_case());
    println!(
        "  worst case: {} (slippage {:.1}%)",
        quote.worst_case().to_string().yellow(),
        slippage * 100.0
    );

    let mut orders = Table::new(quote.orders());
    orders.with(Style::sharp());
    println!("\n{}\n{}", "Orders:".bold(), orders);

    if !quote.fee_orders().is_empty() {
        let mut fee_orders = Table::new(quote.fee_orders());
        fee_orders.with(Style::sharp());
        println!("\n{}\n{}", "Fee orders:".bold(), fee_orders);
    }

    Ok(())
}
