use clap::Parser;

#[tokio::main]
async fn main() {
    if let Err(err) = asset_buyer_cli::run(asset_buyer_cli::args::Cli::parse()).await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
