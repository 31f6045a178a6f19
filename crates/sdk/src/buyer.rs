//! The asset buyer facade.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use alloy::primitives::{Bytes, U256};
use tracing::debug;

use crate::{
    Network, asset,
    cache::{Clock, OrderCache, SystemClock},
    calculate,
    error::BuyerError,
    num,
    process::{OrderStateSource, ResponseProcessor, StatedAmounts},
    provider::{OrderProvider, OrderProviderRequest},
    types::{BuyQuote, BuyQuoteOpts, Liquidity, OrdersAndFillableAmounts},
};

/// Default slippage fraction applied to worst-case estimates.
pub const DEFAULT_SLIPPAGE_FRACTION: f64 = 0.2;

/// Default staleness window of the order cache.
pub const DEFAULT_ORDER_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Orders expiring within this buffer are treated as unfillable by default.
pub const DEFAULT_EXPIRY_BUFFER: Duration = Duration::from_secs(120);

/// Construction-time options.
#[derive(Clone, Debug)]
pub struct AssetBuyerOpts {
    /// Target network, selecting the ether and fee tokens.
    pub network: Network,

    /// Cache staleness window; a cached order set older than this triggers a
    /// blocking refetch before being served.
    pub order_refresh_interval: Duration,

    /// Orders expiring within this buffer are dropped during response
    /// processing.
    pub expiry_buffer: Duration,
}

impl Default for AssetBuyerOpts {
    fn default() -> Self {
        Self {
            network: Network::mainnet(),
            order_refresh_interval: DEFAULT_ORDER_REFRESH_INTERVAL,
            expiry_buffer: DEFAULT_EXPIRY_BUFFER,
        }
    }
}

/// Sources orders from an injected provider, caches them briefly, and
/// evaluates achievable buy quotes and liquidity over them.
///
/// All methods suspend only at provider-call boundaries; there is no
/// background work, no timeouts and no retries. The only shared mutable
/// state is the order cache, whose race policy is documented on
/// [`OrderCache`].
pub struct AssetBuyer<P, S = StatedAmounts, C = SystemClock>
where
    C: Clock,
{
    provider: P,
    state_source: S,
    network: Network,
    cache: OrderCache<C>,
    processor: ResponseProcessor,
}

impl<P: OrderProvider> AssetBuyer<P> {
    /// Buyer with the offline default state source and the wall clock.
    pub fn new(provider: P, opts: AssetBuyerOpts) -> Self {
        Self::with_parts(provider, StatedAmounts, SystemClock, opts)
    }
}

impl<P, S, C> AssetBuyer<P, S, C>
where
    P: OrderProvider,
    S: OrderStateSource,
    C: Clock,
{
    /// Buyer with every injected capability supplied explicitly.
    pub fn with_parts(provider: P, state_source: S, clock: C, opts: AssetBuyerOpts) -> Self {
        Self {
            provider,
            state_source,
            cache: OrderCache::with_clock(opts.order_refresh_interval, clock),
            processor: ResponseProcessor::new(opts.expiry_buffer),
            network: opts.network,
        }
    }

    pub fn network(&self) -> &Network { &self.network }

    pub fn provider(&self) -> &P { &self.provider }

    /// Orders and fillable amounts for an asset-pair direction, served from
    /// the cache while fresh.
    ///
    /// Both asset datas must decode as ERC-20 asset data; malformed input
    /// fails before any network access. A fetch failure leaves any stale
    /// cache entry untouched and propagates.
    pub async fn get_orders_and_fillable_amounts(
        &self,
        maker_asset_data: &Bytes,
        taker_asset_data: &Bytes,
        force_refresh: bool,
    ) -> Result<OrdersAndFillableAmounts, BuyerError> {
        asset::decode_erc20(maker_asset_data)?;
        asset::decode_erc20(taker_asset_data)?;

        if !force_refresh
            && let Some(cached) = self.cache.fresh(maker_asset_data, taker_asset_data)
        {
            return Ok(cached);
        }

        let request = OrderProviderRequest {
            maker_asset_data: maker_asset_data.clone(),
            taker_asset_data: taker_asset_data.clone(),
            network_id: self.network.network_id(),
        };
        debug!(maker = %maker_asset_data, taker = %taker_asset_data, "fetching orders");
        let response = self.provider.get_orders(&request).await?;
        let processed = self
            .processor
            .process(&request, response, now_unix(), &self.state_source)
            .await?;

        self.cache
            .store(maker_asset_data.clone(), taker_asset_data.clone(), processed.clone());
        Ok(processed)
    }

    /// Buy quote for `buy_amount` base units of the asset, denominated in the
    /// network's ether token.
    ///
    /// The primary pair and the fee pair are fetched concurrently when both
    /// are needed; buying the fee asset itself skips the fee side entirely.
    pub async fn get_buy_quote(
        &self,
        asset_data: &Bytes,
        buy_amount: U256,
        opts: &BuyQuoteOpts,
    ) -> Result<BuyQuote, BuyerError> {
        // Fail fast, before any I/O
        let slippage_ppm = num::ppm_from_fraction(opts.slippage)?;
        if buy_amount.is_zero() {
            return Err(BuyerError::InvalidArgument("buy amount must be non-zero".to_string()));
        }
        asset::decode_erc20(asset_data)?;

        let ether_asset = self.network.ether_token_asset_data();
        let fee_asset = self.network.fee_token_asset_data();
        let buying_fee_asset = *asset_data == fee_asset;

        let (primary, fee_orders) = if buying_fee_asset {
            let primary = self
                .get_orders_and_fillable_amounts(asset_data, &ether_asset, opts.force_refresh)
                .await?;
            (primary, OrdersAndFillableAmounts::default())
        } else {
            futures::try_join!(
                self.get_orders_and_fillable_amounts(asset_data, &ether_asset, opts.force_refresh),
                self.get_orders_and_fillable_amounts(&fee_asset, &ether_asset, opts.force_refresh),
            )?
        };

        if primary.is_empty() {
            return Err(BuyerError::AssetUnavailable);
        }

        calculate::calculate_buy_quote(
            asset_data.clone(),
            &primary,
            &fee_orders,
            buy_amount,
            slippage_ppm,
            buying_fee_asset,
        )
    }

    /// Total available volume for the asset against the ether token, ignoring
    /// fees and slippage.
    ///
    /// When the provider does not list the asset as available, returns
    /// zero/zero without fetching any order data.
    pub async fn get_liquidity_for_asset_data(
        &self,
        asset_data: &Bytes,
    ) -> Result<Liquidity, BuyerError> {
        asset::decode_erc20(asset_data)?;

        let ether_asset = self.network.ether_token_asset_data();
        let available = self.provider.available_maker_asset_datas(&ether_asset).await?;
        if !available.contains(asset_data) {
            debug!(asset = %asset_data, "asset not listed as available by provider");
            return Ok(Liquidity::default());
        }

        let orders = self
            .get_orders_and_fillable_amounts(asset_data, &ether_asset, false)
            .await?;
        Ok(Liquidity {
            maker_volume: orders.total_fillable_maker_amount(),
            taker_volume: orders.total_fillable_taker_amount()?,
        })
    }

    /// Asset datas the provider offers against the ether token.
    pub async fn available_asset_datas(&self) -> Result<Vec<Bytes>, BuyerError> {
        self.provider
            .available_maker_asset_datas(&self.network.ether_token_asset_data())
            .await
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
