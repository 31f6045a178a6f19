use std::str::FromStr;

use alloy::primitives::{Address, Bytes, U256};
use serde::Deserialize;

use super::{OrderProvider, OrderProviderRequest, OrderProviderResponse};
use crate::{error::BuyerError, types::NetworkId, types::SignedOrder};

const ORDERS_PER_PAGE: u32 = 1_000;

/// Order provider backed by a remote standard-relayer HTTP endpoint.
///
/// Issues plain `GET` requests against the v2 relayer surface
/// (`/v2/orders`, `/v2/asset_pairs`). No retries, timeouts or backoff are
/// applied; transport failures surface as [`BuyerError::Transport`].
#[derive(Clone, Debug)]
pub struct RelayerOrderProvider {
    client: reqwest::Client,
    endpoint: String,
    network_id: NetworkId,
}

impl RelayerOrderProvider {
    /// `endpoint` is the relayer base URL without the version segment,
    /// e.g. `https://api.example-relayer.com/0x`.
    pub fn new(endpoint: impl Into<String>, network_id: NetworkId) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            network_id,
        }
    }

    pub fn endpoint(&self) -> &str { &self.endpoint }

    pub fn network_id(&self) -> NetworkId { self.network_id }

    async fn fetch_asset_pairs(
        &self,
        query_key: &str,
        asset_data: &Bytes,
    ) -> Result<Vec<AssetPairRecord>, BuyerError> {
        let response = self
            .client
            .get(format!("{}/v2/asset_pairs", self.endpoint))
            .query(&[
                (query_key, asset_data.to_string()),
                ("networkId", self.network_id.to_string()),
                ("perPage", ORDERS_PER_PAGE.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let page: PagedRecords<AssetPairRecord> = response.json().await?;
        Ok(page.records)
    }
}

impl OrderProvider for RelayerOrderProvider {
    async fn get_orders(
        &self,
        request: &OrderProviderRequest,
    ) -> Result<OrderProviderResponse, BuyerError> {
        let response = self
            .client
            .get(format!("{}/v2/orders", self.endpoint))
            .query(&[
                ("makerAssetData", request.maker_asset_data.to_string()),
                ("takerAssetData", request.taker_asset_data.to_string()),
                ("networkId", self.network_id.to_string()),
                ("perPage", ORDERS_PER_PAGE.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;
        let page: PagedRecords<OrderRecord> = response.json().await?;
        let orders = page
            .records
            .into_iter()
            .map(|record| record.order.try_into())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OrderProviderResponse { orders })
    }

    async fn available_maker_asset_datas(
        &self,
        taker_asset_data: &Bytes,
    ) -> Result<Vec<Bytes>, BuyerError> {
        // `assetDataB` is the taker side of a pair record
        self.fetch_asset_pairs("assetDataB", taker_asset_data)
            .await?
            .into_iter()
            .map(|record| parse_bytes(&record.asset_data_a.asset_data))
            .collect()
    }

    async fn available_taker_asset_datas(
        &self,
        maker_asset_data: &Bytes,
    ) -> Result<Vec<Bytes>, BuyerError> {
        self.fetch_asset_pairs("assetDataA", maker_asset_data)
            .await?
            .into_iter()
            .map(|record| parse_bytes(&record.asset_data_b.asset_data))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct PagedRecords<T> {
    records: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct OrderRecord {
    order: WireOrder,
}

/// Order as serialized on the relayer wire: addresses and byte strings as
/// `0x`-hex, amounts as decimal strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireOrder {
    maker_address: String,
    taker_address: String,
    fee_recipient_address: String,
    sender_address: String,
    maker_asset_amount: String,
    taker_asset_amount: String,
    maker_fee: String,
    taker_fee: String,
    expiration_time_seconds: String,
    salt: String,
    maker_asset_data: String,
    taker_asset_data: String,
    signature: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetPairRecord {
    asset_data_a: AssetPairSide,
    asset_data_b: AssetPairSide,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssetPairSide {
    asset_data: String,
}

fn parse_address(field: &str, value: &str) -> Result<Address, BuyerError> {
    Address::from_str(value)
        .map_err(|err| BuyerError::ProviderContract(format!("malformed {field}: {err}")))
}

fn parse_amount(field: &str, value: &str) -> Result<U256, BuyerError> {
    U256::from_str(value)
        .map_err(|err| BuyerError::ProviderContract(format!("malformed {field}: {err}")))
}

fn parse_bytes(value: &str) -> Result<Bytes, BuyerError> {
    Bytes::from_str(value)
        .map_err(|err| BuyerError::ProviderContract(format!("malformed asset data: {err}")))
}

impl TryFrom<WireOrder> for SignedOrder {
    type Error = BuyerError;

    fn try_from(wire: WireOrder) -> Result<Self, Self::Error> {
        Ok(SignedOrder::new(
            parse_address("makerAddress", &wire.maker_address)?,
            parse_address("takerAddress", &wire.taker_address)?,
            parse_address("feeRecipientAddress", &wire.fee_recipient_address)?,
            parse_address("senderAddress", &wire.sender_address)?,
            parse_amount("makerAssetAmount", &wire.maker_asset_amount)?,
            parse_amount("takerAssetAmount", &wire.taker_asset_amount)?,
            parse_amount("makerFee", &wire.maker_fee)?,
            parse_amount("takerFee", &wire.taker_fee)?,
            u64::from_str(&wire.expiration_time_seconds).map_err(|err| {
                BuyerError::ProviderContract(format!("malformed expirationTimeSeconds: {err}"))
            })?,
            parse_amount("salt", &wire.salt)?,
            parse_bytes(&wire.maker_asset_data)?,
            parse_bytes(&wire.taker_asset_data)?,
            Bytes::from_str(&wire.signature).map_err(|err| {
                BuyerError::ProviderContract(format!("malformed signature: {err}"))
            })?,
        ))
    }
}
