use alloy::primitives::{Address, Bytes, U256};
use chrono::{DateTime, Utc};

/// Signed 0x-style order.
///
/// Opaque to the quote logic beyond its asset pair, amounts, taker fee and
/// expiration: the signature is carried through untouched so a downstream
/// consumer can submit the order for settlement, which this crate itself
/// never does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedOrder {
    maker_address: Address,
    taker_address: Address,
    fee_recipient_address: Address,
    sender_address: Address,
    maker_asset_amount: U256,
    taker_asset_amount: U256,
    maker_fee: U256,
    taker_fee: U256,
    expiration_time_seconds: u64,
    salt: U256,
    maker_asset_data: Bytes,
    taker_asset_data: Bytes,
    signature: Bytes,
}

impl SignedOrder {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        maker_address: Address,
        taker_address: Address,
        fee_recipient_address: Address,
        sender_address: Address,
        maker_asset_amount: U256,
        taker_asset_amount: U256,
        maker_fee: U256,
        taker_fee: U256,
        expiration_time_seconds: u64,
        salt: U256,
        maker_asset_data: Bytes,
        taker_asset_data: Bytes,
        signature: Bytes,
    ) -> Self {
        Self {
            maker_address,
            taker_address,
            fee_recipient_address,
            sender_address,
            maker_asset_amount,
            taker_asset_amount,
            maker_fee,
            taker_fee,
            expiration_time_seconds,
            salt,
            maker_asset_data,
            taker_asset_data,
            signature,
        }
    }

    /// Address of the order maker.
    pub fn maker_address(&self) -> Address { self.maker_address }

    /// Allowed taker address, zero for an open order.
    pub fn taker_address(&self) -> Address { self.taker_address }

    /// Address collecting the maker/taker fees.
    pub fn fee_recipient_address(&self) -> Address { self.fee_recipient_address }

    /// Allowed sender address, zero for an open order.
    pub fn sender_address(&self) -> Address { self.sender_address }

    /// Amount of the maker asset offered by the order.
    pub fn maker_asset_amount(&self) -> U256 { self.maker_asset_amount }

    /// Amount of the taker asset the order demands in return.
    pub fn taker_asset_amount(&self) -> U256 { self.taker_asset_amount }

    /// Fee owed by the maker on full fill, in the fee asset.
    pub fn maker_fee(&self) -> U256 { self.maker_fee }

    /// Fee owed by the taker on full fill, in the fee asset.
    pub fn taker_fee(&self) -> U256 { self.taker_fee }

    /// Unix timestamp after which the order is void.
    pub fn expiration_time_seconds(&self) -> u64 { self.expiration_time_seconds }

    /// Maker-chosen salt distinguishing otherwise identical orders.
    pub fn salt(&self) -> U256 { self.salt }

    /// Asset data of the maker side.
    pub fn maker_asset_data(&self) -> &Bytes { &self.maker_asset_data }

    /// Asset data of the taker side.
    pub fn taker_asset_data(&self) -> &Bytes { &self.taker_asset_data }

    /// Maker signature over the order.
    pub fn signature(&self) -> &Bytes { &self.signature }

    /// Whether the order expires within `buffer_seconds` of `now_unix`.
    /// Such orders are treated as unfillable by the response processor.
    pub fn expires_within(&self, buffer_seconds: u64, now_unix: u64) -> bool {
        self.expiration_time_seconds <= now_unix.saturating_add(buffer_seconds)
    }
}

impl std::fmt::Display for SignedOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} {} for {} {} by {} exp:{}]",
            self.maker_asset_amount,
            self.maker_asset_data,
            self.taker_asset_amount,
            self.taker_asset_data,
            self.maker_address,
            format_expiry(self.expiration_time_seconds),
        )
    }
}

fn format_expiry(expiration_time_seconds: u64) -> String {
    DateTime::<Utc>::from_timestamp(expiration_time_seconds as i64, 0)
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| expiration_time_seconds.to_string())
}

#[cfg(feature = "display")]
impl tabled::Tabled for SignedOrder {
    const LENGTH: usize = 6;

    fn fields(&self) -> Vec<std::borrow::Cow<'_, str>> {
        vec![
            self.maker_address.to_string().into(),
            self.maker_asset_amount.to_string().into(),
            self.taker_asset_amount.to_string().into(),
            self.taker_fee.to_string().into(),
            format_expiry(self.expiration_time_seconds).into(),
            self.fee_recipient_address.to_string().into(),
        ]
    }

    fn headers() -> Vec<std::borrow::Cow<'static, str>> {
        vec![
            "Maker".into(),
            "Maker Amount".into(),
            "Taker Amount".into(),
            "Taker Fee".into(),
            "Expires".into(),
            "Fee Recipient".into(),
        ]
    }
}
