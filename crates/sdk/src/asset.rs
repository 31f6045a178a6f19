//! ERC-20 asset-data encoding.
//!
//! Asset data is the opaque identifier orders carry for each side of a pair:
//! a 4-byte asset proxy ID followed by the ABI-encoded proxy payload. Only the
//! ERC-20 proxy is supported here, whose payload is a single left-padded token
//! address (36 bytes total).

use alloy::primitives::{Address, Bytes, hex};

use crate::error::BuyerError;

/// 4-byte proxy ID of ERC-20 asset data, `bytes4(keccak256("ERC20Token(address)"))`.
pub const ERC20_PROXY_ID: [u8; 4] = [0xf4, 0x72, 0x61, 0xb0];

const ERC20_ASSET_DATA_LEN: usize = 36;

/// Encodes a token address as ERC-20 asset data.
pub fn encode_erc20(token: Address) -> Bytes {
    let mut data = [0u8; ERC20_ASSET_DATA_LEN];
    data[..4].copy_from_slice(&ERC20_PROXY_ID);
    data[16..].copy_from_slice(token.as_slice());
    Bytes::copy_from_slice(&data)
}

/// Decodes ERC-20 asset data back into the token address.
///
/// Fails fast on any malformed input; callers rely on this as the pre-I/O
/// validation step for user-supplied asset identifiers.
pub fn decode_erc20(asset_data: &Bytes) -> Result<Address, BuyerError> {
    if asset_data.len() != ERC20_ASSET_DATA_LEN {
        return Err(BuyerError::InvalidAssetData(format!(
            "expected {} bytes, got {}",
            ERC20_ASSET_DATA_LEN,
            asset_data.len()
        )));
    }
    if asset_data[..4] != ERC20_PROXY_ID {
        return Err(BuyerError::InvalidAssetData(format!(
            "unknown asset proxy ID 0x{}",
            hex::encode(&asset_data[..4])
        )));
    }
    if asset_data[4..16].iter().any(|b| *b != 0) {
        return Err(BuyerError::InvalidAssetData(
            "non-zero padding in token address word".to_string(),
        ));
    }
    Ok(Address::from_slice(&asset_data[16..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let token = Address::repeat_byte(0xab);
        let asset_data = encode_erc20(token);
        assert_eq!(asset_data.len(), 36);
        assert_eq!(decode_erc20(&asset_data).unwrap(), token);
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = decode_erc20(&Bytes::from(vec![0u8; 35])).unwrap_err();
        assert!(matches!(err, BuyerError::InvalidAssetData(_)));
    }

    #[test]
    fn test_rejects_unknown_proxy() {
        let mut data = encode_erc20(Address::repeat_byte(0x01)).to_vec();
        data[0] = 0x00;
        let err = decode_erc20(&Bytes::from(data)).unwrap_err();
        assert!(matches!(err, BuyerError::InvalidAssetData(_)));
    }

    #[test]
    fn test_rejects_dirty_padding() {
        let mut data = encode_erc20(Address::repeat_byte(0x01)).to_vec();
        data[5] = 0xff;
        let err = decode_erc20(&Bytes::from(data)).unwrap_err();
        assert!(matches!(err, BuyerError::InvalidAssetData(_)));
    }
}
