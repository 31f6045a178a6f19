//! Integer arithmetic helpers for base-unit amounts.
//!
//! All amounts in this crate are unsigned base units ([`U256`]). Fractional
//! inputs such as the slippage tolerance are normalized once into integer
//! parts-per-million and applied with ceiling rounding, so cost estimates
//! never round in the caller's favor.

use alloy::primitives::U256;

use crate::error::BuyerError;

/// Scale of a parts-per-million fraction: 1.0 == 1_000_000 ppm.
pub const PPM_SCALE: u64 = 1_000_000;

/// Converts a fraction (e.g. `0.05` for 5%) to parts-per-million.
pub fn ppm_from_fraction(fraction: f64) -> Result<u64, BuyerError> {
    if !fraction.is_finite() || fraction < 0.0 {
        return Err(BuyerError::InvalidArgument(format!(
            "fraction must be finite and non-negative, got {fraction}"
        )));
    }
    Ok((fraction * PPM_SCALE as f64).round() as u64)
}

/// `ceil(numerator / denominator)`. The denominator must be non-zero.
pub fn ceil_div(numerator: U256, denominator: U256) -> U256 {
    let quotient = numerator / denominator;
    if (numerator % denominator).is_zero() { quotient } else { quotient + U256::ONE }
}

/// `ceil(amount * multiplier / denominator)`, the proportional-cost primitive
/// of the quote walk.
pub fn mul_div_ceil(
    amount: U256,
    multiplier: U256,
    denominator: U256,
) -> Result<U256, BuyerError> {
    if denominator.is_zero() {
        return Err(BuyerError::InvalidArgument(
            "division by zero in proportional amount".to_string(),
        ));
    }
    let product = amount
        .checked_mul(multiplier)
        .ok_or_else(|| BuyerError::InvalidArgument("amount overflow".to_string()))?;
    Ok(ceil_div(product, denominator))
}

/// Inflates `amount` by a ppm fraction with ceiling rounding:
/// `amount + ceil(amount * ppm / PPM_SCALE)`.
///
/// Monotonic in `ppm`: a larger fraction never yields a smaller result.
pub fn inflate_ceil(amount: U256, ppm: u64) -> Result<U256, BuyerError> {
    let buffer = mul_div_ceil(amount, U256::from(ppm), U256::from(PPM_SCALE))?;
    amount
        .checked_add(buffer)
        .ok_or_else(|| BuyerError::InvalidArgument("amount overflow".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(n: u64) -> U256 { U256::from(n) }

    #[test]
    fn test_ceil_div() {
        assert_eq!(ceil_div(u(10), u(5)), u(2));
        assert_eq!(ceil_div(u(11), u(5)), u(3));
        assert_eq!(ceil_div(u(0), u(5)), u(0));
        assert_eq!(ceil_div(u(1), u(5)), u(1));
    }

    #[test]
    fn test_mul_div_ceil() {
        // 20 * 50 / 100 = 10 exactly
        assert_eq!(mul_div_ceil(u(20), u(50), u(100)).unwrap(), u(10));
        // 1 * 50 / 100 = 0.5, rounds up
        assert_eq!(mul_div_ceil(u(1), u(50), u(100)).unwrap(), u(1));
        assert!(matches!(
            mul_div_ceil(u(1), u(1), u(0)),
            Err(BuyerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_ppm_from_fraction() {
        assert_eq!(ppm_from_fraction(0.0).unwrap(), 0);
        assert_eq!(ppm_from_fraction(0.2).unwrap(), 200_000);
        assert_eq!(ppm_from_fraction(1.0).unwrap(), 1_000_000);
        assert!(ppm_from_fraction(-0.1).is_err());
        assert!(ppm_from_fraction(f64::NAN).is_err());
        assert!(ppm_from_fraction(f64::INFINITY).is_err());
    }

    #[test]
    fn test_inflate_ceil() {
        // 20% of 100 = 20
        assert_eq!(inflate_ceil(u(100), 200_000).unwrap(), u(120));
        // 20% of 1 rounds up to 1
        assert_eq!(inflate_ceil(u(1), 200_000).unwrap(), u(2));
        // zero fraction is the identity
        assert_eq!(inflate_ceil(u(100), 0).unwrap(), u(100));
    }

    #[test]
    fn test_inflate_monotonic() {
        let amount = u(123_457);
        let mut prev = U256::ZERO;
        for ppm in [0u64, 1, 100, 50_000, 200_000, 1_000_000, 5_000_000] {
            let inflated = inflate_ceil(amount, ppm).unwrap();
            assert!(inflated >= prev);
            prev = inflated;
        }
    }
}
