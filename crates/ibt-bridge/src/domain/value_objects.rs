//! # Domain Value Objects
//!
//! Immutable value types for the bridge: chain identifiers, chain-scoped
//! addresses, and the fixed-point token amount.
//!
//! Addresses from different chains are distinct types and never comparable;
//! all amount arithmetic stays in the base-unit integer domain.

use super::errors::BridgeError;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two ledgers the bridge connects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainId {
    /// Account-based chain holding the IBT ERC-20 contract.
    Ethereum,
    /// Object-based chain holding the IBT coin module.
    Sui,
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainId::Ethereum => write!(f, "Ethereum"),
            ChainId::Sui => write!(f, "Sui"),
        }
    }
}

/// Direction of a bridge transfer.
///
/// The two directions are symmetric in shape but not in behavior: only the
/// Ethereum side supports direct balance mutation (mint/burn), while the Sui
/// side spends discrete coin objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferDirection {
    /// Burn on Ethereum, mint on Sui.
    EthereumToSui,
    /// Burn a coin object on Sui, mint on Ethereum.
    SuiToEthereum,
}

impl TransferDirection {
    /// Chain the transfer originates from.
    pub fn source_chain(&self) -> ChainId {
        match self {
            TransferDirection::EthereumToSui => ChainId::Ethereum,
            TransferDirection::SuiToEthereum => ChainId::Sui,
        }
    }

    /// Chain the transfer arrives at.
    pub fn destination_chain(&self) -> ChainId {
        match self {
            TransferDirection::EthereumToSui => ChainId::Sui,
            TransferDirection::SuiToEthereum => ChainId::Ethereum,
        }
    }
}

/// Number of decimals in the IBT base unit.
pub const TOKEN_DECIMALS: u32 = 18;

/// Unsigned fixed-point token quantity in 18-decimal base units.
///
/// Conversion from the human decimal string is exact; no floating point
/// representation exists anywhere in the pipeline.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Amount(U256);

impl Amount {
    /// Zero amount.
    pub const fn zero() -> Self {
        Amount(U256::zero())
    }

    /// Wrap a raw base-unit count.
    pub fn from_base_units(units: U256) -> Self {
        Amount(units)
    }

    /// Whole tokens scaled to base units.
    pub fn from_tokens(tokens: u64) -> Self {
        Amount(U256::from(tokens) * U256::exp10(TOKEN_DECIMALS as usize))
    }

    /// Raw base-unit count.
    pub fn base_units(&self) -> U256 {
        self.0
    }

    /// True if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition in the base-unit domain.
    pub fn checked_add(&self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Checked subtraction in the base-unit domain.
    pub fn checked_sub(&self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount)
    }

    /// Parse a human-entered decimal string ("10", "0.5", "1.000000000000000001")
    /// into base units. Exact: more than 18 fractional digits is an error,
    /// never a rounding.
    pub fn parse_decimal(input: &str) -> Result<Self, BridgeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid_amount(input, "empty string"));
        }

        let (int_part, frac_part) = match trimmed.split_once('.') {
            Some((i, f)) => (i, f),
            None => (trimmed, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid_amount(input, "no digits"));
        }
        if frac_part.contains('.') {
            return Err(invalid_amount(input, "more than one decimal point"));
        }
        if !int_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid_amount(input, "non-digit character"));
        }
        if frac_part.len() > TOKEN_DECIMALS as usize {
            return Err(invalid_amount(
                input,
                "more than 18 fractional digits",
            ));
        }

        let int_units = if int_part.is_empty() {
            U256::zero()
        } else {
            U256::from_dec_str(int_part).map_err(|_| invalid_amount(input, "integer overflow"))?
        };
        let scaled_int = int_units
            .checked_mul(U256::exp10(TOKEN_DECIMALS as usize))
            .ok_or_else(|| invalid_amount(input, "integer overflow"))?;

        let frac_units = if frac_part.is_empty() {
            U256::zero()
        } else {
            let padding = TOKEN_DECIMALS as usize - frac_part.len();
            U256::from_dec_str(frac_part)
                .map_err(|_| invalid_amount(input, "integer overflow"))?
                * U256::exp10(padding)
        };

        scaled_int
            .checked_add(frac_units)
            .map(Amount)
            .ok_or_else(|| invalid_amount(input, "integer overflow"))
    }
}

fn invalid_amount(input: &str, reason: &str) -> BridgeError {
    BridgeError::InvalidAmount {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

impl fmt::Display for Amount {
    /// Canonical decimal rendering: integer part, then the fractional part
    /// with trailing zeros trimmed ("10", "0.5").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = U256::exp10(TOKEN_DECIMALS as usize);
        let whole = self.0 / scale;
        let frac = self.0 % scale;
        if frac.is_zero() {
            return write!(f, "{}", whole);
        }
        let frac_str = format!(
            "{:0>width$}",
            frac.to_string(),
            width = TOKEN_DECIMALS as usize
        );
        write!(f, "{}.{}", whole, frac_str.trim_end_matches('0'))
    }
}

impl FromStr for Amount {
    type Err = BridgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Amount::parse_decimal(s)
    }
}

/// 20-byte account address on the Ethereum side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EthAddress(pub [u8; 20]);

/// 32-byte account address on the Sui side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuiAddress(pub [u8; 32]);

/// 32-byte object identifier on the Sui side (coin objects, the bridge
/// package, capability objects). Ordered so coin listings are stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub [u8; 32]);

fn decode_hex_fixed<const N: usize>(input: &str, what: &str) -> Result<[u8; N], BridgeError> {
    let stripped = input.strip_prefix("0x").unwrap_or(input);
    let bytes = hex::decode(stripped)
        .map_err(|e| BridgeError::Configuration(format!("{what} {input:?}: {e}")))?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| {
        BridgeError::Configuration(format!("{what} {input:?}: expected {N} bytes, got {len}"))
    })
}

impl EthAddress {
    /// Parse a 0x-prefixed (or bare) 40-hex-digit address.
    pub fn from_hex(input: &str) -> Result<Self, BridgeError> {
        decode_hex_fixed::<20>(input, "ethereum address").map(EthAddress)
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl SuiAddress {
    /// Parse a 0x-prefixed (or bare) 64-hex-digit address.
    pub fn from_hex(input: &str) -> Result<Self, BridgeError> {
        decode_hex_fixed::<32>(input, "sui address").map(SuiAddress)
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl ObjectId {
    /// Parse a 0x-prefixed (or bare) 64-hex-digit object id.
    pub fn from_hex(input: &str) -> Result<Self, BridgeError> {
        decode_hex_fixed::<32>(input, "object id").map(ObjectId)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_tokens() {
        let amount = Amount::parse_decimal("10").unwrap();
        assert_eq!(amount, Amount::from_tokens(10));
    }

    #[test]
    fn test_parse_fractional() {
        let amount = Amount::parse_decimal("0.5").unwrap();
        assert_eq!(
            amount.base_units(),
            U256::from(5u64) * U256::exp10(17)
        );
    }

    #[test]
    fn test_parse_full_precision() {
        let amount = Amount::parse_decimal("1.000000000000000001").unwrap();
        assert_eq!(
            amount.base_units(),
            U256::exp10(18) + U256::from(1u64)
        );
    }

    #[test]
    fn test_parse_leading_dot() {
        assert_eq!(
            Amount::parse_decimal(".5").unwrap(),
            Amount::parse_decimal("0.5").unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_excess_precision() {
        // 19 fractional digits can't be represented; must error, not round
        let err = Amount::parse_decimal("1.0000000000000000001").unwrap_err();
        assert!(matches!(err, BridgeError::InvalidAmount { .. }));
    }

    #[test]
    fn test_parse_rejects_junk() {
        assert!(Amount::parse_decimal("").is_err());
        assert!(Amount::parse_decimal(".").is_err());
        assert!(Amount::parse_decimal("-1").is_err());
        assert!(Amount::parse_decimal("1e18").is_err());
        assert!(Amount::parse_decimal("1.2.3").is_err());
    }

    #[test]
    fn test_parse_zero_is_valid_amount() {
        // Zero parses; rejecting it is the transfer request's invariant
        assert!(Amount::parse_decimal("0").unwrap().is_zero());
    }

    #[test]
    fn test_display_round_trip() {
        for s in ["10", "0.5", "1.000000000000000001", "1000"] {
            let amount = Amount::parse_decimal(s).unwrap();
            assert_eq!(amount.to_string(), *s);
        }
    }

    #[test]
    fn test_amount_ordering() {
        let five = Amount::from_tokens(5);
        let eight = Amount::from_tokens(8);
        assert!(five < eight);
        assert_eq!(eight.checked_sub(five).unwrap(), Amount::from_tokens(3));
    }

    #[test]
    fn test_direction_chains() {
        assert_eq!(
            TransferDirection::EthereumToSui.source_chain(),
            ChainId::Ethereum
        );
        assert_eq!(
            TransferDirection::EthereumToSui.destination_chain(),
            ChainId::Sui
        );
        assert_eq!(
            TransferDirection::SuiToEthereum.source_chain(),
            ChainId::Sui
        );
    }

    #[test]
    fn test_eth_address_hex_round_trip() {
        let addr = EthAddress::from_hex("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap();
        assert_eq!(
            addr.to_string(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_eth_address_rejects_wrong_length() {
        assert!(EthAddress::from_hex("0xabcd").is_err());
    }

    #[test]
    fn test_object_id_parse_without_prefix() {
        let hex64 = "11".repeat(32);
        let id = ObjectId::from_hex(&hex64).unwrap();
        assert_eq!(id, ObjectId([0x11u8; 32]));
    }

    #[test]
    fn test_object_id_ordering_is_byte_order() {
        let a = ObjectId([1u8; 32]);
        let b = ObjectId([2u8; 32]);
        assert!(a < b);
    }
}
