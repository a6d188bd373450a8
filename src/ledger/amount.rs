// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Fixed-point XRP amounts.
//!
//! Amounts are held as integer drops. Decimal XRP strings are limited to
//! 6 fractional digits, which is exactly one drop.

use std::fmt;

use super::error::{XrplError, XrplResult};

/// Number of fractional digits in a decimal XRP amount.
pub const XRP_DECIMALS: u32 = 6;

/// Drops per XRP.
pub const DROPS_PER_XRP: u64 = 1_000_000;

/// Total XRP supply in drops; no amount may exceed it.
pub const MAX_DROPS: u64 = 100_000_000_000 * DROPS_PER_XRP;

/// An XRP amount in drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct XrpAmount(u64);

impl XrpAmount {
    pub const ZERO: XrpAmount = XrpAmount(0);

    pub fn from_drops(drops: u64) -> XrplResult<Self> {
        if drops > MAX_DROPS {
            return Err(XrplError::InvalidAmount(format!(
                "{drops} drops exceeds the maximum of {MAX_DROPS}"
            )));
        }
        Ok(Self(drops))
    }

    /// Parse a drops string as returned by the node (`"10"`).
    pub fn parse_drops(raw: &str) -> XrplResult<Self> {
        let drops = raw
            .trim()
            .parse::<u64>()
            .map_err(|_| XrplError::InvalidAmount(format!("invalid drops value `{raw}`")))?;
        Self::from_drops(drops)
    }

    /// Parse a decimal XRP amount (`"10.123456"`).
    ///
    /// Rejects signs, exponents, more than 6 fractional digits and values
    /// above the total supply.
    pub fn parse_xrp(amount: &str) -> XrplResult<Self> {
        let amount = amount.trim();
        let parts: Vec<&str> = amount.split('.').collect();

        if amount.is_empty() || parts.len() > 2 {
            return Err(XrplError::InvalidAmount(format!(
                "invalid amount format `{amount}`"
            )));
        }

        let whole_str = parts[0];
        let frac_str = parts.get(1).copied().unwrap_or("");

        if whole_str.is_empty() && frac_str.is_empty() {
            return Err(XrplError::InvalidAmount(format!(
                "invalid amount format `{amount}`"
            )));
        }
        if !whole_str.bytes().all(|b| b.is_ascii_digit())
            || !frac_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(XrplError::InvalidAmount(format!(
                "amount must be an unsigned decimal, got `{amount}`"
            )));
        }
        if frac_str.len() > XRP_DECIMALS as usize {
            return Err(XrplError::InvalidAmount(format!(
                "too many decimal places in `{amount}` (max {XRP_DECIMALS})"
            )));
        }

        let whole = if whole_str.is_empty() {
            0u64
        } else {
            whole_str
                .parse::<u64>()
                .map_err(|_| XrplError::InvalidAmount(format!("amount `{amount}` out of range")))?
        };

        let padded = format!("{:0<width$}", frac_str, width = XRP_DECIMALS as usize);
        let frac = padded
            .parse::<u64>()
            .map_err(|_| XrplError::InvalidAmount("invalid decimal part".to_string()))?;

        let drops = whole
            .checked_mul(DROPS_PER_XRP)
            .and_then(|w| w.checked_add(frac))
            .ok_or_else(|| XrplError::InvalidAmount(format!("amount `{amount}` out of range")))?;

        Self::from_drops(drops)
    }

    pub fn drops(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Decimal XRP representation with trailing zeros trimmed.
    pub fn to_xrp_string(self) -> String {
        let whole = self.0 / DROPS_PER_XRP;
        let remainder = self.0 % DROPS_PER_XRP;

        if remainder == 0 {
            return whole.to_string();
        }

        let decimal_str = format!("{:0>width$}", remainder, width = XRP_DECIMALS as usize);
        format!("{}.{}", whole, decimal_str.trim_end_matches('0'))
    }
}

impl fmt::Display for XrpAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} XRP", self.to_xrp_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_whole_and_fractional() {
        assert_eq!(XrpAmount::parse_xrp("1").unwrap().drops(), 1_000_000);
        assert_eq!(XrpAmount::parse_xrp("10.123456").unwrap().drops(), 10_123_456);
        assert_eq!(XrpAmount::parse_xrp("0.000001").unwrap().drops(), 1);
        assert_eq!(XrpAmount::parse_xrp(".5").unwrap().drops(), 500_000);
        assert_eq!(XrpAmount::parse_xrp("2.").unwrap().drops(), 2_000_000);
    }

    #[test]
    fn reject_excess_precision() {
        let err = XrpAmount::parse_xrp("10.1234567").unwrap_err();
        assert!(matches!(err, XrplError::InvalidAmount(_)));
    }

    #[test]
    fn reject_malformed_input() {
        for raw in ["", ".", "-1", "+1", "1e6", "1.2.3", "abc", " 1 2"] {
            assert!(XrpAmount::parse_xrp(raw).is_err(), "accepted `{raw}`");
        }
    }

    #[test]
    fn reject_above_supply() {
        assert!(XrpAmount::parse_xrp("100000000000").is_ok());
        assert!(XrpAmount::parse_xrp("100000000000.000001").is_err());
        assert!(XrpAmount::parse_xrp("99999999999999999999").is_err());
        assert!(XrpAmount::from_drops(MAX_DROPS + 1).is_err());
    }

    #[test]
    fn parse_drops_from_node() {
        assert_eq!(XrpAmount::parse_drops("10").unwrap().drops(), 10);
        assert!(XrpAmount::parse_drops("ten").is_err());
    }

    #[test]
    fn format_xrp() {
        assert_eq!(XrpAmount::from_drops(0).unwrap().to_xrp_string(), "0");
        assert_eq!(XrpAmount::from_drops(1_500_000).unwrap().to_xrp_string(), "1.5");
        assert_eq!(XrpAmount::from_drops(10).unwrap().to_xrp_string(), "0.00001");
        assert_eq!(
            XrpAmount::parse_xrp("10.123456").unwrap().to_string(),
            "10.123456 XRP"
        );
    }
}
