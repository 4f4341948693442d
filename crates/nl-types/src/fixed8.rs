use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Exact fixed-point amount with 8 decimal places.
///
/// The wire form is the raw `i64` count of 10^-8 units. A negative asset
/// amount is the "unlimited supply" sentinel, so negative values are legal.
/// Sums over many amounts should be carried in `i128` (see [`Fixed8::wide`]).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Fixed8(i64);

impl Fixed8 {
    pub const DECIMALS: u32 = 8;
    /// Raw units in one whole token.
    pub const ONE: i64 = 100_000_000;

    pub const ZERO: Self = Self(0);

    /// Wrap a raw unit count.
    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Amount of whole tokens. `None` on overflow.
    pub fn from_whole(tokens: i64) -> Option<Self> {
        tokens.checked_mul(Self::ONE).map(Self)
    }

    /// Raw unit count as written on the wire.
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Widened raw value for overflow-free accumulation.
    pub const fn wide(self) -> i128 {
        self.0 as i128
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount has no fractional part.
    pub const fn is_whole(self) -> bool {
        self.0 % Self::ONE == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Decimal rendering without trailing fractional zeros (`"1.5"`, `"-20"`).
    pub fn to_decimal_string(self) -> String {
        let negative = self.0 < 0;
        let abs = self.0.unsigned_abs();
        let one = Self::ONE as u64;
        let whole = abs / one;
        let frac = abs % one;
        let sign = if negative { "-" } else { "" };
        if frac == 0 {
            return format!("{sign}{whole}");
        }
        let frac = format!("{frac:08}");
        format!("{sign}{whole}.{}", frac.trim_end_matches('0'))
    }
}

impl Neg for Fixed8 {
    type Output = Self;

    /// Saturates at `i64::MAX` for `i64::MIN`.
    fn neg(self) -> Self {
        Self(self.0.checked_neg().unwrap_or(i64::MAX))
    }
}

impl fmt::Debug for Fixed8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fixed8({})", self.to_decimal_string())
    }
}

impl fmt::Display for Fixed8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl FromStr for Fixed8 {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypeError::InvalidAmount(s.to_string());
        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, frac) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty() || frac.len() > Self::DECIMALS as usize {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let frac_units: i64 = if frac.is_empty() {
            0
        } else {
            let padded = format!("{frac:0<8}");
            padded.parse().map_err(|_| invalid())?
        };
        let raw = whole
            .checked_mul(Self::ONE)
            .and_then(|w| w.checked_add(frac_units))
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -raw } else { raw }))
    }
}

impl From<i64> for Fixed8 {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl Serialize for Fixed8 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for Fixed8 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
