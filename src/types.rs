//! Core Algorand types used throughout the SDK.

use crate::error::{AlgoTrustError, AlgoTrustResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of microAlgos in one Algo.
pub const MICROALGOS_PER_ALGO: u64 = 1_000_000;

/// Length of a standard Algorand address string.
const ADDRESS_LENGTH: usize = 58;

/// An Algorand account address.
///
/// Addresses are 58-character base32 strings. Construction validates the
/// length and alphabet; the checksum embedded in the final characters is
/// left to the node to verify.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Creates an address from a string, validating its shape.
    ///
    /// # Errors
    ///
    /// Returns [`AlgoTrustError::InvalidAddress`] if the string is not 58
    /// characters of the base32 alphabet (A-Z, 2-7).
    pub fn new(addr: impl Into<String>) -> AlgoTrustResult<Self> {
        let addr = addr.into();
        if addr.len() != ADDRESS_LENGTH {
            return Err(AlgoTrustError::InvalidAddress(format!(
                "expected {ADDRESS_LENGTH} characters, got {}",
                addr.len()
            )));
        }
        if !addr.bytes().all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b)) {
            return Err(AlgoTrustError::InvalidAddress(format!(
                "address contains characters outside the base32 alphabet: {addr}"
            )));
        }
        Ok(Self(addr))
    }

    /// Returns the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a shortened form for display, e.g. `ABCDEF...WXYZ`.
    pub fn truncate(&self) -> String {
        format!("{}...{}", &self.0[..6], &self.0[ADDRESS_LENGTH - 4..])
    }
}

impl FromStr for Address {
    type Err = AlgoTrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Address {
    type Error = AlgoTrustError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An amount of the native asset in its smallest indivisible unit.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MicroAlgos(pub u64);

impl MicroAlgos {
    /// Converts a display amount of Algos into microAlgos, rounding
    /// half-up to the nearest base unit.
    ///
    /// # Errors
    ///
    /// Returns [`AlgoTrustError::Construction`] if the amount is negative,
    /// non-finite, or too large to represent.
    pub fn from_algos(algos: f64) -> AlgoTrustResult<Self> {
        if !algos.is_finite() || algos < 0.0 {
            return Err(AlgoTrustError::construction(format!(
                "amount must be a non-negative number of Algos, got {algos}"
            )));
        }
        let micro = (algos * MICROALGOS_PER_ALGO as f64).round();
        if micro > u64::MAX as f64 {
            return Err(AlgoTrustError::construction(format!(
                "amount {algos} Algos overflows the base-unit range"
            )));
        }
        Ok(Self(micro as u64))
    }

    /// Returns the display amount in Algos.
    pub fn to_algos(self) -> f64 {
        self.0 as f64 / MICROALGOS_PER_ALGO as f64
    }
}

impl fmt::Display for MicroAlgos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} µA", self.0)
    }
}

/// An on-chain application id.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AppId(pub u64);

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for AppId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}
