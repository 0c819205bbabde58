//! Venue and asset identity types shared by the collector, scanner, and
//! on-chain composition layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five venue kinds named in the component design. Two CLMM
/// variants exist because the scanner treats them as distinct liquidity
/// sources even though they share an adapter trait.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Venue {
    ClmmPrimary = 0,
    ClmmSecondary = 1,
    Clob = 2,
    WeightedAmm = 3,
    ClmmFlashSwap = 4,
}

impl Venue {
    pub fn is_clmm(self) -> bool {
        matches!(self, Venue::ClmmPrimary | Venue::ClmmSecondary | Venue::ClmmFlashSwap)
    }

    pub fn supports_flash(self) -> bool {
        matches!(self, Venue::Clob | Venue::ClmmFlashSwap)
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Venue::ClmmPrimary => "clmm_primary",
            Venue::ClmmSecondary => "clmm_secondary",
            Venue::Clob => "clob",
            Venue::WeightedAmm => "weighted_amm",
            Venue::ClmmFlashSwap => "clmm_flash_swap",
        };
        write!(f, "{s}")
    }
}

/// Opaque asset identifier. The collector and scanner never interpret the
/// numeric value; it only needs to compare equal/hash/sort consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u64);

/// Opaque pool/market identifier, unique within a venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolId(pub u64);

/// Compound key for the shared pool cache: a pool id is only unique within
/// its venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PoolKey {
    pub venue: Venue,
    pub pool: PoolId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_clob_and_flash_swap_support_flash() {
        assert!(Venue::Clob.supports_flash());
        assert!(Venue::ClmmFlashSwap.supports_flash());
        assert!(!Venue::ClmmPrimary.supports_flash());
        assert!(!Venue::WeightedAmm.supports_flash());
    }
}
