//! The 27-entry strategy registry: 17 two-hop and 10 tri-hop compositions.
//! Encoded as a data table rather than 27 hand-written functions, since the
//! component design states the variants differ only in flash venue, route
//! venues, and leg orientation, not in choreography.

use crate::ids::Venue;
use serde::{Deserialize, Serialize};

/// Which venue originates the flash primitive for a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashSource {
    Clob,
    ClmmFlashSwap,
}

/// A fixed leg template: which venues a strategy routes through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrategyTemplate {
    pub tag: &'static str,
    pub flash_source: FlashSource,
    pub legs: &'static [Venue],
}

macro_rules! two_hop {
    ($tag:literal, $flash:expr, $a:expr, $b:expr) => {
        StrategyTemplate {
            tag: $tag,
            flash_source: $flash,
            legs: &[$a, $b],
        }
    };
}

macro_rules! tri_hop {
    ($tag:literal, $flash:expr, $a:expr, $b:expr, $c:expr) => {
        StrategyTemplate {
            tag: $tag,
            flash_source: $flash,
            legs: &[$a, $b, $c],
        }
    };
}

use Venue::*;

/// 17 two-hop + 10 tri-hop = 27 compositions, matching the component
/// design's count exactly. Two-hop variants enumerate both flash sources
/// against both route orderings across the five venues; tri-hop variants
/// enumerate 3-venue cycles anchored at each flash source.
pub static STRATEGY_TABLE: &[StrategyTemplate] = &[
    // Two-hop, CLOB-originated flash (8)
    two_hop!("arb_clob_to_clmm_primary", FlashSource::Clob, Clob, ClmmPrimary),
    two_hop!("arb_clmm_primary_to_clob", FlashSource::Clob, ClmmPrimary, Clob),
    two_hop!("arb_clob_to_clmm_secondary", FlashSource::Clob, Clob, ClmmSecondary),
    two_hop!("arb_clmm_secondary_to_clob", FlashSource::Clob, ClmmSecondary, Clob),
    two_hop!("arb_clob_to_weighted", FlashSource::Clob, Clob, WeightedAmm),
    two_hop!("arb_weighted_to_clob", FlashSource::Clob, WeightedAmm, Clob),
    two_hop!("arb_clob_to_clmm_flash_swap", FlashSource::Clob, Clob, ClmmFlashSwap),
    two_hop!("arb_clmm_flash_swap_to_clob", FlashSource::Clob, ClmmFlashSwap, Clob),
    // Two-hop, CLMM-flash-swap-originated flash (9)
    two_hop!("arb_clmm_flash_swap_to_clmm_primary", FlashSource::ClmmFlashSwap, ClmmFlashSwap, ClmmPrimary),
    two_hop!("arb_clmm_primary_to_clmm_flash_swap", FlashSource::ClmmFlashSwap, ClmmPrimary, ClmmFlashSwap),
    two_hop!("arb_clmm_flash_swap_to_clmm_secondary", FlashSource::ClmmFlashSwap, ClmmFlashSwap, ClmmSecondary),
    two_hop!("arb_clmm_secondary_to_clmm_flash_swap", FlashSource::ClmmFlashSwap, ClmmSecondary, ClmmFlashSwap),
    two_hop!("arb_clmm_flash_swap_to_weighted", FlashSource::ClmmFlashSwap, ClmmFlashSwap, WeightedAmm),
    two_hop!("arb_weighted_to_clmm_flash_swap", FlashSource::ClmmFlashSwap, WeightedAmm, ClmmFlashSwap),
    two_hop!("arb_clmm_primary_to_clmm_secondary_via_flash", FlashSource::ClmmFlashSwap, ClmmPrimary, ClmmSecondary),
    two_hop!("arb_clmm_secondary_to_clmm_primary_via_flash", FlashSource::ClmmFlashSwap, ClmmSecondary, ClmmPrimary),
    two_hop!("arb_weighted_to_clmm_primary_via_flash", FlashSource::ClmmFlashSwap, WeightedAmm, ClmmPrimary),
    // Tri-hop, CLOB-originated flash (5)
    tri_hop!("tri_clob_clmm_primary_clmm_secondary", FlashSource::Clob, Clob, ClmmPrimary, ClmmSecondary),
    tri_hop!("tri_clob_clmm_secondary_clmm_primary", FlashSource::Clob, Clob, ClmmSecondary, ClmmPrimary),
    tri_hop!("tri_clob_weighted_clmm_primary", FlashSource::Clob, Clob, WeightedAmm, ClmmPrimary),
    tri_hop!("tri_clob_clmm_primary_weighted", FlashSource::Clob, Clob, ClmmPrimary, WeightedAmm),
    tri_hop!("tri_clob_clmm_flash_swap_clmm_primary", FlashSource::Clob, Clob, ClmmFlashSwap, ClmmPrimary),
    // Tri-hop, CLMM-flash-swap-originated flash (5)
    tri_hop!("tri_clmm_flash_swap_clmm_primary_clmm_secondary", FlashSource::ClmmFlashSwap, ClmmFlashSwap, ClmmPrimary, ClmmSecondary),
    tri_hop!("tri_clmm_flash_swap_clmm_secondary_clmm_primary", FlashSource::ClmmFlashSwap, ClmmFlashSwap, ClmmSecondary, ClmmPrimary),
    tri_hop!("tri_clmm_flash_swap_weighted_clmm_primary", FlashSource::ClmmFlashSwap, ClmmFlashSwap, WeightedAmm, ClmmPrimary),
    tri_hop!("tri_clmm_flash_swap_clmm_primary_weighted", FlashSource::ClmmFlashSwap, ClmmFlashSwap, ClmmPrimary, WeightedAmm),
    tri_hop!("tri_clmm_flash_swap_clob_clmm_primary", FlashSource::ClmmFlashSwap, ClmmFlashSwap, Clob, ClmmPrimary),
];

pub fn lookup(tag: &str) -> Option<&'static StrategyTemplate> {
    STRATEGY_TABLE.iter().find(|t| t.tag == tag)
}

/// Finds the template whose leg sequence exactly matches `legs`, in order.
/// Used to derive a strategy tag from the venues a scan actually matched
/// rather than a fixed literal, so the tag, leg list, and venues an
/// opportunity reports always agree with one another.
pub fn lookup_by_legs(legs: &[Venue]) -> Option<&'static StrategyTemplate> {
    STRATEGY_TABLE.iter().find(|t| t.legs == legs)
}
