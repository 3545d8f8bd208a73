// tms-core/src/runtime/resolution.rs
// ============================================================================
// Module: TMS Resolution
// Description: Latest-enabled-version selection over candidate packs.
// Purpose: Pick one winner per (pack name, locale) and order the winners.
// Dependencies: crate::model
// ============================================================================

//! ## Overview
//! Resolution is a pure function over candidates in repository-native order.
//! Disabled packs and unrequested names are dropped. Within a
//! `(pack_name, locale)` group the greatest `created` wins; on a tie the
//! earliest candidate is kept, since a later one replaces the current winner
//! only when strictly newer. Winners come back ordered by [`ResolutionKey`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::btree_map::Entry;

use crate::model::TranslationPack;

// ============================================================================
// SECTION: Resolution Key
// ============================================================================

/// Grouping and presentation key for resolved packs.
///
/// # Invariants
/// - Field order defines presentation order: name, then language, then tag.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResolutionKey {
    /// Pack name.
    pub pack_name: String,
    /// Lower-cased language subtag.
    pub language: String,
    /// Full locale tag.
    pub locale: String,
}

impl ResolutionKey {
    /// Builds the key for `pack`.
    #[must_use]
    pub fn of(pack: &TranslationPack) -> Self {
        Self {
            pack_name: pack.pack_name.clone(),
            language: pack.locale.language(),
            locale: pack.locale.as_str().to_string(),
        }
    }
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Selects the latest enabled pack per `(pack_name, locale)` among `names`.
#[must_use]
pub fn resolve_latest_enabled(
    names: &BTreeSet<String>,
    candidates: Vec<TranslationPack>,
) -> Vec<TranslationPack> {
    let mut winners: BTreeMap<ResolutionKey, TranslationPack> = BTreeMap::new();
    for pack in candidates {
        if !pack.enabled || !names.contains(&pack.pack_name) {
            continue;
        }
        match winners.entry(ResolutionKey::of(&pack)) {
            Entry::Vacant(slot) => {
                slot.insert(pack);
            }
            Entry::Occupied(mut slot) => {
                if pack.created > slot.get().created {
                    slot.insert(pack);
                }
            }
        }
    }
    winners.into_values().collect()
}
