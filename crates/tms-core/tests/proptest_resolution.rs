// tms-core/tests/proptest_resolution.rs
// ============================================================================
// Module: Resolution Property-Based Tests
// Description: Invariants of latest-enabled-version selection.
// Purpose: Check resolution against arbitrary pack populations.
// ============================================================================

//! ## Overview
//! Generates pack populations over a small name/locale alphabet so groups
//! collide often, then checks the resolution invariants directly against
//! [`resolve_latest_enabled`].

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use time::Duration;
use time::OffsetDateTime;
use tms_core::Locale;
use tms_core::PackId;
use tms_core::ResolutionKey;
use tms_core::TranslationPack;
use tms_core::resolve_latest_enabled;

/// Name alphabet for generated packs.
const NAMES: [&str; 3] = ["shared", "app1", "app2"];
/// Locale alphabet for generated packs.
const LOCALES: [&str; 4] = ["en", "hu", "en-US", "de"];

/// Strategy for one pack drawn from the small alphabets.
fn pack_strategy() -> impl Strategy<Value = TranslationPack> {
    (0..NAMES.len(), 0..LOCALES.len(), 0_i64..6, any::<bool>()).prop_map(
        |(name, locale, created, enabled)| TranslationPack {
            id: PackId::generate(),
            pack_name: NAMES[name].to_string(),
            locale: Locale::parse(LOCALES[locale]).unwrap(),
            enabled,
            created: OffsetDateTime::UNIX_EPOCH + Duration::seconds(created),
            definitions: Vec::new(),
        },
    )
}

/// Strategy for a requested name subset.
fn names_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::collection::btree_set(
        prop::sample::select(NAMES.to_vec()).prop_map(ToString::to_string),
        0..=NAMES.len(),
    )
}

proptest! {
    #[test]
    fn results_are_unique_enabled_and_requested(
        packs in proptest::collection::vec(pack_strategy(), 0..40),
        names in names_strategy(),
    ) {
        let resolved = resolve_latest_enabled(&names, packs);
        let keys: BTreeSet<ResolutionKey> = resolved.iter().map(ResolutionKey::of).collect();
        prop_assert_eq!(keys.len(), resolved.len());
        for pack in &resolved {
            prop_assert!(pack.enabled);
            prop_assert!(names.contains(&pack.pack_name));
        }
    }

    #[test]
    fn winners_are_latest_and_first_among_ties(
        packs in proptest::collection::vec(pack_strategy(), 0..40),
        names in names_strategy(),
    ) {
        let resolved = resolve_latest_enabled(&names, packs.clone());
        for winner in &resolved {
            let key = ResolutionKey::of(winner);
            let group: Vec<&TranslationPack> = packs
                .iter()
                .filter(|pack| pack.enabled && ResolutionKey::of(pack) == key)
                .collect();
            let latest = group.iter().map(|pack| pack.created).max().unwrap();
            let first_latest = group.iter().find(|pack| pack.created == latest).unwrap();
            prop_assert_eq!(winner.id, first_latest.id);
        }
    }

    #[test]
    fn every_requested_group_with_an_enabled_pack_is_present(
        packs in proptest::collection::vec(pack_strategy(), 0..40),
        names in names_strategy(),
    ) {
        let resolved = resolve_latest_enabled(&names, packs.clone());
        let expected: BTreeSet<ResolutionKey> = packs
            .iter()
            .filter(|pack| pack.enabled && names.contains(&pack.pack_name))
            .map(ResolutionKey::of)
            .collect();
        let actual: Vec<ResolutionKey> = resolved.iter().map(ResolutionKey::of).collect();
        prop_assert_eq!(actual, expected.into_iter().collect::<Vec<_>>());
    }
}
