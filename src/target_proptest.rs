//! Property-based tests for target classification and patch set selection.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::error::Error;
    use crate::target::{parse_candidates, resolve_change, select_latest, FetchRef, Target};
    use proptest::prelude::*;

    // ============================================================================
    // Target::classify property tests
    // ============================================================================

    proptest! {
        /// Property: canonical positive decimals are change numbers
        #[test]
        fn classify_canonical_decimal_is_change(n in 1u64..=u64::MAX) {
            prop_assert_eq!(Target::classify(&n.to_string()), Target::Change(n));
        }

        /// Property: a leading zero always makes a branch name
        #[test]
        fn classify_leading_zero_is_branch(digits in "0[0-9]{0,12}") {
            prop_assert_eq!(Target::classify(&digits), Target::Branch(digits.clone()));
        }

        /// Property: strings with a non-digit character are branch names
        #[test]
        fn classify_non_digit_is_branch(raw in "[0-9]{0,4}[^0-9][0-9a-z./_-]{0,8}") {
            prop_assert_eq!(Target::classify(&raw), Target::Branch(raw.clone()));
        }

        /// Property: only the empty string means latest
        #[test]
        fn classify_latest_only_for_empty(raw in ".+") {
            prop_assert_ne!(Target::classify(&raw), Target::Latest);
        }
    }

    // ============================================================================
    // Resolution property tests
    // ============================================================================

    fn listing_for(change: u64, patch_sets: &[u64], noise: &[String]) -> String {
        let shard = format!("{:02}", change % 100);
        let mut listing = String::new();
        for (i, ps) in patch_sets.iter().enumerate() {
            listing.push_str(&format!("{:040x}\trefs/changes/{}/{}/{}\n", i, shard, change, ps));
            if let Some(line) = noise.get(i) {
                listing.push_str(line);
                listing.push('\n');
            }
        }
        listing.push_str(&format!("{:040x}\trefs/changes/{}/{}/meta\n", 0, shard, change));
        listing
    }

    proptest! {
        /// Property: the resolved patch set is the maximum of the listed ones
        #[test]
        fn resolve_returns_maximum_patch_set(
            change in 1u64..10_000_000,
            patch_sets in prop::collection::vec(1u64..500, 1..20),
        ) {
            let listing = listing_for(change, &patch_sets, &[]);
            let expected = *patch_sets.iter().max().unwrap();

            match resolve_change(&listing, change).unwrap() {
                FetchRef::PatchSet { patch_set, ref_path, .. } => {
                    prop_assert_eq!(patch_set, expected);
                    let suffix = format!("/{}/{}", change, expected);
                    prop_assert!(ref_path.ends_with(&suffix));
                }
                other => prop_assert!(false, "unexpected resolution {:?}", other),
            }
        }

        /// Property: resolution is deterministic for a fixed listing
        #[test]
        fn resolve_is_deterministic(
            change in 1u64..10_000_000,
            patch_sets in prop::collection::vec(1u64..500, 1..20),
        ) {
            let listing = listing_for(change, &patch_sets, &[]);
            prop_assert_eq!(
                resolve_change(&listing, change).unwrap(),
                resolve_change(&listing, change).unwrap()
            );
        }

        /// Property: other changes in the listing never satisfy the lookup
        #[test]
        fn resolve_other_changes_is_not_found(
            change in 1u64..10_000_000,
            patch_sets in prop::collection::vec(1u64..500, 0..20),
            branches in prop::collection::vec("[a-z]{1,10}", 0..20),
        ) {
            let other = change + 1;
            let noise: Vec<String> = branches
                .iter()
                .map(|b| format!("{:040x}\trefs/heads/{}", 1, b))
                .collect();
            let listing = listing_for(other, &patch_sets, &noise);

            let err = resolve_change(&listing, change).unwrap_err();
            prop_assert!(
                matches!(err, Error::ChangeNotFound { change: c } if c == change),
                "expected ChangeNotFound for {}, got {:?}",
                change,
                err
            );
        }

        /// Property: every parsed candidate belongs to the requested change
        #[test]
        fn parsed_candidates_match_change(
            change in 1u64..10_000,
            patch_sets in prop::collection::vec(1u64..50, 0..10),
        ) {
            let listing = listing_for(change, &patch_sets, &[]);
            let candidates = parse_candidates(&listing, change).unwrap();
            prop_assert_eq!(candidates.len(), patch_sets.len());
            let marker = format!("/{}/", change);
            for c in &candidates {
                prop_assert!(c.ref_path.contains(&marker));
            }
            prop_assert_eq!(select_latest(&candidates).is_some(), !patch_sets.is_empty());
        }
    }
}
