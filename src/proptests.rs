use super::*;

use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

// A tiny alphabet and short keys give heavily overlapping prefixes, which is
// where the trie's sharing and traversal logic actually gets exercised.
fn key_strategy() -> impl Strategy<Value = Vec<u8>> + Clone {
    prop::collection::vec(0u8..4, 0..=8)
}

fn entries_strategy() -> impl Strategy<Value = Vec<(Vec<u8>, i32)>> {
    prop::collection::vec((key_strategy(), any::<i32>()), 1..=24)
}

/// All non-empty prefixes of the given keys, i.e. exactly the node set the
/// trie materializes below the root.
fn all_prefixes<'a>(keys: impl IntoIterator<Item = &'a Vec<u8>>) -> BTreeSet<Vec<u8>> {
    let mut prefixes = BTreeSet::new();
    for key in keys {
        for len in 1..=key.len() {
            prefixes.insert(key[..len].to_vec());
        }
    }
    prefixes
}

fn build(entries: &[(Vec<u8>, i32)]) -> (Trie<u8, i32>, BTreeMap<Vec<u8>, i32>) {
    let mut trie = Trie::new();
    let mut model = BTreeMap::new();
    for (key, value) in entries {
        trie.insert(key.iter().copied(), *value);
        model.insert(key.clone(), *value);
    }
    (trie, model)
}

proptest! {
    #[test]
    fn prop_round_trip(entries in entries_strategy()) {
        let (mut trie, model) = build(&entries);

        for (key, value) in &model {
            let m = trie.match_prefix(key.iter().copied());
            prop_assert!(m.matched);
            prop_assert_eq!(*m.data, *value);
            prop_assert_eq!(*trie.entry(key.iter().copied()), *value);
        }
    }

    #[test]
    fn prop_match_mirrors_the_prefix_set(
        entries in entries_strategy(),
        probe in key_strategy(),
    ) {
        let (trie, model) = build(&entries);
        let prefixes = all_prefixes(model.keys());

        let m = trie.match_prefix(probe.iter().copied());
        let expected = probe.is_empty() || prefixes.contains(&probe);
        prop_assert_eq!(m.matched, expected);
    }

    #[test]
    fn prop_uninserted_prefixes_hold_defaults(entries in entries_strategy()) {
        let (mut trie, model) = build(&entries);
        let prefixes = all_prefixes(model.keys());

        for prefix in &prefixes {
            if !model.contains_key(prefix) {
                prop_assert_eq!(*trie.entry(prefix.iter().copied()), 0);
            }
        }
    }

    #[test]
    fn prop_cursor_enumerates_all_prefixes_in_order(entries in entries_strategy()) {
        let (mut trie, _) = build(&entries);
        let keys: Vec<Vec<u8>> = entries.iter().map(|(k, _)| k.clone()).collect();
        let expected: Vec<Vec<u8>> = all_prefixes(keys.iter()).into_iter().collect();

        let mut cur = trie.cursor();
        let mut seen = Vec::new();
        loop {
            cur.advance();
            if cur.at_end() {
                break;
            }
            seen.push(cur.key().unwrap());
        }
        // Pre-order over sorted edges is lexicographic order over node keys.
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn prop_cursor_symmetry(entries in entries_strategy()) {
        let (mut trie, _) = build(&entries);
        let mut cur = trie.cursor();

        let mut forward = Vec::new();
        while !cur.at_end() {
            cur.advance();
            if !cur.at_end() {
                forward.push(cur.key().unwrap());
            }
        }

        // Retreating replays the forward walk in reverse.
        for key in forward.iter().rev() {
            cur.retreat().unwrap();
            prop_assert_eq!(&cur.key().unwrap(), key);
        }
        cur.retreat().unwrap();
        prop_assert!(cur.at_begin());
        prop_assert_eq!(cur.retreat(), Err(CursorError::AtBegin));
    }

    #[test]
    fn prop_each_agrees_with_cursor(entries in entries_strategy()) {
        let (mut trie, _) = build(&entries);

        let mut from_each = Vec::new();
        trie.each(|key, _| {
            if !key.is_empty() {
                from_each.push(key.to_vec());
            }
            true
        });

        let mut cur = trie.cursor();
        let mut from_cursor = Vec::new();
        loop {
            cur.advance();
            if cur.at_end() {
                break;
            }
            from_cursor.push(cur.key().unwrap());
        }

        prop_assert_eq!(from_each, from_cursor);
    }
}
