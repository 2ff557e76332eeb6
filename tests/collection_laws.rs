//! Property-based tests for Collection laws.
//!
//! Verifies the ordering, key-preservation and aggregation invariants of
//! Collection using proptest.

use fluentseq::Collection;
use proptest::prelude::*;

proptest! {
    /// Construction Law: from_values yields the input in original order
    /// with keys 0..n.
    #[test]
    fn prop_from_values_preserves_order(
        values in prop::collection::vec(any::<i32>(), 0..50)
    ) {
        let collection = Collection::from_values(values.clone());
        let expected: Vec<(usize, i32)> = values.into_iter().enumerate().collect();
        prop_assert_eq!(collection.all(), expected);
    }

    /// Push-Pop Law: pop undoes push and leaves prior contents unchanged.
    #[test]
    fn prop_push_pop_roundtrip(
        values in prop::collection::vec(any::<i32>(), 0..30),
        extra in any::<i32>()
    ) {
        let mut collection = Collection::from_values(values);
        let before = collection.all();

        collection.push(extra);
        prop_assert_eq!(collection.pop(), Ok(extra));
        prop_assert_eq!(collection.all(), before);
    }

    /// Map Law: map preserves length and keys, and applies the function
    /// value-wise.
    #[test]
    fn prop_map_preserves_keys_and_applies_function(
        values in prop::collection::vec(any::<i16>(), 0..50)
    ) {
        let collection = Collection::from_values(values.clone());
        let mapped = collection.map(|value| i32::from(*value) * 2);

        prop_assert_eq!(mapped.len(), collection.len());
        prop_assert_eq!(
            mapped.keys().copied().collect::<Vec<_>>(),
            collection.keys().copied().collect::<Vec<_>>()
        );
        for (index, value) in values.iter().enumerate() {
            prop_assert_eq!(mapped.get(&index), Some(&(i32::from(*value) * 2)));
        }
    }

    /// Filter Law: surviving entries keep their keys and relative order,
    /// and every survivor satisfies the predicate.
    #[test]
    fn prop_filter_preserves_keys_and_satisfies_predicate(
        values in prop::collection::vec(any::<i32>(), 0..50)
    ) {
        let collection = Collection::from_values(values);
        let survivors = collection.filter(|_, value| value % 2 == 0);

        prop_assert!(survivors.values().all(|value| value % 2 == 0));

        let expected: Vec<(usize, i32)> = collection
            .all()
            .into_iter()
            .filter(|(_, value)| value % 2 == 0)
            .collect();
        prop_assert_eq!(survivors.all(), expected);
    }

    /// Partition Law: both halves preserve keys and together they restore
    /// the original entry sequence when merged by key.
    #[test]
    fn prop_partition_is_exhaustive(
        values in prop::collection::vec(any::<i32>(), 0..50)
    ) {
        let collection = Collection::from_values(values);
        let (matching, rest) = collection.partition(|_, value| *value >= 0);

        prop_assert_eq!(matching.len() + rest.len(), collection.len());

        let mut merged = matching.all();
        merged.extend(rest.all());
        merged.sort_by_key(|(key, _)| *key);
        prop_assert_eq!(merged, collection.all());
    }

    /// Group Law: groups partition the collection exactly, and every
    /// member maps to its group key.
    #[test]
    fn prop_group_by_partitions_exactly(
        values in prop::collection::vec(0_i32..100, 0..50)
    ) {
        let collection = Collection::from_values(values);
        let groups = collection.group_by(|_, value| value % 7);

        let mut members: Vec<(usize, i32)> = Vec::new();
        for (group_key, group) in &groups {
            for value in group.values() {
                prop_assert_eq!(value % 7, *group_key);
            }
            members.extend(group.all());
        }

        members.sort_by_key(|(key, _)| *key);
        prop_assert_eq!(members, collection.all());
    }

    /// Zip Law: the result length is the minimum of the input lengths and
    /// pairs are positional.
    #[test]
    fn prop_zip_truncates_to_shorter(
        left in prop::collection::vec(any::<i32>(), 0..30),
        right in prop::collection::vec(any::<i32>(), 0..30)
    ) {
        let left_collection = Collection::from_values(left.clone());
        let right_collection = Collection::from_values(right.clone());
        let zipped = left_collection.zip(&right_collection);

        prop_assert_eq!(zipped.len(), left.len().min(right.len()));
        for (index, (a, b)) in zipped.values().enumerate() {
            prop_assert_eq!(*a, left[index]);
            prop_assert_eq!(*b, right[index]);
        }
    }

    /// Reduce Law: reduce equals a fold seeded with the first value.
    #[test]
    fn prop_reduce_equals_fold_seeded_with_first(
        values in prop::collection::vec(any::<i32>(), 1..50)
    ) {
        let collection = Collection::from_values(values);
        let reduced = collection.reduce(|carry, value| carry.wrapping_add(*value));

        let first = *collection.first().unwrap();
        let folded = collection
            .skip(1)
            .fold(first, |carry, value| carry.wrapping_add(*value));
        prop_assert_eq!(reduced, Some(folded));
    }

    /// Sort Law: sort and sort_desc are reverses of each other for
    /// distinct values.
    #[test]
    fn prop_sort_and_sort_desc_are_reverses(
        values in prop::collection::hash_set(any::<i32>(), 0..50)
    ) {
        let collection = Collection::from_values(values);

        let ascending: Vec<i32> = collection.sort().values().copied().collect();
        let mut descending: Vec<i32> = collection.sort_desc().values().copied().collect();
        descending.reverse();

        prop_assert_eq!(ascending, descending);
    }

    /// Chunk Law: chunks have at most `size` entries, only the final chunk
    /// may be shorter, and concatenating them restores the original
    /// entries.
    #[test]
    fn prop_chunk_concatenation_restores_entries(
        values in prop::collection::vec(any::<i32>(), 0..50),
        size in 1_usize..8
    ) {
        let collection = Collection::from_values(values);
        let chunks = collection.chunk(size);

        let mut restored: Vec<(usize, i32)> = Vec::new();
        for (index, (_, chunk)) in chunks.iter().enumerate() {
            prop_assert!(chunk.len() <= size);
            if index + 1 < chunks.len() {
                prop_assert_eq!(chunk.len(), size);
            }
            restored.extend(chunk.all());
        }
        prop_assert_eq!(restored, collection.all());
    }

    /// Slice Law: a positional window keeps the original keys.
    #[test]
    fn prop_slice_preserves_original_keys(
        values in prop::collection::vec(any::<i32>(), 0..50),
        start in 0_usize..60,
        length in 0_usize..60
    ) {
        let collection = Collection::from_values(values);
        let window = collection.slice(start..start.saturating_add(length));

        let expected: Vec<(usize, i32)> = collection
            .all()
            .into_iter()
            .skip(start)
            .take(length)
            .collect();
        prop_assert_eq!(window.all(), expected);
    }

    /// Concat Law: concat preserves the value sequence of both inputs and
    /// renumbers keys from zero.
    #[test]
    fn prop_concat_appends_values(
        left in prop::collection::vec(any::<i32>(), 0..30),
        right in prop::collection::vec(any::<i32>(), 0..30)
    ) {
        let left_collection = Collection::from_values(left.clone());
        let right_collection = Collection::from_values(right.clone());
        let joined = left_collection.concat(&right_collection);

        let mut expected_values = left;
        expected_values.extend(right);
        prop_assert_eq!(
            joined.all(),
            expected_values.into_iter().enumerate().collect::<Vec<_>>()
        );
    }

    /// Take-Skip Law: take(n) followed by the entries of skip(n) restores
    /// the collection.
    #[test]
    fn prop_take_and_skip_are_complementary(
        values in prop::collection::vec(any::<i32>(), 0..50),
        count in 0_usize..60
    ) {
        let collection = Collection::from_values(values);

        let mut recombined = collection.take(count).all();
        recombined.extend(collection.skip(count).all());
        prop_assert_eq!(recombined, collection.all());
    }
}
