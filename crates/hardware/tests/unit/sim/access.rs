//! Physical Access Unit Tests.
//!
//! Verifies hit/miss logic, fills, LRU evictions and recency bookkeeping for
//! single accesses against a [`CacheStore`](csim_core::cache::CacheStore).
//!
//! Most tests use s=1, E=2, b=4: two sets of two 16-byte lines, so
//!   set index = (addr >> 4) & 1
//!   tag       = addr >> 5

use csim_core::cache::AccessOutcome;
use csim_core::sim::access;
use rstest::rstest;

use crate::common::{addr, store};

const S: u32 = 1;
const E: usize = 2;
const B: u32 = 4;

// ══════════════════════════════════════════════════════════
// 1. Cold Miss
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(0x0)]
#[case(0x10)]
#[case(0x7fff_fff0)]
#[case(u64::MAX)]
fn first_access_to_empty_set_misses_without_eviction(#[case] a: u64) {
    let mut cache = store(S, E, B);
    assert_eq!(access(&mut cache, a), AccessOutcome::MISS);
    assert!(cache.contains(a));
    assert_eq!(cache.occupancy(), 1);
}

// ══════════════════════════════════════════════════════════
// 2. Warm Hit
// ══════════════════════════════════════════════════════════

#[test]
fn repeated_address_hits_after_first_miss() {
    let mut cache = store(S, E, B);
    let outcomes: Vec<AccessOutcome> = (0..5).map(|_| access(&mut cache, 0x40)).collect();
    assert_eq!(outcomes[0], AccessOutcome::MISS);
    assert!(outcomes[1..].iter().all(|o| *o == AccessOutcome::HIT));
}

#[test]
fn same_block_different_offset_hits() {
    let mut cache = store(S, E, B);
    let _ = access(&mut cache, 0x100);
    assert_eq!(access(&mut cache, 0x10f), AccessOutcome::HIT);
}

#[test]
fn hit_makes_line_most_recent() {
    let mut cache = store(S, E, B);
    let a = addr(S, B, 0, 1);
    let b = addr(S, B, 0, 2);
    let _ = access(&mut cache, a);
    let _ = access(&mut cache, b);
    let _ = access(&mut cache, a);

    let set = cache.set(0);
    let line_a = set.iter().find(|l| l.tag() == 1).unwrap();
    let line_b = set.iter().find(|l| l.tag() == 2).unwrap();
    assert_eq!(line_a.recency(), 0);
    assert_eq!(line_b.recency(), 1);
}

// ══════════════════════════════════════════════════════════
// 3. Fill and Eviction
// ══════════════════════════════════════════════════════════

#[test]
fn misses_fill_ways_in_order() {
    let mut cache = store(S, E, B);
    let _ = access(&mut cache, addr(S, B, 1, 7));
    let _ = access(&mut cache, addr(S, B, 1, 8));
    let tags: Vec<u64> = cache.set(1).iter().map(|l| l.tag()).collect();
    assert_eq!(tags, vec![7, 8]);
    assert!(cache.set(0).iter().all(|l| !l.is_valid()));
}

#[test]
fn set_conflict_evicts_least_recently_used() {
    let mut cache = store(S, E, B);
    let a = addr(S, B, 0, 1);
    let b = addr(S, B, 0, 2);
    let c = addr(S, B, 0, 3);

    assert_eq!(access(&mut cache, a), AccessOutcome::MISS);
    assert_eq!(access(&mut cache, b), AccessOutcome::MISS);
    assert_eq!(access(&mut cache, c), AccessOutcome::MISS_EVICTION);

    assert!(!cache.contains(a), "LRU victim should be evicted");
    assert!(cache.contains(b));
    assert!(cache.contains(c));
}

#[test]
fn reaccess_protects_line_from_eviction() {
    let mut cache = store(S, E, B);
    let a = addr(S, B, 0, 1);
    let b = addr(S, B, 0, 2);
    let c = addr(S, B, 0, 3);

    let _ = access(&mut cache, a);
    let _ = access(&mut cache, b);
    assert_eq!(access(&mut cache, a), AccessOutcome::HIT);
    assert_eq!(access(&mut cache, c), AccessOutcome::MISS_EVICTION);

    assert!(cache.contains(a));
    assert!(!cache.contains(b), "b became LRU once a was re-used");
}

#[test]
fn evicted_line_takes_the_victims_way() {
    let mut cache = store(S, E, B);
    let _ = access(&mut cache, addr(S, B, 0, 1));
    let _ = access(&mut cache, addr(S, B, 0, 2));
    let _ = access(&mut cache, addr(S, B, 0, 3));
    let tags: Vec<u64> = cache.set(0).iter().map(|l| l.tag()).collect();
    assert_eq!(tags, vec![3, 2]);
    assert_eq!(cache.set(0)[0].recency(), 0);
    assert_eq!(cache.set(0)[1].recency(), 1);
}

#[test]
fn conflicts_stay_within_their_set() {
    let mut cache = store(S, E, B);
    for tag in 0..6 {
        let _ = access(&mut cache, addr(S, B, 0, tag));
    }
    assert_eq!(access(&mut cache, addr(S, B, 1, 0)), AccessOutcome::MISS);
    assert_eq!(cache.occupancy(), 3);
}

// ══════════════════════════════════════════════════════════
// 4. Capacity
// ══════════════════════════════════════════════════════════

/// E distinct tags exactly fill a set; re-accessing the first still hits.
#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
#[case(8)]
fn e_distinct_tags_fit_and_first_still_hits(#[case] e: usize) {
    let mut cache = store(2, e, 3);
    for tag in 0..e as u64 {
        assert_eq!(access(&mut cache, addr(2, 3, 1, tag)), AccessOutcome::MISS);
    }
    assert_eq!(access(&mut cache, addr(2, 3, 1, 0)), AccessOutcome::HIT);
}

/// The (E+1)-th distinct tag evicts exactly one line: the first one inserted.
#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
#[case(8)]
fn e_plus_one_tags_evict_exactly_the_oldest(#[case] e: usize) {
    let mut cache = store(2, e, 3);
    for tag in 0..e as u64 {
        let _ = access(&mut cache, addr(2, 3, 1, tag));
    }
    let outcome = access(&mut cache, addr(2, 3, 1, e as u64));
    assert_eq!(outcome, AccessOutcome::MISS_EVICTION);
    assert!(!cache.contains(addr(2, 3, 1, 0)));
    for tag in 1..=e as u64 {
        assert!(cache.contains(addr(2, 3, 1, tag)), "tag {tag} should survive");
    }
    assert_eq!(cache.occupancy(), e);
}

/// Touching the MRU line again changes nothing but its own recency.
#[test]
fn reaccessing_mru_line_does_not_change_later_evictions() {
    let tags = [1u64, 2, 3, 4, 5];
    let run = |touch_mru: bool| {
        let mut cache = store(0, 3, 0);
        let mut outcomes = Vec::new();
        for (i, &tag) in tags.iter().enumerate() {
            outcomes.push(access(&mut cache, tag));
            if touch_mru && i == 2 {
                let _ = access(&mut cache, tag);
            }
        }
        (outcomes, cache.lines().to_vec())
    };
    assert_eq!(run(false), run(true));
}
