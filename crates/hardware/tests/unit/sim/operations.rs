//! Operation Expansion Unit Tests.
//!
//! A load or store is exactly one physical access; a modify is exactly two,
//! to the same address, with the second always hitting.

use csim_core::cache::AccessOutcome;
use csim_core::sim::apply_operation;
use csim_core::trace::{Operation, TraceOperation};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{addr, store};

#[rstest]
#[case(Operation::Load)]
#[case(Operation::Store)]
fn load_and_store_perform_one_access(#[case] op: Operation) {
    let mut cache = store(2, 1, 2);
    let outcome = apply_operation(&mut cache, TraceOperation::new(op, 0x20));
    assert_eq!(outcome.second, None);
    assert_eq!(outcome.accesses().count(), 1);
    assert_eq!((outcome.hits(), outcome.misses(), outcome.evictions()), (0, 1, 0));

    let again = apply_operation(&mut cache, TraceOperation::new(op, 0x20));
    assert_eq!((again.hits(), again.misses(), again.evictions()), (1, 0, 0));
}

#[test]
fn load_and_store_share_blocks() {
    let mut cache = store(2, 1, 2);
    let _ = apply_operation(&mut cache, TraceOperation::store(0x44));
    let load = apply_operation(&mut cache, TraceOperation::load(0x46));
    assert_eq!(load.first, AccessOutcome::HIT);
}

#[test]
fn modify_on_absent_block_misses_then_hits() {
    let mut cache = store(2, 1, 2);
    let outcome = apply_operation(&mut cache, TraceOperation::modify(0x30));
    assert_eq!(outcome.first, AccessOutcome::MISS);
    assert_eq!(outcome.second, Some(AccessOutcome::HIT));
    assert_eq!((outcome.hits(), outcome.misses(), outcome.evictions()), (1, 1, 0));
}

#[test]
fn modify_on_present_block_hits_twice() {
    let mut cache = store(2, 1, 2);
    let _ = apply_operation(&mut cache, TraceOperation::load(0x30));
    let outcome = apply_operation(&mut cache, TraceOperation::modify(0x30));
    assert_eq!(outcome.first, AccessOutcome::HIT);
    assert_eq!(outcome.second, Some(AccessOutcome::HIT));
    assert_eq!((outcome.hits(), outcome.misses(), outcome.evictions()), (2, 0, 0));
}

#[test]
fn modify_evicts_at_most_once() {
    let (s, b) = (0, 4);
    let mut cache = store(s, 1, b);
    let _ = apply_operation(&mut cache, TraceOperation::load(addr(s, b, 0, 1)));
    let outcome = apply_operation(&mut cache, TraceOperation::modify(addr(s, b, 0, 2)));
    assert_eq!(outcome.first, AccessOutcome::MISS_EVICTION);
    assert_eq!(outcome.second, Some(AccessOutcome::HIT));
    assert_eq!((outcome.hits(), outcome.misses(), outcome.evictions()), (1, 1, 1));
}

#[test]
fn outcome_keeps_the_operation() {
    let mut cache = store(1, 1, 1);
    let op = TraceOperation {
        op: Operation::Store,
        address: 0xabc,
        size: 8,
    };
    assert_eq!(apply_operation(&mut cache, op).operation, op);
}

#[rstest]
#[case(Operation::Load, 1)]
#[case(Operation::Store, 1)]
#[case(Operation::Modify, 2)]
fn access_count_matches_operation(#[case] op: Operation, #[case] expected: usize) {
    let mut cache = store(1, 2, 1);
    let outcome = apply_operation(&mut cache, TraceOperation::new(op, 0x8));
    assert_eq!(op.accesses(), expected);
    assert_eq!(outcome.accesses().count(), expected);
}

// ══════════════════════════════════════════════════════════
// Verbose formatting
// ══════════════════════════════════════════════════════════

#[test]
fn verbose_line_lists_each_access() {
    let (s, b) = (0, 4);
    let mut cache = store(s, 1, b);
    let load = apply_operation(&mut cache, TraceOperation::load(0x10));
    let modify = apply_operation(&mut cache, TraceOperation::modify(0x20));
    let store_hit = apply_operation(&mut cache, TraceOperation::store(0x24));

    assert_eq!(load.to_string(), "L 10,1 miss");
    assert_eq!(modify.to_string(), "M 20,1 miss eviction hit");
    assert_eq!(store_hit.to_string(), "S 24,1 hit");
}
