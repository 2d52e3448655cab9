#![forbid(unsafe_code)]

//! Property-based invariant tests for bounded mirrors.
//!
//! For **any** sequence of list mutations:
//!
//! 1. The mirror equals the leading `capacity` items of the source after
//!    every mutation.
//! 2. Changes forwarded by the mirror, replayed onto a plain vector,
//!    reproduce the mirror and never exceed `capacity` items.
//! 3. A mirror of a mirror equals the leading `min(c1, c2)` source items.
//! 4. Two consecutive resets leave the same mirror.
//! 5. A single change never plans more than two mirror steps, whatever the
//!    source length.

use std::cell::RefCell;
use std::rc::Rc;

use mirror_runtime::reactive::MirrorWindow;
use mirror_runtime::{BoundedMirror, ListChange, ObservableList};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Push(u32),
    Insert(usize, u32),
    Move(usize, usize),
    Remove(usize),
    Replace(usize, u32),
    Reset(Vec<u32>),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u32>().prop_map(Op::Push),
        4 => (any::<usize>(), any::<u32>()).prop_map(|(at, v)| Op::Insert(at, v)),
        4 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Move(a, b)),
        4 => any::<usize>().prop_map(Op::Remove),
        3 => (any::<usize>(), any::<u32>()).prop_map(|(at, v)| Op::Replace(at, v)),
        1 => proptest::collection::vec(any::<u32>(), 0..20).prop_map(Op::Reset),
        1 => Just(Op::Clear),
    ]
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op(), 0..120)
}

fn initial() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(any::<u32>(), 0..24)
}

// ── Helpers ─────────────────────────────────────────────────────────────

/// Apply `op` with its raw indices folded into the valid range.
fn apply(list: &ObservableList<u32>, op: &Op) {
    let len = list.len();
    match op {
        Op::Push(v) => list.push(*v),
        Op::Insert(at, v) => list.insert(at % (len + 1), *v),
        Op::Move(a, b) if len > 0 => list.move_item(a % len, b % len),
        Op::Remove(at) if len > 0 => {
            let _ = list.remove(at % len);
        }
        Op::Replace(at, v) if len > 0 => {
            let _ = list.replace(at % len, *v);
        }
        Op::Reset(items) => list.reset(items.clone()),
        Op::Clear => list.clear(),
        Op::Move(..) | Op::Remove(_) | Op::Replace(..) => {}
    }
}

fn leading(list: &ObservableList<u32>, n: usize) -> Vec<u32> {
    list.with(|items| items[..items.len().min(n)].to_vec())
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Mirror equals source prefix after every mutation
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mirror_tracks_prefix(start in initial(), capacity in 1usize..8, steps in ops()) {
        let source = ObservableList::from_vec(start);
        let mirror = BoundedMirror::new(&source, capacity).unwrap();
        prop_assert_eq!(mirror.mirror(), leading(&source, capacity));

        for (i, op) in steps.iter().enumerate() {
            apply(&source, op);
            prop_assert_eq!(
                mirror.mirror(),
                leading(&source, capacity),
                "diverged after step {} ({:?})", i, op
            );
            prop_assert!(mirror.len() <= capacity);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Forwarded changes replay to the mirror
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn forwarded_changes_replay(start in initial(), capacity in 1usize..8, steps in ops()) {
        let source = ObservableList::from_vec(start);
        let mirror = BoundedMirror::new(&source, capacity).unwrap();

        let replica = Rc::new(RefCell::new(mirror.mirror()));
        let max_len = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&replica);
        let peak = Rc::clone(&max_len);
        let _sub = mirror.subscribe(move |change: &ListChange<u32>, items| {
            let mut replica = sink.borrow_mut();
            if change.is_reset() {
                *replica = items.to_vec();
            } else {
                change.apply_to(&mut replica);
            }
            let mut peak = peak.borrow_mut();
            *peak = (*peak).max(replica.len());
        });

        for op in &steps {
            apply(&source, op);
            prop_assert_eq!(&*replica.borrow(), &mirror.mirror());
        }
        prop_assert!(*max_len.borrow() <= capacity);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Chained mirrors
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mirror_of_mirror_tracks_prefix(
        start in initial(),
        outer in 1usize..8,
        inner in 1usize..8,
        steps in ops(),
    ) {
        let source = ObservableList::from_vec(start);
        let first = BoundedMirror::new(&source, outer).unwrap();
        let second = BoundedMirror::new(&first, inner).unwrap();

        for op in &steps {
            apply(&source, op);
            prop_assert_eq!(second.mirror(), leading(&source, outer.min(inner)));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Reset idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn double_reset_is_stable(items in initial(), capacity in 1usize..8) {
        let source = ObservableList::new();
        let mirror = BoundedMirror::new(&source, capacity).unwrap();

        source.reset(items.clone());
        let once = mirror.mirror();
        source.reset(items);
        prop_assert_eq!(mirror.mirror(), once);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Step count is bounded regardless of source size
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn plan_never_exceeds_two_steps(
        len in 1usize..500,
        capacity in 1usize..16,
        a in any::<usize>(),
        b in any::<usize>(),
    ) {
        let source: Vec<u32> = (0..len as u32).collect();
        let window = MirrorWindow::new(capacity, len.min(capacity));
        let changes = [
            ListChange::Moved { from: a % len, to: b % len },
            ListChange::Replaced { index: a % len, item: 7 },
        ];
        for change in &changes {
            let steps = window.plan(change, source.as_slice());
            prop_assert!(steps.len() <= 2);
            prop_assert!(!steps.spilled());
        }
    }
}
