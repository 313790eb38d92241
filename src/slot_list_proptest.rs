#![cfg(test)]

// Property tests for SlotList kept next to the implementation, in the
// same crate-internal style as the map's own test modules.

use crate::slot_list::{Slot, SlotList};
use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
enum Op {
    Push(i32),
    Remove(usize),
    Get(usize),
    Iterate,
    IterateBack,
    Positions,
    Clear,
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let op = prop_oneof![
        4 => any::<i32>().prop_map(Op::Push),
        3 => any::<usize>().prop_map(Op::Remove),
        2 => any::<usize>().prop_map(Op::Get),
        1 => Just(Op::Iterate),
        1 => Just(Op::IterateBack),
        1 => Just(Op::Positions),
        1 => Just(Op::Clear),
    ];
    proptest::collection::vec(op, 1..80)
}

// Property: State-machine equivalence against a Vec of (slot, value)
// pairs kept in insertion order. Invariants exercised across random
// operation sequences:
// - push_back hands out the lowest free slot, growing the slab exactly
//   when the append would fill it; slots never alias a live element.
// - Live slots stay resolvable to their value across growth and
//   unrelated removals; removal returns the stored value.
// - iter (both directions) matches the model's order; raw_iter plus
//   position reconstructs the model's slot sequence.
// - len/first/last parity with the model after every op; the slab stays
//   a power of two and strictly longer than the element count.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine(ops in arb_ops()) {
        let mut sut: SlotList<i32> = SlotList::new();
        let mut live: Vec<(Slot, i32)> = Vec::new();

        for op in ops {
            match op {
                Op::Push(v) => {
                    let capacity = sut.capacity();
                    let grown = if sut.len() + 1 >= capacity {
                        capacity * 2
                    } else {
                        capacity
                    };
                    let occupied: BTreeSet<usize> =
                        live.iter().map(|(slot, _)| slot.index()).collect();
                    let expected = (0..grown)
                        .find(|index| !occupied.contains(index))
                        .expect("a grown slab has a free slot");

                    let slot = sut.push_back(v);
                    prop_assert_eq!(slot.index(), expected, "push must take the lowest free slot");
                    prop_assert_eq!(sut.capacity(), grown);
                    live.push((slot, v));
                }
                Op::Remove(i) => {
                    if live.is_empty() {
                        prop_assert!(sut.is_empty());
                    } else {
                        let (slot, v) = live.remove(i % live.len());
                        prop_assert_eq!(sut.remove(slot), Some(v));
                    }
                }
                Op::Get(i) => {
                    if live.is_empty() {
                        prop_assert_eq!(sut.first(), None);
                    } else {
                        let (slot, v) = live[i % live.len()];
                        prop_assert_eq!(sut.get(slot), Some(&v));
                    }
                }
                Op::Iterate => {
                    let got: Vec<i32> = sut.iter().copied().collect();
                    let want: Vec<i32> = live.iter().map(|(_, v)| *v).collect();
                    prop_assert_eq!(got, want);
                }
                Op::IterateBack => {
                    let got: Vec<i32> = sut.iter().rev().copied().collect();
                    let want: Vec<i32> = live.iter().rev().map(|(_, v)| *v).collect();
                    prop_assert_eq!(got, want);
                }
                Op::Positions => {
                    let got: Vec<Slot> =
                        sut.raw_iter().map(|node| sut.position(node)).collect();
                    let want: Vec<Slot> = live.iter().map(|(slot, _)| *slot).collect();
                    prop_assert_eq!(got, want);
                }
                Op::Clear => {
                    let capacity = sut.capacity();
                    sut.clear();
                    live.clear();
                    prop_assert_eq!(sut.capacity(), capacity);
                }
            }

            // Post-conditions after each op
            prop_assert_eq!(sut.len(), live.len());
            prop_assert_eq!(sut.is_empty(), live.is_empty());
            prop_assert!(sut.len() < sut.capacity());
            prop_assert!(sut.capacity().is_power_of_two());
            prop_assert_eq!(sut.first(), live.first().map(|(slot, _)| *slot));
            prop_assert_eq!(sut.last(), live.last().map(|(slot, _)| *slot));
        }
    }
}
