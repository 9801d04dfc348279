// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::{BitSet, BLOCK_BITS};
use crate::result::Error;

#[test]
fn test_new_is_empty() {
    let bits = BitSet::new();
    assert_eq!(bits.len(), 0);
    assert!(bits.is_empty());
    assert!(bits.none());
    assert!(!bits.any());
    assert!(bits.all(), "all() is vacuously true on an empty set");
    assert_eq!(bits.popcount(), 0);
    assert!(bits.validate());
}

#[test]
fn test_single_bit_ops_return_old_value() {
    let mut bits = BitSet::with_count(70).expect("set");
    assert_eq!(bits.test(69), Ok(false));
    assert_eq!(bits.set(69, true), Ok(false));
    assert_eq!(bits.set(69, true), Ok(true));
    assert_eq!(bits.test(69), Ok(true));
    assert_eq!(bits.flip(69), Ok(true));
    assert_eq!(bits.test(69), Ok(false));
    assert_eq!(bits.flip(69), Ok(false));
    assert_eq!(bits.reset(69), Ok(true));
    assert_eq!(bits.test(69), Ok(false));
    assert!(bits.validate());
}

#[test]
fn test_out_of_range_is_argument_error() {
    let mut bits = BitSet::with_count(10).expect("set");
    assert_eq!(bits.test(10), Err(Error::InvalidArgument));
    assert_eq!(bits.set(99, true), Err(Error::InvalidArgument));
    assert_eq!(bits.popcount_range(4, 7), Err(Error::InvalidArgument));
    assert_eq!(bits.any_range(10, 0), Err(Error::InvalidArgument));
    // Zero-length range is still an argument error once start >= len.
    assert_eq!(bits.set_range(10, 0, true), Err(Error::InvalidArgument));
    // In range, a zero-length range is a no-op.
    assert_eq!(bits.set_range(4, 0, true), Ok(()));
    assert_eq!(bits.popcount(), 0);
}

#[test]
fn test_set_range_across_block_boundary() {
    let mut bits = BitSet::with_count(200).expect("set");
    bits.set_range(30, 70, true).expect("set_range");
    assert_eq!(bits.popcount(), 70);
    assert_eq!(bits.test(29), Ok(false));
    assert_eq!(bits.test(30), Ok(true));
    assert_eq!(bits.test(99), Ok(true));
    assert_eq!(bits.test(100), Ok(false));
    assert!(bits.validate());
    bits.set_range(40, 20, false).expect("reset_range");
    assert_eq!(bits.popcount(), 50);
    assert_eq!(bits.test(39), Ok(true));
    assert_eq!(bits.test(40), Ok(false));
    assert_eq!(bits.test(59), Ok(false));
    assert_eq!(bits.test(60), Ok(true));
}

#[test]
fn test_range_within_single_block() {
    let mut bits = BitSet::with_count(BLOCK_BITS * 2).expect("set");
    // Entirely inside the second block: first mask and last mask must
    // intersect in one step.
    bits.set_range(BLOCK_BITS + 3, 5, true).expect("set_range");
    assert_eq!(bits.popcount(), 5);
    assert_eq!(bits.popcount_range(BLOCK_BITS, BLOCK_BITS), Ok(5));
    assert_eq!(bits.any_range(0, BLOCK_BITS), Ok(false));
    assert_eq!(bits.all_range(BLOCK_BITS + 3, 5), Ok(true));
    assert_eq!(bits.all_range(BLOCK_BITS + 3, 6), Ok(false));
}

#[test]
fn test_flip_all_twice_is_identity() {
    let mut bits = BitSet::with_count(130).expect("set");
    bits.set_range(5, 60, true).expect("set_range");
    let before = bits.clone();
    bits.flip_all();
    assert_eq!(bits.popcount(), 130 - 60);
    assert!(bits.validate(), "tail stays zero after flip_all");
    bits.flip_all();
    assert_eq!(bits, before);
}

#[test]
fn test_flip_range() {
    let mut bits = BitSet::with_count(100).expect("set");
    bits.set_range(0, 100, true).expect("set_range");
    bits.flip_range(50, 25).expect("flip_range");
    assert_eq!(bits.popcount(), 75);
    assert_eq!(bits.test(49), Ok(true));
    assert_eq!(bits.test(50), Ok(false));
    assert_eq!(bits.test(74), Ok(false));
    assert_eq!(bits.test(75), Ok(true));
}

#[test]
fn test_popcount_complement_partition() {
    let mut bits = BitSet::with_count(190).expect("set");
    bits.set_range(17, 95, true).expect("set_range");
    let ones = bits.popcount();
    bits.flip_all();
    assert_eq!(ones + bits.popcount(), 190);
}

#[test]
fn test_any_none_all_ranges() {
    let mut bits = BitSet::with_count(256).expect("set");
    assert_eq!(bits.any_range(0, 256), Ok(false));
    assert_eq!(bits.none_range(0, 256), Ok(true));
    bits.set_range(100, 30, true).expect("set_range");
    assert_eq!(bits.any_range(0, 100), Ok(false));
    assert_eq!(bits.any_range(0, 101), Ok(true));
    assert_eq!(bits.all_range(100, 30), Ok(true));
    assert_eq!(bits.all_range(99, 31), Ok(false));
    assert_eq!(bits.all_range(100, 31), Ok(false));
    assert!(!bits.all());
    bits.set_all(true);
    assert!(bits.all());
    assert!(bits.validate());
}

#[test]
fn test_single_bit_scans() {
    let mut bits = BitSet::with_count(300).expect("set");
    assert_eq!(bits.first_trailing_one(), Err(Error::NotFound));
    assert_eq!(bits.first_leading_one(), Err(Error::NotFound));
    assert_eq!(bits.first_trailing_zero(), Ok(0));
    assert_eq!(bits.first_leading_zero(), Ok(299));
    bits.set(70, true).expect("set");
    bits.set(200, true).expect("set");
    assert_eq!(bits.first_trailing_one(), Ok(70));
    assert_eq!(bits.first_leading_one(), Ok(200));
    assert_eq!(bits.first_trailing_one_range(71, 229), Ok(200));
    assert_eq!(bits.first_leading_one_range(0, 200), Ok(70));
    assert_eq!(bits.first_trailing_one_range(71, 129), Err(Error::NotFound));
    bits.set_all(true);
    assert_eq!(bits.first_trailing_zero(), Err(Error::NotFound));
    assert_eq!(bits.first_leading_zero(), Err(Error::NotFound));
    assert_eq!(bits.first_trailing_zero_range(12, 100), Err(Error::NotFound));
}

#[test]
fn test_group_scan_zeros() {
    // All ones except zeros at {40..=44} and {70, 71}.
    let mut bits = BitSet::with_count(128).expect("set");
    bits.set_all(true);
    bits.set_range(40, 5, false).expect("reset");
    bits.set_range(70, 2, false).expect("reset");
    assert_eq!(bits.first_trailing_zeros(3), Ok(40));
    assert_eq!(bits.first_trailing_zeros(5), Ok(40));
    assert_eq!(bits.first_trailing_zeros(6), Err(Error::NotFound));
    assert_eq!(bits.first_trailing_zeros(2), Ok(40));
    assert_eq!(bits.first_leading_zeros(2), Ok(71));
    assert_eq!(bits.first_leading_zeros(3), Ok(44));
    assert_eq!(bits.first_leading_zeros(6), Err(Error::NotFound));
}

#[test]
fn test_group_scan_crosses_block_boundary() {
    let mut bits = BitSet::with_count(256).expect("set");
    bits.set_range(60, 10, true).expect("set_range");
    assert_eq!(bits.first_trailing_ones(10), Ok(60));
    assert_eq!(bits.first_trailing_ones(11), Err(Error::NotFound));
    assert_eq!(bits.first_leading_ones(10), Ok(69));
    assert_eq!(bits.first_leading_ones(4), Ok(69));
    assert_eq!(bits.first_trailing_ones(4), Ok(60));
}

#[test]
fn test_group_scan_spans_whole_blocks() {
    let mut bits = BitSet::with_count(256).expect("set");
    // Ones across three block boundaries: bits 60..190.
    bits.set_range(60, 130, true).expect("set_range");
    assert_eq!(bits.first_trailing_ones(130), Ok(60));
    assert_eq!(bits.first_trailing_ones(131), Err(Error::NotFound));
    assert_eq!(bits.first_leading_ones(130), Ok(189));
    assert_eq!(bits.first_leading_ones(131), Err(Error::NotFound));
    // A later, longer run wins over an earlier, shorter one.
    bits.set_range(200, 40, true).expect("set_range");
    assert_eq!(bits.first_trailing_ones(135), Err(Error::NotFound));
    assert_eq!(bits.first_trailing_ones(35), Ok(60));
    assert_eq!(bits.first_leading_ones(35), Ok(239));
}

#[test]
fn test_group_scan_rejects_broken_run() {
    let mut bits = BitSet::with_count(192).expect("set");
    // Run 50..64 carries into block 1 but breaks at bit 80.
    bits.set_range(50, 30, true).expect("set_range");
    // Fresh run later in block 1 crossing into block 2.
    bits.set_range(100, 40, true).expect("set_range");
    assert_eq!(bits.first_trailing_ones(30), Ok(50));
    assert_eq!(bits.first_trailing_ones(31), Ok(100));
    assert_eq!(bits.first_trailing_ones(40), Ok(100));
    assert_eq!(bits.first_trailing_ones(41), Err(Error::NotFound));
}

#[test]
fn test_group_equal_to_range_size() {
    let mut bits = BitSet::with_count(128).expect("set");
    bits.set_range(10, 50, true).expect("set_range");
    // Group of exactly the range size succeeds iff the range is uniform.
    assert_eq!(bits.first_trailing_ones_range(10, 50, 50), Ok(10));
    assert_eq!(bits.first_trailing_ones_range(9, 50, 50), Err(Error::NotFound));
    assert_eq!(bits.first_leading_ones_range(10, 50, 50), Ok(59));
    assert_eq!(bits.first_leading_zeros_range(60, 68, 68), Ok(127));
    // A group longer than the range can never fit.
    assert_eq!(bits.first_trailing_ones_range(10, 50, 51), Err(Error::NotFound));
    // Zero-sized groups are malformed.
    assert_eq!(bits.first_trailing_ones(0), Err(Error::InvalidArgument));
    assert_eq!(bits.first_leading_zeros(0), Err(Error::InvalidArgument));
}

#[test]
fn test_group_of_one_matches_single_scan() {
    let mut bits = BitSet::with_count(301).expect("set");
    fastrand::seed(0xB1B2);
    for _ in 0..64 {
        bits.set(fastrand::usize(0..301), true).expect("set");
    }
    assert_eq!(bits.first_trailing_ones(1), bits.first_trailing_one());
    assert_eq!(bits.first_leading_ones(1), bits.first_leading_one());
    assert_eq!(bits.first_trailing_zeros(1), bits.first_trailing_zero());
    assert_eq!(bits.first_leading_zeros(1), bits.first_leading_zero());
}

#[test]
fn test_group_scan_range_masks_outside_bits() {
    let mut bits = BitSet::with_count(192).expect("set");
    bits.set_all(true);
    // The range view must not see the ones outside [64, 64 + 32).
    assert_eq!(bits.first_trailing_ones_range(64, 32, 33), Err(Error::NotFound));
    assert_eq!(bits.first_trailing_ones_range(64, 32, 32), Ok(64));
    assert_eq!(bits.first_leading_ones_range(64, 32, 32), Ok(95));
    bits.set_range(64, 32, false).expect("reset");
    assert_eq!(bits.first_trailing_zeros_range(32, 96, 32), Ok(64));
    assert_eq!(bits.first_trailing_zeros_range(32, 96, 33), Err(Error::NotFound));
}

#[test]
fn test_shift_left_semantics() {
    let mut bits = BitSet::with_count(8).expect("set");
    for i in [0, 2, 4] {
        bits.set(i, true).expect("set");
    }
    let original = bits.clone();
    bits.shift_left(1);
    let got: Vec<usize> = (0..8).filter(|&i| bits.test(i) == Ok(true)).collect();
    assert_eq!(got, vec![1, 3, 5]);

    let mut wiped = original.clone();
    wiped.shift_left(8);
    assert!(wiped.none());

    let mut right = original.clone();
    right.shift_right(3);
    let got: Vec<usize> = (0..8).filter(|&i| right.test(i) == Ok(true)).collect();
    assert_eq!(got, vec![1], "bit 4 lands on index 1");
}

#[test]
fn test_shift_by_whole_blocks() {
    let mut bits = BitSet::with_count(BLOCK_BITS * 3).expect("set");
    bits.set(3, true).expect("set");
    bits.set(BLOCK_BITS + 1, true).expect("set");
    bits.shift_left(BLOCK_BITS);
    assert_eq!(bits.test(3), Ok(false));
    assert_eq!(bits.test(BLOCK_BITS + 3), Ok(true));
    assert_eq!(bits.test(2 * BLOCK_BITS + 1), Ok(true));
    assert_eq!(bits.popcount(), 2);
    bits.shift_right(BLOCK_BITS);
    assert_eq!(bits.test(3), Ok(true));
    assert_eq!(bits.test(BLOCK_BITS + 1), Ok(true));
    assert_eq!(bits.popcount(), 2);
    assert!(bits.validate());
}

#[test]
fn test_shift_round_trip_preserves_middle() {
    let mut bits = BitSet::with_count(200).expect("set");
    fastrand::seed(77);
    for _ in 0..60 {
        bits.set(fastrand::usize(0..200), true).expect("set");
    }
    let original = bits.clone();
    bits.shift_left(13);
    assert!(bits.validate(), "tail must stay zero after the shift");
    bits.shift_right(13);
    // The round trip zeroes the 13 bits dropped off the top and keeps
    // the rest.
    for i in 0..200 - 13 {
        assert_eq!(bits.test(i), original.test(i), "bit {i}");
    }
    for i in 200 - 13..200 {
        assert_eq!(bits.test(i), Ok(false), "bit {i}");
    }
}

#[test]
fn test_shift_zero_is_identity() {
    let mut bits = BitSet::with_count(90).expect("set");
    bits.set_range(10, 40, true).expect("set_range");
    let before = bits.clone();
    bits.shift_left(0);
    bits.shift_right(0);
    assert_eq!(bits, before);
}

#[test]
fn test_or_and_xor() {
    let mut a = BitSet::with_count(150).expect("set");
    a.set_range(0, 80, true).expect("set_range");
    let mut b = BitSet::with_count(150).expect("set");
    b.set_range(40, 110, true).expect("set_range");

    let mut or = a.clone();
    or.or(&b);
    assert_eq!(or.popcount(), 150);

    let mut and = a.clone();
    and.and(&b);
    assert_eq!(and.popcount(), 40);
    assert_eq!(and.first_trailing_one(), Ok(40));
    assert_eq!(and.first_leading_one(), Ok(79));

    let mut xor = a.clone();
    xor.xor(&b);
    assert_eq!(xor.popcount(), 110);
    assert_eq!(xor.test(39), Ok(true));
    assert_eq!(xor.test(40), Ok(false));
    assert!(or.validate() && and.validate() && xor.validate());
}

#[test]
fn test_algebra_self_identities() {
    let mut bits = BitSet::with_count(77).expect("set");
    bits.set_range(5, 50, true).expect("set_range");
    let before = bits.clone();
    let copy = bits.clone();
    bits.or(&copy);
    assert_eq!(bits, before, "or with self is the identity");
    bits.xor(&copy);
    assert!(bits.none(), "xor with self clears");
}

#[test]
fn test_algebra_zero_extends_shorter_operand() {
    // `and` with a shorter set clears everything past its end.
    let mut long = BitSet::with_count(300).expect("set");
    long.set_all(true);
    let mut short = BitSet::with_count(70).expect("set");
    short.set_all(true);
    long.and(&short);
    assert_eq!(long.len(), 300);
    assert_eq!(long.popcount(), 70);
    assert_eq!(long.first_leading_one(), Ok(69));

    // `or` with a longer set cannot widen the destination.
    let mut dst = BitSet::with_count(70).expect("set");
    let mut src = BitSet::with_count(300).expect("set");
    src.set_all(true);
    dst.or(&src);
    assert_eq!(dst.len(), 70);
    assert_eq!(dst.popcount(), 70);
    assert!(dst.validate(), "or must not leak past len()");
}

#[test]
fn test_subset_and_equality() {
    let mut a = BitSet::with_count(100).expect("set");
    a.set_range(10, 20, true).expect("set_range");
    let mut b = BitSet::with_count(160).expect("set");
    b.set_range(10, 40, true).expect("set_range");
    assert!(a.is_subset(&b));
    assert!(a.is_proper_subset(&b));
    assert!(!b.is_subset(&a));
    // Same content, same length: subset but not proper.
    let c = a.clone();
    assert!(a.is_subset(&c));
    assert!(!a.is_proper_subset(&c));
    assert_eq!(a, c);
    assert_ne!(a, b);
    // A longer all-zero tail keeps subset working via zero extension.
    let zeros = BitSet::with_count(500).expect("set");
    assert!(zeros.is_subset(&a));
    assert!(!a.is_subset(&zeros));
}

#[test]
fn test_push_back_growth_policy() {
    let mut bits = BitSet::new();
    assert_eq!(bits.capacity(), 0);
    bits.push_back(true).expect("push");
    // First growth allocates exactly one block.
    assert_eq!(bits.capacity(), BLOCK_BITS);
    for i in 1..BLOCK_BITS {
        bits.push_back(i % 2 == 0).expect("push");
    }
    assert_eq!(bits.capacity(), BLOCK_BITS);
    bits.push_back(true).expect("push crosses into a second block");
    assert_eq!(bits.capacity(), BLOCK_BITS * 2);
    assert_eq!(bits.len(), BLOCK_BITS + 1);
    assert_eq!(bits.test(BLOCK_BITS), Ok(true));
    assert!(bits.validate());
}

#[test]
fn test_push_pop_round_trip() {
    let mut bits = BitSet::new();
    let pattern = [true, false, true, true, false];
    for &b in &pattern {
        bits.push_back(b).expect("push");
    }
    assert_eq!(bits.len(), 5);
    for &b in pattern.iter().rev() {
        assert_eq!(bits.pop_back(), Some(b));
        assert!(bits.validate());
    }
    assert_eq!(bits.pop_back(), None);
}

#[test]
fn test_pop_back_restores_tail_zero() {
    let mut bits = BitSet::with_count(10).expect("set");
    bits.set_all(true);
    assert_eq!(bits.pop_back(), Some(true));
    assert_eq!(bits.len(), 9);
    assert_eq!(bits.popcount(), 9);
    assert!(bits.validate());
}

#[test]
fn test_fixed_set_refuses_growth() {
    let mut bits = BitSet::fixed(BLOCK_BITS).expect("set");
    for _ in 0..bits.capacity() - BLOCK_BITS {
        bits.push_back(true).expect("push within the allocated ceiling");
    }
    assert_eq!(bits.push_back(true), Err(Error::GrowthDisabled));
    let len = bits.len();
    // Explicit reserve is the escape hatch.
    bits.reserve(1).expect("reserve");
    bits.push_back(true).expect("push after reserve");
    assert_eq!(bits.len(), len + 1);
}

#[test]
fn test_clear_variants() {
    let mut bits = BitSet::with_count(128).expect("set");
    bits.set_all(true);
    let cap = bits.capacity();
    bits.clear();
    assert_eq!(bits.len(), 0);
    assert_eq!(bits.capacity(), cap);
    assert!(bits.validate());
    bits.push_back(true).expect("push into retained storage");
    bits.clear_and_free();
    assert_eq!(bits.capacity(), 0);
    assert!(bits.validate());
}

#[test]
fn test_blocks_expose_relocatable_words() {
    let mut bits = BitSet::with_count(BLOCK_BITS + 8).expect("set");
    bits.set(0, true).expect("set");
    bits.set(BLOCK_BITS, true).expect("set");
    let words = bits.blocks();
    assert_eq!(words.len(), 2);
    assert_eq!(words[0], 1);
    assert_eq!(words[1], 1);
}

#[test]
fn test_differential_against_bool_model() {
    let len = 3 * BLOCK_BITS + 17;
    let mut bits = BitSet::with_count(len).expect("set");
    let mut model = vec![false; len];
    fastrand::seed(0xC0FFEE);
    for _ in 0..500 {
        match fastrand::u8(0..5) {
            0 => {
                let i = fastrand::usize(0..len);
                let v = fastrand::bool();
                assert_eq!(bits.set(i, v), Ok(model[i]));
                model[i] = v;
            }
            1 => {
                let i = fastrand::usize(0..len);
                let count = fastrand::usize(0..=len - i);
                let v = fastrand::bool();
                bits.set_range(i, count, v).expect("set_range");
                for m in &mut model[i..i + count] {
                    *m = v;
                }
            }
            2 => {
                let i = fastrand::usize(0..len);
                let count = fastrand::usize(0..=len - i);
                bits.flip_range(i, count).expect("flip_range");
                for m in &mut model[i..i + count] {
                    *m = !*m;
                }
            }
            3 => {
                let k = fastrand::usize(0..len);
                bits.shift_left(k);
                model.copy_within(0..len - k, k);
                for m in &mut model[..k] {
                    *m = false;
                }
            }
            _ => {
                let k = fastrand::usize(0..len);
                bits.shift_right(k);
                model.copy_within(k.., 0);
                for m in &mut model[len - k..] {
                    *m = false;
                }
            }
        }
        assert!(bits.validate());
        let expect_pop = model.iter().filter(|&&b| b).count();
        assert_eq!(bits.popcount(), expect_pop);
        let expect_first = model.iter().position(|&b| b).ok_or(Error::NotFound);
        assert_eq!(bits.first_trailing_one(), expect_first);
        let expect_last = model.iter().rposition(|&b| b).ok_or(Error::NotFound);
        assert_eq!(bits.first_leading_one(), expect_last);
    }
}
