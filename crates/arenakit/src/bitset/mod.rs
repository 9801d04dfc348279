// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Compact bit set
//!
//! A dense bit array over machine-word blocks. Conceptually the set is a
//! binary integer: index 0 is the least-significant bit, so `shift_left`
//! moves bits toward higher indices the way `<<` does.
//!
//! Every range operation decomposes `[i, i + count)` into a first-block
//! mask, whole middle blocks, and a last-block mask; a range inside a
//! single block intersects the two masks and skips the middle entirely.
//! Addressing is shift-and-mask only (`BLOCK_BITS` is a power of two),
//! and bits at positions `>= len()` in the last block are kept zero
//! after every mutation (the tail-zero invariant).
//!
//! ```rust
//! use arenakit::BitSet;
//!
//! let mut bits = BitSet::with_count(200)?;
//! bits.set_range(30, 70, true)?;
//! assert_eq!(bits.popcount(), 70);
//! assert_eq!(bits.first_trailing_one()?, 30);
//! assert_eq!(bits.first_trailing_zeros(40)?, 100);
//! # Ok::<(), arenakit::Error>(())
//! ```
//!
//! Read-only queries take `&self` and are re-entrant on one instance;
//! the set itself is single-owner like the rest of the crate.

#[cfg(test)]
mod tests;

use crate::result::{Error, Result};
use std::fmt;

/// Storage unit of the bit set: one machine word.
pub type Block = usize;

/// Bits per storage block; a power of two.
pub const BLOCK_BITS: usize = usize::BITS as usize;

const BLOCK_SHIFT: usize = BLOCK_BITS.trailing_zeros() as usize;

/// Signals that a leading-direction run reaches bit 0 of its block and
/// may continue from the most-significant bit of the next block down.
const GROUP_CARRY: isize = -1;

#[inline]
fn block_i(i: usize) -> usize {
    i >> BLOCK_SHIFT
}

#[inline]
fn bit_i(i: usize) -> usize {
    i & (BLOCK_BITS - 1)
}

#[inline]
fn blocks_for(bits: usize) -> usize {
    bits.div_ceil(BLOCK_BITS)
}

/// Mask of bits `[bit_i(i), BLOCK_BITS)` within `i`'s block.
#[inline]
fn first_mask(i: usize) -> Block {
    Block::MAX << bit_i(i)
}

/// Mask of the low `bit_i(end - 1) + 1` bits of the last block of a
/// range ending (exclusively) at `end`. Requires `end >= 1`.
#[inline]
fn last_mask(end: usize) -> Block {
    Block::MAX >> (BLOCK_BITS - 1 - bit_i(end - 1))
}

/// A range decomposed into first block, last block, and their masks.
/// When the range lives in one block the two masks are intersected, so
/// the middle path never runs.
struct Span {
    first: usize,
    last: usize,
    first_mask: Block,
    last_mask: Block,
}

fn span(i: usize, count: usize) -> Span {
    debug_assert!(count > 0);
    let end = i + count;
    let first = block_i(i);
    let last = block_i(end - 1);
    let mut fm = first_mask(i);
    let mut lm = last_mask(end);
    if first == last {
        fm &= lm;
        lm = fm;
    }
    Span {
        first,
        last,
        first_mask: fm,
        last_mask: lm,
    }
}

/// Trailing-direction group helper.
///
/// Looks for a run of at least `needed` ones starting at or above
/// `bit_offset`:
/// 1. run found: returns `(start, run_len)` and the search is complete;
/// 2. the block ends in a suffix of ones reaching the most-significant
///    bit: returns `(BLOCK_BITS - suffix, suffix)` so the caller can
///    extend it into the next block;
/// 3. otherwise `(BLOCK_BITS, 0)`: nothing usable, skip the block.
///
/// Each run is inspected once, so a whole scan stays linear.
fn max_trailing_ones(block: Block, bit_offset: usize, needed: usize) -> (usize, usize) {
    debug_assert!(needed >= 1 && bit_offset < BLOCK_BITS);
    let mut b = block & (Block::MAX << bit_offset);
    while b != 0 {
        let start = b.trailing_zeros() as usize;
        let run = (!(b >> start)).trailing_zeros() as usize;
        if run >= needed {
            return (start, run);
        }
        if start + run == BLOCK_BITS {
            return (BLOCK_BITS - run, run);
        }
        // run < BLOCK_BITS here: a full-block run took one of the exits.
        let clear = ((1 as Block) << run) - 1;
        b &= !(clear << start);
    }
    (BLOCK_BITS, 0)
}

/// Leading-direction mirror of [`max_trailing_ones`]. Runs are searched
/// from the most-significant end; a run touching bit 0 is reported as
/// `(GROUP_CARRY, len)` because it may continue from the top of the
/// next-less-significant block.
fn max_leading_ones(block: Block, bit_offset: usize, needed: usize) -> (isize, usize) {
    debug_assert!(needed >= 1 && bit_offset < BLOCK_BITS);
    let mut b = block & (Block::MAX >> (BLOCK_BITS - 1 - bit_offset));
    while b != 0 {
        let top = BLOCK_BITS - 1 - b.leading_zeros() as usize;
        let run = (!(b << (BLOCK_BITS - 1 - top))).leading_zeros() as usize;
        if run >= needed {
            return (top as isize, run);
        }
        if run == top + 1 {
            return (GROUP_CARRY, run);
        }
        // run <= top < BLOCK_BITS here.
        let clear = ((1 as Block) << run) - 1;
        b &= !(clear << (top + 1 - run));
    }
    (BLOCK_BITS as isize, 0)
}

/// Dense bit set over machine-word blocks.
///
/// See the [module documentation](self) for indexing and invariants.
#[derive(Clone)]
pub struct BitSet {
    blocks: Vec<Block>,
    /// Logically addressable bits; `blocks.len() == ceil(count / BLOCK_BITS)`.
    count: usize,
    growable: bool,
}

impl BitSet {
    // ========================================================================
    // Initialization
    // ========================================================================

    /// Empty growable set; allocates on first growth.
    #[must_use]
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            count: 0,
            growable: true,
        }
    }

    /// Growable set of `bits` addressable zero bits.
    pub fn with_count(bits: usize) -> Result<Self> {
        Self::init(bits, true)
    }

    /// Fixed set of `bits` addressable zero bits. [`BitSet::push_back`]
    /// past the allocated ceiling reports [`Error::GrowthDisabled`];
    /// [`BitSet::reserve`] may still grow it explicitly.
    pub fn fixed(bits: usize) -> Result<Self> {
        Self::init(bits, false)
    }

    fn init(bits: usize, growable: bool) -> Result<Self> {
        let nb = blocks_for(bits);
        let mut blocks = Vec::new();
        blocks.try_reserve_exact(nb).map_err(|_| Error::AllocFailed)?;
        blocks.resize(nb, 0);
        Ok(Self {
            blocks,
            count: bits,
            growable,
        })
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Number of addressable bits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Storage ceiling in bits.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.blocks.capacity() * BLOCK_BITS
    }

    /// Ensure storage for `additional` more bits. The explicit growth
    /// permission: works on fixed sets too.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let bits = self.count.checked_add(additional).ok_or(Error::AllocFailed)?;
        let needed = blocks_for(bits);
        if needed > self.blocks.len() {
            self.blocks
                .try_reserve_exact(needed - self.blocks.len())
                .map_err(|_| Error::AllocFailed)?;
        }
        Ok(())
    }

    /// Backing blocks, least-significant first. Together with [`BitSet::len`]
    /// this is the relocation window: the bytes are copyable between
    /// processes of the same platform and bit indices stay valid.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Reset to zero addressable bits, keeping the storage.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.count = 0;
    }

    /// [`BitSet::clear`], then return the backing allocation.
    pub fn clear_and_free(&mut self) {
        self.blocks = Vec::new();
        self.count = 0;
    }

    /// Check the structural invariants: block count and the tail-zero
    /// rule. Logs a warning naming the broken invariant.
    #[must_use]
    pub fn validate(&self) -> bool {
        if self.blocks.len() != blocks_for(self.count) {
            log::warn!(
                "[bitset] validate: {} blocks for {} bits",
                self.blocks.len(),
                self.count
            );
            return false;
        }
        if self.count > 0 {
            let last = self.blocks.len() - 1;
            if self.blocks[last] & !last_mask(self.count) != 0 {
                log::warn!("[bitset] validate: bits beyond len() are set in the last block");
                return false;
            }
        }
        true
    }

    // ========================================================================
    // Single bits
    // ========================================================================

    /// Value of bit `i`.
    pub fn test(&self, i: usize) -> Result<bool> {
        if i >= self.count {
            return Err(Error::InvalidArgument);
        }
        Ok(self.blocks[block_i(i)] >> bit_i(i) & 1 == 1)
    }

    /// Set bit `i` to `value`, returning the previous value.
    pub fn set(&mut self, i: usize, value: bool) -> Result<bool> {
        let old = self.test(i)?;
        let mask = (1 as Block) << bit_i(i);
        if value {
            self.blocks[block_i(i)] |= mask;
        } else {
            self.blocks[block_i(i)] &= !mask;
        }
        Ok(old)
    }

    /// Clear bit `i`, returning the previous value.
    pub fn reset(&mut self, i: usize) -> Result<bool> {
        self.set(i, false)
    }

    /// Invert bit `i`, returning the previous value.
    pub fn flip(&mut self, i: usize) -> Result<bool> {
        let old = self.test(i)?;
        self.blocks[block_i(i)] ^= (1 as Block) << bit_i(i);
        Ok(old)
    }

    // ========================================================================
    // Ranges
    // ========================================================================

    fn check_range(&self, i: usize, count: usize) -> Result<()> {
        if i >= self.count || count > self.count - i {
            return Err(Error::InvalidArgument);
        }
        Ok(())
    }

    /// Set every bit of `[i, i + count)` to `value`.
    pub fn set_range(&mut self, i: usize, count: usize, value: bool) -> Result<()> {
        self.check_range(i, count)?;
        if count == 0 {
            return Ok(());
        }
        let s = span(i, count);
        if value {
            self.blocks[s.first] |= s.first_mask;
            if s.last > s.first {
                for b in &mut self.blocks[s.first + 1..s.last] {
                    *b = Block::MAX;
                }
                self.blocks[s.last] |= s.last_mask;
            }
        } else {
            self.blocks[s.first] &= !s.first_mask;
            if s.last > s.first {
                for b in &mut self.blocks[s.first + 1..s.last] {
                    *b = 0;
                }
                self.blocks[s.last] &= !s.last_mask;
            }
        }
        self.mask_tail();
        Ok(())
    }

    /// Invert every bit of `[i, i + count)`.
    pub fn flip_range(&mut self, i: usize, count: usize) -> Result<()> {
        self.check_range(i, count)?;
        if count == 0 {
            return Ok(());
        }
        let s = span(i, count);
        self.blocks[s.first] ^= s.first_mask;
        if s.last > s.first {
            for b in &mut self.blocks[s.first + 1..s.last] {
                *b = !*b;
            }
            self.blocks[s.last] ^= s.last_mask;
        }
        self.mask_tail();
        Ok(())
    }

    /// Set every addressable bit to `value`.
    pub fn set_all(&mut self, value: bool) {
        let fill = if value { Block::MAX } else { 0 };
        for b in &mut self.blocks {
            *b = fill;
        }
        self.mask_tail();
    }

    /// Invert every addressable bit.
    pub fn flip_all(&mut self) {
        for b in &mut self.blocks {
            *b = !*b;
        }
        self.mask_tail();
    }

    // ========================================================================
    // Any / none / all
    // ========================================================================

    /// Whether any addressable bit is 1. `false` for an empty set.
    #[must_use]
    pub fn any(&self) -> bool {
        self.blocks.iter().any(|&b| b != 0)
    }

    /// Whether no addressable bit is 1. `true` for an empty set.
    #[must_use]
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Whether every addressable bit is 1. Vacuously `true` for an
    /// empty set.
    #[must_use]
    pub fn all(&self) -> bool {
        if self.count == 0 {
            return true;
        }
        self.all_range(0, self.count).unwrap_or(false)
    }

    /// Whether any bit of `[i, i + count)` is 1. Early-exits on the
    /// first non-zero masked block.
    pub fn any_range(&self, i: usize, count: usize) -> Result<bool> {
        self.check_range(i, count)?;
        if count == 0 {
            return Ok(false);
        }
        let s = span(i, count);
        if self.blocks[s.first] & s.first_mask != 0 {
            return Ok(true);
        }
        if s.last > s.first {
            if self.blocks[s.first + 1..s.last].iter().any(|&b| b != 0) {
                return Ok(true);
            }
            if self.blocks[s.last] & s.last_mask != 0 {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Whether no bit of `[i, i + count)` is 1.
    pub fn none_range(&self, i: usize, count: usize) -> Result<bool> {
        Ok(!self.any_range(i, count)?)
    }

    /// Whether every bit of `[i, i + count)` is 1. Vacuously `true` for
    /// an empty range.
    pub fn all_range(&self, i: usize, count: usize) -> Result<bool> {
        self.check_range(i, count)?;
        if count == 0 {
            return Ok(true);
        }
        let s = span(i, count);
        if self.blocks[s.first] & s.first_mask != s.first_mask {
            return Ok(false);
        }
        if s.last > s.first {
            if self.blocks[s.first + 1..s.last].iter().any(|&b| b != Block::MAX) {
                return Ok(false);
            }
            if self.blocks[s.last] & s.last_mask != s.last_mask {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // ========================================================================
    // Popcount
    // ========================================================================

    /// Number of 1 bits in the whole set.
    #[must_use]
    pub fn popcount(&self) -> usize {
        self.blocks.iter().map(|b| b.count_ones() as usize).sum()
    }

    /// Number of 1 bits in `[i, i + count)`.
    pub fn popcount_range(&self, i: usize, count: usize) -> Result<usize> {
        self.check_range(i, count)?;
        if count == 0 {
            return Ok(0);
        }
        let s = span(i, count);
        let mut n = (self.blocks[s.first] & s.first_mask).count_ones() as usize;
        if s.last > s.first {
            n += self.blocks[s.first + 1..s.last]
                .iter()
                .map(|b| b.count_ones() as usize)
                .sum::<usize>();
            n += (self.blocks[s.last] & s.last_mask).count_ones() as usize;
        }
        Ok(n)
    }

    // ========================================================================
    // Single-bit scans
    // ========================================================================

    /// Lowest 1 bit, or [`Error::NotFound`].
    pub fn first_trailing_one(&self) -> Result<usize> {
        self.whole_set_scan(|s| s.scan_trailing(0, s.count, true))
    }

    /// Lowest 1 bit of `[i, i + count)`.
    pub fn first_trailing_one_range(&self, i: usize, count: usize) -> Result<usize> {
        self.scan_trailing(i, count, true)
    }

    /// Lowest 0 bit, or [`Error::NotFound`].
    pub fn first_trailing_zero(&self) -> Result<usize> {
        self.whole_set_scan(|s| s.scan_trailing(0, s.count, false))
    }

    /// Lowest 0 bit of `[i, i + count)`.
    pub fn first_trailing_zero_range(&self, i: usize, count: usize) -> Result<usize> {
        self.scan_trailing(i, count, false)
    }

    /// Highest 1 bit, or [`Error::NotFound`].
    pub fn first_leading_one(&self) -> Result<usize> {
        self.whole_set_scan(|s| s.scan_leading(0, s.count, true))
    }

    /// Highest 1 bit of `[i, i + count)`.
    pub fn first_leading_one_range(&self, i: usize, count: usize) -> Result<usize> {
        self.scan_leading(i, count, true)
    }

    /// Highest 0 bit, or [`Error::NotFound`].
    pub fn first_leading_zero(&self) -> Result<usize> {
        self.whole_set_scan(|s| s.scan_leading(0, s.count, false))
    }

    /// Highest 0 bit of `[i, i + count)`.
    pub fn first_leading_zero_range(&self, i: usize, count: usize) -> Result<usize> {
        self.scan_leading(i, count, false)
    }

    fn whole_set_scan(&self, scan: impl FnOnce(&Self) -> Result<usize>) -> Result<usize> {
        if self.count == 0 {
            return Err(Error::NotFound);
        }
        scan(self)
    }

    fn scan_trailing(&self, i: usize, count: usize, ones: bool) -> Result<usize> {
        self.check_range(i, count)?;
        if count == 0 {
            return Err(Error::NotFound);
        }
        let s = span(i, count);
        for cur in s.first..=s.last {
            let word = self.masked(cur, &s, ones);
            if word != 0 {
                return Ok(cur * BLOCK_BITS + word.trailing_zeros() as usize);
            }
        }
        Err(Error::NotFound)
    }

    fn scan_leading(&self, i: usize, count: usize, ones: bool) -> Result<usize> {
        self.check_range(i, count)?;
        if count == 0 {
            return Err(Error::NotFound);
        }
        let s = span(i, count);
        for cur in (s.first..=s.last).rev() {
            let word = self.masked(cur, &s, ones);
            if word != 0 {
                return Ok(cur * BLOCK_BITS + (BLOCK_BITS - 1 - word.leading_zeros() as usize));
            }
        }
        Err(Error::NotFound)
    }

    /// Block `cur` viewed through the span: complemented first for a
    /// zero search, then out-of-range bits forced to 0 so no scan ever
    /// sees a false group.
    #[inline]
    fn masked(&self, cur: usize, s: &Span, ones: bool) -> Block {
        let mut word = self.blocks[cur];
        if !ones {
            word = !word;
        }
        if cur == s.first {
            word &= s.first_mask;
        }
        if cur == s.last {
            word &= s.last_mask;
        }
        word
    }

    // ========================================================================
    // Contiguous-group scans
    // ========================================================================

    /// Lowest index starting `num` consecutive 1 bits, or
    /// [`Error::NotFound`].
    pub fn first_trailing_ones(&self, num: usize) -> Result<usize> {
        self.whole_group(num, |s| s.trailing_group(0, s.count, num, true))
    }

    /// Lowest index in `[i, i + count)` starting `num` consecutive 1 bits.
    pub fn first_trailing_ones_range(&self, i: usize, count: usize, num: usize) -> Result<usize> {
        self.trailing_group(i, count, num, true)
    }

    /// Lowest index starting `num` consecutive 0 bits.
    pub fn first_trailing_zeros(&self, num: usize) -> Result<usize> {
        self.whole_group(num, |s| s.trailing_group(0, s.count, num, false))
    }

    /// Lowest index in `[i, i + count)` starting `num` consecutive 0 bits.
    pub fn first_trailing_zeros_range(&self, i: usize, count: usize, num: usize) -> Result<usize> {
        self.trailing_group(i, count, num, false)
    }

    /// Highest index ending `num` consecutive 1 bits (the group occupies
    /// `[idx - num + 1, idx]`), or [`Error::NotFound`].
    pub fn first_leading_ones(&self, num: usize) -> Result<usize> {
        self.whole_group(num, |s| s.leading_group(0, s.count, num, true))
    }

    /// Highest index in `[i, i + count)` ending `num` consecutive 1 bits.
    pub fn first_leading_ones_range(&self, i: usize, count: usize, num: usize) -> Result<usize> {
        self.leading_group(i, count, num, true)
    }

    /// Highest index ending `num` consecutive 0 bits.
    pub fn first_leading_zeros(&self, num: usize) -> Result<usize> {
        self.whole_group(num, |s| s.leading_group(0, s.count, num, false))
    }

    /// Highest index in `[i, i + count)` ending `num` consecutive 0 bits.
    pub fn first_leading_zeros_range(&self, i: usize, count: usize, num: usize) -> Result<usize> {
        self.leading_group(i, count, num, false)
    }

    fn whole_group(&self, num: usize, scan: impl FnOnce(&Self) -> Result<usize>) -> Result<usize> {
        if num == 0 {
            return Err(Error::InvalidArgument);
        }
        if self.count == 0 {
            return Err(Error::NotFound);
        }
        scan(self)
    }

    /// Linear scan for `num` consecutive set (or clear) bits, lowest
    /// first. Tracks the candidate run's start and length so no bit is
    /// rescanned; whole blocks of ones extend the run in one step.
    fn trailing_group(&self, i: usize, count: usize, num: usize, ones: bool) -> Result<usize> {
        self.check_range(i, count)?;
        if num == 0 {
            return Err(Error::InvalidArgument);
        }
        if num > count {
            return Err(Error::NotFound);
        }
        let end = i + count;
        let s = span(i, count);
        let mut num_found = 0usize;
        let mut bits_start = i;
        for cur in s.first..=s.last {
            let word = self.masked(cur, &s, ones);
            if num_found > 0 {
                // Extend the run carried in from the previous block.
                let run = (!word).trailing_zeros() as usize;
                if num_found + run >= num {
                    return Ok(bits_start);
                }
                if run == BLOCK_BITS {
                    num_found += BLOCK_BITS;
                    continue;
                }
                num_found = 0;
            }
            let offset = if cur == s.first { bit_i(i) } else { 0 };
            let (idx, found) = max_trailing_ones(word, offset, num);
            if found >= num {
                return Ok(cur * BLOCK_BITS + idx);
            }
            if found > 0 {
                bits_start = cur * BLOCK_BITS + idx;
                num_found = found;
                if bits_start + num > end {
                    // No later candidate can start lower; the range is out.
                    return Err(Error::NotFound);
                }
            }
        }
        Err(Error::NotFound)
    }

    /// Leading mirror of [`BitSet::trailing_group`]: blocks descend, the
    /// candidate grows downward from its highest bit, and the carry
    /// sentinel from [`max_leading_ones`] links runs across blocks.
    fn leading_group(&self, i: usize, count: usize, num: usize, ones: bool) -> Result<usize> {
        self.check_range(i, count)?;
        if num == 0 {
            return Err(Error::InvalidArgument);
        }
        if num > count {
            return Err(Error::NotFound);
        }
        let end = i + count;
        let s = span(i, count);
        let mut num_found = 0usize;
        let mut bits_start = end - 1;
        for cur in (s.first..=s.last).rev() {
            let word = self.masked(cur, &s, ones);
            if num_found > 0 {
                let run = (!word).leading_zeros() as usize;
                if num_found + run >= num {
                    return Ok(bits_start);
                }
                if run == BLOCK_BITS {
                    num_found += BLOCK_BITS;
                    continue;
                }
                num_found = 0;
            }
            let top = if cur == s.last {
                bit_i(end - 1)
            } else {
                BLOCK_BITS - 1
            };
            let (idx, found) = max_leading_ones(word, top, num);
            if found >= num {
                return Ok(cur * BLOCK_BITS + idx as usize);
            }
            if idx == GROUP_CARRY && found > 0 {
                bits_start = cur * BLOCK_BITS + found - 1;
                num_found = found;
                if bits_start + 1 < num + i {
                    // The group's low end would fall below the range.
                    return Err(Error::NotFound);
                }
            }
        }
        Err(Error::NotFound)
    }

    // ========================================================================
    // Shifts
    // ========================================================================

    /// Shift toward higher indices (`<<` on the conceptual integer).
    /// Vacated low bits fill with zero; a shift of `len()` or more
    /// clears the set.
    pub fn shift_left(&mut self, n: usize) {
        if n == 0 || self.count == 0 {
            return;
        }
        if n >= self.count {
            self.set_all(false);
            return;
        }
        let nb = self.blocks.len();
        let bs = block_i(n);
        let split = bit_i(n);
        if split == 0 {
            for d in (bs..nb).rev() {
                self.blocks[d] = self.blocks[d - bs];
            }
        } else {
            for d in (bs + 1..nb).rev() {
                self.blocks[d] = (self.blocks[d - bs] << split)
                    | (self.blocks[d - bs - 1] >> (BLOCK_BITS - split));
            }
            self.blocks[bs] = self.blocks[0] << split;
        }
        for b in &mut self.blocks[..bs] {
            *b = 0;
        }
        self.mask_tail();
    }

    /// Shift toward lower indices (`>>`). Vacated high bits fill with
    /// zero; a shift of `len()` or more clears the set.
    pub fn shift_right(&mut self, n: usize) {
        if n == 0 || self.count == 0 {
            return;
        }
        if n >= self.count {
            self.set_all(false);
            return;
        }
        let nb = self.blocks.len();
        let bs = block_i(n);
        let split = bit_i(n);
        if split == 0 {
            for d in 0..nb - bs {
                self.blocks[d] = self.blocks[d + bs];
            }
        } else {
            for d in 0..nb - bs - 1 {
                self.blocks[d] = (self.blocks[d + bs] >> split)
                    | (self.blocks[d + bs + 1] << (BLOCK_BITS - split));
            }
            self.blocks[nb - bs - 1] = self.blocks[nb - 1] >> split;
        }
        for b in &mut self.blocks[nb - bs..] {
            *b = 0;
        }
        self.mask_tail();
    }

    // ========================================================================
    // Set algebra
    // ========================================================================

    /// `self |= other`, aligned at bit 0. The shorter operand acts
    /// zero-extended; `self`'s length does not change.
    pub fn or(&mut self, other: &BitSet) {
        let shared = self.blocks.len().min(other.blocks.len());
        for k in 0..shared {
            self.blocks[k] |= other.blocks[k];
        }
        self.mask_tail();
    }

    /// `self &= other` with zero extension: blocks past `other`'s end
    /// clear to zero.
    pub fn and(&mut self, other: &BitSet) {
        let shared = self.blocks.len().min(other.blocks.len());
        for k in 0..shared {
            self.blocks[k] &= other.blocks[k];
        }
        for b in &mut self.blocks[shared..] {
            *b = 0;
        }
    }

    /// `self ^= other`, aligned at bit 0, zero-extended.
    pub fn xor(&mut self, other: &BitSet) {
        let shared = self.blocks.len().min(other.blocks.len());
        for k in 0..shared {
            self.blocks[k] ^= other.blocks[k];
        }
        self.mask_tail();
    }

    /// Whether every 1 bit of `self` is also 1 in `other` (`other`
    /// zero-extended if shorter).
    #[must_use]
    pub fn is_subset(&self, other: &BitSet) -> bool {
        self.blocks.iter().enumerate().all(|(k, &b)| {
            let o = other.blocks.get(k).copied().unwrap_or(0);
            b & o == b
        })
    }

    /// Subset with strictly fewer addressable bits.
    #[must_use]
    pub fn is_proper_subset(&self, other: &BitSet) -> bool {
        self.count < other.count && self.is_subset(other)
    }

    // ========================================================================
    // Push / pop
    // ========================================================================

    /// Append a bit as the new most-significant. The first growth
    /// allocates one block; later growths double the block count.
    pub fn push_back(&mut self, bit: bool) -> Result<()> {
        let needed = blocks_for(self.count + 1);
        if needed > self.blocks.len() {
            if needed > self.blocks.capacity() {
                if !self.growable {
                    return Err(Error::GrowthDisabled);
                }
                let target = needed.max(self.blocks.capacity() * 2).max(1);
                self.blocks
                    .try_reserve_exact(target - self.blocks.len())
                    .map_err(|_| Error::AllocFailed)?;
                log::trace!("[bitset] grew to {} blocks", self.blocks.capacity());
            }
            self.blocks.push(0);
        }
        self.count += 1;
        if bit {
            let last = self.count - 1;
            self.blocks[block_i(last)] |= (1 as Block) << bit_i(last);
        }
        Ok(())
    }

    /// Remove and return the most-significant bit.
    pub fn pop_back(&mut self) -> Option<bool> {
        if self.count == 0 {
            return None;
        }
        let last = self.count - 1;
        let bit = self.blocks[block_i(last)] >> bit_i(last) & 1 == 1;
        self.count = last;
        self.blocks.truncate(blocks_for(self.count));
        self.mask_tail();
        Some(bit)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Restore the tail-zero invariant in the last block.
    fn mask_tail(&mut self) {
        if self.count == 0 {
            return;
        }
        let last = self.blocks.len() - 1;
        self.blocks[last] &= last_mask(self.count);
    }
}

impl Default for BitSet {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for BitSet {
    /// Equal length and equal blocks; the growth policy is not part of
    /// the value.
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.blocks == other.blocks
    }
}

impl Eq for BitSet {}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitSet")
            .field("len", &self.count)
            .field("popcount", &self.popcount())
            .finish()
    }
}
