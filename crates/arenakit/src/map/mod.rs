// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Adaptive ordered map
//!
//! A self-adjusting ordered map over caller-defined records, backed by a
//! struct-of-arrays arena with stable integer handles. Every search
//! splays the accessed key to the root, so repeated and clustered
//! lookups run near the top of the tree; the price is that queries take
//! `&mut self` (a lookup is a mutation). Bounds are amortised, not
//! worst-case.
//!
//! ## Records and keys
//!
//! The map stores whole records, not key/value pairs. A record names its
//! ordering key through [`Keyed`]:
//!
//! ```rust
//! use arenakit::{Keyed, SplayMap};
//!
//! struct Session { id: u64, user: String }
//!
//! impl Keyed for Session {
//!     type Key = u64;
//!     fn key(&self) -> &u64 { &self.id }
//! }
//!
//! let mut map = SplayMap::new();
//! map.insert(Session { id: 7, user: "ada".into() })?;
//! assert!(map.contains(&7));
//! # Ok::<(), arenakit::Error>(())
//! ```
//!
//! ## Handles
//!
//! Mutating operations hand back a [`Slot`]: a stable index into the
//! arena. A slot stays valid across growth, across inserts, and across
//! removals of *other* slots; it dies only when its own record is
//! removed. Because every internal edge is an index, the backing bytes
//! are relocatable.
//!
//! ## Storage policy
//!
//! [`SplayMap::new`] and [`SplayMap::with_capacity`] grow on demand;
//! [`SplayMap::fixed`] allocates once and refuses implicit growth
//! ([`Error::GrowthDisabled`]). [`SplayMap::reserve`] is the explicit
//! escape hatch and works on fixed maps too.

mod arena;
mod entry;
mod iter;
#[cfg(test)]
mod tests;

pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use iter::{Iter, Range};

use crate::result::{Error, Result};
use arena::{Arena, Dir, Node, NIL};
use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ptr;

/// Stable handle to a live record in a [`SplayMap`].
///
/// Slot 0 is the reserved nil sentinel and never refers to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(pub(crate) u32);

impl Slot {
    /// The sentinel handle; never refers to a record.
    pub const NIL: Slot = Slot(0);

    /// Raw arena index carried by this handle.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    pub fn is_nil(self) -> bool {
        self.0 == NIL
    }
}

/// Names the ordering key inside a record.
///
/// Every comparison the tree performs goes through `Ord` on
/// `Self::Key`; records comparing `Equal` are the same element.
pub trait Keyed {
    /// Ordering key type.
    type Key: Ord;

    /// Borrow the key from the record.
    fn key(&self) -> &Self::Key;
}

/// Adaptive ordered map: top-down splay tree over an index arena.
///
/// See the [module documentation](self) for the storage and handle
/// model. Not thread-safe for shared reads: lookups splay.
pub struct SplayMap<R: Keyed> {
    arena: Arena<R>,
    root: u32,
}

impl<R: Keyed> SplayMap<R> {
    // ========================================================================
    // Initialization
    // ========================================================================

    /// Empty growable map; allocates on first insert.
    #[must_use]
    pub fn new() -> Self {
        Self {
            arena: Arena::new(true),
            root: NIL,
        }
    }

    /// Growable map with room for `records` elements up front.
    pub fn with_capacity(records: usize) -> Result<Self> {
        Ok(Self {
            arena: Arena::with_slots(Self::slots_for(records)?, true)?,
            root: NIL,
        })
    }

    /// Fixed-capacity map holding at most `records` elements. Implicit
    /// growth reports [`Error::GrowthDisabled`]; [`SplayMap::reserve`]
    /// may still grow it explicitly.
    pub fn fixed(records: usize) -> Result<Self> {
        Ok(Self {
            arena: Arena::with_slots(Self::slots_for(records)?, false)?,
            root: NIL,
        })
    }

    fn slots_for(records: usize) -> Result<u32> {
        // One extra slot for the sentinel.
        records
            .checked_add(1)
            .filter(|&s| s <= u32::MAX as usize)
            .map(|s| s as u32)
            .ok_or(Error::InvalidArgument)
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Number of live records (the sentinel is not counted).
    #[must_use]
    pub fn len(&self) -> usize {
        (self.arena.count() - 1) as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records the current storage can hold without growing.
    #[must_use]
    pub fn capacity(&self) -> usize {
        (self.arena.capacity().saturating_sub(1)) as usize
    }

    /// Ensure room for `additional` more records. This is the explicit
    /// growth permission: it works on fixed maps as well. Indices and
    /// handles survive the reallocation.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let n = u32::try_from(additional).map_err(|_| Error::InvalidArgument)?;
        self.arena.reserve(n)
    }

    // ========================================================================
    // Membership and queries (these splay, hence `&mut self`)
    // ========================================================================

    /// Whether a record with this key is present.
    pub fn contains(&mut self, key: &R::Key) -> bool {
        self.lookup(key).is_some()
    }

    /// Borrow the record with this key, splaying it to the root.
    pub fn get(&mut self, key: &R::Key) -> Option<&R> {
        let slot = self.lookup(key)?;
        // SAFETY: lookup returned a live slot.
        Some(unsafe { &*self.arena.record_ptr(slot) })
    }

    /// Mutably borrow the record with this key.
    ///
    /// The mutation must leave the ordering key equal to `key`; changing
    /// it through this reference breaks the tree order.
    pub fn get_mut(&mut self, key: &R::Key) -> Option<&mut R> {
        let slot = self.lookup(key)?;
        // SAFETY: lookup returned a live slot; exclusive borrow of self.
        Some(unsafe { &mut *self.arena.record_ptr(slot) })
    }

    /// Handle of the record with this key.
    pub fn slot_of(&mut self, key: &R::Key) -> Option<Slot> {
        self.lookup(key).map(Slot)
    }

    // ========================================================================
    // Handle access
    // ========================================================================

    /// Borrow the record behind a handle.
    ///
    /// Verifies the slot is live by scanning the free list, so the cost
    /// is proportional to the number of vacant slots. Use
    /// [`SplayMap::at_unchecked`] when the handle is known-live.
    #[must_use]
    pub fn at(&self, slot: Slot) -> Option<&R> {
        if !self.is_live(slot.0) {
            return None;
        }
        // SAFETY: liveness just verified.
        Some(unsafe { &*self.arena.record_ptr(slot.0) })
    }

    /// Mutably borrow the record behind a handle. Same liveness check
    /// and key-stability contract as [`SplayMap::at`] / [`SplayMap::get_mut`].
    pub fn at_mut(&mut self, slot: Slot) -> Option<&mut R> {
        if !self.is_live(slot.0) {
            return None;
        }
        // SAFETY: liveness just verified; exclusive borrow of self.
        Some(unsafe { &mut *self.arena.record_ptr(slot.0) })
    }

    /// Borrow the record behind a handle without the liveness scan.
    ///
    /// # Safety
    ///
    /// `slot` must have been returned by this map and its record must
    /// not have been removed since.
    #[must_use]
    pub unsafe fn at_unchecked(&self, slot: Slot) -> &R {
        debug_assert!(self.is_live(slot.0));
        unsafe { &*self.arena.record_ptr(slot.0) }
    }

    // ========================================================================
    // Insert / assign / remove
    // ========================================================================

    /// Insert the record, or overwrite the record with an equal key.
    ///
    /// On overwrite the node keeps its links and its slot; the displaced
    /// record is returned. Never creates a duplicate key.
    pub fn insert(&mut self, rec: R) -> Result<Option<R>> {
        let ord = if self.root == NIL {
            Ordering::Equal // ignored by attach on the empty path
        } else {
            let root = self.splay(self.root, rec.key());
            let ord = rec.key().cmp(self.key_of(root));
            if ord == Ordering::Equal {
                // SAFETY: root is live; swap records, links untouched.
                return Ok(Some(unsafe { self.arena.record_ptr(root).replace(rec) }));
            }
            ord
        };
        self.insert_new(rec, ord)?;
        Ok(None)
    }

    /// Insert the record only if its key is absent.
    ///
    /// Returns the slot of the key plus `Some(rec)` handing the record
    /// back when an equal key already occupied it.
    pub fn try_insert(&mut self, rec: R) -> Result<(Slot, Option<R>)> {
        let ord = if self.root == NIL {
            Ordering::Equal
        } else {
            let root = self.splay(self.root, rec.key());
            let ord = rec.key().cmp(self.key_of(root));
            if ord == Ordering::Equal {
                return Ok((Slot(root), Some(rec)));
            }
            ord
        };
        let slot = self.insert_new(rec, ord)?;
        Ok((Slot(slot), None))
    }

    /// Entry for this key: occupied or vacant. The lookup splays, so a
    /// subsequent [`VacantEntry::insert`] attaches at the root.
    pub fn entry<'m, 'k>(&'m mut self, key: &'k R::Key) -> Entry<'m, 'k, R> {
        if self.root != NIL {
            let root = self.splay(self.root, key);
            if self.cmp_key(key, root) == Ordering::Equal {
                return Entry::occupied(self, root);
            }
        }
        Entry::vacant(self, key)
    }

    /// Remove the record with this key and hand it back.
    ///
    /// The map never drops removed records itself; only [`SplayMap::clear`]
    /// and dropping the whole map run record destructors.
    pub fn remove(&mut self, key: &R::Key) -> Option<R> {
        if self.root == NIL {
            return None;
        }
        let root = self.splay(self.root, key);
        if self.cmp_key(key, root) != Ordering::Equal {
            return None;
        }
        Some(self.remove_root())
    }

    /// Remove the record behind a handle. `Err(InvalidArgument)` when
    /// the slot is not live (same liveness scan as [`SplayMap::at`]).
    pub fn remove_slot(&mut self, slot: Slot) -> Result<R> {
        if !self.is_live(slot.0) {
            return Err(Error::InvalidArgument);
        }
        // Splay on the slot's own key; unique keys make it the root.
        let key_ptr: *const R = self.arena.record_ptr(slot.0);
        // SAFETY: the slot is live, and splay rewrites only node links,
        // never record bytes, so the key borrow stays valid throughout.
        let root = self.splay(self.root, unsafe { (*key_ptr).key() });
        debug_assert_eq!(root, slot.0);
        Ok(self.remove_root())
    }

    // ========================================================================
    // Iteration and ranges
    // ========================================================================

    /// Record with the minimum key. Splay-free.
    #[must_use]
    pub fn first(&self) -> Option<&R> {
        if self.root == NIL {
            return None;
        }
        let slot = self.extreme(self.root, Dir::Left);
        // SAFETY: tree slots are live.
        Some(unsafe { &*self.arena.record_ptr(slot) })
    }

    /// Record with the maximum key. Splay-free.
    #[must_use]
    pub fn last(&self) -> Option<&R> {
        if self.root == NIL {
            return None;
        }
        let slot = self.extreme(self.root, Dir::Right);
        // SAFETY: tree slots are live.
        Some(unsafe { &*self.arena.record_ptr(slot) })
    }

    /// In-order iterator. Walks parent pointers, does not splay, and is
    /// double-ended.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, R> {
        Iter::new(self)
    }

    /// Records with `start <= key <= end`, ascending. `start > end` is
    /// an argument error. The two boundary lookups splay.
    pub fn range(&mut self, start: &R::Key, end: &R::Key) -> Result<Range<'_, R>> {
        if start > end {
            return Err(Error::InvalidArgument);
        }
        if self.root == NIL {
            return Ok(Range::new(self, NIL, NIL, Dir::Right));
        }
        let mut begin = self.splay(self.root, start);
        if self.cmp_key(start, begin) == Ordering::Greater {
            begin = self.next_slot(begin, Dir::Right);
        }
        let mut stop = self.splay(self.root, end);
        if self.cmp_key(end, stop) != Ordering::Less {
            stop = self.next_slot(stop, Dir::Right);
        }
        Ok(Range::new(self, begin, stop, Dir::Right))
    }

    /// Records with `end <= key <= start`, descending. `start < end` is
    /// an argument error.
    pub fn rrange(&mut self, start: &R::Key, end: &R::Key) -> Result<Range<'_, R>> {
        if start < end {
            return Err(Error::InvalidArgument);
        }
        if self.root == NIL {
            return Ok(Range::new(self, NIL, NIL, Dir::Left));
        }
        let mut begin = self.splay(self.root, start);
        if self.cmp_key(start, begin) == Ordering::Less {
            begin = self.next_slot(begin, Dir::Left);
        }
        let mut stop = self.splay(self.root, end);
        if self.cmp_key(end, stop) != Ordering::Greater {
            stop = self.next_slot(stop, Dir::Left);
        }
        Ok(Range::new(self, begin, stop, Dir::Left))
    }

    // ========================================================================
    // Destruction
    // ========================================================================

    /// Drop every live record and reset to empty. Storage is kept; all
    /// slots become allocatable again.
    pub fn clear(&mut self) {
        if self.root != NIL && mem::needs_drop::<R>() {
            let mut cur = self.extreme(self.root, Dir::Left);
            while cur != NIL {
                let next = self.next_slot(cur, Dir::Right);
                // SAFETY: cur is live; the record is dropped exactly once
                // and the slot is not reused before the reset below.
                unsafe { ptr::drop_in_place(self.arena.record_ptr(cur)) };
                cur = next;
            }
        }
        self.root = NIL;
        self.arena.reset();
    }

    /// [`SplayMap::clear`], then return the backing allocation.
    pub fn clear_and_free(&mut self) {
        self.clear();
        self.arena.dealloc();
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check every structural invariant: free-list accounting, parent and
    /// child coherence, strictly ascending in-order keys, and slot-usage
    /// coverage. Logs a warning naming the first broken invariant.
    #[must_use]
    pub fn validate(&self) -> bool {
        let cap = self.arena.capacity();
        if cap == 0 {
            if self.root != NIL || self.arena.count() != 1 || self.arena.free_head() != NIL {
                log::warn!("[map] validate: unallocated map carries state");
                return false;
            }
            return true;
        }
        // 0 = untouched, 1 = free, 2 = live.
        let mut marks = vec![0u8; cap as usize];
        let mut free_len: u32 = 0;
        let mut cur = self.arena.free_head();
        while cur != NIL {
            if cur >= cap || marks[cur as usize] != 0 || free_len >= cap {
                log::warn!("[map] validate: free list corrupt at slot {}", cur);
                return false;
            }
            marks[cur as usize] = 1;
            free_len += 1;
            cur = self.arena.next_free(cur);
        }
        let high = self.arena.count() + free_len;
        if high > cap {
            log::warn!(
                "[map] validate: live {} + free {} exceeds capacity {}",
                self.arena.count(),
                free_len,
                cap
            );
            return false;
        }
        if self.root == NIL {
            if self.arena.count() != 1 {
                log::warn!("[map] validate: empty tree but live count > 1");
                return false;
            }
        } else {
            if self.arena.node(self.root).parent != NIL {
                log::warn!("[map] validate: root has a parent");
                return false;
            }
            let mut visited: u32 = 0;
            let mut prev = NIL;
            let mut cur = self.extreme(self.root, Dir::Left);
            while cur != NIL {
                if cur >= cap || marks[cur as usize] != 0 {
                    log::warn!("[map] validate: tree reaches slot {} twice or free", cur);
                    return false;
                }
                marks[cur as usize] = 2;
                for dir in [Dir::Left, Dir::Right] {
                    let child = self.arena.node(cur).child(dir);
                    if child != NIL && self.arena.node(child).parent != cur {
                        log::warn!("[map] validate: slot {} child {} disowns it", cur, child);
                        return false;
                    }
                }
                if prev != NIL && self.key_of(prev) >= self.key_of(cur) {
                    log::warn!("[map] validate: in-order keys not ascending at slot {}", cur);
                    return false;
                }
                visited += 1;
                if visited > cap {
                    log::warn!("[map] validate: traversal cycle");
                    return false;
                }
                prev = cur;
                cur = self.next_slot(cur, Dir::Right);
            }
            if visited != self.arena.count() - 1 {
                log::warn!(
                    "[map] validate: tree holds {} records, count says {}",
                    visited,
                    self.arena.count() - 1
                );
                return false;
            }
        }
        // Used slots form a contiguous prefix; everything past it is virgin.
        for slot in 1..cap {
            if (marks[slot as usize] != 0) != (slot < high) {
                log::warn!("[map] validate: slot {} outside the used prefix", slot);
                return false;
            }
        }
        true
    }

    // ========================================================================
    // Internals
    // ========================================================================

    #[inline]
    fn key_of(&self, slot: u32) -> &R::Key {
        debug_assert!(slot != NIL);
        // SAFETY: callers only pass live slots.
        unsafe { &*self.arena.record_ptr(slot) }.key()
    }

    #[inline]
    fn cmp_key(&self, key: &R::Key, slot: u32) -> Ordering {
        key.cmp(self.key_of(slot))
    }

    /// Set both halves of an edge: the parent's child pointer and the
    /// child's parent pointer. Either end may be the sentinel, whose
    /// fields are scratch.
    #[inline]
    fn link(&mut self, parent: u32, dir: Dir, child: u32) {
        self.arena.node_mut(parent).branch[dir as usize] = child;
        self.arena.node_mut(child).parent = parent;
    }

    /// Top-down splay of `key` within the subtree at `root`. The closest
    /// node ends up as `self.root` with its parent cleared; helper
    /// chains for the two sides live in a direction-indexed pair, with
    /// the sentinel's links as their heads.
    fn splay(&mut self, mut root: u32, key: &R::Key) -> u32 {
        debug_assert!(root != NIL);
        *self.arena.node_mut(NIL) = Node::EMPTY;
        let mut hang: [u32; 2] = [NIL, NIL];
        loop {
            let root_ord = self.cmp_key(key, root);
            if root_ord == Ordering::Equal {
                break;
            }
            let dir = Dir::of(root_ord);
            let mut pivot = self.arena.node(root).child(dir);
            if pivot == NIL {
                break;
            }
            let pivot_ord = self.cmp_key(key, pivot);
            if pivot_ord != Ordering::Equal && Dir::of(pivot_ord) == dir {
                // Straight-line grandchild: rotate root and pivot now so
                // the descent heals the path instead of revisiting it.
                let inner = self.arena.node(pivot).child(dir.flip());
                self.link(root, dir, inner);
                self.link(pivot, dir.flip(), root);
                root = pivot;
                pivot = self.arena.node(root).child(dir);
                if pivot == NIL {
                    break;
                }
            }
            // Hang the bypassed root on the opposite chain, descend.
            self.link(hang[dir.flip() as usize], dir, root);
            hang[dir.flip() as usize] = root;
            root = pivot;
        }
        // Stitch: chains take the splayed node's old subtrees, then the
        // chain heads (parked in the sentinel's links) become its children.
        let left = self.arena.node(root).child(Dir::Left);
        let right = self.arena.node(root).child(Dir::Right);
        self.link(hang[Dir::Left as usize], Dir::Right, left);
        self.link(hang[Dir::Right as usize], Dir::Left, right);
        let scratch = self.arena.node(NIL);
        self.link(root, Dir::Left, scratch.child(Dir::Right));
        self.link(root, Dir::Right, scratch.child(Dir::Left));
        self.root = root;
        self.arena.node_mut(root).parent = NIL;
        root
    }

    /// Claim a slot, write the record, and attach it as the new root on
    /// the side given by `ord` (record key versus current root key).
    fn insert_new(&mut self, rec: R, ord: Ordering) -> Result<u32> {
        let slot = self.arena.alloc_slot()?;
        // SAFETY: freshly claimed slot; the write initializes its record.
        unsafe { self.arena.record_ptr(slot).write(rec) };
        self.attach_root(slot, ord);
        Ok(slot)
    }

    pub(crate) fn insert_at_root(&mut self, rec: R) -> Result<u32> {
        let ord = if self.root == NIL {
            Ordering::Equal
        } else {
            rec.key().cmp(self.key_of(self.root))
        };
        debug_assert!(self.root == NIL || ord != Ordering::Equal);
        self.insert_new(rec, ord)
    }

    fn attach_root(&mut self, slot: u32, ord: Ordering) {
        let old = self.root;
        if old == NIL {
            *self.arena.node_mut(slot) = Node::EMPTY;
        } else {
            let dir = Dir::of(ord);
            let beyond = self.arena.node(old).child(dir);
            self.link(slot, dir, beyond);
            self.link(old, dir, NIL);
            self.link(slot, dir.flip(), old);
        }
        self.root = slot;
        self.arena.node_mut(slot).parent = NIL;
    }

    /// Detach the current root, hand its record out, recycle the slot.
    pub(crate) fn remove_root(&mut self) -> R {
        let victim = self.root;
        debug_assert!(victim != NIL);
        let left = self.arena.node(victim).child(Dir::Left);
        let right = self.arena.node(victim).child(Dir::Right);
        if left == NIL {
            self.root = right;
            if right != NIL {
                self.arena.node_mut(right).parent = NIL;
            }
        } else {
            // Splaying the left subtree on the victim's key raises that
            // subtree's maximum, which therefore has no right child; the
            // original right subtree hangs off it.
            let key_ptr: *const R = self.arena.record_ptr(victim);
            // SAFETY: victim's record is initialized until the read below,
            // and splay never touches record bytes.
            let new_root = self.splay(left, unsafe { (*key_ptr).key() });
            debug_assert_eq!(self.arena.node(new_root).child(Dir::Right), NIL);
            self.link(new_root, Dir::Right, right);
            self.root = new_root;
            self.arena.node_mut(new_root).parent = NIL;
        }
        // SAFETY: victim is detached; the read moves the record out
        // before the slot goes onto the free list.
        let rec = unsafe { self.arena.record_ptr(victim).read() };
        self.arena.free_slot(victim);
        rec
    }

    fn lookup(&mut self, key: &R::Key) -> Option<u32> {
        if self.root == NIL {
            return None;
        }
        let root = self.splay(self.root, key);
        (self.cmp_key(key, root) == Ordering::Equal).then_some(root)
    }

    /// Far `dir`-most slot of the subtree at `from`.
    fn extreme(&self, mut from: u32, dir: Dir) -> u32 {
        debug_assert!(from != NIL);
        loop {
            let child = self.arena.node(from).child(dir);
            if child == NIL {
                return from;
            }
            from = child;
        }
    }

    /// In-order neighbour in `dir`: the far opposite-side slot of the
    /// `dir` child when present, else the first ancestor reached from an
    /// opposite-side branch. The sentinel parent ends the walk.
    pub(crate) fn next_slot(&self, mut n: u32, dir: Dir) -> u32 {
        let child = self.arena.node(n).child(dir);
        if child != NIL {
            return self.extreme(child, dir.flip());
        }
        let mut parent = self.arena.node(n).parent;
        while parent != NIL && self.arena.node(parent).child(dir) == n {
            n = parent;
            parent = self.arena.node(parent).parent;
        }
        parent
    }

    fn is_live(&self, slot: u32) -> bool {
        if slot == NIL || slot >= self.arena.capacity() {
            return false;
        }
        let mut free_len: u32 = 0;
        let mut cur = self.arena.free_head();
        while cur != NIL {
            if cur == slot {
                return false;
            }
            free_len += 1;
            cur = self.arena.next_free(cur);
        }
        slot < self.arena.count() + free_len
    }

    #[cfg(test)]
    pub(crate) fn root_slot(&self) -> Slot {
        Slot(self.root)
    }

    #[cfg(test)]
    pub(crate) fn parent_of(&self, slot: Slot) -> Slot {
        Slot(self.arena.node(slot.0).parent)
    }

    pub(crate) fn record_ref(&self, slot: u32) -> &R {
        debug_assert!(slot != NIL);
        // SAFETY: internal callers only pass live slots.
        unsafe { &*self.arena.record_ptr(slot) }
    }

    pub(crate) fn record_ptr(&self, slot: u32) -> *mut R {
        self.arena.record_ptr(slot)
    }

    pub(crate) fn root_raw(&self) -> u32 {
        self.root
    }
}

impl<R: Keyed> Default for SplayMap<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Keyed> Drop for SplayMap<R> {
    fn drop(&mut self) {
        self.clear();
        // The arena frees its bytes in its own Drop.
    }
}

impl<R: Keyed + Clone> Clone for SplayMap<R> {
    /// Structural copy: the node array is copied verbatim and records are
    /// cloned slot-for-slot, so every handle into `self` is also valid
    /// for the clone. Panics if the clone's storage cannot be allocated.
    fn clone(&self) -> Self {
        if self.arena.capacity() == 0 {
            return Self {
                arena: Arena::new(self.arena.is_growable()),
                root: NIL,
            };
        }
        let arena = self
            .arena
            .clone_shell()
            .expect("allocation failed while cloning map");
        let mut out = Self { arena, root: NIL };
        if self.root != NIL {
            let mut cur = self.extreme(self.root, Dir::Left);
            while cur != NIL {
                let rec = self.record_ref(cur).clone();
                // SAFETY: same index is live in the copied node array; the
                // write initializes the clone's record. Root is set last,
                // so a panicking record clone leaves nothing to drop.
                unsafe { out.arena.record_ptr(cur).write(rec) };
                cur = self.next_slot(cur, Dir::Right);
            }
        }
        out.root = self.root;
        out
    }
}

impl<R: Keyed + fmt::Debug> fmt::Debug for SplayMap<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<R: Keyed> Extend<R> for SplayMap<R> {
    /// Inserts every record. Panics on storage failure (fixed map full
    /// or allocation refused), matching std collection behaviour.
    fn extend<I: IntoIterator<Item = R>>(&mut self, iter: I) {
        for rec in iter {
            if let Err(e) = self.insert(rec) {
                panic!("arenakit: insert failed while extending map: {e}");
            }
        }
    }
}

impl<R: Keyed> FromIterator<R> for SplayMap<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, R: Keyed> IntoIterator for &'a SplayMap<R> {
    type Item = &'a R;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Iter<'a, R> {
        self.iter()
    }
}
