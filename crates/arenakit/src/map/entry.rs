// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Entry API: a tagged view of one key's slot in the map.
//!
//! [`SplayMap::entry`] splays the key, so the occupied slot (or the
//! attachment point for a vacant one) is already at the root; the entry
//! combinators then work without another search.

use super::{Error, Keyed, Result, Slot, SplayMap};

/// A single key's slot, occupied or vacant.
pub enum Entry<'m, 'k, R: Keyed> {
    /// The key is present.
    Occupied(OccupiedEntry<'m, R>),
    /// The key is absent; inserting attaches at the splayed root.
    Vacant(VacantEntry<'m, 'k, R>),
}

impl<'m, 'k, R: Keyed> Entry<'m, 'k, R> {
    pub(super) fn occupied(map: &'m mut SplayMap<R>, slot: u32) -> Self {
        Entry::Occupied(OccupiedEntry { map, slot })
    }

    pub(super) fn vacant(map: &'m mut SplayMap<R>, key: &'k R::Key) -> Self {
        Entry::Vacant(VacantEntry { map, key })
    }

    /// Handle of the occupied slot, if any.
    #[must_use]
    pub fn slot(&self) -> Option<Slot> {
        match self {
            Entry::Occupied(e) => Some(e.slot()),
            Entry::Vacant(_) => None,
        }
    }

    /// Run `f` on the record if the key is present.
    #[must_use]
    pub fn and_modify(self, f: impl FnOnce(&mut R)) -> Self {
        match self {
            Entry::Occupied(mut e) => {
                f(e.get_mut());
                Entry::Occupied(e)
            }
            vacant => vacant,
        }
    }

    /// Existing record, or insert `default`. The inserted record's key
    /// must equal the entry's key.
    pub fn or_insert(self, default: R) -> Result<&'m mut R> {
        self.or_insert_with(|| default)
    }

    /// Existing record, or insert the one produced by `make`.
    pub fn or_insert_with(self, make: impl FnOnce() -> R) -> Result<&'m mut R> {
        match self {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(mut v) => {
                let slot = v.insert_slot(make())?;
                Ok(v.map_into_mut(slot))
            }
        }
    }
}

/// View of a present record; the slot is the splayed root.
pub struct OccupiedEntry<'m, R: Keyed> {
    map: &'m mut SplayMap<R>,
    slot: u32,
}

impl<'m, R: Keyed> OccupiedEntry<'m, R> {
    /// Stable handle of this record.
    #[must_use]
    pub fn slot(&self) -> Slot {
        Slot(self.slot)
    }

    #[must_use]
    pub fn get(&self) -> &R {
        self.map.record_ref(self.slot)
    }

    /// The mutation must leave the ordering key unchanged.
    pub fn get_mut(&mut self) -> &mut R {
        // SAFETY: the slot is live and the entry borrows the map
        // exclusively.
        unsafe { &mut *self.map.record_ptr(self.slot) }
    }

    /// Consume the entry, keeping the borrow on the map.
    #[must_use]
    pub fn into_mut(self) -> &'m mut R {
        // SAFETY: as in `get_mut`; the returned borrow inherits 'm.
        unsafe { &mut *self.map.record_ptr(self.slot) }
    }

    /// Swap in a replacement record, handing the old one back. The node
    /// keeps its links and slot. The keys must compare equal.
    pub fn replace(&mut self, rec: R) -> R {
        debug_assert!(rec.key() == self.get().key());
        // SAFETY: live slot; replace moves the old record out and the
        // new one in without touching node links.
        unsafe { self.map.record_ptr(self.slot).replace(rec) }
    }

    /// Remove this record from the map and hand it back. The record is
    /// not dropped by the map.
    #[must_use]
    pub fn remove(self) -> R {
        debug_assert_eq!(self.map.root_raw(), self.slot);
        self.map.remove_root()
    }
}

/// View of an absent key. Inserting is `O(1)` past the already-splayed
/// root, plus a possible arena growth.
pub struct VacantEntry<'m, 'k, R: Keyed> {
    map: &'m mut SplayMap<R>,
    key: &'k R::Key,
}

impl<'m, 'k, R: Keyed> VacantEntry<'m, 'k, R> {
    /// The key this entry was created for.
    #[must_use]
    pub fn key(&self) -> &R::Key {
        self.key
    }

    /// Insert the record and return its handle. The record's key must
    /// equal [`VacantEntry::key`], or the tree order breaks.
    pub fn insert(mut self, rec: R) -> Result<Slot> {
        let slot = self.insert_slot(rec)?;
        Ok(Slot(slot))
    }

    fn insert_slot(&mut self, rec: R) -> Result<u32> {
        if rec.key() != self.key {
            return Err(Error::InvalidArgument);
        }
        self.map.insert_at_root(rec)
    }

    fn map_into_mut(self, slot: u32) -> &'m mut R {
        // SAFETY: slot was just inserted and is live; exclusive borrow.
        unsafe { &mut *self.map.record_ptr(slot) }
    }
}
