// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # arenakit - arena-backed adaptive containers
//!
//! Two single-owner containers sharing one memory discipline and one
//! result vocabulary:
//!
//! - [`SplayMap`] - an adaptive ordered map: a top-down splay tree with
//!   parent pointers over a struct-of-arrays slot arena. Handles are
//!   stable integer indices; every search splays, so lookups take
//!   `&mut self` and repeated access patterns self-optimize.
//! - [`BitSet`] - a compact bit set over machine-word blocks: dense
//!   range operations, scans for single bits and for contiguous groups
//!   from either end, shifts, and set algebra.
//!
//! ## Quick Start
//!
//! ```rust
//! use arenakit::{BitSet, Keyed, SplayMap};
//!
//! struct Lease { port: u16, owner: u32 }
//!
//! impl Keyed for Lease {
//!     type Key = u16;
//!     fn key(&self) -> &u16 { &self.port }
//! }
//!
//! // Ordered map with stable handles.
//! let mut leases = SplayMap::new();
//! leases.insert(Lease { port: 443, owner: 7 })?;
//! let slot = leases.slot_of(&443).expect("just inserted");
//! assert_eq!(leases.at(slot).expect("live handle").owner, 7);
//!
//! // Bit set with group scans.
//! let mut free_ports = BitSet::with_count(1024)?;
//! free_ports.set_range(0, 1024, true)?;
//! free_ports.set_range(400, 16, false)?;
//! assert_eq!(free_ports.first_trailing_zeros(16)?, 400);
//! # Ok::<(), arenakit::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |                       Public surface                         |
//! |   SplayMap / Entry / Slot          BitSet / Block            |
//! +--------------------------------------------------------------+
//! |   map: top-down splay,             bitset: span masks,       |
//! |   parent-pointer iteration,        group scans, shifts,      |
//! |   equal-range                      algebra, push/pop         |
//! +--------------------------------------------------------------+
//! |   map::arena: one allocation,      Vec<Block> storage,       |
//! |   record + node arrays,            tail-zero invariant       |
//! |   free list, index handles                                   |
//! +--------------------------------------------------------------+
//! |             result: Error / Result vocabulary                |
//! +--------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SplayMap`] | Adaptive ordered map over [`Keyed`] records |
//! | [`Slot`] | Stable integer handle into a map |
//! | [`Entry`] | Occupied-or-vacant view of one key |
//! | [`BitSet`] | Dense bit array with block-wise algorithms |
//! | [`Error`] | The crate-wide failure kinds |
//!
//! ## Storage policy
//!
//! Both containers come in growable and fixed flavours. Fixed instances
//! never allocate behind the caller's back: exhaustion reports
//! [`Error::GrowthDisabled`] and the dedicated `reserve` methods are the
//! explicit permission to grow. Allocation failures are reported as
//! [`Error::AllocFailed`], never unwound through a panic.
//!
//! ## What this crate is not
//!
//! No thread safety (map searches mutate the tree; instances are single
//! owner), no realtime worst-case bounds (the map is amortised), and no
//! serialisation format beyond the guarantee that all internal
//! references are indices, so the backing bytes relocate byte-for-byte
//! within one platform.

/// Compact bit set over machine-word blocks.
pub mod bitset;
/// Adaptive ordered map with arena storage and stable handles.
pub mod map;
/// Shared error and result vocabulary.
pub mod result;

pub use bitset::{BitSet, Block, BLOCK_BITS};
pub use map::{Entry, Iter, Keyed, OccupiedEntry, Range, Slot, SplayMap, VacantEntry};
pub use result::{Error, Result};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
