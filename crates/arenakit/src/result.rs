// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Shared result vocabulary for both containers.
//!
//! Every fallible operation in this crate reports one of four failure
//! kinds. Queries that validate their input return `Result<bool>` or
//! `Result<usize>`; a well-formed search that simply finds nothing
//! reports [`Error::NotFound`] rather than inventing a sentinel value.

/// Errors returned by container operations.
///
/// # Example
///
/// ```rust
/// use arenakit::{BitSet, Error};
///
/// let bits = BitSet::with_count(8).unwrap();
/// // Out-of-range index is an argument error, not a panic.
/// assert_eq!(bits.test(99), Err(Error::InvalidArgument));
/// // A well-formed search with no answer is NotFound.
/// assert_eq!(bits.first_trailing_one(), Err(Error::NotFound));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Argument Errors
    // ========================================================================
    /// Out-of-range index, inverted range, or zero-sized group request.
    /// Reported locally; the container is unchanged.
    InvalidArgument,

    // ========================================================================
    // Storage Errors
    // ========================================================================
    /// The operation needed to grow a fixed-capacity container. The
    /// operation is a no-op; use `reserve` to grant capacity explicitly.
    GrowthDisabled,
    /// The allocator refused the request. Container state is unchanged.
    AllocFailed,

    // ========================================================================
    // Search Outcomes
    // ========================================================================
    /// A well-formed search produced no answer (no matching bit, no group
    /// of the requested length, no such slot).
    NotFound,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidArgument => write!(f, "Invalid argument"),
            Error::GrowthDisabled => {
                write!(f, "Fixed-capacity container is full (growth disabled)")
            }
            Error::AllocFailed => write!(f, "Allocation failed"),
            Error::NotFound => write!(f, "Not found"),
        }
    }
}

impl std::error::Error for Error {}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
