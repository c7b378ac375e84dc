//! Identifier types for trolley.
//!
//! This module provides strongly-typed integer identifiers for carts,
//! tracking records, and products.
//!
//! Cart and tracking ids are allocated from monotonically increasing
//! counters owned by the store; they are unique across the store's
//! lifetime and never reused after a deletion. The two sequences are
//! independent of each other.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Macro to define an integer-based identifier type with standard trait
/// implementations.
///
/// Generates a newtype wrapper around `u64` with implementations for:
/// - `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `Serialize`, `Deserialize` (transparent, as a bare integer)
/// - `FromStr`, `Display`, `Debug`
macro_rules! int_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create an identifier from a raw integer.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Return the raw integer value.
            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<u64>().map(Self)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

int_id_type!(
    CartId,
    "A cart identifier.\n\nAllocated sequentially at cart creation; never reused after deletion."
);
int_id_type!(
    TrackingId,
    "A tracking-record identifier.\n\nAllocated at checkout from a sequence independent of `CartId`."
);
int_id_type!(ProductId, "A product identifier, fixed at catalog initialization.");
