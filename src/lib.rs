//! Exact-match counting for 5-of-90 draws over a large, fixed set of players.
//!
//! Every number in the universe gets a membership bitset with one bit per player.
//! A query AND-s the bitsets of its five numbers over every subset of size two or
//! more and turns the resulting popcounts into "matched exactly k" counts with
//! inclusion-exclusion (see `counter`).  Query time depends only on the number of
//! players divided by 64.
//
// TODO:
// [ ] Explicit SIMD for the subset sweep once `std::simd` is stable
// [ ] Answer a batch of queries per sweep over the words

mod bitset;
pub mod counter;
pub mod error;
pub mod index;
pub mod query;
pub mod record;
pub mod source;


pub use bitset::Bitset;
pub use counter::{count, MatchCounts};
pub use error::{Error, QueryError, RecordError};
pub use index::{Build, PopulationIndex, RecordDiagnostic};
pub use query::Query;
pub use record::{parse_record, parse_record_bytes, Pick};

/// Largest number a player can pick.  Numbers run from 1 to `MAX_NUMBER`.
pub const MAX_NUMBER: usize = 90;

/// How many numbers a player picks and a query draws.
pub const DRAW_SIZE: usize = 5;

pub const WORD_BITS: usize = 64;
