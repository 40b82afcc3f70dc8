// Counting "exactly k of the 5 winning numbers" directly would need a pass over
// every participant.  Instead we count, for every subset S of the query with
// |S| >= 2, the participants who picked all of S.  That's a bitwise AND of |S|
// membership vectors followed by a popcount, so it costs N / 64 word operations
// no matter how many participants match.
//
// Summing over all subsets of size k gives
//
//     at_least[k] = sum_{j >= k} C(j, k) * exactly[j]
//
// since a participant matching exactly j numbers is counted once for each of
// the C(j, k) k-subsets of their matched numbers.  Peeling this off from the
// top down recovers the exact counts:
//
//     exactly[5] = at_least[5]
//     exactly[4] = at_least[4] - 5 exactly[5]
//     exactly[3] = at_least[3] - 4 exactly[4] - 10 exactly[5]
//     exactly[2] = at_least[2] - 3 exactly[3] - 6 exactly[4] - 10 exactly[5]
//
// This relies on the query numbers being distinct, which `Query` guarantees.

use std::fmt;

use crate::index::PopulationIndex;
use crate::query::Query;
use crate::DRAW_SIZE;

pub const MIN_MATCHES: usize = 2;

const NUM_SUBSETS: usize = 1 << DRAW_SIZE;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MatchCounts {
    pub exactly2: u64,
    pub exactly3: u64,
    pub exactly4: u64,
    pub exactly5: u64,
}

impl MatchCounts {
    pub fn total(&self) -> u64 {
        self.exactly2 + self.exactly3 + self.exactly4 + self.exactly5
    }
}

impl fmt::Display for MatchCounts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.exactly2, self.exactly3, self.exactly4, self.exactly5
        )
    }
}

pub const fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let mut out = 1;
    let mut i = 0;
    while i < k {
        out = out * (n - i) as u64 / (i + 1) as u64;
        i += 1;
    }
    out
}

/// `at_least[k]` is the sum, over every k-subset of the query, of the number of
/// participants who picked the whole subset.  Entries below `MIN_MATCHES` are zero.
pub fn overlap_counts(index: &PopulationIndex, query: &Query) -> [u64; DRAW_SIZE + 1] {
    let mut vectors: [&[u64]; DRAW_SIZE] = [&[]; DRAW_SIZE];
    for (slot, &n) in vectors.iter_mut().zip(query.numbers()) {
        *slot = index.vector(n).words();
    }

    let mut at_least = [0; DRAW_SIZE + 1];

    // `and[mask]` holds the current word of the intersection of the vectors in
    // `mask`.  Each subset extends the subset without its lowest member, so the
    // whole table costs one AND per entry.
    let mut and = [0u64; NUM_SUBSETS];
    and[0] = !0;
    for w in 0..index.num_words() {
        for mask in 1..NUM_SUBSETS {
            let lowest = mask.trailing_zeros() as usize;
            and[mask] = and[mask & (mask - 1)] & vectors[lowest][w];

            let size = mask.count_ones() as usize;
            if size >= MIN_MATCHES {
                at_least[size] += and[mask].count_ones() as u64;
            }
        }
    }
    at_least
}

// Inverts `at_least[k] = sum_{j >= k} C(j, k) * exactly[j]` for `k >= MIN_MATCHES`.  Only
// meaningful for counts that came out of `overlap_counts`; anything else can underflow.
fn exact_counts(at_least: &[u64; DRAW_SIZE + 1]) -> [u64; DRAW_SIZE + 1] {
    let mut exactly = [0; DRAW_SIZE + 1];
    for k in (MIN_MATCHES..=DRAW_SIZE).rev() {
        let overcount: u64 = (k + 1..=DRAW_SIZE)
            .map(|j| binomial(j, k) * exactly[j])
            .sum();
        exactly[k] = at_least[k] - overcount;
    }
    exactly
}

pub fn count(index: &PopulationIndex, query: &Query) -> MatchCounts {
    let exactly = exact_counts(&overlap_counts(index, query));
    MatchCounts {
        exactly2: exactly[2],
        exactly3: exactly[3],
        exactly4: exactly[4],
        exactly5: exactly[5],
    }
}
