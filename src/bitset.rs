use crate::WORD_BITS;

/// Fixed-length, word-packed bit vector with one bit per participant.
///
/// The length is chosen at construction and never grows; bits past `len` in
/// the last word are always zero.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bitset {
    bits: Vec<u64>,
    len: usize,
}

impl Bitset {
    pub fn new(len: usize) -> Self {
        Self {
            bits: vec![0; words_for(len)],
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn words(&self) -> &[u64] {
        &self.bits
    }

    pub fn set(&mut self, i: usize) {
        assert!(i < self.len, "bit {} out of range for length {}", i, self.len);
        self.bits[i / WORD_BITS] |= 1 << (i % WORD_BITS);
    }

    pub fn contains(&self, i: usize) -> bool {
        if i >= self.len {
            return false;
        }
        self.bits[i / WORD_BITS] & (1 << (i % WORD_BITS)) != 0
    }

    pub fn count_ones(&self) -> u64 {
        self.bits.iter().map(|w| w.count_ones() as u64).sum()
    }

    pub fn iter<'a>(&'a self) -> impl Iterator<Item = usize> + 'a {
        self.bits.iter().enumerate().flat_map(|(i, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let j = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(i * WORD_BITS + j)
            })
        })
    }
}

pub fn words_for(len: usize) -> usize {
    (len + WORD_BITS - 1) / WORD_BITS
}

/// Population count of the AND of all `sets`, which must share a length.
pub fn intersection_count(sets: &[&Bitset]) -> u64 {
    let (first, rest) = match sets.split_first() {
        Some(p) => p,
        None => return 0,
    };
    for s in rest {
        assert_eq!(s.len, first.len);
    }
    let mut count = 0;
    for (i, &word) in first.bits.iter().enumerate() {
        let w = rest.iter().fold(word, |acc, s| acc & s.bits[i]);
        count += w.count_ones() as u64;
    }
    count
}
