use crate::bitset::{self, Bitset};
use crate::error::{Error, RecordError, Result};
use crate::record::Pick;
use crate::MAX_NUMBER;

/// Bit `i` of number `n`'s vector is set iff participant `i` picked `n`.
#[derive(Clone, Debug)]
pub struct PopulationIndex {
    sets: Vec<Bitset>,
    num_participants: usize,
}

// Skipped records still occupy their participant slot.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordDiagnostic {
    pub index: usize,
    pub error: RecordError,
}

#[derive(Debug)]
pub struct Build {
    pub index: PopulationIndex,
    pub diagnostics: Vec<RecordDiagnostic>,
}

impl PopulationIndex {
    /// Builds the index from `num_records` records given in source order.
    ///
    /// The vectors are sized from `num_records` up front, so the source must yield
    /// exactly that many records; anything else fails the whole build.
    pub fn build<I>(num_records: usize, records: I) -> Result<Build>
    where
        I: IntoIterator<Item = std::result::Result<Pick, RecordError>>,
    {
        let mut sets = (0..MAX_NUMBER).map(|_| Bitset::new(num_records)).collect::<Vec<_>>();
        let mut diagnostics = vec![];

        let mut processed = 0;
        for record in records {
            let i = processed;
            processed += 1;
            if i >= num_records {
                continue;
            }
            match record {
                Ok(pick) => {
                    for &n in &pick {
                        sets[n as usize - 1].set(i);
                    }
                }
                Err(error) => diagnostics.push(RecordDiagnostic { index: i, error }),
            }
        }
        if processed != num_records {
            return Err(Error::RecordCountMismatch {
                expected: num_records,
                actual: processed,
            });
        }

        let index = Self {
            sets,
            num_participants: num_records,
        };
        Ok(Build { index, diagnostics })
    }

    /// Panics if a pick holds a number outside the universe.
    pub fn from_picks(picks: &[Pick]) -> Self {
        let mut sets = (0..MAX_NUMBER).map(|_| Bitset::new(picks.len())).collect::<Vec<_>>();
        for (i, pick) in picks.iter().enumerate() {
            for &n in pick {
                sets[n as usize - 1].set(i);
            }
        }
        Self {
            sets,
            num_participants: picks.len(),
        }
    }

    pub fn num_participants(&self) -> usize {
        self.num_participants
    }

    pub fn num_words(&self) -> usize {
        bitset::words_for(self.num_participants)
    }

    pub fn membership(&self, number: u8) -> Option<&Bitset> {
        if number == 0 {
            return None;
        }
        self.sets.get(number as usize - 1)
    }

    pub(crate) fn vector(&self, number: u8) -> &Bitset {
        &self.sets[number as usize - 1]
    }

    /// How many participants picked every one of `numbers`.
    ///
    /// Panics if any number is outside the universe.
    pub fn intersection_count(&self, numbers: &[u8]) -> u64 {
        let sets = numbers
            .iter()
            .map(|&n| {
                self.membership(n)
                    .unwrap_or_else(|| panic!("Number {} outside 1..={}", n, MAX_NUMBER))
            })
            .collect::<Vec<_>>();
        bitset::intersection_count(&sets)
    }
}
