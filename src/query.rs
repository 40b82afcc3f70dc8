use hashbrown::HashSet;

use crate::error::QueryError;
use crate::record::{in_universe, split_fields, Field};
use crate::DRAW_SIZE;

/// Five distinct winning numbers, each in `1..=MAX_NUMBER`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Query {
    numbers: [u8; DRAW_SIZE],
}

impl Query {
    pub fn new(numbers: [u8; DRAW_SIZE]) -> Result<Self, QueryError> {
        let mut seen = HashSet::with_capacity(DRAW_SIZE);
        for &n in &numbers {
            in_universe(n as i64).ok_or(QueryError::OutOfRange { value: n as i64 })?;
            if !seen.insert(n) {
                return Err(QueryError::DuplicateNumber { number: n });
            }
        }
        Ok(Self { numbers })
    }

    pub fn parse(line: &str) -> Result<Self, QueryError> {
        let fields = split_fields(line).map_err(|found| QueryError::FieldCount { found })?;
        let mut numbers = [0; DRAW_SIZE];
        for (slot, field) in numbers.iter_mut().zip(fields.iter()) {
            *slot = match *field {
                Field::Int(value) => in_universe(value).ok_or(QueryError::OutOfRange { value })?,
                Field::Garbage(s) => {
                    return Err(QueryError::NotAnInteger {
                        field: s.to_owned(),
                    })
                }
            };
        }
        Self::new(numbers)
    }

    pub fn numbers(&self) -> &[u8; DRAW_SIZE] {
        &self.numbers
    }
}
