use crate::error::RecordError;
use crate::{DRAW_SIZE, MAX_NUMBER};

/// The numbers one participant picked, each in `1..=MAX_NUMBER`.
///
/// Repeats are allowed; they land on the same bit.
pub type Pick = [u8; DRAW_SIZE];

/// A whitespace separated field that parsed as an integer, or the raw text if it didn't.
pub(crate) enum Field<'a> {
    Int(i64),
    Garbage(&'a str),
}

/// Splits `line` into exactly `DRAW_SIZE` fields, or reports how many it found.
pub(crate) fn split_fields(line: &str) -> Result<[Field<'_>; DRAW_SIZE], usize> {
    let parts = line.split_whitespace().collect::<Vec<_>>();
    if parts.len() != DRAW_SIZE {
        return Err(parts.len());
    }
    let mut fields = [
        Field::Garbage(""),
        Field::Garbage(""),
        Field::Garbage(""),
        Field::Garbage(""),
        Field::Garbage(""),
    ];
    for (slot, part) in fields.iter_mut().zip(parts) {
        *slot = match part.parse::<i64>() {
            Ok(v) => Field::Int(v),
            Err(..) => Field::Garbage(part),
        };
    }
    Ok(fields)
}

pub(crate) fn in_universe(value: i64) -> Option<u8> {
    if value >= 1 && value <= MAX_NUMBER as i64 {
        Some(value as u8)
    } else {
        None
    }
}

/// Like `parse_record`, for a raw line that may not be UTF-8.
pub fn parse_record_bytes(line: &[u8]) -> Result<Pick, RecordError> {
    let line = std::str::from_utf8(line).map_err(|_| RecordError::NotUtf8)?;
    parse_record(line)
}

pub fn parse_record(line: &str) -> Result<Pick, RecordError> {
    let fields = split_fields(line).map_err(|found| RecordError::FieldCount { found })?;
    let mut pick = [0; DRAW_SIZE];
    for (slot, field) in pick.iter_mut().zip(fields.iter()) {
        *slot = match *field {
            Field::Int(value) => in_universe(value).ok_or(RecordError::OutOfRange { value })?,
            Field::Garbage(s) => {
                return Err(RecordError::NotAnInteger {
                    field: s.to_owned(),
                })
            }
        };
    }
    Ok(pick)
}
